use super::*;

fn entry(id: &str, author: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "author": author,
        "width": 5616,
        "height": 3744,
        "url": format!("https://unsplash.com/photos/{id}"),
        "download_url": format!("https://picsum.photos/id/{id}/5616/3744")
    })
}

#[test]
fn parse_full_page() {
    let entries: Vec<serde_json::Value> = (0..12).map(|i| entry(&i.to_string(), "Alejandro Escamilla")).collect();
    let json = serde_json::Value::Array(entries).to_string();

    let records = parse_page(&json).unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(records[0].id, "0");
    assert_eq!(records[11].id, "11");
}

#[test]
fn parse_maps_wire_fields() {
    let json = serde_json::json!([entry("abc", "Paul Jarvis")]).to_string();

    let records = parse_page(&json).unwrap();
    let r = &records[0];
    assert_eq!(r.id, "abc");
    assert_eq!(r.author, "Paul Jarvis");
    assert_eq!(r.source_url, "https://picsum.photos/id/abc/5616/3744");
    assert_eq!(r.width, 5616);
    assert_eq!(r.height, 3744);
    assert_eq!(r.page_url.as_deref(), Some("https://unsplash.com/photos/abc"));
}

#[test]
fn parse_short_last_page() {
    let json = serde_json::json!([entry("1", "a"), entry("2", "b"), entry("3", "c")]).to_string();
    assert_eq!(parse_page(&json).unwrap().len(), 3);
}

#[test]
fn parse_empty_array() {
    assert!(parse_page("[]").unwrap().is_empty());
}

#[test]
fn parse_page_url_optional() {
    let json = serde_json::json!([{
        "id": "7",
        "author": "x",
        "width": 10,
        "height": 20,
        "download_url": "https://picsum.photos/id/7/10/20"
    }])
    .to_string();

    let records = parse_page(&json).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].page_url.is_none());
}

#[test]
fn parse_skips_malformed_entries() {
    let json = serde_json::json!([
        entry("1", "a"),
        { "id": "2", "author": "missing url", "width": 10, "height": 10 },
        { "id": "3", "author": "bad width", "width": "wide", "height": 10, "download_url": "u" },
        entry("4", "d")
    ])
    .to_string();

    let records = parse_page(&json).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);
}

#[test]
fn parse_skips_zero_dimensions() {
    let json = serde_json::json!([
        { "id": "1", "author": "a", "width": 0, "height": 10, "download_url": "u" },
        entry("2", "b")
    ])
    .to_string();

    let records = parse_page(&json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "2");
}

#[test]
fn parse_non_array_is_decode_error() {
    let err = parse_page(r#"{"error":"rate limited"}"#).unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[test]
fn parse_invalid_json_is_decode_error() {
    let err = parse_page("<html>oops</html>").unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[test]
fn client_builds_from_default_config() {
    let config = GalleryConfig::default();
    let client = PicsumClient::new(&config).unwrap();
    assert_eq!(client.list_url, config.list_url);
}
