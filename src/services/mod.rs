//! Services — side-effecting coordination around the pure state types.
//!
//! DESIGN
//! ======
//! `session` owns the interaction state and spawns work; `download` moves
//! bytes from the byte-fetch boundary to local storage.

pub mod download;
pub mod session;
