//! Interaction state for the gallery and the inspector.
//!
//! DESIGN
//! ======
//! Each component owns its state exclusively and exposes explicit
//! transition functions, so the whole interaction can be driven and
//! asserted on without a rendering environment. The inspector holds a
//! clone of the selected record and never mutates gallery data.

pub mod gallery;
pub mod inspector;
pub mod zoom;
