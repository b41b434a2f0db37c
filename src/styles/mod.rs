//! # Style System
//!
//! Style identities and the stylization capability seam.
//!
//! The catalog is a fixed ordered list of styles; index 0 is the reserved
//! passthrough entry, meaning no stylization at all. The [`Stylizer`] trait
//! is the boundary to the actual transformation (an on-device neural model
//! in the original system); the core never looks behind it.

pub mod catalog;
pub mod toy;
pub mod traits;

// Re-exports for convenience
pub use catalog::{Style, StyleCatalog, PASSTHROUGH_STYLE};
pub use toy::ToyStylizer;
pub use traits::Stylizer;
