//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortcode registry record
//! - [`Click`] - A redirect served for a shortcode
//!
//! Creation inputs live in separate structs (`NewLink`, `NewClick`).

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
