//! Utility functions for shortcode handling, URL checks and request metadata.
//!
//! - [`code_generator`] - Shortcode generation and validation
//! - [`url_validator`] - Original URL validation
//! - [`client_origin`] - Click origin and referrer extraction from HTTP headers

pub mod client_origin;
pub mod code_generator;
pub mod url_validator;
