//! Core domain entities representing the business data model.
//!
//! - [`ShortLink`] - A stored mapping from a generated id to a target URL
//! - [`LinkInput`] - Unvalidated link fields as received from a client
//! - [`LinkFields`] - Validated fields ready for storage

pub mod link;

pub use link::{ID_LENGTH, LinkFields, LinkInput, MAX_URL_LENGTH, ShortLink, parse_new_window};
