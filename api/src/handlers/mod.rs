//! Translation of domain and extractor errors into HTTP responses

pub mod error;

pub use error::{domain_error_response, form_error_handler, json_error_handler, status_for};
