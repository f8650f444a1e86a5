//! Session issuance for verified phone numbers

mod service;

pub use service::SessionService;
