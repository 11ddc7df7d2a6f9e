//! Request handler module
//!
//! Responsible for request dispatch to the registered mock routes.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
