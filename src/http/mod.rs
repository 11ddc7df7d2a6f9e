//! HTTP protocol layer module
//!
//! Request body handling and JSON response building, independent of the
//! individual mock routes.

pub mod body;
mod reply;
pub mod response;

// Re-export commonly used types
pub use body::{parse_json_body, read_body, BodyError};
pub use reply::Reply;
pub use response::{apply_cors, build_options_response};
