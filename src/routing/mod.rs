//! Routing module
//!
//! Provides method + path routing for registered handlers:
//! - Path patterns with `:name` parameters
//! - Static segments preferred over parameters
//! - `HEAD` served by `GET` routes

mod matcher;
mod table;

pub use matcher::Params;
pub use table::RouteTable;
