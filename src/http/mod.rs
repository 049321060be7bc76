//! HTTP protocol layer module
//!
//! Response builders and body parsing helpers, decoupled from route logic.

pub mod body;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_health_response, build_html_response, build_options_response,
    json_response,
};
