//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from request routing.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_cors, build_403_response, build_404_response, build_405_response,
    build_options_response,
};
