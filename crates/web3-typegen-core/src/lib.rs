//! Type mapping and template composition for web3.js contract bindings.

pub mod config;
pub mod error;
pub mod mapper;
pub mod template;

pub use config::TypegenConfig;
pub use error::TypegenError;
pub use mapper::{input_type, output_type};
pub use template::codegen;
