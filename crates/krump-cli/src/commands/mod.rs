//! CLI command implementations.

pub mod common;
pub mod decode;
pub mod mock;
pub mod render;
pub mod version;
