mod common;

pub mod api;
pub mod config;
pub mod macros;
pub mod resolve;
pub mod template;
