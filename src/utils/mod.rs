pub mod config;
pub mod json_parser;
pub mod logging;
pub mod middleware;
