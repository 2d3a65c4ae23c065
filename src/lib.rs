pub mod client;
pub mod config;
pub mod env;
pub mod logging;
pub mod output;
pub mod workflow;
