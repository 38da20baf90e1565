pub mod checker;
pub mod config;
pub mod console;
pub mod driver;
pub mod error;
pub mod fetch;
pub mod input;
pub mod logging;
pub mod report;
pub mod stats;
pub mod types;
