// CLI module for tune-transporter
//
// Argument parsing, output formatting and the batch driver around the library.

pub mod commands;
pub mod config;
pub mod output;
pub mod select;

pub use commands::run;
pub use config::Config;
