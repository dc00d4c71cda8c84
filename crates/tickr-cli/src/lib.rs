//! # tickr-cli
//!
//! Command-line front end for tickr:
//! - `serve` runs the MCP server on stdio
//! - `price`, `info` and `tickers` call the same tools from a shell
//! - `config` inspects and edits the TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
