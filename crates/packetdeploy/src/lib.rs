//! Command-line provisioning for the Packet bare metal API.
//!
//! The crate is split the way a request flows through `pd`:
//!
//! - [`cli`] and [`config`] turn flags and `PACKET_*` environment variables
//!   into an [`ApiConfig`].
//! - [`api`] is the authenticated client ([`PacketApi`]) and its models.
//! - [`commands`] runs one [`Command`], prompting for missing values through
//!   a [`Prompt`], and maps the result to an exit code.
//! - [`print`] renders records for the terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use packetdeploy::{ApiConfig, PacketApi};
//!
//! let config = ApiConfig::from(&cli.api);
//! let api = PacketApi::new(&config)?;
//! for device in api.get_devices(true).await? {
//!     println!("{} {}", device.hostname, device.state);
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod print;
pub mod prompt;

pub use api::{ApiError, PacketApi};
pub use cli::{Cli, Command};
pub use commands::{CommandError, Dispatcher, Outcome};
pub use config::ApiConfig;
pub use prompt::{Prompt, TerminalPrompt};
