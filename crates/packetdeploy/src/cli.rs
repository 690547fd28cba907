//! Command-line arguments.

use clap::{Args, Parser, ValueEnum};

use crate::config::{DEFAULT_HOST, ENV_AUTH, ENV_HOST, ENV_ORG, ENV_PROJECT};

/// pd - provision and manage Packet bare metal devices.
#[derive(Parser, Debug)]
#[command(name = "pd", version)]
#[command(about = "Provision and manage Packet bare metal devices")]
#[command(after_help = "These environment variables can be used instead of arguments:
  PACKET_HOST
  PACKET_AUTH
  PACKET_PROJECT
  PACKET_ORG")]
pub struct Cli {
    /// Command to run.
    #[arg(value_enum, ignore_case = true)]
    pub command: Command,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub add: AddArgs,

    #[command(flatten)]
    pub device: DeviceArgs,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

/// Supported commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Command {
    /// List devices, facilities, plans and operating systems.
    List,
    /// Show plan availability per facility.
    Capacity,
    /// Power on a device.
    PowerUp,
    /// Power off a device.
    PowerDown,
    /// Reboot a device.
    Reboot,
    /// Provision a new device.
    Add,
    /// Delete a device.
    Remove,
}

/// Connection arguments. Unset flags fall back to the environment.
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "API arguments")]
pub struct ApiArgs {
    /// Packet API url (or set `PACKET_HOST` env var).
    #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST)]
    pub host: String,

    /// API auth token (or set `PACKET_AUTH` env var) [Required].
    #[arg(long, env = ENV_AUTH, hide_env_values = true)]
    pub auth: Option<String>,

    /// Project id for associated devices (or set `PACKET_PROJECT` env var) [Required].
    #[arg(long, env = ENV_PROJECT)]
    pub project: Option<String>,

    /// Organization id for associated devices (or set `PACKET_ORG` env var).
    #[arg(long, env = ENV_ORG)]
    pub org: Option<String>,
}

/// Arguments for `add`. Anything missing is prompted for.
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "add arguments")]
pub struct AddArgs {
    /// Facility code.
    #[arg(long)]
    pub facility: Option<String>,

    /// Plan slug.
    #[arg(long)]
    pub plan: Option<String>,

    /// Operating system slug.
    #[arg(long)]
    pub os: Option<String>,

    /// Hostname.
    #[arg(long, default_value = "")]
    pub hostname: String,
}

/// Arguments for device lifecycle commands.
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "power_up/power_down/reboot/remove arguments")]
pub struct DeviceArgs {
    /// UUID of the device to act on.
    #[arg(long)]
    pub device_id: Option<String>,
}
