//! Command dispatch and interactive flows.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, DeviceAction, Facility, NewDevice, OperatingSystem, PacketApi, Plan};
use crate::cli::{AddArgs, Cli, Command};
use crate::print::{
    print_capacity, print_devices, print_errors, print_facilities, print_operating_systems,
    print_plans,
};
use crate::prompt::Prompt;

/// Failures that abort a command. Local validation problems are reported
/// through [`Outcome::Failure`] instead.
#[derive(Error, Debug)]
pub enum CommandError {
    /// API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading the prompt or writing output failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Reported to the user already (not found, empty input).
    Failure,
}

impl Outcome {
    /// Process exit code.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Facilities whose features include the plan's line.
#[must_use]
pub fn facilities_for_plan(facilities: Vec<Facility>, plan: &Plan) -> Vec<Facility> {
    facilities
        .into_iter()
        .filter(|f| f.supports(&plan.line))
        .collect()
}

/// Operating systems provisionable on the plan.
#[must_use]
pub fn operating_systems_for_plan(
    operating_systems: Vec<OperatingSystem>,
    plan: &Plan,
) -> Vec<OperatingSystem> {
    operating_systems
        .into_iter()
        .filter(|os| os.runs_on(&plan.slug))
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Runs one command against the API, prompting for anything missing.
pub struct Dispatcher<'a, P, W> {
    api: &'a PacketApi,
    prompt: P,
    out: W,
}

impl<'a, P: Prompt, W: Write> Dispatcher<'a, P, W> {
    #[must_use]
    pub fn new(api: &'a PacketApi, prompt: P, out: W) -> Self {
        Self { api, prompt, out }
    }

    /// Run the command selected on the command line and return the exit code.
    ///
    /// API error responses are printed with their messages; any other failure
    /// is reported on stderr. Both exit with 1.
    pub async fn run(&mut self, cli: &Cli) -> u8 {
        debug!(command = ?cli.command, "Dispatching command");

        match self.dispatch(cli).await {
            Ok(outcome) => outcome.exit_code(),
            Err(CommandError::Api(ApiError::Status { status, errors })) => {
                debug!(status, count = errors.len(), "API request rejected");
                if let Err(e) = print_errors(&mut self.out, &errors) {
                    eprintln!("Error: {e}");
                }
                Outcome::Failure.exit_code()
            }
            Err(e) => {
                debug!(error = ?e, "Command failed");
                eprintln!("Error: {e}");
                Outcome::Failure.exit_code()
            }
        }
    }

    async fn dispatch(&mut self, cli: &Cli) -> Result<Outcome, CommandError> {
        let device_id = cli.device.device_id.as_deref();
        match cli.command {
            Command::List => self.list().await,
            Command::Capacity => self.capacity().await,
            Command::PowerUp => self.power(device_id, DeviceAction::PowerOn).await,
            Command::PowerDown => self.power(device_id, DeviceAction::PowerOff).await,
            Command::Reboot => self.power(device_id, DeviceAction::Reboot).await,
            Command::Add => self.add(&cli.add).await,
            Command::Remove => self.remove(device_id).await,
        }
    }

    async fn list(&mut self) -> Result<Outcome, CommandError> {
        print_devices(&mut self.out, &self.api.get_devices(true).await?)?;
        print_facilities(&mut self.out, &self.api.get_facilities().await?)?;
        print_plans(&mut self.out, &self.api.get_plans().await?)?;
        print_operating_systems(&mut self.out, &self.api.get_operating_systems().await?)?;
        Ok(Outcome::Success)
    }

    async fn capacity(&mut self) -> Result<Outcome, CommandError> {
        print_capacity(&mut self.out, &self.api.get_capacity().await?)?;
        Ok(Outcome::Success)
    }

    async fn power(
        &mut self,
        device_id: Option<&str>,
        action: DeviceAction,
    ) -> Result<Outcome, CommandError> {
        let verb = match action {
            DeviceAction::PowerOn => "power on",
            DeviceAction::PowerOff => "power off",
            DeviceAction::Reboot => "reboot",
        };
        let Some(device_id) = self.select_device(device_id, verb).await? else {
            return Ok(Outcome::Failure);
        };

        self.api.device_action(&device_id, action).await?;

        let confirmation = match action {
            DeviceAction::PowerOn => "Device powered on",
            DeviceAction::PowerOff => "Device powered off",
            DeviceAction::Reboot => "Device rebooted",
        };
        writeln!(self.out, "{confirmation}")?;
        Ok(Outcome::Success)
    }

    async fn remove(&mut self, device_id: Option<&str>) -> Result<Outcome, CommandError> {
        let Some(device_id) = self.select_device(device_id, "remove").await? else {
            return Ok(Outcome::Failure);
        };

        self.api.delete_device(&device_id, false).await?;
        writeln!(self.out, "Device removed")?;
        Ok(Outcome::Success)
    }

    /// Resolve the target device, prompting when no id was given.
    ///
    /// An id passed on the command line is used without checking that the
    /// device exists; only a prompted id is matched against the device list.
    /// Returns `None` after reporting an unknown id.
    async fn select_device(
        &mut self,
        device_id: Option<&str>,
        verb: &str,
    ) -> Result<Option<String>, CommandError> {
        if let Some(id) = non_blank(device_id) {
            return Ok(Some(id.to_string()));
        }

        let devices = self.api.get_devices(true).await?;
        print_devices(&mut self.out, &devices)?;
        let answer = self
            .prompt
            .ask(&format!("Specify the device UUID to {verb}"))?;
        let id = answer.trim();

        if devices.iter().any(|d| d.id == id) {
            Ok(Some(id.to_string()))
        } else {
            writeln!(self.out, "Device not found")?;
            Ok(None)
        }
    }

    async fn add(&mut self, args: &AddArgs) -> Result<Outcome, CommandError> {
        let plans = self.api.get_plans().await?;

        let plan_slug = match non_blank(args.plan.as_deref()) {
            Some(slug) => slug.to_string(),
            None => {
                print_plans(&mut self.out, &plans)?;
                self.prompt.ask("Enter plan slug")?.trim().to_string()
            }
        };
        let Some(plan) = plans.iter().find(|p| p.slug == plan_slug) else {
            writeln!(self.out, "{plan_slug} not found")?;
            return Ok(Outcome::Failure);
        };

        // Explicit facility and OS values are sent as given; filtering only
        // narrows what is suggested.
        let facility = match non_blank(args.facility.as_deref()) {
            Some(code) => code.to_string(),
            None => {
                let suggestions = facilities_for_plan(self.api.get_facilities().await?, plan);
                print_facilities(&mut self.out, &suggestions)?;
                self.prompt.ask("Enter facility code")?.trim().to_string()
            }
        };

        let operating_system = match non_blank(args.os.as_deref()) {
            Some(slug) => slug.to_string(),
            None => {
                let suggestions =
                    operating_systems_for_plan(self.api.get_operating_systems().await?, plan);
                print_operating_systems(&mut self.out, &suggestions)?;
                self.prompt
                    .ask("Enter an operating system slug")?
                    .trim()
                    .to_string()
            }
        };
        if operating_system.is_empty() {
            writeln!(self.out, "An operating system must be entered")?;
            return Ok(Outcome::Failure);
        }

        let mut hostname = args.hostname.trim().to_string();
        if hostname.is_empty() {
            hostname = self.prompt.ask("Enter a hostname")?.trim().to_string();
            if hostname.is_empty() {
                writeln!(self.out, "A hostname must be entered")?;
                return Ok(Outcome::Failure);
            }
        }

        writeln!(self.out, "Creating device...")?;
        let device = self
            .api
            .create_device(NewDevice {
                plan: Some(plan.slug.clone()),
                facility: Some(facility),
                operating_system: Some(operating_system),
                hostname,
            })
            .await?;

        writeln!(
            self.out,
            "Created device: {} state: {}",
            device.hostname, device.state
        )?;
        Ok(Outcome::Success)
    }
}
