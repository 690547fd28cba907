//! Packet API request and response models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Device types
// ============================================================================

/// Device resource from API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Device {
    /// Device UUID.
    pub id: String,
    /// Device hostname.
    pub hostname: String,
    /// Lifecycle state (`provisioning`, `active`, `inactive`, ...).
    pub state: String,
    /// Plan the device was created with.
    #[serde(default)]
    pub plan: Option<PlanRef>,
    /// Facility hosting the device.
    #[serde(default)]
    pub facility: Option<FacilityRef>,
    /// Operating system installed on the device.
    #[serde(default)]
    pub operating_system: Option<OperatingSystemRef>,
}

/// Plan reference embedded in a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanRef {
    /// Plan slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Facility reference embedded in a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FacilityRef {
    /// Facility code.
    #[serde(default)]
    pub code: Option<String>,
}

/// Operating system reference embedded in a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatingSystemRef {
    /// Operating system slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Device list page.
#[derive(Debug, Deserialize)]
pub struct DevicesPage {
    /// Devices on this page.
    pub devices: Vec<Device>,
    /// Pagination metadata. Absent means a single page.
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageMeta {
    /// Page returned by this response (1-based).
    pub current_page: u64,
    /// Last page available.
    pub last_page: u64,
}

/// Single device envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceEnvelope {
    pub device: Device,
}

// ============================================================================
// Reference collections
// ============================================================================

/// Data-center facility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Facility {
    /// Facility code (e.g. `ewr1`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Capabilities, including the plan lines the facility supports.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Facility {
    /// Whether this facility supports the given plan line.
    #[must_use]
    pub fn supports(&self, line: &str) -> bool {
        self.features.iter().any(|f| f == line)
    }
}

/// Hardware plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plan {
    /// Plan slug (e.g. `baremetal_0`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Plan line, matched against facility features.
    #[serde(default)]
    pub line: String,
}

/// Operating system image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatingSystem {
    /// OS slug (e.g. `ubuntu_16_04`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Plan slugs this image can be provisioned on.
    #[serde(default)]
    pub provisionable_on: Vec<String>,
}

impl OperatingSystem {
    /// Whether this image can be provisioned on the given plan slug.
    #[must_use]
    pub fn runs_on(&self, plan_slug: &str) -> bool {
        self.provisionable_on.iter().any(|p| p == plan_slug)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FacilitiesEnvelope {
    pub facilities: Vec<Facility>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlansEnvelope {
    pub plans: Vec<Plan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OperatingSystemsEnvelope {
    pub operating_systems: Vec<OperatingSystem>,
}

// ============================================================================
// Capacity types
// ============================================================================

/// Availability of one plan in one facility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CapacityLevel {
    /// Availability level (`normal`, `limited`, `unavailable`).
    pub level: String,
    /// Number of servers available, when reported.
    #[serde(default)]
    pub servers: Option<u64>,
}

/// Facility code -> plan slug -> availability. Ordered so rendering is stable.
pub type Capacity = BTreeMap<String, BTreeMap<String, CapacityLevel>>;

#[derive(Debug, Deserialize)]
pub(crate) struct CapacityEnvelope {
    pub capacity: Capacity,
}

// ============================================================================
// Request types
// ============================================================================

/// Fields for a device creation request, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDevice {
    /// Plan slug. Required.
    pub plan: Option<String>,
    /// Facility code. Defaults to `any`.
    pub facility: Option<String>,
    /// Operating system slug. Required.
    pub operating_system: Option<String>,
    /// Device hostname.
    pub hostname: String,
}

/// Request body for creating a device.
#[derive(Debug, Serialize)]
pub(crate) struct CreateDeviceBody {
    pub plan: String,
    pub facility: String,
    pub operating_system: String,
    pub hostname: String,
}

/// Partial device update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Device power actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAction {
    PowerOn,
    PowerOff,
    Reboot,
}

impl DeviceAction {
    /// Value of the `type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => "power_on",
            Self::PowerOff => "power_off",
            Self::Reboot => "reboot",
        }
    }
}

impl std::fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error body
// ============================================================================

/// Error body returned on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Flatten into a list of messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        let mut messages = self.errors;
        if let Some(error) = self.error {
            messages.push(error);
        }
        messages
    }
}
