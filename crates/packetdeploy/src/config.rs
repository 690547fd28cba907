//! API configuration resolved from flags, environment, and defaults.
//!
//! Layering (flag, then `PACKET_*` variable, then default) is done by clap
//! while parsing [`ApiArgs`]; this module only names the variables and turns
//! the parsed arguments into an [`ApiConfig`].

use crate::cli::ApiArgs;

/// Default API endpoint.
pub const DEFAULT_HOST: &str = "https://api.packet.net";

/// Environment variable for the API endpoint.
pub const ENV_HOST: &str = "PACKET_HOST";
/// Environment variable for the auth token.
pub const ENV_AUTH: &str = "PACKET_AUTH";
/// Environment variable for the project id.
pub const ENV_PROJECT: &str = "PACKET_PROJECT";
/// Environment variable for the organization id.
pub const ENV_ORG: &str = "PACKET_ORG";

/// Connection settings for [`PacketApi`](crate::api::PacketApi).
///
/// Values are taken verbatim here; trimming and emptiness checks happen when
/// the client is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the API.
    pub host: String,
    /// Auth token sent as `X-Auth-Token`.
    pub auth: Option<String>,
    /// Project id scoping device, plan, facility and capacity calls.
    pub project: Option<String>,
    /// Organization id, used only when no project is set.
    pub organization: Option<String>,
}

impl From<&ApiArgs> for ApiConfig {
    fn from(args: &ApiArgs) -> Self {
        Self {
            host: args.host.clone(),
            auth: args.auth.clone(),
            project: args.project.clone(),
            organization: args.org.clone(),
        }
    }
}
