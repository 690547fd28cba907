//! Packet API client implementation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::error::ApiError;
use super::models::{
    Capacity, CapacityEnvelope, CreateDeviceBody, Device, DeviceAction, DeviceEnvelope,
    DeviceUpdate, DevicesPage, ErrorBody, FacilitiesEnvelope, Facility, NewDevice,
    OperatingSystem, OperatingSystemsEnvelope, Plan, PlansEnvelope,
};
use crate::config::ApiConfig;

/// Header carrying the static auth token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("packetdeploy/", env!("CARGO_PKG_VERSION"));

/// Facility value that lets the API pick a location.
pub const ANY_FACILITY: &str = "any";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on device pages fetched in one listing.
const MAX_PAGES: u64 = 1000;

const CAPACITY_PATH: &str = "/capacity";
const FACILITIES_PATH: &str = "/facilities";
const PLANS_PATH: &str = "/plans";
const OPERATING_SYSTEMS_PATH: &str = "/operating-systems";
const DEVICES_PATH: &str = "/devices";

fn device_path(device_id: &str) -> String {
    format!("{DEVICES_PATH}/{device_id}")
}

fn device_action_path(device_id: &str) -> String {
    format!("{DEVICES_PATH}/{device_id}/actions")
}

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Authenticated gateway to the Packet API.
#[derive(Clone)]
pub struct PacketApi {
    /// HTTP client carrying auth and user agent headers.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Project scope.
    project: Option<String>,
    /// Organization scope, consulted only without a project.
    organization: Option<String>,
}

impl PacketApi {
    /// Create a new API client.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the host is not a URL or the project id
    /// or auth token is empty, and [`ApiError::Http`] if the HTTP client cannot
    /// be created.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config
            .host
            .trim_matches(|c| c == '/' || c == ' ')
            .to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::config(format!("invalid host '{}': {e}", config.host)))?;

        let project = non_blank(config.project.as_deref())
            .ok_or_else(|| ApiError::config("Project ID must be provided"))?;
        let auth = non_blank(config.auth.as_deref())
            .ok_or_else(|| ApiError::config("No auth token provided"))?;
        let organization = non_blank(config.organization.as_deref());

        let mut token = HeaderValue::from_str(&auth)
            .map_err(|_| ApiError::config("auth token contains invalid characters"))?;
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            project: Some(project),
            organization,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn project_url(&self, path: &str) -> String {
        let project = self.project.as_deref().unwrap_or_default();
        self.url(&format!("/projects/{project}{path}"))
    }

    fn organization_url(&self, path: &str) -> String {
        match &self.organization {
            Some(org) => self.url(&format!("/organizations/{org}{path}")),
            None => self.url(path),
        }
    }

    /// Project scope wins. `new` always sets a project, so the organization
    /// branch is not reachable through the public constructor today.
    fn project_or_org_url(&self, path: &str) -> String {
        if self.project.is_some() {
            self.project_url(path)
        } else {
            self.organization_url(path)
        }
    }

    /// Make an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "GET request");
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Make an authenticated GET request for one device page.
    async fn get_page(&self, url: &str, page: u64) -> Result<DevicesPage, ApiError> {
        debug!(url = %url, page, "GET request");
        let response = self
            .client
            .get(url)
            .query(&[("page", page)])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make an authenticated POST request.
    async fn post<T, B>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        debug!(url = %url, "POST request");
        let response = self.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make an authenticated PUT request, ignoring the response body.
    async fn put_empty<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        debug!(url = %url, "PUT request (empty response)");
        let response = self.client.put(url).json(body).send().await?;
        Self::check_status(response).await.map(drop)
    }

    /// Reject non-2xx responses, carrying the body's error messages.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let errors = serde_json::from_str::<ErrorBody>(&text)
            .map(ErrorBody::into_messages)
            .unwrap_or_default();
        debug!(status = status.as_u16(), body = %text, "API returned error");
        Err(ApiError::Status {
            status: status.as_u16(),
            errors,
        })
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            debug!(error = %e, body = %text, "Failed to parse response");
            ApiError::Serialization(e)
        })
    }

    /// Get plan availability per facility.
    ///
    /// # Errors
    /// Returns error if the request fails or the body cannot be decoded.
    pub async fn get_capacity(&self) -> Result<Capacity, ApiError> {
        let envelope: CapacityEnvelope = self.get(&self.project_url(CAPACITY_PATH)).await?;
        Ok(envelope.capacity)
    }

    /// List facilities visible to the project.
    ///
    /// # Errors
    /// Returns error if the request fails or the body cannot be decoded.
    pub async fn get_facilities(&self) -> Result<Vec<Facility>, ApiError> {
        let envelope: FacilitiesEnvelope = self.get(&self.project_url(FACILITIES_PATH)).await?;
        Ok(envelope.facilities)
    }

    /// List plans visible to the project.
    ///
    /// # Errors
    /// Returns error if the request fails or the body cannot be decoded.
    pub async fn get_plans(&self) -> Result<Vec<Plan>, ApiError> {
        let envelope: PlansEnvelope = self.get(&self.project_url(PLANS_PATH)).await?;
        Ok(envelope.plans)
    }

    /// List all operating systems.
    ///
    /// # Errors
    /// Returns error if the request fails or the body cannot be decoded.
    pub async fn get_operating_systems(&self) -> Result<Vec<OperatingSystem>, ApiError> {
        let envelope: OperatingSystemsEnvelope =
            self.get(&self.url(OPERATING_SYSTEMS_PATH)).await?;
        Ok(envelope.operating_systems)
    }

    /// List devices. With `fetch_all`, follows pagination to the last page.
    ///
    /// # Errors
    /// Returns error if any page request fails, or [`ApiError::Pagination`] if
    /// the server never reports reaching its last page.
    pub async fn get_devices(&self, fetch_all: bool) -> Result<Vec<Device>, ApiError> {
        let url = self.project_or_org_url(DEVICES_PATH);
        if !fetch_all {
            let page: DevicesPage = self.get(&url).await?;
            return Ok(page.devices);
        }

        let mut page = self.get_page(&url, 1).await?;
        let mut devices = std::mem::take(&mut page.devices);
        let mut fetched = 1;

        while let Some(meta) = page.meta {
            if meta.current_page >= meta.last_page {
                break;
            }
            if fetched >= MAX_PAGES {
                return Err(ApiError::Pagination {
                    page: meta.current_page,
                    last_page: meta.last_page,
                });
            }

            page = self.get_page(&url, meta.current_page + 1).await?;
            fetched += 1;

            if let Some(next) = page.meta {
                if next.current_page <= meta.current_page {
                    return Err(ApiError::Pagination {
                        page: next.current_page,
                        last_page: next.last_page,
                    });
                }
            }
            devices.append(&mut page.devices);
        }

        debug!(count = devices.len(), pages = fetched, "Fetched devices");
        Ok(devices)
    }

    /// Provision a new device in the project.
    ///
    /// A missing facility defaults to [`ANY_FACILITY`].
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] without sending anything if plan or
    /// operating system is missing, otherwise any request error.
    pub async fn create_device(&self, new: NewDevice) -> Result<Device, ApiError> {
        let facility = non_blank(new.facility.as_deref()).unwrap_or_else(|| ANY_FACILITY.into());
        let plan = non_blank(new.plan.as_deref())
            .ok_or_else(|| ApiError::config("New device must have \"plan\" defined"))?;
        let operating_system = non_blank(new.operating_system.as_deref()).ok_or_else(|| {
            ApiError::config("New device must have \"operating_system\" defined")
        })?;

        info!(
            hostname = %new.hostname,
            plan = %plan,
            facility = %facility,
            operating_system = %operating_system,
            "Creating device"
        );

        let body = CreateDeviceBody {
            plan,
            facility,
            operating_system,
            hostname: new.hostname.trim().to_string(),
        };
        let device: Device = self.post(&self.project_url(DEVICES_PATH), &body).await?;

        info!(device_id = %device.id, state = %device.state, "Device created");
        Ok(device)
    }

    /// Get a device by id.
    ///
    /// # Errors
    /// Returns error if the request fails or the body cannot be decoded.
    pub async fn get_device(&self, device_id: &str) -> Result<Device, ApiError> {
        let envelope: DeviceEnvelope = self.get(&self.url(&device_path(device_id))).await?;
        Ok(envelope.device)
    }

    /// Update fields of a device.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_device(
        &self,
        device_id: &str,
        update: &DeviceUpdate,
    ) -> Result<(), ApiError> {
        info!(device_id = %device_id, "Updating device");
        self.put_empty(&self.url(&device_path(device_id)), update)
            .await
    }

    /// Delete a device.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_device(&self, device_id: &str, force_delete: bool) -> Result<(), ApiError> {
        let url = self.url(&device_path(device_id));
        info!(device_id = %device_id, force_delete, "Deleting device");
        debug!(url = %url, "DELETE request");

        let response = self
            .client
            .delete(&url)
            .query(&[("force_delete", force_delete)])
            .send()
            .await?;
        Self::check_status(response).await?;

        info!(device_id = %device_id, "Device deleted");
        Ok(())
    }

    /// Run a power action on a device.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn device_action(
        &self,
        device_id: &str,
        action: DeviceAction,
    ) -> Result<(), ApiError> {
        let url = self.url(&device_action_path(device_id));
        info!(device_id = %device_id, action = %action, "Running device action");
        debug!(url = %url, "POST request (empty response)");

        let response = self
            .client
            .post(&url)
            .query(&[("type", action.as_str())])
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            host: server.uri(),
            auth: Some("secret".into()),
            project: Some("proj".into()),
            organization: None,
        }
    }

    fn api_for(server: &MockServer) -> PacketApi {
        PacketApi::new(&config_for(server)).unwrap()
    }

    fn device_json(id: &str, hostname: &str) -> serde_json::Value {
        json!({"id": id, "hostname": hostname, "state": "active"})
    }

    fn page_json(ids: &[&str], current: u64, last: u64) -> serde_json::Value {
        let devices: Vec<_> = ids.iter().map(|id| device_json(id, id)).collect();
        json!({
            "devices": devices,
            "meta": {"current_page": current, "last_page": last}
        })
    }

    /// Serves whatever page was asked for, always short of a distant last page.
    struct EndlessPages {
        last_page: u64,
    }

    impl Respond for EndlessPages {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let page = request
                .url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse::<u64>().ok())
                .unwrap_or(1);
            ResponseTemplate::new(200).set_body_json(page_json(&["a1"], page, self.last_page))
        }
    }

    async fn assert_no_requests(server: &MockServer) {
        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty(), "unexpected requests: {requests:?}");
    }

    #[test]
    fn test_new_rejects_blank_project() {
        let config = ApiConfig {
            host: "https://api.packet.net".into(),
            auth: Some("secret".into()),
            project: Some("   ".into()),
            organization: None,
        };
        let err = PacketApi::new(&config).err().unwrap();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("Project")));
    }

    #[test]
    fn test_new_rejects_missing_auth() {
        let config = ApiConfig {
            host: "https://api.packet.net".into(),
            auth: Some(" \t".into()),
            project: Some("proj".into()),
            organization: None,
        };
        let err = PacketApi::new(&config).err().unwrap();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains("auth")));
    }

    #[test]
    fn test_new_rejects_invalid_host() {
        let config = ApiConfig {
            host: "not a url".into(),
            auth: Some("secret".into()),
            project: Some("proj".into()),
            organization: None,
        };
        assert!(matches!(PacketApi::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_url_scoping() {
        let mut api = PacketApi::new(&ApiConfig {
            host: " https://api.packet.net/ ".into(),
            auth: Some("secret".into()),
            project: Some(" proj ".into()),
            organization: Some("org".into()),
        })
        .unwrap();

        assert_eq!(
            api.project_url(PLANS_PATH),
            "https://api.packet.net/projects/proj/plans"
        );
        assert_eq!(
            api.project_or_org_url(DEVICES_PATH),
            "https://api.packet.net/projects/proj/devices"
        );
        assert_eq!(
            api.url(&device_action_path("d1")),
            "https://api.packet.net/devices/d1/actions"
        );

        api.project = None;
        assert_eq!(
            api.project_or_org_url(DEVICES_PATH),
            "https://api.packet.net/organizations/org/devices"
        );

        api.organization = None;
        assert_eq!(
            api.project_or_org_url(DEVICES_PATH),
            "https://api.packet.net/devices"
        );
    }

    #[tokio::test]
    async fn test_requests_carry_auth_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/plans"))
            .and(header(AUTH_HEADER, "secret"))
            .and(header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "plans": [{"slug": "baremetal_0", "name": "Type 0", "line": "baremetal"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plans = api_for(&server).get_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].line, "baremetal");
    }

    #[tokio::test]
    async fn test_get_capacity_and_facilities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/capacity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "capacity": {"ewr1": {"baremetal_0": {"level": "normal", "servers": 12}}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/facilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "facilities": [{"code": "ewr1", "name": "Parsippany, NJ", "features": ["baremetal"]}]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let capacity = api.get_capacity().await.unwrap();
        assert_eq!(capacity["ewr1"]["baremetal_0"].servers, Some(12));

        let facilities = api.get_facilities().await.unwrap();
        assert_eq!(facilities[0].code, "ewr1");
        assert!(facilities[0].supports("baremetal"));
    }

    #[tokio::test]
    async fn test_operating_systems_are_global() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/operating-systems"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "operating_systems": [
                    {"slug": "ubuntu_16_04", "name": "Ubuntu 16.04", "provisionable_on": ["baremetal_0"]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let systems = api_for(&server).get_operating_systems().await.unwrap();
        assert!(systems[0].runs_on("baremetal_0"));
    }

    #[tokio::test]
    async fn test_get_devices_fetches_all_pages_in_order() {
        let server = MockServer::start().await;
        for (page, ids) in [(1, ["a1", "a2"]), (2, ["b1", "b2"]), (3, ["c1", "c2"])] {
            Mock::given(method("GET"))
                .and(path("/projects/proj/devices"))
                .and(query_param("page", page.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&ids, page, 3)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let devices = api_for(&server).get_devices(true).await.unwrap();
        let ids: Vec<_> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "b1", "b2", "c1", "c2"]);
    }

    #[tokio::test]
    async fn test_get_devices_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["a1"], 1, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let devices = api_for(&server).get_devices(false).await.unwrap();
        assert_eq!(devices.len(), 1);
    }

    #[tokio::test]
    async fn test_get_devices_without_meta_is_one_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/devices"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"devices": [device_json("a1", "web-1")]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let devices = api_for(&server).get_devices(true).await.unwrap();
        assert_eq!(devices[0].hostname, "web-1");
    }

    #[tokio::test]
    async fn test_get_devices_stops_when_pages_do_not_advance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["a1"], 1, 5)))
            .expect(2)
            .mount(&server)
            .await;

        let err = api_for(&server).get_devices(true).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Pagination {
                page: 1,
                last_page: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_get_devices_stops_at_page_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/devices"))
            .respond_with(EndlessPages {
                last_page: 1_000_000,
            })
            .expect(MAX_PAGES)
            .mount(&server)
            .await;

        let err = api_for(&server).get_devices(true).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Pagination {
                page: MAX_PAGES,
                last_page: 1_000_000
            }
        ));
    }

    #[tokio::test]
    async fn test_create_device_defaults_facility_to_any() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/proj/devices"))
            .and(body_json(json!({
                "plan": "baremetal_0",
                "facility": "any",
                "operating_system": "ubuntu_16_04",
                "hostname": "web-1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "d1", "hostname": "web-1", "state": "provisioning"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let device = api_for(&server)
            .create_device(NewDevice {
                plan: Some("baremetal_0".into()),
                facility: None,
                operating_system: Some("ubuntu_16_04".into()),
                hostname: " web-1 ".into(),
            })
            .await
            .unwrap();
        assert_eq!(device.state, "provisioning");
    }

    #[tokio::test]
    async fn test_create_device_without_plan_sends_nothing() {
        let server = MockServer::start().await;
        let err = api_for(&server)
            .create_device(NewDevice {
                plan: None,
                facility: Some("ewr1".into()),
                operating_system: Some("ubuntu_16_04".into()),
                hostname: "web-1".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Config(msg) if msg.contains("plan")));
        assert_no_requests(&server).await;
    }

    #[tokio::test]
    async fn test_create_device_without_os_sends_nothing() {
        let server = MockServer::start().await;
        let err = api_for(&server)
            .create_device(NewDevice {
                plan: Some("baremetal_0".into()),
                operating_system: Some(String::new()),
                ..NewDevice::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Config(msg) if msg.contains("operating_system")));
        assert_no_requests(&server).await;
    }

    #[tokio::test]
    async fn test_non_success_carries_error_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/proj/devices"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"errors": ["hostname already in use"]})),
            )
            .mount(&server)
            .await;

        let err = api_for(&server)
            .create_device(NewDevice {
                plan: Some("baremetal_0".into()),
                facility: Some("ewr1".into()),
                operating_system: Some("ubuntu_16_04".into()),
                hostname: "web-1".into(),
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, errors } => {
                assert_eq!(status, 422);
                assert_eq!(errors, vec!["hostname already in use".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_has_no_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/facilities"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).get_facilities().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, errors } if errors.is_empty()));
    }

    #[tokio::test]
    async fn test_get_and_update_device() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/devices/d1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"device": device_json("d1", "web-1")})),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/devices/d1"))
            .and(body_json(json!({"hostname": "web-2", "locked": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_json("d1", "web-2")))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let device = api.get_device("d1").await.unwrap();
        assert_eq!(device.hostname, "web-1");

        let update = DeviceUpdate {
            hostname: Some("web-2".into()),
            locked: Some(true),
            ..DeviceUpdate::default()
        };
        api.update_device("d1", &update).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_device_sends_force_flag() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/devices/d1"))
            .and(query_param("force_delete", "false"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        api_for(&server).delete_device("d1", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_device_action_sends_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/devices/d1/actions"))
            .and(query_param("type", "reboot"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        api_for(&server)
            .device_action("d1", DeviceAction::Reboot)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_device_action_failure_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/devices/d1/actions"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"errors": ["Not found"]})),
            )
            .mount(&server)
            .await;

        let err = api_for(&server)
            .device_action("d1", DeviceAction::PowerOn)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }
}
