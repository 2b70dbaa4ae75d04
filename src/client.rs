use std::sync::Arc;

use serde_json::Value;

use crate::config::DrivvoConfig;
use crate::credential::Credentials;
use crate::error::Result;
use crate::fuel_log::sort_fuel_log;
use crate::http::{self, RawResponse};
use crate::hub::Hub;
use crate::types::{AuthOutcome, DataKind, FuelLogEntry, LoginResponse, SessionToken, VehicleData, VehicleId};

const VEHICLES_PATH: &str = "veiculo/web";

/// Client for the Drivvo REST API.
///
/// Every network call is blocking at the wire level and goes through the
/// hub's [`Hub::run_blocking`]. Tokens are never cached: each data fetch
/// logs in again.
pub struct DrivvoClient<H> {
    hub: Arc<H>,
    config: DrivvoConfig,
}

impl<H: Hub> DrivvoClient<H> {
    pub fn new(hub: Arc<H>) -> Self {
        Self::with_config(hub, DrivvoConfig::default())
    }

    pub fn with_config(hub: Arc<H>, config: DrivvoConfig) -> Self {
        Self { hub, config }
    }

    pub fn hub(&self) -> &Arc<H> {
        &self.hub
    }

    pub fn config(&self) -> &DrivvoConfig {
        &self.config
    }

    /// Log in with `credentials`.
    ///
    /// A rejected login is an expected outcome and comes back as
    /// [`AuthOutcome::Rejected`], as does any transport failure.
    pub async fn authenticate(&self, credentials: &Credentials, want_token: bool) -> AuthOutcome {
        let url = self.config.login_url.clone();
        let email = credentials.email.clone();
        let digest = credentials.password_digest();

        let response = match self
            .offload(move || {
                http::post_form(&url, &[("email", email.as_str()), ("senha", digest.as_str())])
            })
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Login request failed: {}", e);
                return AuthOutcome::Rejected;
            }
        };

        if !response.is_success() {
            tracing::debug!("Login rejected with status {}", response.status);
            return AuthOutcome::Rejected;
        }

        if !want_token {
            return AuthOutcome::Accepted;
        }

        match serde_json::from_str::<LoginResponse>(&response.body) {
            Ok(LoginResponse { token: Some(token) }) if !token.is_empty() => {
                AuthOutcome::Token(SessionToken::new(token))
            }
            Ok(_) => {
                tracing::warn!("Login accepted but no token in response");
                AuthOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!("Failed to parse login response: {}", e);
                AuthOutcome::Accepted
            }
        }
    }

    /// List the vehicles visible to `token`.
    pub async fn list_vehicles(&self, token: &SessionToken) -> Option<Value> {
        let body = self.fetch(self.config.endpoint(VEHICLES_PATH), token).await?;
        tracing::debug!("API Response Vehicles: {}", body);
        parse_body(&body)
    }

    /// Log in and fetch one resource for `vehicle`.
    ///
    /// Returns `None` when the login yields no token (no GET is issued in that
    /// case) and when the GET fails or its body does not parse. A fuel log
    /// comes back most recent first.
    pub async fn get_vehicle_data(
        &self,
        credentials: &Credentials,
        vehicle: &VehicleId,
        kind: DataKind,
    ) -> Option<VehicleData> {
        let Some(token) = self.authenticate(credentials, true).await.into_token() else {
            tracing::debug!("API Response Data Vehicle - {}: no token, skipping fetch", kind);
            return None;
        };

        let body = self.fetch(self.config.endpoint(&kind.path(vehicle)), &token).await?;

        let data = match kind {
            DataKind::FuelLog => {
                let entries: Vec<FuelLogEntry> = parse_body(&body)?;
                VehicleData::FuelLog(sort_fuel_log(entries))
            }
            DataKind::Base => VehicleData::Base(parse_body(&body)?),
        };

        tracing::debug!("API Response Data Vehicle - {}: {:?}", kind, data);
        Some(data)
    }

    /// [`get_vehicle_data`](Self::get_vehicle_data) with the kind given by name.
    ///
    /// An unrecognized kind returns `None` before anything touches the network.
    pub async fn get_vehicle_data_by_name(
        &self,
        credentials: &Credentials,
        vehicle: &VehicleId,
        kind: &str,
    ) -> Option<VehicleData> {
        match kind.parse::<DataKind>() {
            Ok(kind) => self.get_vehicle_data(credentials, vehicle, kind).await,
            Err(e) => {
                tracing::debug!("Ignoring request for vehicle {}: {}", vehicle, e);
                None
            }
        }
    }

    /// Authenticated GET. `None` on transport failure or non-success status.
    async fn fetch(&self, url: String, token: &SessionToken) -> Option<String> {
        let token = token.as_str().to_string();
        let response = match self.offload(move || http::get_with_token(&url, &token)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("API request failed: {}", e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::debug!("API request failed: {} {}", response.status, response.body);
            return None;
        }

        Some(response.body)
    }

    async fn offload<F>(&self, request: F) -> Result<RawResponse>
    where
        F: FnOnce() -> Result<RawResponse> + Send + 'static,
    {
        self.hub.run_blocking(request).await?
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Option<T> {
    serde_json::from_str(body)
        .map_err(|e| tracing::warn!("Failed to parse response: {}", e))
        .ok()
}
