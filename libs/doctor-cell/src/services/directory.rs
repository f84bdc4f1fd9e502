use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_api::HospitalApiClient;
use shared_config::ClientConfig;
use shared_models::ApiError;

use crate::models::Doctor;

pub struct DoctorDirectoryService {
    api: HospitalApiClient,
}

impl DoctorDirectoryService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: HospitalApiClient::new(config),
        }
    }

    pub fn with_client(api: HospitalApiClient) -> Self {
        Self { api }
    }

    /// Fetch the doctors of one department.
    ///
    /// The server must answer with a JSON array; anything else is reported as
    /// an unexpected response rather than an empty department.
    pub async fn fetch_by_department(&self, department: &str) -> Result<Vec<Doctor>, ApiError> {
        debug!("Fetching doctors for department: {}", department);

        let path = format!("/api/doctors?department={}", urlencoding::encode(department));
        let body: Value = self.api.request(Method::GET, &path, None).await?;

        let Value::Array(records) = body else {
            warn!("Doctor list for {} was not an array", department);
            return Err(ApiError::UnexpectedShape("expected an array of doctors".to_string()));
        };

        let doctors = records
            .into_iter()
            .map(serde_json::from_value::<Doctor>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;

        info!("Found {} doctors for department {}", doctors.len(), department);
        Ok(doctors)
    }
}
