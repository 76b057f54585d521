use crate::error::ApiError;
use crate::models::{
    ErrorBody, LoginRequest, LoginResponse, MarksUpdate, UpdateRequest, UpdateResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the portal's faculty endpoints (login and marks updates).
#[derive(Clone)]
pub struct FacultyClient {
    client: reqwest::Client,
    base_url: String,
}

impl FacultyClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120)) // 2 minute timeout
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, base_url }
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("gradeport"));
        headers
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| text.chars().take(200).collect());
            return Err(ApiError::Status { status, message });
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub async fn login(
        &self,
        employee_id: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            employee_id: employee_id.to_string(),
            password: password.to_string(),
        };
        self.post("/api/faculty/login", &body).await
    }

    pub async fn submit_updates(&self, updates: Vec<MarksUpdate>) -> Result<UpdateResponse, ApiError> {
        let body = UpdateRequest { updates };
        self.post("/api/update-marks", &body).await
    }
}
