use crate::error::ApiError;
use crate::models::{ErrorBody, StudentRecord, StudentsResponse, TopperResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;

/// Client for the portal's public read endpoints.
#[derive(Clone)]
pub struct StudentClient {
    client: reqwest::Client,
    base_url: String,
}

impl StudentClient {
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

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The portal reports failures as {"error": "..."} JSON.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(ApiError::Status { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn fetch_students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        let response: StudentsResponse = self.get("/api/students").await?;
        Ok(response.students)
    }

    pub async fn fetch_topper(&self) -> Result<Option<StudentRecord>, ApiError> {
        let response: TopperResponse = self.get("/api/topper").await?;
        Ok(response.topper)
    }

    pub async fn fetch_student(&self, roll_no: &str) -> Result<StudentRecord, ApiError> {
        let path = format!("/api/student/{}", roll_no);
        self.get(&path).await
    }
}
