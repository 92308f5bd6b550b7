//! HRMS Lite REST client.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::models::{AttendanceRecord, CreateEmployee, DashboardStats, Employee, MarkAttendance};

/// HTTP client for the HRMS Lite backend.
///
/// Thin wrapper over `reqwest`: every call is one request/response pair,
/// JSON both ways, no retries. Error responses carrying a JSON `detail`
/// string surface it through [`ApiError::Api`].
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API server URL (e.g. "http://localhost:8000")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }

    /// List all employees, in store order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let response = self.client.get(self.url("/employees/")).send().await?;
        decode_json(response).await
    }

    /// Create an employee.
    pub async fn create_employee(&self, data: &CreateEmployee) -> Result<Employee> {
        let response = self.client.post(self.url("/employees/")).json(data).send().await?;
        decode_json(response).await
    }

    /// Delete an employee by its opaque id.
    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/employees/{id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// List attendance records for one employee, in store order.
    ///
    /// Callers treat a 404 as "no history yet"; see
    /// [`ApiError::is_not_found`].
    pub async fn list_attendance(&self, employee_ref: i64) -> Result<Vec<AttendanceRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/attendance/{employee_ref}")))
            .send()
            .await?;
        decode_json(response).await
    }

    /// Create one attendance record. Duplicate (employee, date) pairs are
    /// accepted by the backend and duplicated.
    pub async fn mark_attendance(&self, data: &MarkAttendance) -> Result<AttendanceRecord> {
        let response = self.client.post(self.url("/attendance/")).json(data).send().await?;
        decode_json(response).await
    }

    /// Fetch the server-computed dashboard counters.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let response = self.client.get(self.url("/dashboard/stats")).send().await?;
        decode_json(response).await
    }

    /// Test connectivity to the server (settings dialog).
    pub async fn ping(&self) -> Result<bool> {
        let response = self.client.get(self.url("/")).send().await?;
        Ok(response.status().is_success())
    }
}

/// Fail on a non-success status, extracting the server `detail` if present.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

/// Decode a success body as JSON, mapping error statuses first.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::decode(format!("invalid response body: {e}")))
}

fn api_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::Api {
        status: status.as_u16(),
        detail: extract_detail(body),
    }
}

/// Pull the `detail` field out of an error body.
///
/// The backend answers errors as `{"detail": "..."}`. Validation errors may
/// carry a non-string `detail` (a list of field errors); those are not
/// user-presentable verbatim, so only string details are surfaced.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/employees/"), "http://localhost:8000/employees/");
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://api.example.com", Duration::from_secs(5)).unwrap();

        assert_eq!(client.url("/employees/42"), "http://api.example.com/employees/42");
        assert_eq!(client.url("/attendance/7"), "http://api.example.com/attendance/7");
        assert_eq!(client.url("/dashboard/stats"), "http://api.example.com/dashboard/stats");
    }

    #[test]
    fn test_extract_detail_string() {
        let body = r#"{"detail":"Employee ID already exists"}"#;
        assert_eq!(extract_detail(body), Some("Employee ID already exists".to_string()));
    }

    #[test]
    fn test_extract_detail_non_string() {
        // FastAPI 422 detail is a list of field errors
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#;
        assert_eq!(extract_detail(body), None);
    }

    #[test]
    fn test_extract_detail_absent_or_invalid() {
        assert_eq!(extract_detail(r#"{"error":"nope"}"#), None);
        assert_eq!(extract_detail("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_detail(""), None);
    }

    #[test]
    fn test_api_error_carries_status_and_detail() {
        let err = api_error(StatusCode::BAD_REQUEST, r#"{"detail":"Email already registered"}"#);

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message("generic"), "Email already registered");
    }
}
