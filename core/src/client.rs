//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only the base URL and the injected bearer token and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The repository variants execute the actual
//! round-trip, and both funnel responses through the same `parse_*` methods so
//! their outcomes cannot drift apart.

use serde::de::DeserializeOwned;
use url::{form_urlencoded, Url};

use crate::config::{ClientConfig, CLIENT_HEADER_NAME, CLIENT_HEADER_VALUE};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeDraft, EmployeeId};

pub const COLLECTION_PATH: &str = "/employees";

#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
    token: Option<String>,
}

impl EmployeeClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            token: config.token().map(str::to_string),
        }
    }

    /// Headers attached to every request.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            (CLIENT_HEADER_NAME.to_string(), CLIENT_HEADER_VALUE.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    pub fn collection_url(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.base_url)
    }

    /// The id is percent-encoded as a single path segment.
    pub fn item_url(&self, id: &EmployeeId) -> String {
        let collection = self.collection_url();
        match Url::parse(&collection) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(id.as_str());
                }
                String::from(url)
            }
            // `connect` rejects such base URLs before any request is built.
            Err(_) => format!("{collection}/{id}"),
        }
    }

    pub fn build_list_employees(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_get_employee(&self, id: &EmployeeId) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_search_employees(&self, query: &str) -> HttpRequest {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.request(HttpMethod::Get, format!("{}?q={encoded}", self.collection_url()), None)
    }

    pub fn build_create_employee(&self, draft: &EmployeeDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    pub fn build_update_employee(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete_employee(&self, id: &EmployeeId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        parse_json(response)
    }

    pub fn parse_search_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        parse_json(response)
    }

    /// Any 2xx counts; the body (empty, `{}` or the removed record) is ignored.
    pub fn parse_delete_employee(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(response).map(drop)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: self.default_headers(),
            body,
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, response.body))
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Department;

    fn client() -> EmployeeClient {
        EmployeeClient::new(&ClientConfig::new("http://localhost:5000"))
    }

    fn ok(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Ann".to_string(),
            position: "Dev".to_string(),
            department: Department::Engineering,
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn build_list_employees_produces_correct_request() {
        let req = client().build_list_employees();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/employees");
        assert!(req.body.is_none());
    }

    #[test]
    fn every_request_carries_default_headers() {
        let req = client().build_get_employee(&EmployeeId::new("1"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header(CLIENT_HEADER_NAME), Some(CLIENT_HEADER_VALUE));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn token_adds_bearer_header() {
        let config = ClientConfig::new("http://localhost:5000").with_token(Some("s3cret".into()));
        let req = EmployeeClient::new(&config).build_delete_employee(&EmployeeId::new("1"));
        assert_eq!(req.header("Authorization"), Some("Bearer s3cret"));
    }

    #[test]
    fn build_get_employee_produces_correct_request() {
        let req = client().build_get_employee(&EmployeeId::new("abc"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/employees/abc");
    }

    #[test]
    fn item_url_escapes_the_id() {
        assert_eq!(
            client().item_url(&EmployeeId::new("1 2")),
            "http://localhost:5000/employees/1%202"
        );
        assert_eq!(
            client().item_url(&EmployeeId::new("a/b?c#d")),
            "http://localhost:5000/employees/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn item_url_keeps_base_path() {
        let config = ClientConfig::new("http://api.local/v1/");
        let client = EmployeeClient::new(&config);
        assert_eq!(client.item_url(&EmployeeId::new("7")), "http://api.local/v1/employees/7");
    }

    #[test]
    fn build_search_encodes_query() {
        let req = client().build_search_employees("Ann & co");
        assert_eq!(req.url, "http://localhost:5000/employees?q=Ann+%26+co");
    }

    #[test]
    fn build_create_employee_produces_correct_request() {
        let req = client().build_create_employee(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:5000/employees");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ann");
        assert_eq!(body["department"], "Engineering");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_employee_sends_full_draft() {
        let mut input = draft();
        input.department = Department::Design;
        let req = client().build_update_employee(&EmployeeId::new("9"), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:5000/employees/9");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["department"], "Design");
        assert_eq!(body["email"], "a@b.com");
    }

    #[test]
    fn build_delete_employee_produces_correct_request() {
        let req = client().build_delete_employee(&EmployeeId::new("9"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_employees_success() {
        let body = r#"[{"id":"1","name":"Ann","position":"Dev","department":"HR","email":"a@b.com"}]"#;
        let employees = client().parse_list_employees(ok(200, body)).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].department, Department::Hr);
    }

    #[test]
    fn parse_get_employee_not_found() {
        let err = client().parse_get_employee(ok(404, "{}")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_create_employee_success() {
        let body = r#"{"id":17,"name":"Ann","position":"Dev","department":"Engineering","email":"a@b.com"}"#;
        let employee = client().parse_create_employee(ok(201, body)).unwrap();
        assert_eq!(employee, draft().with_id(EmployeeId::new("17")));
    }

    #[test]
    fn parse_create_employee_rejected() {
        let err = client().parse_create_employee(ok(422, "missing field")).unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 422, .. }));
    }

    #[test]
    fn parse_update_employee_server_error() {
        let err = client().parse_update_employee(ok(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn parse_delete_employee_ignores_body() {
        assert!(client().parse_delete_employee(ok(200, "{}")).is_ok());
        assert!(client().parse_delete_employee(ok(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_employee_not_found() {
        let err = client().parse_delete_employee(ok(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_unauthorized() {
        let err = client().parse_list_employees(ok(401, "")).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[test]
    fn parse_list_employees_bad_json() {
        let err = client().parse_list_employees(ok(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
