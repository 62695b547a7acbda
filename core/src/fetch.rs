//! Fetch-style variant: a thin helper that executes plain-data requests.
//!
//! # Design
//! Every operation is `build_*` on `EmployeeClient`, one trip through
//! [`FetchClient::execute`], then `parse_*`. The `ureq` agent has
//! status-as-error disabled so 4xx/5xx responses come back as data and
//! status interpretation stays in one place.

use ureq::{Agent, RequestBuilder};

use crate::client::EmployeeClient;
use crate::config::{ClientConfig, ClientVariant};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::repository::{log_request, log_response, log_transport_error, EmployeeRepository};
use crate::types::{Employee, EmployeeDraft, EmployeeId};

pub struct FetchClient {
    agent: Agent,
    client: EmployeeClient,
}

impl FetchClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()))
            .build()
            .new_agent();
        Self {
            agent,
            client: EmployeeClient::new(config),
        }
    }

    /// Execute one request and hand the response back as data.
    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        log_request(ClientVariant::Fetch, req.method, &req.url);

        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.url), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.url), &req.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&req.url), &req.headers), req.body.as_deref()),
            HttpMethod::Put => send(with_headers(self.agent.put(&req.url), &req.headers), req.body.as_deref()),
        };

        let mut response = result.map_err(|e| {
            log_transport_error(ClientVariant::Fetch, req.method, &req.url, &e.to_string());
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        log_response(ClientVariant::Fetch, status, &req.url);
        let body = response.body_mut().read_to_string().map_err(|e| {
            log_transport_error(ClientVariant::Fetch, req.method, &req.url, &e.to_string());
            ApiError::Transport(e.to_string())
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl EmployeeRepository for FetchClient {
    fn variant(&self) -> ClientVariant {
        ClientVariant::Fetch
    }

    fn get_all(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.execute(self.client.build_list_employees())?;
        self.client.parse_list_employees(response)
    }

    fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError> {
        let response = self.execute(self.client.build_get_employee(id))?;
        self.client.parse_get_employee(response)
    }

    fn search(&self, query: &str) -> Result<Vec<Employee>, ApiError> {
        let response = self.execute(self.client.build_search_employees(query))?;
        self.client.parse_search_employees(response)
    }

    fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let response = self.execute(self.client.build_create_employee(draft)?)?;
        self.client.parse_create_employee(response)
    }

    fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let response = self.execute(self.client.build_update_employee(id, draft)?)?;
        self.client.parse_update_employee(response)
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete_employee(id))?;
        self.client.parse_delete_employee(response)
    }
}
