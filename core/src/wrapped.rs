//! Wrapped-client variant: a preconfigured `reqwest` client with
//! request/response hooks around every call.
//!
//! # Design
//! The client instance owns the base URL, default headers and timeout. The
//! request hook logs and attaches the bearer token; the response hook logs the
//! status. Status interpretation and body decoding go through the same
//! `EmployeeClient::parse_*` methods as the fetch variant.

use reqwest::blocking::{Client, Request, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::client::EmployeeClient;
use crate::config::{ClientConfig, ClientVariant, CLIENT_HEADER_NAME, CLIENT_HEADER_VALUE};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};
use crate::repository::{log_request, log_response, log_transport_error, EmployeeRepository};
use crate::types::{Employee, EmployeeDraft, EmployeeId};

pub struct WrappedClient {
    http: Client,
    bearer: Option<HeaderValue>,
    // Only used for URL construction and response parsing.
    client: EmployeeClient,
}

impl WrappedClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(CLIENT_HEADER_NAME),
            HeaderValue::from_static(CLIENT_HEADER_VALUE),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let bearer = config
            .token()
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| ApiError::Config(format!("invalid bearer token: {e}")))?;
                value.set_sensitive(true);
                Ok::<_, ApiError>(value)
            })
            .transpose()?;

        Ok(Self {
            http,
            bearer,
            client: EmployeeClient::new(config),
        })
    }

    fn call(&self, method: HttpMethod, builder: RequestBuilder) -> Result<HttpResponse, ApiError> {
        let mut request = builder.build().map_err(|e| {
            if e.is_builder() {
                ApiError::Serialization(e.to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;
        self.on_request(method, &mut request);

        let url = request.url().to_string();
        let response = self.http.execute(request).map_err(|e| {
            log_transport_error(ClientVariant::Wrapped, method, &url, &e.to_string());
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        self.on_response(status, &url);
        let body = response.text().map_err(|e| {
            log_transport_error(ClientVariant::Wrapped, method, &url, &e.to_string());
            ApiError::Transport(e.to_string())
        })?;

        Ok(HttpResponse { status, body })
    }

    fn on_request(&self, method: HttpMethod, request: &mut Request) {
        log_request(ClientVariant::Wrapped, method, request.url().as_str());
        if let Some(bearer) = &self.bearer {
            request.headers_mut().insert(AUTHORIZATION, bearer.clone());
        }
    }

    fn on_response(&self, status: u16, url: &str) {
        log_response(ClientVariant::Wrapped, status, url);
    }
}

impl EmployeeRepository for WrappedClient {
    fn variant(&self) -> ClientVariant {
        ClientVariant::Wrapped
    }

    fn get_all(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.call(HttpMethod::Get, self.http.get(self.client.collection_url()))?;
        self.client.parse_list_employees(response)
    }

    fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError> {
        let response = self.call(HttpMethod::Get, self.http.get(self.client.item_url(id)))?;
        self.client.parse_get_employee(response)
    }

    fn search(&self, query: &str) -> Result<Vec<Employee>, ApiError> {
        let builder = self.http.get(self.client.collection_url()).query(&[("q", query)]);
        let response = self.call(HttpMethod::Get, builder)?;
        self.client.parse_search_employees(response)
    }

    fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let builder = self.http.post(self.client.collection_url()).json(draft);
        let response = self.call(HttpMethod::Post, builder)?;
        self.client.parse_create_employee(response)
    }

    fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let builder = self.http.put(self.client.item_url(id)).json(draft);
        let response = self.call(HttpMethod::Put, builder)?;
        self.client.parse_update_employee(response)
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), ApiError> {
        let response = self.call(HttpMethod::Delete, self.http.delete(self.client.item_url(id)))?;
        self.client.parse_delete_employee(response)
    }
}
