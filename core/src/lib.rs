//! Synchronous API client core for the employee service.
//!
//! # Overview
//! One capability, [`EmployeeRepository`], with two conforming variants
//! chosen at runtime:
//!
//! - [`WrappedClient`]: a configured `reqwest` client with request/response
//!   hooks.
//! - [`FetchClient`]: a thin helper that executes plain-data requests built by
//!   [`EmployeeClient`] through `ureq`.
//!
//! # Design
//! - `EmployeeClient` is stateless. It splits each operation into `build_*`
//!   (produces request) and `parse_*` (consumes response), so the I/O boundary
//!   is explicit and both variants share status and body interpretation.
//! - The bearer token is injected through [`ClientConfig`] at construction.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod repository;
pub mod types;
pub mod wrapped;

pub use client::EmployeeClient;
pub use config::{ClientConfig, ClientVariant, UnknownVariant};
pub use error::ApiError;
pub use fetch::FetchClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use repository::{connect, EmployeeRepository};
pub use types::{Department, Employee, EmployeeDraft, EmployeeId, UnknownDepartment};
pub use wrapped::WrappedClient;
