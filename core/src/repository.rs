//! The repository capability shared by both client variants.

use tracing::{error, info, warn};

use crate::config::{ClientConfig, ClientVariant};
use crate::error::ApiError;
use crate::fetch::FetchClient;
use crate::http::HttpMethod;
use crate::types::{Employee, EmployeeDraft, EmployeeId};
use crate::wrapped::WrappedClient;

/// The six operations against the remote `/employees` collection.
///
/// Implementations must behave identically for identical inputs: same
/// results, same error variants.
pub trait EmployeeRepository {
    fn variant(&self) -> ClientVariant;

    /// All employees in the remote store's native order.
    fn get_all(&self) -> Result<Vec<Employee>, ApiError>;

    fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError>;

    /// Employees matching `query` per the remote store's `q` semantics.
    /// Callers never pass an empty query.
    fn search(&self, query: &str) -> Result<Vec<Employee>, ApiError>;

    fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError>;

    /// Full replace of the editable fields; the id is preserved.
    fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> Result<Employee, ApiError>;

    fn delete(&self, id: &EmployeeId) -> Result<(), ApiError>;
}

/// Construct the repository for `variant`.
///
/// The configuration is validated up front, so an unusable base URL or token
/// fails here with `ApiError::Config` whichever variant is asked for.
pub fn connect(config: &ClientConfig, variant: ClientVariant) -> Result<Box<dyn EmployeeRepository>, ApiError> {
    config.validate()?;
    Ok(match variant {
        ClientVariant::Wrapped => Box::new(WrappedClient::new(config)?),
        ClientVariant::Fetch => Box::new(FetchClient::new(config)),
    })
}

// Lifecycle hooks shared by both variants. Purely observational.

pub(crate) fn log_request(variant: ClientVariant, method: HttpMethod, url: &str) {
    info!(variant = %variant, method = %method, url, "sending request");
}

pub(crate) fn log_response(variant: ClientVariant, status: u16, url: &str) {
    info!(variant = %variant, status, url, "received response");
    match status {
        401 => warn!(variant = %variant, url, "unauthorized, please log in again"),
        404 => warn!(variant = %variant, url, "resource not found"),
        _ => {}
    }
}

pub(crate) fn log_transport_error(variant: ClientVariant, method: HttpMethod, url: &str, err: &str) {
    error!(variant = %variant, method = %method, url, error = err, "request failed");
}
