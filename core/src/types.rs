//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Identifiers are opaque: json-server has handed out both numeric and string
//! ids over its lifetime, so `EmployeeId` accepts either on the wire and keeps
//! the textual form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Uint(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Int(n) => Self(n.to_string()),
            RawId::Uint(n) => Self(n.to_string()),
        })
    }
}

/// The fixed set of departments an employee can belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[default]
    Engineering,
    Design,
    #[serde(rename = "HR")]
    Hr,
    Marketing,
    Sales,
    Finance,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Engineering,
        Department::Design,
        Department::Hr,
        Department::Marketing,
        Department::Sales,
        Department::Finance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Design => "Design",
            Department::Hr => "HR",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Finance => "Finance",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a department name is not one of [`Department::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department: {0}")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

/// A single employee record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub email: String,
}

impl Employee {
    /// The editable fields of this record.
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            position: self.position.clone(),
            department: self.department,
            email: self.email.clone(),
        }
    }
}

/// Field set sent on create, and as a full replacement on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub department: Department,
    pub email: String,
}

impl EmployeeDraft {
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            position: self.position,
            department: self.department,
            email: self.email,
        }
    }
}
