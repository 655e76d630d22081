use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Academic departments that own research records.
///
/// The discriminant is the value stored in every record table's
/// `DEPARTMENT_ID` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Aiml = 0,
    Cse = 1,
    Ise = 2,
    Ec = 3,
    Mech = 4,
}

static DEPARTMENTS_BY_NAME: Lazy<HashMap<&'static str, Department>> = Lazy::new(|| {
    Department::ALL
        .iter()
        .map(|department| (department.as_str(), *department))
        .collect()
});

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Aiml,
        Department::Cse,
        Department::Ise,
        Department::Ec,
        Department::Mech,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Aiml => "AIML",
            Department::Cse => "CSE",
            Department::Ise => "ISE",
            Department::Ec => "EC",
            Department::Mech => "MECH",
        }
    }

    /// Looks up a department by its short code. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        DEPARTMENTS_BY_NAME.get(name).copied()
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Department::ALL
            .iter()
            .copied()
            .find(|department| department.id() == id)
    }

    pub fn id_for(name: &str) -> Option<i64> {
        Self::from_name(name).map(Department::id)
    }

    pub fn name_for(id: i64) -> Option<&'static str> {
        Self::from_id(id).map(Department::as_str)
    }

    pub fn resolve(name: &str) -> Result<Self, AppError> {
        Self::id_for(name)
            .and_then(Self::from_id)
            .ok_or_else(|| AppError::InvalidDepartment(name.to_string()))
    }
}

impl FromStr for Department {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
