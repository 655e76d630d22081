//! Administrative views over the record tables.
//!
//! Table and column names cannot be bound as query parameters, so every
//! identifier that reaches a query string is first resolved against the
//! [`Category`] catalog. Only values are bound.

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, TypeInfo, ValueRef};
use std::fmt;
use tracing::{info, instrument, warn};

use crate::catalog::{Category, DEPARTMENT_COLUMN};
use crate::db::{count_records, fetch_records};
use crate::department::Department;
use crate::error::AppError;

/// Filter value that selects rows by department instead of by a column.
pub const DEPARTMENT_FILTER: &str = "DEPARTMENT";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCounts {
    pub department: Department,
    pub counts: Vec<TableCount>,
}

impl DepartmentCounts {
    pub fn values(&self) -> Vec<&str> {
        self.counts.iter().map(|c| c.count.as_str()).collect()
    }
}

/// Counts the records a department owns in every category table.
///
/// A failing count is reported as `"0"` and does not stop the others.
#[instrument(skip(pool))]
pub async fn department_counts(
    pool: &Pool<Sqlite>,
    department_name: &str,
) -> Result<DepartmentCounts, AppError> {
    let department = Department::resolve(department_name)?;
    info!(department = %department, "Counting records per table");

    let mut counts = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let count = match count_records(pool, category, department).await {
            Ok(count) => count,
            Err(err) => {
                warn!(table = category.table(), error = %err, "Count failed, reporting 0");
                0
            }
        };

        counts.push(TableCount {
            table: category.table(),
            count: count.to_string(),
        });
    }

    Ok(DepartmentCounts { department, counts })
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowFilter {
    All,
    Department(Department),
    Column { column: &'static str, value: String },
}

impl RowFilter {
    /// Builds the filter from the admin form's `filter` and `text-input`
    /// fields, both already upper-cased.
    ///
    /// Equal fields (including two empty ones) mean no filter was chosen.
    /// Otherwise `DEPARTMENT` selects by department code, and anything else
    /// must name a column of `category`.
    pub fn from_form(category: Category, filter: &str, text: &str) -> Result<Self, AppError> {
        if filter == text {
            return Ok(RowFilter::All);
        }

        if filter == DEPARTMENT_FILTER {
            return Department::resolve(text).map(RowFilter::Department);
        }

        let column = category.column(filter).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unknown column {} for table {}",
                filter,
                category.table()
            ))
        })?;

        Ok(RowFilter::Column {
            column,
            value: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub sql: String,
}

pub fn build_select(category: Category, filter: &RowFilter) -> SelectQuery {
    let sql = match filter {
        RowFilter::All => format!("SELECT * FROM {}", category.table()),
        RowFilter::Department(_) => format!(
            "SELECT * FROM {} WHERE {} = ?",
            category.table(),
            DEPARTMENT_COLUMN
        ),
        // NOCASE keeps the case-insensitive match the form has always had;
        // input is upper-cased before it gets here.
        RowFilter::Column { column, .. } => format!(
            "SELECT * FROM {} WHERE {} = ? COLLATE NOCASE",
            category.table(),
            column
        ),
    };

    SelectQuery { sql }
}

/// Loosely typed cell, rendered as-is by the admin page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Real(value) => write!(f, "{}", value),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowListing {
    pub table: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub category: Category,
    pub filter: RowFilter,
}

impl ListingRequest {
    /// Normalises the raw admin form fields and checks every identifier
    /// against the catalog.
    pub fn parse(info: &str, filter: &str, text: &str) -> Result<Self, AppError> {
        let table = info.trim().to_uppercase();
        let filter = filter.to_uppercase();
        let text = text.to_uppercase();

        let category = Category::from_table(&table)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown table {}", table)))?;

        Ok(Self {
            category,
            filter: RowFilter::from_form(category, &filter, &text)?,
        })
    }
}

#[instrument(skip(pool))]
pub async fn list_rows(
    pool: &Pool<Sqlite>,
    info: &str,
    filter: &str,
    text: &str,
) -> Result<RowListing, AppError> {
    let request = ListingRequest::parse(info, filter, text)?;
    info!(table = request.category.table(), filter = ?request.filter, "Listing rows");

    let rows = fetch_records(pool, request.category, &request.filter).await?;

    let decoded = rows
        .iter()
        .filter_map(|row| match decode_row(row) {
            Ok(cells) => Some(cells),
            Err(err) => {
                warn!(error = %err, "Skipping undecodable row");
                None
            }
        })
        .collect();

    Ok(RowListing {
        table: request.category.table(),
        columns: request.category.columns(),
        rows: decoded,
    })
}

fn decode_row(row: &SqliteRow) -> Result<Vec<CellValue>, sqlx::Error> {
    (0..row.len())
        .map(|index| {
            let cell = decode_cell(row, index)?;
            Ok(match cell {
                CellValue::Integer(id) if index == 0 => match Department::name_for(id) {
                    Some(name) => CellValue::Text(name.to_string()),
                    None => CellValue::Integer(id),
                },
                other => other,
            })
        })
        .collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let cell = match type_name.as_str() {
        "INTEGER" => CellValue::Integer(row.try_get::<i64, _>(index)?),
        "REAL" => CellValue::Real(row.try_get::<f64, _>(index)?),
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            CellValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => CellValue::Text(row.try_get::<String, _>(index)?),
    };

    Ok(cell)
}
