use rocket::form::{self, DataField, FromForm, Options, ValueField};
use serde::Serialize;
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

use crate::catalog::Category;
use crate::db::insert_record;
use crate::department::Department;
use crate::error::AppError;

/// Raw record submission form: `department` plus free-form
/// `<Category>-<Field label>` fields.
#[derive(Debug, Default, Clone)]
pub struct SubmissionForm {
    pub department: String,
    pub fields: HashMap<String, String>,
}

impl SubmissionForm {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Categories whose key field was filled in, in catalog order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.field(&category.key_field()).is_empty())
            .collect()
    }

    pub fn values_for(&self, category: Category) -> Vec<&str> {
        category
            .fields()
            .iter()
            .map(|field| self.field(&category.form_field(field.label)))
            .collect()
    }
}

#[rocket::async_trait]
impl<'r> FromForm<'r> for SubmissionForm {
    type Context = SubmissionForm;

    fn init(_opts: Options) -> Self::Context {
        <SubmissionForm as Default>::default()
    }

    fn push_value(ctxt: &mut Self::Context, field: ValueField<'r>) {
        let name = field.name.source().as_str();
        if name == "department" {
            ctxt.department = field.value.to_string();
        } else {
            ctxt.fields.insert(name.to_string(), field.value.to_string());
        }
    }

    async fn push_data(_ctxt: &mut Self::Context, field: DataField<'r, '_>) {
        warn!(field = %field.name.source().as_str(), "Ignoring file upload in record submission");
    }

    fn finalize(ctxt: Self::Context) -> form::Result<'r, Self> {
        Ok(ctxt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedInsert {
    pub category: Category,
    pub error: String,
}

/// Outcome of a best-effort submission. Categories are inserted
/// independently, so some may succeed while others fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionReport {
    pub inserted: Vec<Category>,
    pub failed: Vec<FailedInsert>,
}

impl SubmissionReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Inserts one row for every category present in `form`.
///
/// Only an unknown department fails the whole submission. Insert errors are
/// logged and collected in the report.
#[instrument(skip(pool, form), fields(department = %form.department))]
pub async fn submit_records(
    pool: &Pool<Sqlite>,
    form: &SubmissionForm,
) -> Result<SubmissionReport, AppError> {
    let department = Department::resolve(&form.department)?;
    let mut report = SubmissionReport::default();

    for category in form.categories() {
        let values = form.values_for(category);
        match insert_record(pool, category, department, &values).await {
            Ok(_) => {
                info!(category = %category, "Record entered successfully");
                report.inserted.push(category);
            }
            Err(err) => {
                error!(category = %category, error = %err, "Error inserting record");
                report.failed.push(FailedInsert {
                    category,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}
