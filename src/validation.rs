use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Flattens validation failures into a single, stable message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                error
                    .message
                    .clone()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect();

    messages.sort();
    messages.dedup();
    messages.join("; ")
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::InvalidInput(validation_message(&errors))
    }
}

pub trait ValidateInput: Validate + Sized {
    fn validate_input(self) -> Result<Self, AppError> {
        self.validate()?;
        Ok(self)
    }
}

impl<T: Validate> ValidateInput for T {}
