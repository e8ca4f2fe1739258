use crate::utils::error::{RecipeError, Result};
use std::fmt::Display;
use url::Url;

/// Largest serving count a recipe can be scaled to or uploaded with.
pub const MAX_SERVINGS: u32 = 100;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> RecipeError {
    RecipeError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Turns a field check failure into an input error shown to the user.
pub fn as_input_error(error: RecipeError) -> RecipeError {
    match error {
        RecipeError::InvalidConfigValueError { field, reason, .. } => {
            RecipeError::validation(format!("{}: {}", field, reason))
        }
        other => other,
    }
}

/// Accepts absolute http(s) URLs only.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, value, "URL cannot be empty"));
    }
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// Inclusive range check. Unordered values such as NaN are rejected.
pub fn validate_range<T: PartialOrd + Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_servings(servings: u32) -> Result<()> {
    validate_range("servings", servings, 1, MAX_SERVINGS).map_err(as_input_error)
}

/// Ingredient quantities are finite and non-negative.
pub fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(RecipeError::validation(format!(
            "Invalid ingredient quantity: {}",
            quantity
        )));
    }
    Ok(())
}
