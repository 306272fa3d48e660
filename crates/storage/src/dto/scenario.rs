use rust_decimal::Decimal;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IntoDeserializer, value::StrDeserializer},
};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Difficulty;

/// Request payload for creating a training scenario
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,

    pub difficulty: Difficulty,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,

    #[validate(range(
        min = 1,
        max = 600,
        message = "Estimated duration must be between 1 and 600 minutes"
    ))]
    pub estimated_duration_minutes: i32,

    #[serde(default)]
    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_objectives"))]
    pub learning_objectives: Vec<String>,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "validate_positive"))]
    pub site_width: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "validate_positive"))]
    pub site_length: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "validate_positive"))]
    pub load_weight: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "validate_non_negative"))]
    pub load_height: Decimal,

    #[serde(default)]
    pub load_fragile: bool,

    #[serde(default = "default_passing_score")]
    #[validate(range(min = 0, max = 100, message = "Passing score must be between 0 and 100"))]
    pub passing_score: i32,
}

/// Request payload for updating a scenario. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScenarioRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub difficulty: Option<Difficulty>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(range(min = 1, max = 600))]
    pub estimated_duration_minutes: Option<i32>,

    #[validate(length(max = 20))]
    #[validate(custom(function = "validate_objectives"))]
    pub learning_objectives: Option<Vec<String>>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_positive"))]
    pub site_width: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_positive"))]
    pub site_length: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_positive"))]
    pub load_weight: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_non_negative"))]
    pub load_height: Option<Decimal>,

    pub load_fragile: Option<bool>,

    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
}

/// Exact-match filters for listing scenarios
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScenarioFilter {
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ScenarioFilter {
    /// Category filter, ignoring blank values sent by empty form fields
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Empty form fields arrive as `difficulty=`; treat them as no filter.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let value: StrDeserializer<'_, D::Error> = value.into_deserializer();
            Difficulty::deserialize(value).map(Some)
        }
    }
}

// Validation helpers
fn default_passing_score() -> i32 {
    70
}

const MAX_OBJECTIVE_LENGTH: usize = 500;

fn validate_objectives(objectives: &[String]) -> Result<(), validator::ValidationError> {
    let valid = objectives.iter().all(|objective| {
        let length = objective.trim().chars().count();
        length > 0 && length <= MAX_OBJECTIVE_LENGTH
    });

    if valid {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_objective");
        error.message = Some("Each learning objective must be between 1 and 500 characters".into());
        Err(error)
    }
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("must_be_positive"))
    }
}

fn validate_non_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(validator::ValidationError::new("must_not_be_negative"))
    } else {
        Ok(())
    }
}
