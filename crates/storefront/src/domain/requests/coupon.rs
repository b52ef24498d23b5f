use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window", skip_on_field_errors = false))]
pub struct CreateCouponRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 64, message = "Code is required"))]
    #[schema(example = "SUMMER25")]
    pub code: String,

    #[validate(range(min = 1, max = 100, message = "Discount must be between 1 and 100"))]
    #[schema(example = 25)]
    pub discount_percent: i32,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Usage limit must be at least 1"))]
    #[schema(example = 100)]
    pub usage_limit: i32,
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn validate_window(req: &CreateCouponRequest) -> Result<(), ValidationError> {
    if req.end_date <= req.start_date {
        let mut err = ValidationError::new("date_window");
        err.message = Some("End date must be after start date".into());
        return Err(err);
    }
    Ok(())
}
