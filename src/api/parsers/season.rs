use crate::api::errors::ApiError;
use crate::domain::Season;

/// Parse the `season` query parameter; absent or non-integer values are client errors.
pub fn parse_season(raw: Option<&str>) -> Result<Season, ApiError> {
    let value = raw.unwrap_or_default();
    value.trim().parse::<Season>().map_err(|_| {
        ApiError::bad_request(format!("invalid season query param, expected integer got {}", value))
    })
}

/// Require a non-blank query parameter
pub fn require_param<'a>(raw: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("missing {} query param", name)))
}
