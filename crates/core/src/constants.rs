/// Upper bound on the project area accepted by estimate generation
pub const MAX_AREA_SQUARE_FEET: f64 = 100_000.0;

/// Minimum length of the location field
pub const MIN_LOCATION_LEN: usize = 3;

/// Notes longer than this are truncated, not rejected
pub const MAX_NOTES_LEN: usize = 500;

/// Prefix for generated quote identifiers
pub const QUOTE_ID_PREFIX: &str = "est";

/// Length of the random suffix in generated quote identifiers
pub const QUOTE_ID_SUFFIX_LEN: usize = 7;
