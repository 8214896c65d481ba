use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

// ============ Database Models ============

/// A business registered for annual report filing.
///
/// Rows are owned by the registry sync; this service only reads them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    /// Registry identifier, e.g. `BC0871234`.
    pub identifier: String,
    pub legal_name: String,
    /// Corp type code, e.g. `BC`, `ULC`, `CC`.
    pub legal_type: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub founding_date: Option<NaiveDate>,
    pub last_ar_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ============ COLIN Payload ============

/// Key of the inner business object in a COLIN details payload.
pub const BUSINESS_KEY: &str = "business";
pub const LAST_AR_DATE_KEY: &str = "lastArDate";
pub const FOUNDING_DATE_KEY: &str = "foundingDate";
pub const NEXT_AR_YEAR_KEY: &str = "nextARYear";

/// Returns `false` for `null`, `false`, zero, and empty strings, arrays or objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
