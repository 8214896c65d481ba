//! Business lookup and COLIN detail enrichment.
//!
//! COLIN identifiers omit the two-character prefix used locally (`BC0871234`
//! is `0871234` in COLIN). Detail payloads gain a `nextARYear` field on their
//! inner `business` object, derived from `lastArDate` or `foundingDate`.
use crate::auth_service::AuthService;
use crate::config::Config;
use crate::dates::{parse_iso8601_date, parse_strict_ymd};
use crate::errors::{AppError, ResultExt, TOKEN_UNAVAILABLE};
use crate::models::{
    is_truthy, Business, BUSINESS_KEY, FOUNDING_DATE_KEY, LAST_AR_DATE_KEY, NEXT_AR_YEAR_KEY,
};
use crate::rest_service::RestService;
use chrono::Datelike;
use serde_json::Value;
use sqlx::PgPool;

/// `nextARYear` when neither source date is present.
pub const NEXT_AR_YEAR_UNKNOWN: i32 = -1;

/// Length of the jurisdiction/type prefix COLIN identifiers omit.
const COLIN_PREFIX_LEN: usize = 2;

pub struct BusinessService {
    pool: PgPool,
    auth: AuthService,
    rest: RestService,
    colin_api_url: String,
    client_id: String,
    client_secret: String,
}

impl BusinessService {
    pub fn new(config: &Config, pool: PgPool) -> Result<Self, AppError> {
        Ok(Self {
            pool,
            auth: AuthService::new(config)?,
            rest: RestService::new(config)?,
            colin_api_url: config.colin_api_url.clone(),
            client_id: config.colin_api_svc_client_id.clone(),
            client_secret: config.colin_api_svc_client_secret.clone(),
        })
    }

    /// Finds a business by its registry identifier.
    pub async fn find_by_business_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Business>, AppError> {
        sqlx::query_as::<_, Business>(
            "SELECT id, identifier, legal_name, legal_type, tax_id, email,
                    founding_date, last_ar_date, created_at, updated_at
             FROM businesses
             WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .context(format!("Failed to look up business {}", identifier))
    }

    /// Fetches business details from COLIN and adds `nextARYear`.
    ///
    /// Fails with [`AppError::AuthenticationFailure`] before any COLIN call
    /// when no service token is issued. Transport, status, and JSON errors
    /// from COLIN are returned as they come.
    pub async fn get_business_details_from_colin(
        &self,
        identifier: &str,
        legal_type: &str,
    ) -> Result<Value, AppError> {
        let endpoint = colin_endpoint(&self.colin_api_url, legal_type, identifier)?;

        let token = self
            .auth
            .get_service_client_token(&self.client_id, &self.client_secret)
            .await?
            .ok_or_else(|| {
                tracing::warn!("No service token issued for COLIN lookup of {}", identifier);
                AppError::AuthenticationFailure(TOKEN_UNAVAILABLE.to_string())
            })?;

        let mut business_details = self.rest.get_json(&endpoint, &token).await?;
        enrich_with_next_ar_year(&mut business_details)?;

        tracing::info!("Fetched COLIN details for {} ({})", identifier, legal_type);
        Ok(business_details)
    }
}

/// Drops the two-character prefix COLIN identifiers do not carry.
pub fn colin_identifier(identifier: &str) -> Result<&str, AppError> {
    let mut chars = identifier.chars();
    for _ in 0..COLIN_PREFIX_LEN {
        if chars.next().is_none() {
            return Err(AppError::BadRequest(format!(
                "Business identifier '{}' is too short",
                identifier
            )));
        }
    }
    Ok(chars.as_str())
}

/// `{base_url}/{legal_type}/{colin_identifier}`
pub fn colin_endpoint(
    base_url: &str,
    legal_type: &str,
    identifier: &str,
) -> Result<String, AppError> {
    Ok(format!(
        "{}/{}/{}",
        base_url,
        legal_type,
        colin_identifier(identifier)?
    ))
}

/// Sets `business.nextARYear` on a truthy payload. Falsy payloads are left alone.
pub fn enrich_with_next_ar_year(business_details: &mut Value) -> Result<(), AppError> {
    if !is_truthy(business_details) {
        return Ok(());
    }

    let next_ar_year = next_ar_year(business_details)?;

    let business = business_details
        .get_mut(BUSINESS_KEY)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            AppError::ExternalApiError(format!(
                "COLIN response has no '{}' object",
                BUSINESS_KEY
            ))
        })?;
    business.insert(NEXT_AR_YEAR_KEY.to_string(), Value::from(next_ar_year));

    Ok(())
}

/// The year the next annual report is due.
///
/// `lastArDate` wins over `foundingDate`. `lastArDate` must be exactly
/// `YYYY-MM-DD`; `foundingDate` may be an ISO-8601 date or date-time. Returns
/// [`NEXT_AR_YEAR_UNKNOWN`] when neither is present.
pub fn next_ar_year(business_details: &Value) -> Result<i32, AppError> {
    let Some(business) = business_details.get(BUSINESS_KEY) else {
        return Ok(NEXT_AR_YEAR_UNKNOWN);
    };

    if let Some(last_ar_date) = date_field(business, LAST_AR_DATE_KEY)? {
        let date = parse_strict_ymd(last_ar_date).map_err(|reason| AppError::DateParseError {
            field: LAST_AR_DATE_KEY,
            value: last_ar_date.to_string(),
            reason,
        })?;
        return Ok(date.year() + 1);
    }

    if let Some(founding_date) = date_field(business, FOUNDING_DATE_KEY)? {
        let date = parse_iso8601_date(founding_date).map_err(|reason| AppError::DateParseError {
            field: FOUNDING_DATE_KEY,
            value: founding_date.to_string(),
            reason,
        })?;
        return Ok(date.year() + 1);
    }

    Ok(NEXT_AR_YEAR_UNKNOWN)
}

fn date_field<'a>(business: &'a Value, field: &'static str) -> Result<Option<&'a str>, AppError> {
    match business.get(field) {
        Some(value) if is_truthy(value) => value.as_str().map(Some).ok_or_else(|| {
            AppError::ExternalApiError(format!("{} is not a date string: {}", field, value))
        }),
        _ => Ok(None),
    }
}
