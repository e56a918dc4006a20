// src/models/exchange_rate.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::common::Currency;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRate {
    #[serde(default)]
    pub id: Option<i64>,
    pub from_currency: Currency,
    pub to_currency: Currency,
    // Quantos `to_currency` vale 1 `from_currency`
    pub rate: Decimal,
    pub rate_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_rate"))]
pub struct ExchangeRateCreate {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub rate: Decimal,
    pub rate_date: NaiveDate,
}

fn validate_rate(rate: &ExchangeRateCreate) -> Result<(), validator::ValidationError> {
    if rate.rate <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("rate");
        err.message = Some("La tasa debe ser mayor que cero.".into());
        return Err(err);
    }
    if rate.from_currency == rate.to_currency {
        let mut err = validator::ValidationError::new("to_currency");
        err.message = Some("Las monedas de origen y destino deben ser distintas.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeRateFilters {
    pub from_currency: Option<Currency>,
    pub to_currency: Option<Currency>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
