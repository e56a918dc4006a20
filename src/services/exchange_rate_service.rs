// src/services/exchange_rate_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        common::{Currency, ListParams, Paginated},
        exchange_rate::{ExchangeRate, ExchangeRateCreate, ExchangeRateFilters, ExchangeRateUpdate},
    },
    session::Session,
};

#[derive(Clone)]
pub struct ExchangeRateService {
    api: ApiClient,
}

impl ExchangeRateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &ExchangeRateFilters,
    ) -> Result<Paginated<ExchangeRate>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "from_currency", filters.from_currency);
        push_opt(&mut query, "to_currency", filters.to_currency);
        push_opt(&mut query, "start_date", filters.start_date);
        push_opt(&mut query, "end_date", filters.end_date);

        self.api.get(session, "/exchange-rates/", &query).await
    }

    /// Última taxa `from -> to`. VES -> VES não vai ao servidor: taxa 1.
    /// `None` quando o backend ainda não tem taxa cadastrada (404).
    pub async fn latest(
        &self,
        session: &Session,
        from: Currency,
        to: Currency,
    ) -> Result<Option<ExchangeRate>, AppError> {
        if from == to {
            return Ok(Some(ExchangeRate {
                id: None,
                from_currency: from,
                to_currency: to,
                rate: Decimal::ONE,
                rate_date: Utc::now().date_naive(),
                created_at: None,
            }));
        }

        let query: Query = vec![
            ("from_currency", from.code().to_string()),
            ("to_currency", to.code().to_string()),
        ];
        match self.api.get(session, "/exchange-rates/latest/", &query).await {
            Ok(rate) => Ok(rate),
            Err(AppError::Api { status: 404, .. }) => {
                tracing::warn!("Sin tasa registrada para {} -> {}", from, to);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn create(
        &self,
        session: &Session,
        payload: &ExchangeRateCreate,
    ) -> Result<ExchangeRate, AppError> {
        payload.validate()?;
        self.api.post(session, "/exchange-rates/", payload).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &ExchangeRateUpdate,
    ) -> Result<ExchangeRate, AppError> {
        if payload.rate.is_some_and(|r| r <= Decimal::ZERO) {
            return Err(AppError::InvalidAmount(
                payload.rate.map(|r| r.to_string()).unwrap_or_default(),
            ));
        }
        self.api.put(session, &format!("/exchange-rates/{}", id), payload).await
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let _: Option<serde_json::Value> = self
            .api
            .delete(session, &format!("/exchange-rates/{}", id))
            .await?;
        Ok(())
    }
}
