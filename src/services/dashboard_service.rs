// src/services/dashboard_service.rs

use crate::{
    common::{error::AppError, http::ApiClient},
    models::{
        dashboard::{BillingPaymentTrendPoint, DashboardSummary, TrendPoint},
        expense::{ReportPeriod, TrendGranularity},
    },
    session::Session,
};

#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_summary(
        &self,
        session: &Session,
        period: Option<&ReportPeriod>,
    ) -> Result<DashboardSummary, AppError> {
        let query = period.map(|p| p.to_query()).unwrap_or_default();
        self.api.get(session, "/dashboard/summary", &query).await
    }

    pub async fn get_revenue_trend(
        &self,
        session: &Session,
        granularity: TrendGranularity,
        count: u32,
    ) -> Result<Vec<TrendPoint>, AppError> {
        self.api
            .get(session, "/dashboard/revenue-trend", &trend_query(granularity, count))
            .await
    }

    pub async fn get_expense_trend(
        &self,
        session: &Session,
        granularity: TrendGranularity,
        count: u32,
    ) -> Result<Vec<TrendPoint>, AppError> {
        self.api
            .get(session, "/dashboard/expense-trend", &trend_query(granularity, count))
            .await
    }

    pub async fn get_billing_payment_trend(
        &self,
        session: &Session,
        granularity: TrendGranularity,
        count: u32,
    ) -> Result<Vec<BillingPaymentTrendPoint>, AppError> {
        self.api
            .get(session, "/dashboard/billing-payment-trend", &trend_query(granularity, count))
            .await
    }
}

fn trend_query(granularity: TrendGranularity, count: u32) -> Vec<(&'static str, String)> {
    vec![
        ("granularity", granularity.as_query().to_string()),
        ("count", count.to_string()),
    ]
}
