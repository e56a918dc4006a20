// src/services/expense_report_service.rs

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        common::{ListParams, Paginated},
        expense::{
            ExpenseByCategory, ExpenseBySupplier, ExpenseTransaction, ExpenseTrendPoint, ReportPeriod,
            TrendGranularity,
        },
    },
    session::Session,
};

#[derive(Clone)]
pub struct ExpenseReportService {
    api: ApiClient,
}

impl ExpenseReportService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn check_period(period: &ReportPeriod) -> Result<(), AppError> {
        if period.end_date < period.start_date {
            return Err(AppError::StepBlocked(
                "La fecha final no puede ser anterior a la inicial.".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn by_category(
        &self,
        session: &Session,
        period: &ReportPeriod,
    ) -> Result<Vec<ExpenseByCategory>, AppError> {
        Self::check_period(period)?;
        self.api
            .get(session, "/expenses/reports/by-category", &period.to_query())
            .await
    }

    pub async fn by_supplier(
        &self,
        session: &Session,
        period: &ReportPeriod,
    ) -> Result<Vec<ExpenseBySupplier>, AppError> {
        Self::check_period(period)?;
        self.api
            .get(session, "/expenses/reports/by-supplier", &period.to_query())
            .await
    }

    pub async fn trend(
        &self,
        session: &Session,
        period: &ReportPeriod,
        granularity: TrendGranularity,
    ) -> Result<Vec<ExpenseTrendPoint>, AppError> {
        Self::check_period(period)?;
        let mut query: Query = period.to_query();
        query.push(("granularity", granularity.as_query().to_string()));

        self.api.get(session, "/expenses/reports/trend", &query).await
    }

    pub async fn detailed_transactions(
        &self,
        session: &Session,
        period: &ReportPeriod,
        params: ListParams,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
    ) -> Result<Paginated<ExpenseTransaction>, AppError> {
        Self::check_period(period)?;
        let mut query: Query = period.to_query();
        query.extend(params.to_query());
        push_opt(&mut query, "category_id", category_id);
        push_opt(&mut query, "supplier_id", supplier_id);

        self.api
            .get(session, "/expenses/reports/detailed-transactions", &query)
            .await
    }
}
