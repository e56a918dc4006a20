// src/models/expense.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::common::Currency;

// Filtro de período comum a todos os relatórios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendGranularity {
    Day,
    Week,
    Month,
    Year,
}

impl TrendGranularity {
    pub fn as_query(&self) -> &'static str {
        match self {
            TrendGranularity::Day => "day",
            TrendGranularity::Week => "week",
            TrendGranularity::Month => "month",
            TrendGranularity::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseByCategory {
    #[serde(default)]
    pub category_id: Option<i64>,
    pub category_name: String,
    pub total_expenses_ves: Decimal,
    #[serde(default)]
    pub expense_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseBySupplier {
    #[serde(default)]
    pub supplier_id: Option<i64>,
    pub supplier_name: String,
    pub total_expenses_ves: Decimal,
    #[serde(default)]
    pub expense_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseTrendPoint {
    pub period: String,
    pub total_expenses_ves: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseTransaction {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub amount_ves_equivalent: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// Soma dos totais VES de um relatório agregado.
pub fn total_ves<'a, I>(rows: I) -> Decimal
where
    I: IntoIterator<Item = &'a Decimal>,
{
    rows.into_iter().copied().sum()
}
