// src/models/billing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::common::Currency;

/// Aplica um conceito a todos os alunos dos graus alvo (vazio = todos).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplyGlobalChargeRequest {
    pub charge_concept_id: i64,
    #[serde(default)]
    pub target_grade_level_ids: Vec<i64>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_amount_currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRecurringRequest {
    pub target_year: i32,
    pub target_month: u32,
    pub issue_date_override: Option<NaiveDate>,
    pub due_date_override: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_concept_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BillingProcessResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub students_processed: u64,
    #[serde(default)]
    pub charges_created: u64,
    #[serde(default)]
    pub warnings: Vec<String>,
}
