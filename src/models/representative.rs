// src/models/representative.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    applied_charge::AppliedCharge, payment::Payment, student::StudentSummary,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Representative {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,

    // Ex: "V", "E", "J"
    #[serde(default)]
    pub identification_type: Option<String>,
    pub cedula: String,

    #[serde(default)]
    pub phone_main: Option<String>,
    #[serde(default)]
    pub phone_secondary: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    // Campos financeiros calculados pelo backend
    #[serde(default)]
    pub current_balance_due_ves_today: Option<Decimal>,
    #[serde(default)]
    pub current_balance_due_usd: Option<Decimal>,
    #[serde(default)]
    pub explicit_available_credit_ves: Option<Decimal>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Representative {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Identificação no formato fiscal, ex: "V-12345678".
    pub fn rif_or_cedula(&self) -> String {
        match self.identification_type.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() && !self.cedula.starts_with(kind) => {
                format!("{}-{}", kind, self.cedula)
            }
            _ => self.cedula.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatusFilter {
    HasDebt,
    Solvent,
    HasCredit,
}

impl FinancialStatusFilter {
    pub fn as_query(&self) -> &'static str {
        match self {
            FinancialStatusFilter::HasDebt => "has_debt",
            FinancialStatusFilter::Solvent => "solvent",
            FinancialStatusFilter::HasCredit => "has_credit",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepresentativeFilters {
    pub search: Option<String>,
    pub financial_status: Option<FinancialStatusFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RepresentativeCreate {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "El apellido es obligatorio."))]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_type: Option<String>,

    #[validate(length(min = 5, max = 15, message = "La cédula debe tener entre 5 y 15 caracteres."))]
    pub cedula: String,

    #[validate(length(min = 7, message = "El teléfono principal no es válido."))]
    pub phone_main: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,

    #[validate(email(message = "El correo electrónico no es válido."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// PUT parcial: só os campos enviados são alterados
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RepresentativeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "El apellido es obligatorio."))]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 15, message = "La cédula debe tener entre 5 y 15 caracteres."))]
    pub cedula: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, message = "El teléfono principal no es válido."))]
    pub phone_main: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "El correo electrónico no es válido."))]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Estado de conta do representante (GET /representatives/{id}/statement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepresentativeStatement {
    pub representative: Representative,
    #[serde(default)]
    pub students: Vec<StudentSummary>,
    #[serde(default)]
    pub charges: Vec<AppliedCharge>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub total_due_ves: Decimal,
    #[serde(default)]
    pub total_paid_ves: Decimal,
    #[serde(default)]
    pub available_credit_ves: Decimal,
    #[serde(default)]
    pub statement_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyCreditRequest {
    pub applied_charge_id: i64,
    pub amount_to_apply_ves: Decimal,
}
