// src/models/student.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::grade_level::GradeLevelSummary;

// Classificação de atraso calculada pelo backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelinquencyStatus {
    Green,
    Orange,
    Red,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepresentativeSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub cedula: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl StudentSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub cedula: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<String>,

    #[serde(default)]
    pub grade_level_id: Option<i64>,
    #[serde(default)]
    pub grade_level: Option<GradeLevelSummary>,

    pub representative_id: i64,
    #[serde(default)]
    pub representative: Option<RepresentativeSummary>,

    // Bolsa / casos especiais
    #[serde(default)]
    pub has_scholarship: bool,
    #[serde(default)]
    pub scholarship_percentage: Option<Decimal>,
    #[serde(default)]
    pub scholarship_fixed_amount: Option<Decimal>,
    #[serde(default)]
    pub is_special_case: bool,
    #[serde(default)]
    pub special_case_notes: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub delinquency_status: Option<DelinquencyStatus>,
}

fn default_true() -> bool {
    true
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilters {
    pub search: Option<String>,
    pub grade_level_id: Option<i64>,
    pub representative_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_scholarship"))]
pub struct StudentCreate {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "El apellido es obligatorio."))]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    pub grade_level_id: i64,
    pub representative_id: i64,

    #[serde(default)]
    pub has_scholarship: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_fixed_amount: Option<Decimal>,

    #[serde(default)]
    pub is_special_case: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_case_notes: Option<String>,
}

// Bolsa: percentual entre 0 e 100, nunca negativo
fn validate_scholarship(student: &StudentCreate) -> Result<(), validator::ValidationError> {
    if let Some(pct) = student.scholarship_percentage {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            let mut err = validator::ValidationError::new("scholarship_percentage");
            err.message = Some("El porcentaje de beca debe estar entre 0 y 100.".into());
            return Err(err);
        }
    }
    if let Some(fixed) = student.scholarship_fixed_amount {
        if fixed < Decimal::ZERO {
            let mut err = validator::ValidationError::new("scholarship_fixed_amount");
            err.message = Some("El monto fijo de beca no puede ser negativo.".into());
            return Err(err);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_scholarship: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_fixed_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_special_case: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyDebtDetail {
    pub month_name: String,
    pub month_number: u32,
    pub year: i32,
    #[serde(default)]
    pub debt_usd: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Resumo anual por aluno (GET /students/annual-financial-summary/).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAnnualFinancialSummary {
    pub student_id: i64,
    pub student_full_name: String,
    #[serde(default)]
    pub student_cedula: Option<String>,
    #[serde(default)]
    pub grade_level_name: Option<String>,
    pub representative_id: i64,
    pub representative_full_name: String,
    #[serde(default)]
    pub monthly_debt_details: Vec<MonthlyDebtDetail>,
    #[serde(default)]
    pub total_debt_usd_annual: Decimal,
    #[serde(default)]
    pub delinquency_status: Option<DelinquencyStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnualSummaryFilters {
    pub school_year_start: Option<i32>,
    pub search: Option<String>,
    pub delinquency_status: Option<DelinquencyStatus>,
}
