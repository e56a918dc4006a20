// src/models/charge_concept.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{common::Currency, grade_level::GradeLevelSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeFrequency {
    Monthly,
    Biweekly,
    Annual,
    OneTime,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    Tuition,
    Enrollment,
    Uniform,
    Materials,
    Activities,
    Transport,
    Cafeteria,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeConcept {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,

    pub default_amount: Decimal,
    pub default_amount_currency: Currency,
    #[serde(default)]
    pub is_amount_fixed: bool,

    pub default_frequency: ChargeFrequency,
    pub category: ChargeCategory,

    // Fração 0..1 (0.16 = 16%)
    #[serde(default)]
    pub iva_percentage: Decimal,

    #[serde(default)]
    pub applicable_grade_level_id: Option<i64>,
    #[serde(default)]
    pub grade_level: Option<GradeLevelSummary>,

    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChargeConceptSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub iva_percentage: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeConceptFilters {
    pub search: Option<String>,
    pub category: Option<ChargeCategory>,
    pub frequency: Option<ChargeFrequency>,
    pub applicable_grade_level_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_concept_amounts"))]
pub struct ChargeConceptCreate {
    #[validate(length(min = 1, message = "El nombre del concepto es obligatorio."))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub default_amount: Decimal,
    pub default_amount_currency: Currency,
    #[serde(default)]
    pub is_amount_fixed: bool,
    pub default_frequency: ChargeFrequency,
    pub category: ChargeCategory,
    #[serde(default)]
    pub iva_percentage: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_grade_level_id: Option<i64>,
}

fn validate_concept_amounts(concept: &ChargeConceptCreate) -> Result<(), validator::ValidationError> {
    if concept.default_amount < Decimal::ZERO {
        let mut err = validator::ValidationError::new("default_amount");
        err.message = Some("El monto no puede ser negativo.".into());
        return Err(err);
    }
    if concept.iva_percentage < Decimal::ZERO || concept.iva_percentage > Decimal::ONE {
        let mut err = validator::ValidationError::new("iva_percentage");
        err.message = Some("El IVA debe expresarse como fracción entre 0 y 1.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeConceptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_amount_currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_frequency: Option<ChargeFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ChargeCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iva_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_grade_level_id: Option<i64>,
}

impl ChargeCategory {
    pub fn as_query(&self) -> &'static str {
        match self {
            ChargeCategory::Tuition => "tuition",
            ChargeCategory::Enrollment => "enrollment",
            ChargeCategory::Uniform => "uniform",
            ChargeCategory::Materials => "materials",
            ChargeCategory::Activities => "activities",
            ChargeCategory::Transport => "transport",
            ChargeCategory::Cafeteria => "cafeteria",
            ChargeCategory::Other => "other",
        }
    }
}

impl ChargeFrequency {
    pub fn as_query(&self) -> &'static str {
        match self {
            ChargeFrequency::Monthly => "monthly",
            ChargeFrequency::Biweekly => "biweekly",
            ChargeFrequency::Annual => "annual",
            ChargeFrequency::OneTime => "one_time",
            ChargeFrequency::Other => "other",
        }
    }
}
