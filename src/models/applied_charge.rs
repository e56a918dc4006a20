// src/models/applied_charge.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    charge_concept::ChargeConceptSummary, common::Currency, student::StudentSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedChargeStatus {
    Pending,
    Paid,
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl AppliedChargeStatus {
    /// Status que ainda aceitam pagamento.
    pub const OUTSTANDING: [AppliedChargeStatus; 3] = [
        AppliedChargeStatus::Pending,
        AppliedChargeStatus::PartiallyPaid,
        AppliedChargeStatus::Overdue,
    ];

    pub fn as_query(&self) -> &'static str {
        match self {
            AppliedChargeStatus::Pending => "pending",
            AppliedChargeStatus::Paid => "paid",
            AppliedChargeStatus::PartiallyPaid => "partially_paid",
            AppliedChargeStatus::Overdue => "overdue",
            AppliedChargeStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_outstanding(&self) -> bool {
        Self::OUTSTANDING.contains(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedCharge {
    pub id: i64,
    pub student_id: i64,
    pub charge_concept_id: i64,
    #[serde(default)]
    pub description: Option<String>,

    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,

    // Valor na moeda original do conceito
    pub original_concept_amount: Decimal,
    pub original_concept_currency: Currency,
    #[serde(default)]
    pub amount_due_original_currency: Decimal,
    #[serde(default)]
    pub amount_paid_original_currency_equivalent: Decimal,
    #[serde(default)]
    pub is_indexed: bool,

    // Snapshot em VES no momento da emissão
    #[serde(default)]
    pub exchange_rate_applied_at_emission: Option<Decimal>,
    pub amount_due_ves_at_emission: Decimal,
    #[serde(default)]
    pub amount_paid_ves: Decimal,

    pub status: AppliedChargeStatus,

    #[serde(default)]
    pub invoice_id: Option<i64>,
    #[serde(default)]
    pub is_invoiced: bool,

    #[serde(default)]
    pub student: Option<StudentSummary>,
    #[serde(default)]
    pub charge_concept: Option<ChargeConceptSummary>,
}

impl AppliedCharge {
    pub fn debt_remaining_ves(&self) -> Decimal {
        self.amount_due_ves_at_emission - self.amount_paid_ves
    }

    pub fn debt_remaining_original(&self) -> Decimal {
        self.amount_due_original_currency - self.amount_paid_original_currency_equivalent
    }

    /// IVA do conceito como fração (0.16); zero quando o conceito não veio aninhado.
    pub fn iva_percentage(&self) -> Decimal {
        self.charge_concept
            .as_ref()
            .map(|c| c.iva_percentage)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn display_description(&self) -> String {
        match (&self.description, &self.charge_concept) {
            (Some(d), _) if !d.trim().is_empty() => d.clone(),
            (_, Some(concept)) => concept.name.clone(),
            _ => format!("Cargo #{}", self.id),
        }
    }

    pub fn is_billed(&self) -> bool {
        self.invoice_id.is_some() || self.is_invoiced
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChargeFilters {
    pub student_id: Option<i64>,
    pub representative_id: Option<i64>,
    pub charge_concept_id: Option<i64>,
    // Vários status -> query repetida (?status=pending&status=overdue)
    pub statuses: Vec<AppliedChargeStatus>,
    pub start_issue_date: Option<NaiveDate>,
    pub end_issue_date: Option<NaiveDate>,
    pub is_invoiced: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_dates"))]
pub struct AppliedChargeCreate {
    pub student_id: i64,
    pub charge_concept_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_override: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_override: Option<Currency>,
}

fn validate_dates(charge: &AppliedChargeCreate) -> Result<(), validator::ValidationError> {
    if charge.due_date < charge.issue_date {
        let mut err = validator::ValidationError::new("due_date");
        err.message = Some("La fecha de vencimiento no puede ser anterior a la de emisión.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppliedChargeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppliedChargeStatus>,
}
