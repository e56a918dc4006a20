// src/flows/global_charge.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    flows::money::parse_amount,
    models::{
        billing::{ApplyGlobalChargeRequest, BillingProcessResult},
        charge_concept::ChargeConcept,
        common::Currency,
    },
    services::BillingProcessService,
    session::Session,
};

/// Formulário do modal "Aplicar cargo global".
#[derive(Debug, Clone)]
pub struct GlobalChargeForm {
    pub concept: Option<ChargeConcept>,
    // Vazio = todos os graus
    pub target_grade_level_ids: Vec<i64>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount_override: String,
    pub description: String,
    pub is_submitting: bool,
    pub form_error: Option<String>,

    // Alvo preenchido pelo conceito, não pelo usuário
    grades_from_concept: bool,
}

impl GlobalChargeForm {
    pub fn new(issue_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            concept: None,
            target_grade_level_ids: Vec::new(),
            issue_date,
            due_date,
            amount_override: String::new(),
            description: String::new(),
            is_submitting: false,
            form_error: None,
            grades_from_concept: false,
        }
    }

    /// Conceito escolhido; se o conceito for de um grau só, ele vira o alvo.
    /// Trocar para um conceito sem grau limpa o alvo herdado do anterior.
    pub fn select_concept(&mut self, concept: ChargeConcept) {
        match concept.applicable_grade_level_id {
            Some(grade_id) => {
                self.target_grade_level_ids = vec![grade_id];
                self.grades_from_concept = true;
            }
            None if self.grades_from_concept => {
                self.target_grade_level_ids.clear();
                self.grades_from_concept = false;
            }
            None => {}
        }
        self.concept = Some(concept);
    }

    pub fn toggle_grade_level(&mut self, grade_level_id: i64) {
        self.grades_from_concept = false;
        match self.target_grade_level_ids.iter().position(|id| *id == grade_level_id) {
            Some(pos) => {
                self.target_grade_level_ids.remove(pos);
            }
            None => self.target_grade_level_ids.push(grade_level_id),
        }
    }

    /// Valor efetivo e moeda que serão cobrados.
    pub fn effective_amount(&self) -> Option<(Decimal, Currency)> {
        let concept = self.concept.as_ref()?;
        match parse_amount(&self.amount_override) {
            Ok(v) if !v.is_zero() => Some((v, concept.default_amount_currency)),
            _ => Some((concept.default_amount, concept.default_amount_currency)),
        }
    }

    pub fn build_request(&self) -> Result<ApplyGlobalChargeRequest, AppError> {
        let concept = self.concept.as_ref().ok_or_else(|| {
            AppError::StepBlocked("Debe seleccionar un concepto de cobro.".to_string())
        })?;

        if self.due_date < self.issue_date {
            return Err(AppError::StepBlocked(
                "La fecha de vencimiento no puede ser anterior a la de emisión.".to_string(),
            ));
        }

        let override_amount = parse_amount(&self.amount_override)?;
        let custom_amount = if override_amount.is_zero() {
            None
        } else {
            if concept.is_amount_fixed {
                return Err(AppError::StepBlocked(format!(
                    "El concepto '{}' tiene monto fijo y no admite otro valor.",
                    concept.name
                )));
            }
            Some(override_amount)
        };

        let description = self.description.trim();
        let mut grade_ids = self.target_grade_level_ids.clone();
        grade_ids.sort_unstable();
        grade_ids.dedup();

        Ok(ApplyGlobalChargeRequest {
            charge_concept_id: concept.id,
            target_grade_level_ids: grade_ids,
            issue_date: self.issue_date,
            due_date: self.due_date,
            custom_amount,
            custom_amount_currency: custom_amount.map(|_| concept.default_amount_currency),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub async fn submit(
        &mut self,
        session: &Session,
        billing: &BillingProcessService,
    ) -> Result<BillingProcessResult, AppError> {
        let request = match self.build_request() {
            Ok(r) => r,
            Err(e) => {
                self.form_error = Some(e.user_message());
                return Err(e);
            }
        };

        self.is_submitting = true;
        self.form_error = None;
        let result = billing.apply_global_charge(session, &request).await;
        self.is_submitting = false;

        result.inspect_err(|e| {
            self.form_error = Some(e.user_message());
        })
    }
}
