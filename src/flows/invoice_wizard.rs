// src/flows/invoice_wizard.rs

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    flows::money::round_money,
    models::{
        applied_charge::AppliedCharge,
        invoice::{EmissionType, Invoice, InvoiceCreate},
        representative::Representative,
    },
    services::InvoiceService,
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    ChargeSelection,
    BillingInfo,
    Emission,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ChargeSelection => 1,
            WizardStep::BillingInfo => 2,
            WizardStep::Emission => 3,
        }
    }
}

/// Dados do receptor da fatura (passo 2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingInfo {
    pub name: String,
    pub identification: String,
    pub address: String,
}

impl BillingInfo {
    pub fn from_representative(representative: &Representative) -> Self {
        Self {
            name: representative.full_name(),
            identification: representative.rif_or_cedula(),
            address: representative.address.clone().unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [&self.name, &self.identification, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
}

/// Soma os cargos usando o VES da emissão e o IVA (fração) de cada conceito.
pub fn compute_totals<'a, I>(charges: I) -> InvoiceTotals
where
    I: IntoIterator<Item = &'a AppliedCharge>,
{
    let (subtotal, iva) = charges
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(sub, iva), charge| {
            let amount = charge.amount_due_ves_at_emission;
            (sub + amount, iva + amount * charge.iva_percentage())
        });

    let subtotal = round_money(subtotal);
    let iva = round_money(iva);
    InvoiceTotals {
        subtotal,
        iva,
        total: subtotal + iva,
    }
}

/// Assistente de criação de fatura em três passos lineares.
#[derive(Debug)]
pub struct InvoiceWizard {
    representative_id: i64,
    step: WizardStep,
    available: Vec<AppliedCharge>,
    selected: BTreeSet<i64>,
    pub billing: BillingInfo,
    pub emission_type: EmissionType,
    pub manual_control_number: String,
    pub is_submitting: bool,
    pub form_error: Option<String>,
}

impl InvoiceWizard {
    pub fn new(representative: &Representative, unbilled: Vec<AppliedCharge>) -> Self {
        Self {
            representative_id: representative.id,
            step: WizardStep::ChargeSelection,
            available: unbilled.into_iter().filter(|c| !c.is_billed()).collect(),
            selected: BTreeSet::new(),
            billing: BillingInfo::from_representative(representative),
            emission_type: EmissionType::Digital,
            manual_control_number: String::new(),
            is_submitting: false,
            form_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn available(&self) -> &[AppliedCharge] {
        &self.available
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_charges(&self) -> impl Iterator<Item = &AppliedCharge> {
        self.available.iter().filter(|c| self.selected.contains(&c.id))
    }

    // =========================================================================
    //  PASSO 1: SELEÇÃO
    // =========================================================================

    pub fn toggle(&mut self, charge_id: i64) -> bool {
        if !self.available.iter().any(|c| c.id == charge_id) {
            return false;
        }
        if !self.selected.remove(&charge_id) {
            self.selected.insert(charge_id);
        }
        true
    }

    pub fn is_all_selected(&self) -> bool {
        !self.available.is_empty() && self.selected.len() == self.available.len()
    }

    /// "Selecionar todos": se já estão todos marcados, desmarca.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.available.iter().map(|c| c.id).collect();
        }
    }

    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(self.selected_charges())
    }

    // =========================================================================
    //  GUARDAS
    // =========================================================================

    pub fn selection_guard(&self) -> Result<(), AppError> {
        if self.selected.is_empty() {
            return Err(AppError::StepBlocked(
                "Debe seleccionar al menos un cargo para facturar.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn billing_guard(&self) -> Result<(), AppError> {
        if !self.billing.is_complete() {
            return Err(AppError::StepBlocked(
                "Nombre, identificación y dirección del receptor son obligatorios.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn emission_guard(&self) -> Result<(), AppError> {
        if self.emission_type.requires_manual_control_number()
            && self.manual_control_number.trim().is_empty()
        {
            return Err(AppError::StepBlocked(
                "El número de control es obligatorio para Forma Libre.".to_string(),
            ));
        }
        Ok(())
    }

    // =========================================================================
    //  NAVEGAÇÃO
    // =========================================================================

    pub fn next(&mut self) -> Result<WizardStep, AppError> {
        let next = match self.step {
            WizardStep::ChargeSelection => {
                self.selection_guard()?;
                WizardStep::BillingInfo
            }
            WizardStep::BillingInfo => {
                self.billing_guard()?;
                WizardStep::Emission
            }
            WizardStep::Emission => return Ok(self.step),
        };

        tracing::debug!("Asistente de factura: paso {} -> {}", self.step.number(), next.number());
        self.step = next;
        self.form_error = None;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::ChargeSelection | WizardStep::BillingInfo => WizardStep::ChargeSelection,
            WizardStep::Emission => WizardStep::BillingInfo,
        };
        self.form_error = None;
        self.step
    }

    /// Ao sair de Forma Libre o número de controle digitado some.
    pub fn set_emission_type(&mut self, emission_type: EmissionType) {
        self.emission_type = emission_type;
        if !emission_type.requires_manual_control_number() {
            self.manual_control_number.clear();
        }
    }

    // =========================================================================
    //  ENVIO
    // =========================================================================

    pub fn build_payload(&self) -> Result<InvoiceCreate, AppError> {
        self.selection_guard()?;
        self.billing_guard()?;
        self.emission_guard()?;

        let control = self.manual_control_number.trim();
        Ok(InvoiceCreate {
            representative_id: self.representative_id,
            applied_charge_ids: self.selected_ids(),
            emission_type: self.emission_type,
            representative_name: self.billing.name.trim().to_string(),
            representative_rif_or_cedula: self.billing.identification.trim().to_string(),
            representative_address: self.billing.address.trim().to_string(),
            manual_control_number: (self.emission_type.requires_manual_control_number()
                && !control.is_empty())
            .then(|| control.to_string()),
        })
    }

    /// Único POST com todo o estado acumulado. Falha mantém o passo 3.
    pub async fn submit(&mut self, session: &Session, invoices: &InvoiceService) -> Result<Invoice, AppError> {
        if self.step != WizardStep::Emission {
            return Err(AppError::StepBlocked(
                "Complete los pasos anteriores antes de emitir.".to_string(),
            ));
        }

        let payload = match self.build_payload() {
            Ok(p) => p,
            Err(e) => {
                self.form_error = Some(e.user_message());
                return Err(e);
            }
        };

        self.is_submitting = true;
        self.form_error = None;
        let result = invoices.create(session, &payload).await;
        self.is_submitting = false;

        result.inspect_err(|e| {
            self.form_error = Some(e.user_message());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn charge(id: i64, amount: f64, iva: f64) -> AppliedCharge {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "student_id": 1,
            "charge_concept_id": 1,
            "issue_date": "2024-09-01",
            "due_date": "2024-09-15",
            "original_concept_amount": amount,
            "original_concept_currency": "VES",
            "amount_due_ves_at_emission": amount,
            "status": "pending",
            "charge_concept": { "id": 1, "name": "Mensualidad", "iva_percentage": iva }
        }))
        .unwrap()
    }

    fn representative(address: Option<&str>) -> Representative {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "first_name": "Luis",
            "last_name": "Gómez",
            "identification_type": "V",
            "cedula": "9876543",
            "address": address
        }))
        .unwrap()
    }

    #[test]
    fn totals_follow_selected_charges() {
        let mut wizard = InvoiceWizard::new(
            &representative(Some("Caracas")),
            vec![charge(1, 100.0, 0.16), charge(2, 50.0, 0.0)],
        );
        wizard.toggle_all();

        let totals = wizard.totals();
        assert_eq!(totals.subtotal, d("150"));
        assert_eq!(totals.iva, d("16"));
        assert_eq!(totals.total, d("166"));

        wizard.toggle(1);
        assert_eq!(wizard.totals().total, d("50"));
    }

    #[test]
    fn cannot_leave_step_one_without_selection() {
        let mut wizard = InvoiceWizard::new(&representative(Some("Caracas")), vec![charge(1, 10.0, 0.0)]);
        assert!(matches!(wizard.next(), Err(AppError::StepBlocked(_))));
        assert_eq!(wizard.step(), WizardStep::ChargeSelection);

        wizard.toggle(1);
        assert_eq!(wizard.next().unwrap(), WizardStep::BillingInfo);
    }

    #[test]
    fn billing_fields_must_not_be_blank() {
        let mut wizard = InvoiceWizard::new(&representative(None), vec![charge(1, 10.0, 0.0)]);
        assert_eq!(wizard.billing.name, "Luis Gómez");
        assert_eq!(wizard.billing.identification, "V-9876543");

        wizard.toggle(1);
        wizard.next().unwrap();
        assert!(wizard.next().is_err());

        wizard.billing.address = "   ".into();
        assert!(wizard.next().is_err());

        wizard.billing.address = "Av. Bolívar".into();
        assert_eq!(wizard.next().unwrap(), WizardStep::Emission);
    }

    #[test]
    fn forma_libre_requires_control_number() {
        let mut wizard = InvoiceWizard::new(&representative(Some("Caracas")), vec![charge(1, 10.0, 0.0)]);
        wizard.toggle(1);
        wizard.next().unwrap();
        wizard.next().unwrap();

        wizard.set_emission_type(EmissionType::FormaLibre);
        assert!(wizard.build_payload().is_err());

        wizard.manual_control_number = "00-000123".into();
        let payload = wizard.build_payload().unwrap();
        assert_eq!(payload.manual_control_number.as_deref(), Some("00-000123"));
        assert_eq!(payload.applied_charge_ids, vec![1]);

        wizard.set_emission_type(EmissionType::FiscalPrinter);
        assert_eq!(wizard.build_payload().unwrap().manual_control_number, None);
    }

    #[test]
    fn back_walks_one_step_at_a_time() {
        let mut wizard = InvoiceWizard::new(&representative(Some("Caracas")), vec![charge(1, 10.0, 0.0)]);
        wizard.toggle_all();
        wizard.next().unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.back(), WizardStep::BillingInfo);
        assert_eq!(wizard.back(), WizardStep::ChargeSelection);
        assert_eq!(wizard.back(), WizardStep::ChargeSelection);
        // A seleção sobrevive à navegação
        assert!(wizard.is_all_selected());
    }
}
