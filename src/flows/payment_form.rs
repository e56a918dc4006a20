// src/flows/payment_form.rs

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    flows::{
        confirm::{ClickOutcome, ConfirmGuard},
        currency::{format_money, ves_to_usd, RATE_UNAVAILABLE_LABEL},
        money::{exceeds, parse_amount, parse_amount_lenient, round_money},
    },
    models::{
        applied_charge::AppliedCharge,
        common::Currency,
        payment::{Payment, PaymentAllocationCreate, PaymentCreate, PaymentMethod},
        representative::Representative,
    },
    services::{AppliedChargeService, ExchangeRateService, PaymentService},
    session::Session,
};

// Máximo de cargos pendentes carregados no modal
const OUTSTANDING_LIMIT: u32 = 200;

/// Dívida de um cargo na moeda de exibição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtDisplay {
    Amount(Decimal),
    RateUnavailable,
}

impl DebtDisplay {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            DebtDisplay::Amount(v) => Some(*v),
            DebtDisplay::RateUnavailable => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllocationRow {
    pub charge: AppliedCharge,
    pub input: String,
}

impl AllocationRow {
    /// Texto da linha no modal, ex: `Mensualidad Octubre (vence 15/10/2024)`.
    pub fn label(&self) -> String {
        format!(
            "{} (vence {})",
            self.charge.display_description(),
            self.charge.due_date.format("%d/%m/%Y")
        )
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Primeiro clique: o botão agora pede confirmação.
    AwaitingConfirmation,
    /// Clique durante um envio em andamento.
    AlreadySubmitting,
    Created(Payment),
}

#[derive(Debug)]
pub struct PaymentForm {
    pub representative: Option<Representative>,
    pub payment_date: NaiveDate,
    pub currency_paid: Currency,
    pub amount_input: String,
    pub payment_method: PaymentMethod,
    pub reference_number: String,
    pub notes: String,

    // VES por 1 USD, vindo de /exchange-rates/latest/
    usd_rate: Option<Decimal>,
    rows: Vec<AllocationRow>,
    confirm: ConfirmGuard,

    pub is_loading: bool,
    pub is_submitting: bool,
    pub form_error: Option<String>,
}

impl PaymentForm {
    pub fn new(payment_date: NaiveDate, confirm_window: Duration) -> Self {
        Self {
            representative: None,
            payment_date,
            currency_paid: Currency::Ves,
            amount_input: String::new(),
            payment_method: PaymentMethod::Transfer,
            reference_number: String::new(),
            notes: String::new(),
            usd_rate: None,
            rows: Vec::new(),
            confirm: ConfirmGuard::new(confirm_window),
            is_loading: false,
            is_submitting: false,
            form_error: None,
        }
    }

    // =========================================================================
    //  CARGA DE DADOS
    // =========================================================================

    /// Seleciona o representante e carrega cargos pendentes + taxa USD.
    pub async fn select_representative(
        &mut self,
        session: &Session,
        charges: &AppliedChargeService,
        rates: &ExchangeRateService,
        representative: Representative,
    ) -> Result<(), AppError> {
        let representative_id = representative.id;
        self.representative = Some(representative);
        self.rows.clear();
        self.confirm.reset();
        self.form_error = None;
        self.is_loading = true;

        // Cargos e taxa são independentes; sem taxa os cargos continuam listados
        let (outstanding, rate) = tokio::join!(
            charges.list_outstanding_for_representative(session, representative_id, OUTSTANDING_LIMIT),
            rates.latest(session, Currency::Usd, Currency::Ves),
        );
        self.is_loading = false;

        let rate = match rate {
            Ok(rate) => rate.map(|r| r.rate),
            Err(e) => {
                tracing::warn!("No se pudo obtener la tasa USD: {}", e);
                None
            }
        };
        self.set_usd_rate(rate);

        match outstanding {
            Ok(outstanding) => {
                self.set_charges(outstanding);
                Ok(())
            }
            Err(e) => {
                self.form_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn set_charges(&mut self, charges: Vec<AppliedCharge>) {
        self.rows = charges
            .into_iter()
            .filter(|c| c.status.is_outstanding())
            .map(|charge| AllocationRow {
                charge,
                input: String::new(),
            })
            .collect();
    }

    pub fn set_usd_rate(&mut self, rate: Option<Decimal>) {
        self.usd_rate = rate.filter(|r| *r > Decimal::ZERO);
    }

    pub fn usd_rate(&self) -> Option<Decimal> {
        self.usd_rate
    }

    /// Troca a moeda do pagamento. Valores digitados na moeda antiga são descartados.
    pub fn set_currency_paid(&mut self, currency: Currency) {
        if self.currency_paid != currency {
            self.currency_paid = currency;
            self.clear_allocations();
        }
    }

    pub fn rows(&self) -> &[AllocationRow] {
        &self.rows
    }

    // =========================================================================
    //  DÍVIDA POR LINHA
    // =========================================================================

    /// Dívida do cargo na moeda do pagamento.
    /// USD indexado usa a dívida na moeda original; o resto divide o VES pela taxa.
    pub fn debt_for(&self, charge: &AppliedCharge) -> DebtDisplay {
        let debt_ves = charge.debt_remaining_ves();
        match self.currency_paid {
            Currency::Ves => DebtDisplay::Amount(debt_ves),
            Currency::Usd => {
                if charge.original_concept_currency == Currency::Usd && charge.is_indexed {
                    return DebtDisplay::Amount(charge.debt_remaining_original());
                }
                match ves_to_usd(debt_ves, self.usd_rate) {
                    Some(v) => DebtDisplay::Amount(round_money(v)),
                    None => DebtDisplay::RateUnavailable,
                }
            }
            // Só buscamos a taxa USD; outras moedas não têm conversão aqui
            Currency::Eur => DebtDisplay::RateUnavailable,
        }
    }

    pub fn debt_label(&self, charge: &AppliedCharge) -> String {
        match self.debt_for(charge) {
            DebtDisplay::Amount(v) => format_money(v, self.currency_paid),
            DebtDisplay::RateUnavailable => RATE_UNAVAILABLE_LABEL.to_string(),
        }
    }

    // =========================================================================
    //  ALOCAÇÕES
    // =========================================================================

    pub fn set_allocation(&mut self, charge_id: i64, raw: &str) -> bool {
        match self.rows.iter_mut().find(|r| r.charge.id == charge_id) {
            Some(row) => {
                row.input = raw.to_string();
                true
            }
            None => false,
        }
    }

    /// Preenche a linha com a dívida inteira (quando há valor comparável).
    pub fn allocate_full(&mut self, charge_id: i64) -> bool {
        let debt = self
            .rows
            .iter()
            .find(|r| r.charge.id == charge_id)
            .and_then(|r| self.debt_for(&r.charge).amount());

        match debt {
            Some(v) => self.set_allocation(charge_id, &round_money(v).to_string()),
            None => false,
        }
    }

    pub fn clear_allocations(&mut self) {
        for row in &mut self.rows {
            row.input.clear();
        }
    }

    /// Total corrente, recalculado a cada tecla.
    pub fn total_allocated(&self) -> Decimal {
        self.rows.iter().map(|r| parse_amount_lenient(&r.input)).sum()
    }

    pub fn amount_paid(&self) -> Decimal {
        parse_amount_lenient(&self.amount_input)
    }

    /// Aviso não bloqueante: total alocado acima do valor pago.
    pub fn over_allocation_warning(&self) -> Option<String> {
        let total = self.total_allocated();
        let paid = self.amount_paid();
        if exceeds(total, paid) {
            Some(format!(
                "El total asignado ({}) excede el monto del pago ({}).",
                format_money(total, self.currency_paid),
                format_money(paid, self.currency_paid)
            ))
        } else {
            None
        }
    }

    /// Linhas cuja alocação passa da dívida. Sem taxa não há comparação.
    pub fn rows_exceeding_debt(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter_map(|row| {
                let debt = self.debt_for(&row.charge).amount()?;
                let allocated = parse_amount_lenient(&row.input);
                exceeds(allocated, debt).then_some(row.charge.id)
            })
            .collect()
    }

    // =========================================================================
    //  ENVIO
    // =========================================================================

    /// Valida e monta o payload. Linhas vazias ou zero são descartadas.
    pub fn build_payload(&self) -> Result<PaymentCreate, AppError> {
        let representative = self.representative.as_ref().ok_or_else(|| {
            AppError::StepBlocked("Debe seleccionar un representante.".to_string())
        })?;

        let amount_paid = parse_amount(&self.amount_input)?;
        if amount_paid <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(self.amount_input.clone()));
        }

        let mut allocations = Vec::new();
        let mut total = Decimal::ZERO;
        for row in &self.rows {
            let amount = parse_amount(&row.input)?;
            if amount.is_zero() {
                continue;
            }
            total += amount;
            allocations.push(PaymentAllocationCreate {
                applied_charge_id: row.charge.id,
                amount_to_allocate: amount,
            });
        }

        if exceeds(total, amount_paid) {
            return Err(AppError::AllocationExceeded {
                allocated: total,
                paid: amount_paid,
            });
        }

        let reference = self.reference_number.trim();
        let notes = self.notes.trim();
        Ok(PaymentCreate {
            representative_id: representative.id,
            payment_date: self.payment_date,
            amount_paid,
            currency_paid: self.currency_paid,
            payment_method: self.payment_method,
            reference_number: (!reference.is_empty()).then(|| reference.to_string()),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            allocations_details: allocations,
        })
    }

    pub fn confirm_label(&self) -> &'static str {
        self.confirm.label()
    }

    /// Clique no botão "Registrar Pago".
    /// O primeiro clique válido só arma a confirmação; o segundo envia.
    pub async fn submit(
        &mut self,
        session: &Session,
        payments: &PaymentService,
    ) -> Result<SubmitOutcome, AppError> {
        let payload = match self.build_payload() {
            Ok(p) => p,
            Err(e) => {
                self.confirm.reset();
                self.form_error = Some(e.user_message());
                return Err(e);
            }
        };

        match self.confirm.click() {
            ClickOutcome::Armed => return Ok(SubmitOutcome::AwaitingConfirmation),
            ClickOutcome::Ignored => return Ok(SubmitOutcome::AlreadySubmitting),
            ClickOutcome::Proceed => {}
        }

        self.is_submitting = true;
        self.form_error = None;
        let result = payments.create(session, &payload).await;
        self.is_submitting = false;
        self.confirm.finish();

        match result {
            Ok(payment) => {
                self.reset();
                Ok(SubmitOutcome::Created(payment))
            }
            Err(e) => {
                // Mantém o que foi digitado para o usuário tentar de novo
                self.form_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Fechar o modal: tudo volta ao estado inicial e o timer é cancelado.
    pub fn reset(&mut self) {
        self.representative = None;
        self.currency_paid = Currency::Ves;
        self.amount_input.clear();
        self.reference_number.clear();
        self.notes.clear();
        self.rows.clear();
        self.confirm.reset();
        self.is_loading = false;
        self.is_submitting = false;
        self.form_error = None;
    }
}
