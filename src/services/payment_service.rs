// src/services/payment_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        common::{ListParams, Paginated},
        payment::{Payment, PaymentCreate, PaymentFilters},
    },
    session::Session,
};

#[derive(Clone)]
pub struct PaymentService {
    api: ApiClient,
}

impl PaymentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &PaymentFilters,
    ) -> Result<Paginated<Payment>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "representative_id", filters.representative_id);
        push_opt(&mut query, "start_date", filters.start_date);
        push_opt(&mut query, "end_date", filters.end_date);
        push_opt(&mut query, "payment_method", filters.payment_method.map(|m| m.label()));

        self.api.get(session, "/payments/", &query).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Payment, AppError> {
        self.api.get(session, &format!("/payments/{}", id), &[]).await
    }

    /// Registra o pagamento com as alocações aninhadas.
    pub async fn create(&self, session: &Session, payload: &PaymentCreate) -> Result<Payment, AppError> {
        if payload.amount_paid <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(payload.amount_paid.to_string()));
        }

        let payment: Payment = self.api.post(session, "/payments/", payload).await?;
        tracing::info!(
            "Pago #{} registrado: {} {} ({} asignaciones)",
            payment.id,
            payment.amount_paid,
            payment.currency_paid,
            payment.allocations.len()
        );
        Ok(payment)
    }
}
