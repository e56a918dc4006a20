// src/services/invoice_service.rs

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        common::{ListParams, Paginated},
        invoice::{AnnulInvoiceRequest, Invoice, InvoiceCreate, InvoiceFilters},
    },
    session::Session,
};

#[derive(Clone)]
pub struct InvoiceService {
    api: ApiClient,
}

impl InvoiceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &InvoiceFilters,
    ) -> Result<Paginated<Invoice>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "representative_id", filters.representative_id);
        push_opt(&mut query, "status", filters.status.map(|s| s.as_query()));
        push_opt(&mut query, "emission_type", filters.emission_type.map(|e| e.as_query()));
        push_opt(&mut query, "invoice_number", filters.invoice_number.as_deref());
        push_opt(&mut query, "start_date", filters.start_date);
        push_opt(&mut query, "end_date", filters.end_date);

        self.api.get(session, "/invoices/", &query).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Invoice, AppError> {
        self.api.get(session, &format!("/invoices/{}", id), &[]).await
    }

    pub async fn create(&self, session: &Session, payload: &InvoiceCreate) -> Result<Invoice, AppError> {
        let invoice: Invoice = self.api.post(session, "/invoices/", payload).await?;
        tracing::info!(
            "Factura {} emitida ({:?})",
            invoice.invoice_number.as_deref().unwrap_or("-"),
            invoice.emission_type
        );
        Ok(invoice)
    }

    pub async fn annul(&self, session: &Session, id: i64, reason: &str) -> Result<Invoice, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::StepBlocked(
                "Debe indicar el motivo de la anulación.".to_string(),
            ));
        }

        let request = AnnulInvoiceRequest {
            reason: reason.trim().to_string(),
        };
        self.api
            .post(session, &format!("/invoices/{}/annul", id), &request)
            .await
    }
}
