// src/services/billing_process_service.rs

use crate::{
    common::{error::AppError, http::ApiClient},
    models::billing::{ApplyGlobalChargeRequest, BillingProcessResult, GenerateRecurringRequest},
    session::Session,
};

#[derive(Clone)]
pub struct BillingProcessService {
    api: ApiClient,
}

impl BillingProcessService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn apply_global_charge(
        &self,
        session: &Session,
        request: &ApplyGlobalChargeRequest,
    ) -> Result<BillingProcessResult, AppError> {
        let result: BillingProcessResult = self
            .api
            .post(session, "/billing-processes/apply-global-charge", request)
            .await?;

        tracing::info!(
            "Cargo global aplicado: {} cargos para {} estudiantes",
            result.charges_created,
            result.students_processed
        );
        for warning in &result.warnings {
            tracing::warn!("Cargo global: {}", warning);
        }
        Ok(result)
    }

    pub async fn generate_recurring_charges(
        &self,
        session: &Session,
        request: &GenerateRecurringRequest,
    ) -> Result<BillingProcessResult, AppError> {
        if !(1..=12).contains(&request.target_month) {
            return Err(AppError::StepBlocked(format!(
                "Mes inválido: {}",
                request.target_month
            )));
        }

        self.api
            .post(session, "/billing-processes/generate-recurring-charges", request)
            .await
    }
}
