// src/services/applied_charge_service.rs

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        applied_charge::{
            AppliedCharge, AppliedChargeCreate, AppliedChargeFilters, AppliedChargeStatus,
            AppliedChargeUpdate,
        },
        common::{ListParams, Paginated},
    },
    session::Session,
};

#[derive(Clone)]
pub struct AppliedChargeService {
    api: ApiClient,
}

/// Monta a query da listagem. Cada status vira um `status=` separado.
pub fn build_query(params: ListParams, filters: &AppliedChargeFilters) -> Query {
    let mut query: Query = params.to_query();
    push_opt(&mut query, "student_id", filters.student_id);
    push_opt(&mut query, "representative_id", filters.representative_id);
    push_opt(&mut query, "charge_concept_id", filters.charge_concept_id);
    for status in &filters.statuses {
        query.push(("status", status.as_query().to_string()));
    }
    push_opt(&mut query, "start_issue_date", filters.start_issue_date);
    push_opt(&mut query, "end_issue_date", filters.end_issue_date);
    push_opt(&mut query, "is_invoiced", filters.is_invoiced);
    query
}

impl AppliedChargeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &AppliedChargeFilters,
    ) -> Result<Paginated<AppliedCharge>, AppError> {
        let query = build_query(params, filters);
        self.api.get(session, "/applied-charges/", &query).await
    }

    /// Cargos que ainda aceitam pagamento (pending, partially_paid, overdue).
    pub async fn list_outstanding_for_representative(
        &self,
        session: &Session,
        representative_id: i64,
        limit: u32,
    ) -> Result<Vec<AppliedCharge>, AppError> {
        let filters = AppliedChargeFilters {
            representative_id: Some(representative_id),
            statuses: AppliedChargeStatus::OUTSTANDING.to_vec(),
            ..Default::default()
        };
        let page = self.list(session, ListParams { skip: 0, limit }, &filters).await?;
        Ok(page.items)
    }

    /// Cargos ainda não faturados do representante (passo 1 do assistente de fatura).
    pub async fn list_unbilled_for_representative(
        &self,
        session: &Session,
        representative_id: i64,
        limit: u32,
    ) -> Result<Vec<AppliedCharge>, AppError> {
        let filters = AppliedChargeFilters {
            representative_id: Some(representative_id),
            is_invoiced: Some(false),
            ..Default::default()
        };
        let page = self.list(session, ListParams { skip: 0, limit }, &filters).await?;

        // O backend pode ignorar o filtro; cancelados nunca são faturáveis
        Ok(page
            .items
            .into_iter()
            .filter(|c| !c.is_billed() && c.status != AppliedChargeStatus::Cancelled)
            .collect())
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<AppliedCharge, AppError> {
        self.api.get(session, &format!("/applied-charges/{}", id), &[]).await
    }

    pub async fn create(
        &self,
        session: &Session,
        payload: &AppliedChargeCreate,
    ) -> Result<AppliedCharge, AppError> {
        payload.validate()?;
        self.api.post(session, "/applied-charges/", payload).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &AppliedChargeUpdate,
    ) -> Result<AppliedCharge, AppError> {
        self.api.put(session, &format!("/applied-charges/{}", id), payload).await
    }
}
