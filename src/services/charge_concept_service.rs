// src/services/charge_concept_service.rs

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        charge_concept::{ChargeConcept, ChargeConceptCreate, ChargeConceptFilters, ChargeConceptUpdate},
        common::{ListParams, Paginated},
    },
    session::Session,
};

#[derive(Clone)]
pub struct ChargeConceptService {
    api: ApiClient,
}

impl ChargeConceptService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &ChargeConceptFilters,
    ) -> Result<Paginated<ChargeConcept>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "search", filters.search.as_deref());
        push_opt(&mut query, "category", filters.category.map(|c| c.as_query()));
        push_opt(&mut query, "frequency", filters.frequency.map(|f| f.as_query()));
        push_opt(&mut query, "applicable_grade_level_id", filters.applicable_grade_level_id);
        push_opt(&mut query, "is_active", filters.is_active);

        self.api.get(session, "/charge-concepts/", &query).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<ChargeConcept, AppError> {
        self.api.get(session, &format!("/charge-concepts/{}", id), &[]).await
    }

    pub async fn create(
        &self,
        session: &Session,
        payload: &ChargeConceptCreate,
    ) -> Result<ChargeConcept, AppError> {
        payload.validate()?;
        self.api.post(session, "/charge-concepts/", payload).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &ChargeConceptUpdate,
    ) -> Result<ChargeConcept, AppError> {
        self.api.put(session, &format!("/charge-concepts/{}", id), payload).await
    }

    pub async fn deactivate(&self, session: &Session, id: i64) -> Result<ChargeConcept, AppError> {
        self.api.delete(session, &format!("/charge-concepts/{}", id)).await
    }

    pub async fn activate(&self, session: &Session, id: i64) -> Result<ChargeConcept, AppError> {
        self.api.patch(session, &format!("/charge-concepts/{}/activate", id)).await
    }
}
