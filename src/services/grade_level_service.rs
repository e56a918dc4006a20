// src/services/grade_level_service.rs

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    models::{
        common::{ListParams, Paginated},
        grade_level::{GradeLevel, GradeLevelCreate, GradeLevelUpdate},
    },
    session::Session,
};

#[derive(Clone)]
pub struct GradeLevelService {
    api: ApiClient,
}

impl GradeLevelService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        search: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Paginated<GradeLevel>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "search", search);
        push_opt(&mut query, "is_active", is_active);

        self.api.get(session, "/grade-levels/", &query).await
    }

    pub async fn create(&self, session: &Session, payload: &GradeLevelCreate) -> Result<GradeLevel, AppError> {
        payload.validate()?;
        self.api.post(session, "/grade-levels/", payload).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &GradeLevelUpdate,
    ) -> Result<GradeLevel, AppError> {
        self.api.put(session, &format!("/grade-levels/{}", id), payload).await
    }

    // DELETE no backend é uma desativação (soft delete)
    pub async fn deactivate(&self, session: &Session, id: i64) -> Result<GradeLevel, AppError> {
        self.api.delete(session, &format!("/grade-levels/{}", id)).await
    }

    pub async fn activate(&self, session: &Session, id: i64) -> Result<GradeLevel, AppError> {
        self.api.patch(session, &format!("/grade-levels/{}/activate", id)).await
    }
}
