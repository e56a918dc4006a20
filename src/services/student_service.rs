// src/services/student_service.rs

use async_trait::async_trait;
use reqwest::Method;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        http::{push_opt, ApiClient, Query},
    },
    flows::search::Searcher,
    models::{
        common::{ListParams, Paginated},
        student::{
            AnnualSummaryFilters, DelinquencyStatus, Student, StudentAnnualFinancialSummary,
            StudentCreate, StudentFilters, StudentUpdate,
        },
    },
    services::representative_service::friendly_error,
    session::Session,
};

#[derive(Clone)]
pub struct StudentService {
    api: ApiClient,
}

impl StudentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &StudentFilters,
    ) -> Result<Paginated<Student>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "search", filters.search.as_deref());
        push_opt(&mut query, "grade_level_id", filters.grade_level_id);
        push_opt(&mut query, "representative_id", filters.representative_id);
        push_opt(&mut query, "is_active", filters.is_active);

        self.api.get(session, "/students/", &query).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Student, AppError> {
        self.api.get(session, &format!("/students/{}", id), &[]).await
    }

    pub async fn create(&self, session: &Session, payload: &StudentCreate) -> Result<Student, AppError> {
        payload.validate()?;

        self.api
            .execute_raw(session, Method::POST, "/students/", &[], Some(payload))
            .await?
            .map_err(friendly_error)
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &StudentUpdate,
    ) -> Result<Student, AppError> {
        self.api
            .execute_raw(session, Method::PUT, &format!("/students/{}", id), &[], Some(payload))
            .await?
            .map_err(friendly_error)
    }

    pub async fn activate(&self, session: &Session, id: i64) -> Result<Student, AppError> {
        self.api.patch(session, &format!("/students/{}/activate", id)).await
    }

    pub async fn deactivate(&self, session: &Session, id: i64) -> Result<Student, AppError> {
        self.api.patch(session, &format!("/students/{}/deactivate", id)).await
    }

    pub async fn annual_financial_summary(
        &self,
        session: &Session,
        params: ListParams,
        filters: &AnnualSummaryFilters,
    ) -> Result<Paginated<StudentAnnualFinancialSummary>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "school_year_start", filters.school_year_start);
        push_opt(&mut query, "search", filters.search.as_deref());
        push_opt(
            &mut query,
            "delinquency_filter",
            filters.delinquency_status.map(delinquency_query),
        );

        self.api
            .get(session, "/students/annual-financial-summary/", &query)
            .await
    }

    pub fn searcher(&self, session: Session, limit: u32) -> StudentSearcher {
        StudentSearcher {
            service: self.clone(),
            session,
            limit,
        }
    }
}

fn delinquency_query(status: DelinquencyStatus) -> &'static str {
    match status {
        DelinquencyStatus::Green => "green",
        DelinquencyStatus::Orange => "orange",
        DelinquencyStatus::Red => "red",
        DelinquencyStatus::None => "none",
    }
}

pub struct StudentSearcher {
    service: StudentService,
    session: Session,
    limit: u32,
}

#[async_trait]
impl Searcher for StudentSearcher {
    type Item = Student;

    async fn search(&self, query: &str) -> Result<Vec<Student>, AppError> {
        let filters = StudentFilters {
            search: Some(query.to_string()),
            ..Default::default()
        };
        let page = self
            .service
            .list(&self.session, ListParams { skip: 0, limit: self.limit }, &filters)
            .await?;
        Ok(page.items)
    }
}
