// src/services/representative_service.rs

use async_trait::async_trait;
use reqwest::Method;
use validator::Validate;

use crate::{
    common::{
        error::{validation_entries, AppError},
        http::{push_opt, ApiClient, Query, RawError},
    },
    flows::search::Searcher,
    models::{
        common::{ListParams, MessageResponse, Paginated},
        representative::{
            ApplyCreditRequest, Representative, RepresentativeCreate, RepresentativeFilters,
            RepresentativeStatement, RepresentativeUpdate,
        },
    },
    session::Session,
};

#[derive(Clone)]
pub struct RepresentativeService {
    api: ApiClient,
}

impl RepresentativeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        session: &Session,
        params: ListParams,
        filters: &RepresentativeFilters,
    ) -> Result<Paginated<Representative>, AppError> {
        let mut query: Query = params.to_query();
        push_opt(&mut query, "search", filters.search.as_deref());
        push_opt(
            &mut query,
            "financialStatus",
            filters.financial_status.map(|s| s.as_query()),
        );

        self.api.get(session, "/representatives/", &query).await
    }

    pub async fn get(&self, session: &Session, id: i64) -> Result<Representative, AppError> {
        self.api
            .get(session, &format!("/representatives/{}", id), &[])
            .await
    }

    pub async fn create(
        &self,
        session: &Session,
        payload: &RepresentativeCreate,
    ) -> Result<Representative, AppError> {
        payload.validate()?;

        self.api
            .execute_raw(session, Method::POST, "/representatives/", &[], Some(payload))
            .await?
            .map_err(friendly_error)
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        payload: &RepresentativeUpdate,
    ) -> Result<Representative, AppError> {
        payload.validate()?;

        self.api
            .execute_raw(
                session,
                Method::PUT,
                &format!("/representatives/{}", id),
                &[],
                Some(payload),
            )
            .await?
            .map_err(friendly_error)
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let _: Option<serde_json::Value> = self
            .api
            .delete(session, &format!("/representatives/{}", id))
            .await?;
        Ok(())
    }

    pub async fn statement(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<RepresentativeStatement, AppError> {
        self.api
            .get(session, &format!("/representatives/{}/statement", id), &[])
            .await
    }

    pub async fn apply_credit(
        &self,
        session: &Session,
        id: i64,
        request: &ApplyCreditRequest,
    ) -> Result<MessageResponse, AppError> {
        if request.amount_to_apply_ves <= rust_decimal::Decimal::ZERO {
            return Err(AppError::InvalidAmount(request.amount_to_apply_ves.to_string()));
        }

        self.api
            .post(session, &format!("/representatives/{}/apply-credit", id), request)
            .await
    }

    /// Adaptador para a busca com debounce do modal de pagamento.
    pub fn searcher(&self, session: Session, limit: u32) -> RepresentativeSearcher {
        RepresentativeSearcher {
            service: self.clone(),
            session,
            limit,
        }
    }
}

// 409 = cédula duplicada; 422 com campo de telefone/e-mail ganha mensagem própria
pub(crate) fn friendly_error(raw: RawError) -> AppError {
    match raw.status.as_u16() {
        409 => AppError::Api {
            status: 409,
            message: "Ya existe un registro con esa cédula.".to_string(),
        },
        422 => {
            let entries = validation_entries(&raw.body);
            let touches = |needle: &str| {
                entries
                    .iter()
                    .any(|e| e.field().is_some_and(|f| f.contains(needle)))
            };

            if touches("phone") {
                AppError::Api {
                    status: 422,
                    message: "El número de teléfono no tiene un formato válido.".to_string(),
                }
            } else if touches("email") {
                AppError::Api {
                    status: 422,
                    message: "El correo electrónico no tiene un formato válido.".to_string(),
                }
            } else {
                raw.into_app_error()
            }
        }
        _ => raw.into_app_error(),
    }
}

pub struct RepresentativeSearcher {
    service: RepresentativeService,
    session: Session,
    limit: u32,
}

#[async_trait]
impl Searcher for RepresentativeSearcher {
    type Item = Representative;

    async fn search(&self, query: &str) -> Result<Vec<Representative>, AppError> {
        let filters = RepresentativeFilters {
            search: Some(query.to_string()),
            financial_status: None,
        };
        let page = self
            .service
            .list(
                &self.session,
                ListParams { skip: 0, limit: self.limit },
                &filters,
            )
            .await?;
        Ok(page.items)
    }
}
