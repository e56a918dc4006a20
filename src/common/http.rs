// src/common/http.rs

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    common::error::{extract_detail, AppError},
    session::Session,
};

/// Parâmetros de query; chaves repetidas viram multi-valor (`status=a&status=b`).
pub type Query = Vec<(&'static str, String)>;

/// Resposta de erro bruta, antes da normalização.
/// Os serviços usam isso para dar mensagens mais amigáveis em alguns status.
#[derive(Debug, Clone)]
pub struct RawError {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl RawError {
    pub fn into_app_error(self) -> AppError {
        AppError::Api {
            status: self.status.as_u16(),
            message: extract_detail(self.status, &self.body),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, session: &Session, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Envia e separa sucesso de erro, sem normalizar ainda
    async fn send_raw(&self, builder: RequestBuilder) -> Result<Result<Response, RawError>, AppError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(Ok(response));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("API respondeu {}: {}", status, body);
        Ok(Err(RawError { status, body }))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let bytes = response.bytes().await?;
        // 204 / corpo vazio -> `null`, útil para `()` e `Option<T>`
        if bytes.is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Executa a requisição devolvendo o erro bruto para tratamento no serviço.
    pub async fn execute_raw<T, B>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<Result<T, RawError>, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(session, method, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        match self.send_raw(builder).await? {
            Ok(response) => Ok(Ok(Self::decode(response).await?)),
            Err(raw) => Ok(Err(raw)),
        }
    }

    pub async fn execute<T, B>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_raw(session, method, path, query, body)
            .await?
            .map_err(RawError::into_app_error)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, AppError> {
        self.execute::<T, ()>(session, Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.execute(session, Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.execute(session, Method::PUT, path, &[], Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<T, AppError> {
        self.execute::<T, ()>(session, Method::PATCH, path, &[], None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<T, AppError> {
        self.execute::<T, ()>(session, Method::DELETE, path, &[], None).await
    }
}

/// Acrescenta um parâmetro opcional na query, ignorando strings vazias.
pub fn push_opt<V: ToString>(query: &mut Query, key: &'static str, value: Option<V>) {
    if let Some(v) = value {
        let v = v.to_string();
        if !v.trim().is_empty() {
            query.push((key, v));
        }
    }
}
