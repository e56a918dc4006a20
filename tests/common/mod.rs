// Backend falso para os testes de integração: grava cada requisição e
// responde com o que o teste registrou para (método, caminho).
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;

use school_admin::{common::http::ApiClient, Session};

pub const PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    // Query já decodificada pelo extrator do axum, na ordem em que veio
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl Recorded {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query.clone()
    }
}

#[derive(Clone)]
struct Canned {
    method: Method,
    path: String,
    status: StatusCode,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<Vec<Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}{}", addr, PREFIX),
            state,
        }
    }

    /// Registra uma resposta. A última registrada para a rota vence.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.state.routes.lock().unwrap().push(Canned {
            method,
            path: path.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            body: Some(body),
        });
    }

    pub fn on_empty(&self, method: Method, path: &str, status: u16) {
        self.state.routes.lock().unwrap().push(Canned {
            method,
            path: path.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            body: None,
        });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, std::time::Duration::from_secs(5)).unwrap()
    }
}

pub fn session() -> Session {
    Session::new(Some("token-de-prueba".to_string()))
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix(PREFIX).unwrap_or(uri.path()).to_string();

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: Query::<Vec<(String, String)>>::try_from_uri(&uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default(),
        body: serde_json::from_slice(&body).ok(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .iter()
        .rev()
        .find(|c| c.method == method && c.path == path)
        .cloned();

    match canned {
        Some(Canned { status, body: Some(body), .. }) => (status, Json(body)).into_response(),
        Some(Canned { status, body: None, .. }) => status.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "detail": "Not Found" })),
        )
            .into_response(),
    }
}

// --- Fixtures ---

pub fn representative_json(id: i64) -> Value {
    serde_json::json!({
        "id": id,
        "first_name": "María",
        "last_name": "Rodríguez",
        "identification_type": "V",
        "cedula": "15123456",
        "phone_main": "04141234567",
        "email": "maria@example.com",
        "address": "Urb. La Trinidad, Caracas",
        "current_balance_due_ves_today": 5475.0,
        "current_balance_due_usd": 150.0,
        "explicit_available_credit_ves": 0.0
    })
}

pub fn charge_json(id: i64, due_ves: f64, paid_ves: f64, status: &str, iva: f64) -> Value {
    serde_json::json!({
        "id": id,
        "student_id": 21,
        "charge_concept_id": 5,
        "description": format!("Mensualidad #{}", id),
        "issue_date": "2024-09-01",
        "due_date": "2024-09-15",
        "original_concept_amount": 50.0,
        "original_concept_currency": "USD",
        "amount_due_original_currency": 50.0,
        "amount_paid_original_currency_equivalent": 0.0,
        "is_indexed": false,
        "exchange_rate_applied_at_emission": 36.5,
        "amount_due_ves_at_emission": due_ves,
        "amount_paid_ves": paid_ves,
        "status": status,
        "invoice_id": null,
        "charge_concept": { "id": 5, "name": "Mensualidad", "iva_percentage": iva }
    })
}

pub fn rate_json(rate: f64) -> Value {
    serde_json::json!({
        "id": 1,
        "from_currency": "USD",
        "to_currency": "VES",
        "rate": rate,
        "rate_date": "2024-10-01"
    })
}
