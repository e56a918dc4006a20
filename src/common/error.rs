// src/common/error.rs

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Resposta não-2xx da API, já normalizada para uma única mensagem
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Error de red: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("El total asignado ({allocated}) excede el monto pagado ({paid}).")]
    AllocationExceeded { allocated: Decimal, paid: Decimal },

    #[error("Monto inválido: '{0}'")]
    InvalidAmount(String),

    #[error("Tasa de cambio no disponible.")]
    RateUnavailable,

    #[error("{0}")]
    StepBlocked(String),

    #[error("Error de configuración: {0}")]
    Config(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Error interno: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Mensagem única exibida inline no formulário.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, field_errors)| {
                        field_errors.iter().map(move |e| match &e.message {
                            Some(m) => m.to_string(),
                            None => format!("{}: {}", field, e.code),
                        })
                    })
                    .collect();
                messages.sort();
                messages.join("; ")
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// ---
// Normalização do formato de erro do FastAPI: {"detail": ...}
// ---

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ValidationEntry {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl ValidationEntry {
    /// Último elemento de `loc` (o nome do campo).
    pub fn field(&self) -> Option<String> {
        self.loc.last().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Entradas de validação (422) quando o `detail` vem como lista.
pub fn validation_entries(body: &str) -> Vec<ValidationEntry> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| serde_json::from_value::<Vec<ValidationEntry>>(d).ok())
        .unwrap_or_default()
}

/// Extrai a mensagem do corpo de erro.
/// `detail` string -> como está; lista -> "campo: msg" unidos por "; ";
/// qualquer outra coisa -> "Error {status}: {statusText}".
pub fn extract_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        format!(
            "Error {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    };

    let detail = match serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.detail) {
        Some(d) => d,
        None => return fallback(),
    };

    match detail {
        Value::String(s) if !s.trim().is_empty() => s,
        Value::Array(_) => {
            let entries = validation_entries(body);
            if entries.is_empty() {
                return fallback();
            }
            entries
                .iter()
                .map(|e| match e.field() {
                    Some(field) => format!("{}: {}", field, e.msg),
                    None => e.msg.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ")
        }
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let msg = extract_detail(StatusCode::BAD_REQUEST, r#"{"detail":"Representante no encontrado"}"#);
        assert_eq!(msg, "Representante no encontrado");
    }

    #[test]
    fn validation_list_is_joined_by_field() {
        let body = r#"{"detail":[
            {"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},
            {"loc":["body","phone_main"],"msg":"field required","type":"missing"}
        ]}"#;
        let msg = extract_detail(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            msg,
            "email: value is not a valid email address; phone_main: field required"
        );
    }

    #[test]
    fn missing_detail_falls_back_to_status_line() {
        assert_eq!(
            extract_detail(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>"),
            "Error 500: Internal Server Error"
        );
        assert_eq!(extract_detail(StatusCode::NOT_FOUND, r#"{"detail":{"x":1}}"#), "Error 404: Not Found");
    }

    #[test]
    fn user_message_for_api_error_is_the_message() {
        let err = AppError::Api { status: 409, message: "Duplicado".into() };
        assert_eq!(err.user_message(), "Duplicado");
        assert_eq!(err.status(), Some(409));
    }
}
