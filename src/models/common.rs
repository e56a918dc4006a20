// src/models/common.rs

use std::fmt;

use serde::{Deserialize, Serialize};

// --- Moedas aceitas pelo backend ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ves,
    Usd,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ves => "VES",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// --- Paginação (skip/limit) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

impl ListParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![("skip", self.skip.to_string()), ("limit", self.limit.to_string())]
    }
}

/// Resposta paginada das listagens: `{ "items": [...], "total": N }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0 }
    }
}

/// Resposta genérica `{ "message": ... }` de alguns endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
