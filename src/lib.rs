//! Cliente da API de administração escolar: representantes, alunos,
//! cobranças, pagamentos, faturas, taxas de câmbio e relatórios.
//!
//! `services` embrulha os endpoints REST; `flows` guarda a lógica dos
//! formulários (alocação de pagamento, confirmação em dois cliques,
//! assistente de fatura, busca com debounce, paginação).

pub mod common;
pub mod config;
pub mod flows;
pub mod models;
pub mod services;
pub mod session;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};
pub use session::Session;
