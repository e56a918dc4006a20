// src/session.rs

// Contexto da sessão: criado na inicialização e passado por referência
// para cada chamada de serviço. Não existe singleton global.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        // Token vazio no .env conta como ausente
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
