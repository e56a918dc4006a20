// src/flows/search.rs

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::common::error::AppError;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Fonte de resultados para a busca enquanto se digita.
#[async_trait]
pub trait Searcher: Send + Sync {
    type Item: Send + 'static;

    async fn search(&self, query: &str) -> Result<Vec<Self::Item>, AppError>;
}

#[derive(Debug, Clone)]
pub struct SearchSnapshot<T> {
    pub query: String,
    pub results: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct SearchInner<T> {
    // Só a requisição da geração atual pode publicar resultados
    generation: u64,
    query: String,
    results: Vec<T>,
    is_loading: bool,
    error: Option<String>,
}

fn lock<T>(inner: &Mutex<SearchInner<T>>) -> MutexGuard<'_, SearchInner<T>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Busca com debounce: cada `input` cancela o agendamento anterior e agenda
/// uma nova consulta para depois de `delay` sem digitação.
pub struct DebouncedSearch<T: Send + 'static> {
    searcher: Arc<dyn Searcher<Item = T>>,
    delay: Duration,
    inner: Arc<Mutex<SearchInner<T>>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> DebouncedSearch<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(searcher: Arc<dyn Searcher<Item = T>>, delay: Duration) -> Self {
        Self {
            searcher,
            delay,
            inner: Arc::new(Mutex::new(SearchInner {
                generation: 0,
                query: String::new(),
                results: Vec::new(),
                is_loading: false,
                error: None,
            })),
            pending: None,
        }
    }

    pub fn input(&mut self, query: &str) {
        self.cancel_pending();

        let query = query.trim().to_string();
        let generation = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            inner.query = query.clone();
            inner.error = None;

            if query.is_empty() {
                inner.results.clear();
                inner.is_loading = false;
                return;
            }
            inner.generation
        };

        let searcher = Arc::clone(&self.searcher);
        let inner = Arc::clone(&self.inner);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut state = lock(&inner);
                if state.generation != generation {
                    return;
                }
                state.is_loading = true;
            }

            tracing::debug!("Buscando '{}'", query);
            let result = searcher.search(&query).await;

            let mut state = lock(&inner);
            if state.generation != generation {
                tracing::debug!("Descartando resultado obsoleto de '{}'", query);
                return;
            }
            state.is_loading = false;
            match result {
                Ok(items) => state.results = items,
                Err(e) => {
                    tracing::warn!("Búsqueda falló: {}", e);
                    state.results.clear();
                    state.error = Some(e.user_message());
                }
            }
        }));
    }

    /// Cancela o agendamento e invalida qualquer resposta em voo.
    pub fn cancel(&mut self) {
        self.cancel_pending();
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        inner.is_loading = false;
    }

    pub fn clear(&mut self) {
        self.cancel();
        let mut inner = lock(&self.inner);
        inner.query.clear();
        inner.results.clear();
        inner.error = None;
    }

    /// Aguarda a consulta agendada terminar (ou ser cancelada).
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot<T> {
        let inner = lock(&self.inner);
        SearchSnapshot {
            query: inner.query.clone(),
            results: inner.results.clone(),
            is_loading: inner.is_loading,
            error: inner.error.clone(),
        }
    }

    pub fn results(&self) -> Vec<T> {
        lock(&self.inner).results.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner).is_loading
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T: Send + 'static> Drop for DebouncedSearch<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
