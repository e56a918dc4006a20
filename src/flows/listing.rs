// src/flows/listing.rs

use std::future::Future;

use crate::{
    common::error::AppError,
    models::common::{ListParams, Paginated},
};

/// Estado de uma página de listagem: paginação, filtros e os itens carregados.
#[derive(Debug, Clone)]
pub struct ListState<T, F> {
    items: Vec<T>,
    total: u64,
    page: u32,
    page_size: u32,
    filters: F,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T, F> ListState<T, F>
where
    F: Clone + PartialEq + Default,
{
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            page_size: page_size.max(1),
            filters: F::default(),
            is_loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Página atual, começando em zero.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn params(&self) -> ListParams {
        ListParams {
            skip: self.page * self.page_size,
            limit: self.page_size,
        }
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(self.page_size as u64);
        (pages.max(1)).min(u32::MAX as u64) as u32
    }

    /// Trocar filtros volta para a primeira página. Retorna se mudou algo.
    pub fn set_filters(&mut self, filters: F) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.page = 0;
        true
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, page: u32) -> bool {
        if page < self.page_count() && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, page: Paginated<T>) {
        self.items = page.items;
        self.total = page.total;
        self.error = None;

        // Último item de uma página apagado: recua para a última página válida
        let last = self.page_count() - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Busca a página atual. A lista antiga continua visível se der erro.
    pub async fn load<Fetch, Fut>(&mut self, fetch: Fetch) -> Result<(), AppError>
    where
        Fetch: FnOnce(ListParams, F) -> Fut,
        Fut: Future<Output = Result<Paginated<T>, AppError>>,
    {
        self.is_loading = true;
        let result = fetch(self.params(), self.filters.clone()).await;
        self.is_loading = false;

        match result {
            Ok(page) => {
                self.apply(page);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
