// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use chrono::NaiveDate;

use crate::{
    common::{error::AppError, http::ApiClient},
    flows::{listing::ListState, payment_form::PaymentForm, search::DebouncedSearch},
    models::representative::Representative,
    services::{
        AppliedChargeService, BillingProcessService, ChargeConceptService, DashboardService,
        ExchangeRateService, ExpenseReportService, GradeLevelService, InvoiceService,
        PaymentService, RepresentativeService, StudentService,
    },
    session::Session,
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub confirm_window: Duration,
    pub default_page_size: u32,
}

impl AppConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(15),
            search_debounce: Duration::from_millis(500),
            confirm_window: Duration::from_millis(5000),
            default_page_size: 10,
        }
    }

    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| AppError::Config("API_BASE_URL debe estar definida".to_string()))?;

        let mut config = Self::new(&api_base_url);
        config.api_token = env::var("API_TOKEN").ok();
        config.request_timeout = Duration::from_secs(parse_var("API_TIMEOUT_SECS", 15)?);
        config.search_debounce = Duration::from_millis(parse_var("SEARCH_DEBOUNCE_MS", 500)?);
        config.confirm_window = Duration::from_millis(parse_var("CONFIRM_WINDOW_MS", 5000)?);
        config.default_page_size = parse_var("DEFAULT_PAGE_SIZE", 10)?;

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} tiene un valor inválido: '{}'", name, raw))),
        _ => Ok(default),
    }
}

// O estado compartilhado: cliente HTTP e todos os serviços
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub api: ApiClient,
    pub representative_service: RepresentativeService,
    pub student_service: StudentService,
    pub grade_level_service: GradeLevelService,
    pub charge_concept_service: ChargeConceptService,
    pub applied_charge_service: AppliedChargeService,
    pub payment_service: PaymentService,
    pub invoice_service: InvoiceService,
    pub billing_process_service: BillingProcessService,
    pub exchange_rate_service: ExchangeRateService,
    pub expense_report_service: ExpenseReportService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout)?;
        let session = Session::new(config.api_token.clone());

        if !session.is_authenticated() {
            tracing::warn!("API_TOKEN no definido: las llamadas irán sin autenticación");
        }
        tracing::info!("✅ Cliente configurado para {}", api.base_url());

        // --- Monta o gráfico de dependências ---
        Ok(Self {
            representative_service: RepresentativeService::new(api.clone()),
            student_service: StudentService::new(api.clone()),
            grade_level_service: GradeLevelService::new(api.clone()),
            charge_concept_service: ChargeConceptService::new(api.clone()),
            applied_charge_service: AppliedChargeService::new(api.clone()),
            payment_service: PaymentService::new(api.clone()),
            invoice_service: InvoiceService::new(api.clone()),
            billing_process_service: BillingProcessService::new(api.clone()),
            exchange_rate_service: ExchangeRateService::new(api.clone()),
            expense_report_service: ExpenseReportService::new(api.clone()),
            dashboard_service: DashboardService::new(api.clone()),
            api,
            session,
            config,
        })
    }

    // --- Estados de tela parametrizados pela configuração ---

    /// Modal de pagamento com a janela de confirmação configurada.
    pub fn payment_form(&self, payment_date: NaiveDate) -> PaymentForm {
        PaymentForm::new(payment_date, self.config.confirm_window)
    }

    /// Busca de representantes com o debounce configurado.
    pub fn representative_search(&self) -> DebouncedSearch<Representative> {
        let searcher = self
            .representative_service
            .searcher(self.session.clone(), self.config.default_page_size);
        DebouncedSearch::new(Arc::new(searcher), self.config.search_debounce)
    }

    pub fn list_state<T, F>(&self) -> ListState<T, F>
    where
        F: Clone + PartialEq + Default,
    {
        ListState::new(self.config.default_page_size)
    }
}
