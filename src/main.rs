//src/main.rs

use school_admin::{
    flows::currency::{format_money, CurrencyDisplay},
    models::common::Currency,
    AppConfig, AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, o programa não deve seguir.
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config)?;
    let session = &app_state.session;

    let rate = app_state
        .exchange_rate_service
        .latest(session, Currency::Usd, Currency::Ves)
        .await?;
    match &rate {
        Some(r) => tracing::info!("💱 Tasa USD -> VES del {}: {}", r.rate_date, r.rate),
        None => tracing::warn!("💱 Sin tasa USD -> VES registrada"),
    }

    let summary = app_state.dashboard_service.get_summary(session, None).await?;
    let usd_rate = rate.map(|r| r.rate);

    let mut outstanding = CurrencyDisplay::new(summary.total_outstanding_debt_ves, usd_rate);
    let ves_label = outstanding.display();
    outstanding.toggle();
    tracing::info!("📊 Deuda pendiente: {} ({})", ves_label, outstanding.display());

    tracing::info!(
        "📊 Ingresos: {} | Egresos: {} | Balance: {}",
        format_money(summary.total_revenue_ves_period, Currency::Ves),
        format_money(summary.total_expenses_ves_period, Currency::Ves),
        format_money(summary.net_balance_ves_period, Currency::Ves)
    );
    tracing::info!(
        "📊 Estudiantes activos: {} | Representantes con deuda: {}",
        summary.active_students_count,
        summary.representatives_with_debt_count
    );

    Ok(())
}
