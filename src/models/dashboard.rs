// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 1. Resumo (os cards do topo)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_revenue_ves_period: Decimal,     // Pagamentos recebidos no período
    #[serde(default)]
    pub total_expenses_ves_period: Decimal,    // Despesas pagas no período
    #[serde(default)]
    pub net_balance_ves_period: Decimal,
    #[serde(default)]
    pub total_outstanding_debt_ves: Decimal,   // Dívida total dos representantes
    #[serde(default)]
    pub active_students_count: u64,
    #[serde(default)]
    pub representatives_with_debt_count: u64,
}

// 2. Séries para os gráficos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String, // YYYY-MM ou YYYY-MM-DD
    #[serde(default)]
    pub value_ves: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingPaymentTrendPoint {
    pub period: String,
    #[serde(default)]
    pub total_billed_ves: Decimal,
    #[serde(default)]
    pub total_paid_ves: Decimal,
}

impl BillingPaymentTrendPoint {
    /// Quanto do faturado no período foi efetivamente cobrado (0..1).
    pub fn collection_ratio(&self) -> Option<Decimal> {
        if self.total_billed_ves.is_zero() {
            return None;
        }
        Some(self.total_paid_ves / self.total_billed_ves)
    }
}
