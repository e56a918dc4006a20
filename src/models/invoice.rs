// src/models/invoice.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmissionType {
    Digital,
    FiscalPrinter,
    FormaLibre,
}

impl EmissionType {
    pub fn label(&self) -> &'static str {
        match self {
            EmissionType::Digital => "Factura Digital",
            EmissionType::FiscalPrinter => "Impresora Fiscal",
            EmissionType::FormaLibre => "Forma Libre",
        }
    }

    /// Forma Libre exige o número de controle digitado manualmente.
    pub fn requires_manual_control_number(&self) -> bool {
        matches!(self, EmissionType::FormaLibre)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Emitted,
    Annulled,
    PendingEmission,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub applied_charge_id: Option<i64>,
    pub description: String,
    #[serde(default = "one")]
    pub quantity: Decimal,
    pub unit_price_ves: Decimal,
    #[serde(default)]
    pub item_subtotal_ves: Decimal,
    #[serde(default)]
    pub item_iva_rate: Decimal,
    #[serde(default)]
    pub item_iva_ves: Decimal,
    #[serde(default)]
    pub item_total_ves: Decimal,
}

fn one() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub issue_date: NaiveDate,
    pub representative_id: i64,

    // Snapshot do receptor no momento da emissão
    pub representative_name_snapshot: String,
    pub representative_rif_or_cedula_snapshot: String,
    #[serde(default)]
    pub representative_address_snapshot: Option<String>,

    pub subtotal_ves: Decimal,
    pub total_tax_ves: Decimal,
    pub total_amount_ves: Decimal,

    pub status: InvoiceStatus,
    pub emission_type: EmissionType,

    #[serde(default)]
    pub fiscal_control_number: Option<String>,
    #[serde(default)]
    pub fiscal_invoice_number: Option<String>,
    #[serde(default)]
    pub fiscal_machine_serial: Option<String>,

    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceCreate {
    pub representative_id: i64,
    pub applied_charge_ids: Vec<i64>,
    pub emission_type: EmissionType,
    pub representative_name: String,
    pub representative_rif_or_cedula: String,
    pub representative_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_control_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnulInvoiceRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilters {
    pub representative_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
    pub emission_type: Option<EmissionType>,
    pub invoice_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl InvoiceStatus {
    pub fn as_query(&self) -> &'static str {
        match self {
            InvoiceStatus::Emitted => "emitted",
            InvoiceStatus::Annulled => "annulled",
            InvoiceStatus::PendingEmission => "pending_emission",
            InvoiceStatus::Error => "error",
        }
    }
}

impl EmissionType {
    pub fn as_query(&self) -> &'static str {
        match self {
            EmissionType::Digital => "DIGITAL",
            EmissionType::FiscalPrinter => "FISCAL_PRINTER",
            EmissionType::FormaLibre => "FORMA_LIBRE",
        }
    }
}
