// src/models/payment.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::common::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Transferencia")]
    Transfer,
    #[serde(rename = "Pago Móvil")]
    MobilePayment,
    #[serde(rename = "Punto de Venta")]
    PointOfSale,
    #[serde(rename = "Zelle")]
    Zelle,
    #[serde(rename = "Otro")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAllocation {
    #[serde(default)]
    pub id: Option<i64>,
    pub applied_charge_id: i64,
    pub amount_allocated_ves: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub representative_id: i64,
    pub payment_date: NaiveDate,

    pub amount_paid: Decimal,
    pub currency_paid: Currency,
    #[serde(default)]
    pub amount_paid_ves_equivalent: Decimal,
    #[serde(default)]
    pub exchange_rate_applied: Option<Decimal>,

    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub allocations: Vec<PaymentAllocation>,
}

impl Payment {
    pub fn total_allocated_ves(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount_allocated_ves).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentAllocationCreate {
    pub applied_charge_id: i64,
    pub amount_to_allocate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentCreate {
    pub representative_id: i64,
    pub payment_date: NaiveDate,
    pub amount_paid: Decimal,
    pub currency_paid: Currency,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub allocations_details: Vec<PaymentAllocationCreate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilters {
    pub representative_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::MobilePayment => "Pago Móvil",
            PaymentMethod::PointOfSale => "Punto de Venta",
            PaymentMethod::Zelle => "Zelle",
            PaymentMethod::Other => "Otro",
        }
    }
}
