mod common;

use axum::http::Method;
use rust_decimal::Decimal;
use serde_json::json;

use common::{charge_json, representative_json, session, MockBackend};
use school_admin::{
    flows::invoice_wizard::{InvoiceWizard, WizardStep},
    models::{invoice::EmissionType, representative::Representative},
    services::{AppliedChargeService, InvoiceService},
    AppError,
};

fn invoice_json() -> serde_json::Value {
    json!({
        "id": 77,
        "invoice_number": "F-000077",
        "issue_date": "2024-10-07",
        "representative_id": 3,
        "representative_name_snapshot": "María Rodríguez",
        "representative_rif_or_cedula_snapshot": "V-15123456",
        "representative_address_snapshot": "Urb. La Trinidad, Caracas",
        "subtotal_ves": 150.0,
        "total_tax_ves": 16.0,
        "total_amount_ves": 166.0,
        "status": "emitted",
        "emission_type": "FORMA_LIBRE",
        "fiscal_control_number": "00-123456"
    })
}

async fn wizard_for(backend: &MockBackend) -> InvoiceWizard {
    backend.on(
        Method::GET,
        "/applied-charges/",
        200,
        json!({
            "items": [
                charge_json(1, 100.0, 0.0, "pending", 0.16),
                charge_json(2, 50.0, 0.0, "paid", 0.0)
            ],
            "total": 2
        }),
    );
    let representative: Representative = serde_json::from_value(representative_json(3)).unwrap();
    let unbilled = AppliedChargeService::new(backend.client())
        .list_unbilled_for_representative(&session(), representative.id, 100)
        .await
        .unwrap();
    InvoiceWizard::new(&representative, unbilled)
}

#[tokio::test]
async fn wizard_emits_invoice_with_accumulated_state() {
    let backend = MockBackend::start().await;
    backend.on(Method::POST, "/invoices/", 201, invoice_json());
    let invoices = InvoiceService::new(backend.client());
    let mut wizard = wizard_for(&backend).await;

    assert!(matches!(wizard.next(), Err(AppError::StepBlocked(_))));
    wizard.toggle_all();
    let totals = wizard.totals();
    assert_eq!(totals.subtotal, Decimal::from(150));
    assert_eq!(totals.iva, Decimal::from(16));
    assert_eq!(totals.total, Decimal::from(166));

    assert_eq!(wizard.next().unwrap(), WizardStep::BillingInfo);
    assert_eq!(wizard.billing.identification, "V-15123456");
    assert_eq!(wizard.next().unwrap(), WizardStep::Emission);

    wizard.set_emission_type(EmissionType::FormaLibre);
    assert!(wizard.submit(&session(), &invoices).await.is_err());
    assert!(backend.requests_to(Method::POST, "/invoices/").is_empty());

    wizard.manual_control_number = " 00-123456 ".into();
    let invoice = wizard.submit(&session(), &invoices).await.unwrap();
    assert_eq!(invoice.invoice_number.as_deref(), Some("F-000077"));

    let posted = backend.requests_to(Method::POST, "/invoices/");
    assert_eq!(posted.len(), 1);
    let body = posted[0].body.clone().unwrap();
    assert_eq!(body["representative_id"], json!(3));
    assert_eq!(body["applied_charge_ids"], json!([1, 2]));
    assert_eq!(body["emission_type"], json!("FORMA_LIBRE"));
    assert_eq!(body["representative_name"], json!("María Rodríguez"));
    assert_eq!(body["representative_rif_or_cedula"], json!("V-15123456"));
    assert_eq!(body["manual_control_number"], json!("00-123456"));
}

#[tokio::test]
async fn failed_emission_stays_on_last_step() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "/invoices/",
        400,
        json!({ "detail": "El cargo 1 ya fue facturado" }),
    );
    let invoices = InvoiceService::new(backend.client());
    let mut wizard = wizard_for(&backend).await;

    wizard.toggle(1);
    wizard.next().unwrap();
    wizard.next().unwrap();

    let err = wizard.submit(&session(), &invoices).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(wizard.step(), WizardStep::Emission);
    assert_eq!(wizard.form_error.as_deref(), Some("El cargo 1 ya fue facturado"));
    assert!(!wizard.is_submitting);
    assert_eq!(wizard.selected_ids(), vec![1]);

    // Voltar e avançar não perde o que foi preenchido
    wizard.back();
    assert_eq!(wizard.next().unwrap(), WizardStep::Emission);
    assert_eq!(wizard.selected_ids(), vec![1]);
}

#[tokio::test]
async fn digital_invoice_omits_control_number() {
    let backend = MockBackend::start().await;
    let mut invoice = invoice_json();
    invoice["emission_type"] = json!("DIGITAL");
    backend.on(Method::POST, "/invoices/", 201, invoice);
    let invoices = InvoiceService::new(backend.client());
    let mut wizard = wizard_for(&backend).await;

    wizard.toggle(2);
    wizard.next().unwrap();
    wizard.next().unwrap();
    wizard.set_emission_type(EmissionType::FormaLibre);
    wizard.manual_control_number = "00-1".into();
    wizard.set_emission_type(EmissionType::Digital);
    assert!(wizard.manual_control_number.is_empty());

    wizard.submit(&session(), &invoices).await.unwrap();

    let body = backend.requests_to(Method::POST, "/invoices/")[0].body.clone().unwrap();
    assert_eq!(body["emission_type"], json!("DIGITAL"));
    assert!(body.get("manual_control_number").is_none());
}
