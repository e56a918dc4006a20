mod common;

use axum::http::Method;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use common::{session, MockBackend};
use school_admin::{
    flows::global_charge::GlobalChargeForm,
    models::{
        billing::GenerateRecurringRequest,
        charge_concept::ChargeConcept,
        expense::{ReportPeriod, TrendGranularity},
        student::StudentCreate,
    },
    services::{BillingProcessService, DashboardService, ExpenseReportService, StudentService},
    AppError,
};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

#[tokio::test]
async fn dashboard_summary_sends_period() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/dashboard/summary",
        200,
        json!({
            "total_revenue_ves_period": 125000.5,
            "total_expenses_ves_period": 80000.0,
            "net_balance_ves_period": 45000.5,
            "total_outstanding_debt_ves": 36500.0,
            "active_students_count": 240,
            "representatives_with_debt_count": 37
        }),
    );
    let service = DashboardService::new(backend.client());

    let period = ReportPeriod { start_date: date(9, 1), end_date: date(9, 30) };
    let summary = service.get_summary(&session(), Some(&period)).await.unwrap();

    assert_eq!(summary.active_students_count, 240);
    assert_eq!(summary.total_outstanding_debt_ves, Decimal::from(36500));
    let pairs = backend.requests()[0].query_pairs();
    assert!(pairs.contains(&("start_date".into(), "2024-09-01".into())));
    assert!(pairs.contains(&("end_date".into(), "2024-09-30".into())));
}

#[tokio::test]
async fn billing_payment_trend_exposes_collection_ratio() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/dashboard/billing-payment-trend",
        200,
        json!([
            { "period": "2024-08", "total_billed_ves": 1000.0, "total_paid_ves": 750.0 },
            { "period": "2024-09", "total_billed_ves": 0.0, "total_paid_ves": 0.0 }
        ]),
    );
    let service = DashboardService::new(backend.client());

    let points = service
        .get_billing_payment_trend(&session(), TrendGranularity::Month, 6)
        .await
        .unwrap();

    assert_eq!(points[0].collection_ratio(), Some(Decimal::new(75, 2)));
    assert_eq!(points[1].collection_ratio(), None);
    let pairs = backend.requests()[0].query_pairs();
    assert!(pairs.contains(&("granularity".into(), "month".into())));
    assert!(pairs.contains(&("count".into(), "6".into())));
}

#[tokio::test]
async fn inverted_report_period_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let service = ExpenseReportService::new(backend.client());

    let period = ReportPeriod { start_date: date(10, 1), end_date: date(9, 1) };
    let err = service.by_category(&session(), &period).await.unwrap_err();

    assert!(matches!(err, AppError::StepBlocked(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn duplicate_student_cedula_gets_friendly_message() {
    let backend = MockBackend::start().await;
    backend.on(Method::POST, "/students/", 409, json!({ "detail": "duplicate" }));
    let service = StudentService::new(backend.client());

    let payload = StudentCreate {
        first_name: "Sofía".into(),
        last_name: "Rodríguez".into(),
        cedula: Some("32111222".into()),
        birth_date: Some(date(3, 14)),
        sex: None,
        grade_level_id: 4,
        representative_id: 3,
        has_scholarship: true,
        scholarship_percentage: Some(Decimal::from(150)),
        scholarship_fixed_amount: None,
        is_special_case: false,
        special_case_notes: None,
    };

    // Percentual fora de 0..100 nem chega ao servidor
    let err = service.create(&session(), &payload).await.unwrap_err();
    assert_eq!(err.user_message(), "El porcentaje de beca debe estar entre 0 y 100.");
    assert!(backend.requests().is_empty());

    let payload = StudentCreate { scholarship_percentage: Some(Decimal::from(50)), ..payload };
    let err = service.create(&session(), &payload).await.unwrap_err();
    assert_eq!(err.user_message(), "Ya existe un registro con esa cédula.");
}

#[tokio::test]
async fn recurring_charges_require_a_valid_month() {
    let backend = MockBackend::start().await;
    let service = BillingProcessService::new(backend.client());

    let request = GenerateRecurringRequest {
        target_year: 2024,
        target_month: 13,
        issue_date_override: None,
        due_date_override: None,
        charge_concept_ids: None,
    };
    assert!(service.generate_recurring_charges(&session(), &request).await.is_err());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn global_charge_form_posts_request() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "/billing-processes/apply-global-charge",
        200,
        json!({
            "message": "ok",
            "students_processed": 32,
            "charges_created": 30,
            "warnings": ["2 estudiantes ya tenían el cargo"]
        }),
    );
    let service = BillingProcessService::new(backend.client());

    let concept: ChargeConcept = serde_json::from_value(json!({
        "id": 12,
        "name": "Mensualidad Octubre",
        "default_amount": 40.0,
        "default_amount_currency": "USD",
        "is_amount_fixed": false,
        "default_frequency": "monthly",
        "category": "tuition",
        "iva_percentage": 0.0,
        "is_active": true
    }))
    .unwrap();

    let mut form = GlobalChargeForm::new(date(10, 1), date(10, 15));
    form.select_concept(concept);
    form.toggle_grade_level(7);
    form.toggle_grade_level(2);

    let result = form.submit(&session(), &service).await.unwrap();
    assert_eq!(result.charges_created, 30);
    assert_eq!(result.warnings.len(), 1);
    assert!(form.form_error.is_none());

    let body = backend.requests()[0].body.clone().unwrap();
    assert_eq!(body["charge_concept_id"], json!(12));
    assert_eq!(body["target_grade_level_ids"], json!([2, 7]));
    assert_eq!(body["issue_date"], json!("2024-10-01"));
    assert!(body.get("custom_amount").is_none());
}
