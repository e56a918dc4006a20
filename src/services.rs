pub mod representative_service;
pub use representative_service::RepresentativeService;
pub mod student_service;
pub use student_service::StudentService;
pub mod grade_level_service;
pub use grade_level_service::GradeLevelService;
pub mod charge_concept_service;
pub use charge_concept_service::ChargeConceptService;
pub mod applied_charge_service;
pub use applied_charge_service::AppliedChargeService;
pub mod payment_service;
pub use payment_service::PaymentService;
pub mod invoice_service;
pub use invoice_service::InvoiceService;
pub mod billing_process_service;
pub use billing_process_service::BillingProcessService;
pub mod exchange_rate_service;
pub use exchange_rate_service::ExchangeRateService;
pub mod expense_report_service;
pub use expense_report_service::ExpenseReportService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
