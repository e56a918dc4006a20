pub mod common;
pub mod representative;
pub mod student;
pub mod grade_level;
pub mod charge_concept;
pub mod applied_charge;
pub mod payment;
pub mod invoice;
pub mod billing;
pub mod exchange_rate;
pub mod expense;
pub mod dashboard;
