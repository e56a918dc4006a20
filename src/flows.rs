pub mod money;
pub mod currency;
pub mod confirm;
pub mod search;
pub mod listing;
pub mod payment_form;
pub mod invoice_wizard;
pub mod global_charge;
