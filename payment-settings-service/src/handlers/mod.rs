//! HTTP handlers for payment-settings-service.

pub mod health;
pub mod payment_modes;
pub mod payment_terms;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use payment_modes::{get_payment_modes, upsert_payment_modes};
pub use payment_terms::{get_payment_terms, upsert_payment_terms};
