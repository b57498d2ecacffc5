pub mod database;
pub mod date_window;
pub mod memory;
pub mod metrics;
pub mod modes_policy;
pub mod store;
pub mod terms_policy;

pub use database::MongoSettingsStore;
pub use memory::InMemorySettingsStore;
pub use self::metrics::{get_metrics, init_metrics};
pub use modes_policy::PaymentModesUpsert;
pub use store::SettingsStore;
pub use terms_policy::PaymentTermsUpsert;
