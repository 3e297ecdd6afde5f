pub mod account;
pub mod analytics;
pub mod holding;
pub mod journal;
pub mod ledger;
pub mod position;
pub mod settings;
pub mod summary;
pub mod tax;
pub mod transaction;
