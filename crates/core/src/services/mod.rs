pub mod analytics_service;
pub mod holdings_service;
pub mod import_service;
pub mod journal_service;
pub mod summary_service;
pub mod tax_service;
pub mod validation_service;
