pub mod backup;
pub mod envelope;
pub mod repository;
