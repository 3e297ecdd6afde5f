pub mod advice;
pub mod traits;

#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
