use crate::errors::CoreError;
use crate::models::holding::Holding;

/// Request text for a [`PortfolioAdvisor`](super::traits::PortfolioAdvisor)
/// backed by a language model. Holdings are embedded as JSON.
pub fn advice_prompt(holdings: &[Holding]) -> Result<String, CoreError> {
    let json = serde_json::to_string(holdings)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings: {e}")))?;
    Ok(format!(
        "My current stock portfolio is: {json}. \
         As an investment professional, review my trading record and suggest improvements. \
         Explain in detail a strategy to maximize returns."
    ))
}
