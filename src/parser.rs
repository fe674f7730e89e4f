use crate::error::{QuoteError, QuoteResult};
use crate::types::Quotation;
use std::path::Path;

/// Parse a YAML order file (customer, optional salesperson, items)
pub fn parse_quotation(path: &Path) -> QuoteResult<Quotation> {
    let content = std::fs::read_to_string(path)?;
    parse_quotation_str(&content)
        .map_err(|e| QuoteError::Order(format!("{}: {}", path.display(), e)))
}

/// Parse YAML order text. JSON is valid YAML, so API payloads work too.
pub fn parse_quotation_str(content: &str) -> QuoteResult<Quotation> {
    if content.trim().is_empty() {
        return Err(QuoteError::Order("Order is empty".to_string()));
    }
    let quotation: Quotation = serde_yaml::from_str(content)?;
    Ok(quotation)
}
