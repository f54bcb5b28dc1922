//! Targeted replacement of a constant's string literal

/// Why a literal could not be located
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    #[error("constant '{0}' not found")]
    ConstantNotFound(String),
    #[error("no opening quote after constant '{0}'")]
    OpeningQuoteNotFound(String),
    #[error("no closing quote after constant '{0}'")]
    ClosingQuoteNotFound(String),
}

const QUOTE: char = '"';

/// Replace the text between the first pair of quotes following the first
/// occurrence of `constant` with `value`.
///
/// Every byte outside that pair of quotes is kept as is.
pub fn splice_literal(text: &str, constant: &str, value: &str) -> Result<String, SpliceError> {
    if constant.is_empty() {
        return Err(SpliceError::ConstantNotFound(constant.to_string()));
    }

    let name_at = text
        .find(constant)
        .ok_or_else(|| SpliceError::ConstantNotFound(constant.to_string()))?;

    let open = text[name_at..]
        .find(QUOTE)
        .map(|offset| name_at + offset)
        .ok_or_else(|| SpliceError::OpeningQuoteNotFound(constant.to_string()))?;

    let value_start = open + QUOTE.len_utf8();
    let close = text[value_start..]
        .find(QUOTE)
        .map(|offset| value_start + offset)
        .ok_or_else(|| SpliceError::ClosingQuoteNotFound(constant.to_string()))?;

    let mut spliced = String::with_capacity(text.len() - (close - value_start) + value.len());
    spliced.push_str(&text[..value_start]);
    spliced.push_str(value);
    spliced.push_str(&text[close..]);
    Ok(spliced)
}
