use thiserror::Error;
use trackgen::core::models::value::ParamValue;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid number '{value}' for '{key}'.")]
    InvalidNumber { key: String, value: String },

    #[error("Invalid boolean '{value}' for '{key}'. Expected 'true' or 'false'.")]
    InvalidBool { key: String, value: String },
}

/// Splits `KEY=VALUE` at the first `=`, trimming both halves.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

/// Parses a sweep value, keeping integers apart from floats.
pub fn parse_param_value(key: &str, value: &str) -> Result<ParamValue, ParseError> {
    let value = value.trim();
    if let Ok(int) = value.parse::<i64>() {
        return Ok(ParamValue::Int(int));
    }
    value
        .parse::<f64>()
        .map(ParamValue::Float)
        .map_err(|_| ParseError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

pub fn parse_count(key: &str, value: &str) -> Result<usize, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
