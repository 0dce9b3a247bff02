use crate::core::utils::format::format_float;
use serde::Deserialize;
use std::fmt;
use std::ops::Mul;

/// A scalar sweep parameter.
///
/// Integers and floats are kept apart so that a value written as `0` in a test
/// specification is spelled `0` in deck names while `0.0` stays `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            ParamValue::Int(v) => v as f64,
            ParamValue::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        ParamValue::Int(0)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl Mul for ParamValue {
    type Output = ParamValue;

    fn mul(self, rhs: ParamValue) -> ParamValue {
        match (self, rhs) {
            (ParamValue::Int(a), ParamValue::Int(b)) => match a.checked_mul(b) {
                Some(product) => ParamValue::Int(product),
                None => ParamValue::Float(a as f64 * b as f64),
            },
            (a, b) => ParamValue::Float(a.as_f64() * b.as_f64()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}
