use std::collections::HashMap;
use std::fmt::{Display, Formatter};

pub mod log;
pub mod memory;

pub type Fields = HashMap<String, FieldValue>;
pub type Tags = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// One measurement accepted by a sink, in the shape the collector hands over.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub measurement: String,
    pub fields: Fields,
    pub tags: Tags,
}

/// Narrow capability interface over whatever metrics pipeline sits behind the
/// collector. Implementations decide storage and serialization.
pub trait MetricSink: Send + Sync {
    fn emit(&self, measurement: &str, fields: Fields, tags: Tags);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Float(4.5).to_string(), "4.5");
        assert_eq!(FieldValue::Integer(1).to_string(), "1");
        assert_eq!(FieldValue::from(0i64), FieldValue::Integer(0));
        assert_eq!(FieldValue::from(20000.0), FieldValue::Float(20000.0));
    }
}
