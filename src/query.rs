//! Query parameter values for read requests.

use std::fmt;

/// A single query parameter value on a GET request.
///
/// Parameters are primitives (string, number, boolean) or absent. An
/// absent parameter is omitted from the outgoing request entirely, never
/// sent as an empty or null value.
///
/// ## Examples
///
/// ```rust
/// use synapse_api::QueryValue;
///
/// let limit: QueryValue = 50.into();
/// assert_eq!(limit.to_string(), "50");
///
/// // `None` becomes `Absent` and is dropped from the request line.
/// let cursor: QueryValue = None::<String>.into();
/// assert!(cursor.is_absent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Omitted from the outgoing request.
    Absent,
}

impl QueryValue {
    /// Returns `true` if this value should be omitted from the request.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Absent => Ok(()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
