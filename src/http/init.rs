//! Initializers accepted when constructing [`Headers`].
//!
//! The caller picks the shape explicitly through [`HeadersInit`]. Untyped
//! input (a TOML value read from a config file) is mapped onto one of the
//! variants by [`HeadersInit::from_toml`].

use indexmap::IndexMap;
use log::trace;

use crate::error::{HeadersError, Result};
use crate::http::headers::Headers;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HeadersInit {
    #[default]
    Empty,
    /// Name/value pairs applied in order; every inner list must hold exactly
    /// two items.
    Pairs(Vec<Vec<String>>),
    /// Key/value record applied in its iteration order.
    Record(IndexMap<String, String>),
}

impl HeadersInit {
    /// Maps a TOML value onto an initializer.
    ///
    /// A table is a record in document order, an array is a pair list whose
    /// elements must be arrays themselves. Scalars inside are coerced to text.
    pub fn from_toml(value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::Table(table) => {
                let mut record = IndexMap::with_capacity(table.len());
                for (key, value) in table {
                    let value = scalar_to_string(value)
                        .ok_or_else(|| HeadersError::InvalidHeaderValue(value.to_string()))?;
                    record.insert(key.clone(), value);
                }
                Ok(HeadersInit::Record(record))
            }
            toml::Value::Array(entries) => {
                // every entry is materialized before any of them is applied
                let mut pairs = Vec::with_capacity(entries.len());
                for entry in entries {
                    let toml::Value::Array(items) = entry else {
                        return Err(HeadersError::InvalidPairEntry(entry.to_string()));
                    };
                    let pair = items
                        .iter()
                        .map(scalar_to_string)
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| HeadersError::InvalidPairEntry(entry.to_string()))?;
                    pairs.push(pair);
                }
                Ok(HeadersInit::Pairs(pairs))
            }
            other => Err(HeadersError::InvalidInitializer(other.type_str().to_string())),
        }
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

impl<K, V> From<Vec<(K, V)>> for HeadersInit
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        HeadersInit::Pairs(pairs.into_iter().map(|(k, v)| vec![k.into(), v.into()]).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HeadersInit
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        HeadersInit::from(Vec::from(pairs))
    }
}

impl From<Vec<Vec<String>>> for HeadersInit {
    fn from(pairs: Vec<Vec<String>>) -> Self {
        HeadersInit::Pairs(pairs)
    }
}

impl From<IndexMap<String, String>> for HeadersInit {
    fn from(record: IndexMap<String, String>) -> Self {
        HeadersInit::Record(record)
    }
}

impl TryFrom<HeadersInit> for Headers {
    type Error = HeadersError;

    fn try_from(init: HeadersInit) -> Result<Self> {
        let headers = Headers::new();
        match init {
            HeadersInit::Empty => {}
            HeadersInit::Pairs(pairs) => {
                for pair in pairs {
                    let [name, value] = <[String; 2]>::try_from(pair)
                        .map_err(|pair| HeadersError::InvalidPairLength(pair.len()))?;
                    headers.append(name, value)?;
                }
            }
            HeadersInit::Record(record) => {
                for (name, value) in record {
                    headers.append(name, value)?;
                }
            }
        }
        trace!("constructed headers with {} names", headers.len());
        Ok(headers)
    }
}

impl TryFrom<&toml::Value> for Headers {
    type Error = HeadersError;

    fn try_from(value: &toml::Value) -> Result<Self> {
        Headers::try_from(HeadersInit::from_toml(value)?)
    }
}
