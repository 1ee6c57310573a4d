//! Caller-supplied parameters carried across relay hops.
use std::str::FromStr;

use serde_json::Value;
use solana_sdk::pubkey::Pubkey;

use crate::models::RelayError;

/// Ordered mapping from parameter name to string value.
///
/// Values are always strings; JSON numbers are rendered with their decimal
/// representation when the set is built from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from pairs, rejecting repeated names.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, RelayError> {
        let mut set = Self::new();
        for (name, value) in pairs {
            if set.get(&name).is_some() {
                return Err(RelayError::Validation(format!(
                    "Duplicate parameter: {name}"
                )));
            }
            set.pairs.push((name, value));
        }
        Ok(set)
    }

    /// Builds a set from a JSON request body.
    ///
    /// Accepts an object of strings and numbers; `null` members are skipped.
    /// An absent body (`null`) yields an empty set.
    pub fn from_json(body: &Value) -> Result<Self, RelayError> {
        let object = match body {
            Value::Null => return Ok(Self::new()),
            Value::Object(object) => object,
            other => {
                return Err(RelayError::Validation(format!(
                    "Expected a JSON object body, got {other}"
                )))
            }
        };

        let mut set = Self::new();
        for (name, value) in object {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Null => continue,
                _ => {
                    return Err(RelayError::Validation(format!(
                        "Parameter {name} must be a string or number"
                    )))
                }
            };
            set.insert(name.clone(), rendered);
        }
        Ok(set)
    }

    /// Inserts or replaces a value, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, name: &str) -> Result<&str, RelayError> {
        self.get(name)
            .ok_or_else(|| RelayError::Validation(format!("Missing required parameter: {name}")))
    }

    /// Parses a required parameter as a base58 account address.
    pub fn pubkey(&self, name: &str) -> Result<Pubkey, RelayError> {
        let raw = self.require(name)?;
        Pubkey::from_str(raw)
            .map_err(|e| RelayError::Validation(format!("Invalid address for {name}: {e}")))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
