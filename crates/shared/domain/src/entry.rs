//! Protocol-agnostic directory entries.

use std::fmt;

use serde::Serialize;

/// Named, multi-valued attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryAttribute {
    pub name: String,
    pub values: Vec<String>,
}

/// Distinguished name plus attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attributes: Vec<EntryAttribute>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: Vec::new(),
        }
    }

    /// Append a multi-valued attribute
    pub fn with<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.push(EntryAttribute {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append a single-valued attribute
    pub fn with_value(self, name: &str, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.with(name, [value])
    }

    /// Append a single-valued attribute only when a value is present
    pub fn with_optional(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_value(name, v),
            None => self,
        }
    }

    /// Values of an attribute; attribute names match case-insensitively
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.values.as_slice())
    }

    /// First value of an attribute
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// LDIF-style rendering, one `attr: value` line per value.
impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dn: {}", self.dn)?;
        for attr in &self.attributes {
            for value in &attr.values {
                writeln!(f, "{}: {}", attr.name, value)?;
            }
        }
        Ok(())
    }
}
