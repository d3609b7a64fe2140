use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::IssError;

/// A single cell as returned by ISS.
///
/// Values are passed through exactly as the server sent them; no date parsing or
/// numeric coercion happens anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer cell.
    Int(i64),
    /// A floating-point cell.
    Float(f64),
    /// A string cell (dates and times also arrive as strings).
    Str(String),
    /// A boolean cell.
    Bool(bool),
    /// An empty cell (`null` on the wire).
    Null,
}

impl Value {
    /// Returns the integer if this cell holds one.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the cell as `f64` for integer and float cells.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string if this cell holds one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for `null` cells.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// One row of a table: column name to cell.
pub type Row = BTreeMap<String, Value>;

/// An ordered sequence of rows. Order is meaningful (usually chronological).
pub type Table = Vec<Row>;

/// All named tables of one response (or of several merged responses).
///
/// Tables keep the order in which they were first seen, so iterating a merged
/// result visits tables in the order the first page listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    tables: Vec<(String, Table)>,
}

impl TableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// `true` when the set holds no tables at all.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// `true` when a table with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Borrows a table by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.position(name).map(|i| &self.tables[i].1)
    }

    /// Table names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, table)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// The first table in the set, if any.
    pub fn first(&self) -> Option<(&str, &Table)> {
        self.tables.first().map(|(name, table)| (name.as_str(), table))
    }

    /// Inserts a table, replacing any existing table of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.tables[i].1, table)),
            None => {
                self.tables.push((name, table));
                None
            }
        }
    }

    /// Removes and returns a table, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.position(name).map(|i| self.tables.remove(i).1)
    }

    /// Appends every table of `other` to this set.
    ///
    /// Rows of a table already present are appended after the existing rows;
    /// tables not yet present are added at the end.
    pub fn append(&mut self, other: Self) {
        for (name, rows) in other.tables {
            match self.position(&name) {
                Some(i) => self.tables[i].1.extend(rows),
                None => self.tables.push((name, rows)),
            }
        }
    }

    /// Takes one table out of the set.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::MissingTable`] if the set has no table with that name.
    pub fn into_table(mut self, name: &str) -> Result<Table, IssError> {
        self.remove(name).ok_or_else(|| IssError::MissingTable {
            table: name.to_string(),
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|(n, _)| n == name)
    }
}

impl IntoIterator for TableSet {
    type Item = (String, Table);
    type IntoIter = std::vec::IntoIter<(String, Table)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Table)> for TableSet {
    fn from_iter<I: IntoIterator<Item = (K, Table)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, table) in iter {
            set.insert(name, table);
        }
        set
    }
}

impl Serialize for TableSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (name, table) in &self.tables {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TableSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableSetVisitor;

        impl<'de> Visitor<'de> for TableSetVisitor {
            type Value = TableSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping table names to arrays of rows")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TableSet, A::Error> {
                let mut set = TableSet::new();
                while let Some((name, table)) = access.next_entry::<String, Table>()? {
                    set.insert(name, table);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(TableSetVisitor)
    }
}
