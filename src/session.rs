/*!
 * Session boundary
 *
 * The catalog builder and the completion lister only need something that can
 * run one SQL string and hand back rows. [`Session`] is that seam; the
 * MySQL-wire connection in [`crate::database`] is the production
 * implementation and tests plug in closures.
 */

use crate::error::{AdapterError, Result};
use std::fmt;

/// A blocking, single-statement SQL executor
pub trait Session {
    /// Run one statement and return its column metadata and rows
    fn execute(&mut self, sql: &str) -> Result<QueryResult>;
}

impl<F> Session for F
where
    F: FnMut(&str) -> Result<QueryResult>,
{
    fn execute(&mut self, sql: &str) -> Result<QueryResult> {
        self(sql)
    }
}

/// Column metadata as reported by the server
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_name: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A single loosely typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the cell as text, only for textual cells
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Take the cell as text, rendering numbers; `None` for NULL
    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    /// Interpret the cell as a flag
    ///
    /// Boolean columns travel as `1`/`0` or as text over the MySQL wire,
    /// so integers and the usual textual spellings are accepted too.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::UInt(u) => Some(*u != 0),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "t" | "yes" => Some(true),
                "0" | "false" | "f" | "no" => Some(false),
                _ => None,
            },
            Value::Null | Value::Float(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Result of one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build a result whose cells are all text, handy for metadata queries
    pub fn from_text_rows<R, S>(columns: &[&str], rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .iter()
                .map(|name| ColumnDescriptor::new(*name, "String"))
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Value::Text(cell.into())).collect())
                .collect(),
        }
    }

    /// Decode every row into a typed record
    pub fn decode<T: FromRow>(self) -> Result<Vec<T>> {
        self.rows.into_iter().map(T::from_row).collect()
    }
}

/// Typed record for one query shape
pub trait FromRow: Sized {
    /// Name used in decode errors
    const SHAPE: &'static str;

    fn from_row(row: Vec<Value>) -> Result<Self>;
}

/// Check the arity of a raw row before decoding it
pub fn expect_arity<T: FromRow>(row: Vec<Value>, arity: usize) -> Result<Vec<Value>> {
    if row.len() != arity {
        return Err(AdapterError::query(format!(
            "expected {} columns for {} row, got {}",
            arity,
            T::SHAPE,
            row.len()
        )));
    }
    Ok(row)
}

/// Pull a non-NULL text cell out of a row
pub fn required_text<T: FromRow>(value: Value, column: &str) -> Result<String> {
    value.into_text().ok_or_else(|| {
        AdapterError::query(format!("NULL {} in {} row", column, T::SHAPE))
    })
}
