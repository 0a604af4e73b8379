/*!
 * Typed rows for the metadata queries
 */

use crate::error::{AdapterError, Result};
use crate::session::{expect_arity, required_text, FromRow, Value};

/// Row of `SHOW DATABASES`
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseRow {
    pub name: String,
}

impl FromRow for DatabaseRow {
    const SHAPE: &'static str = "database";

    fn from_row(row: Vec<Value>) -> Result<Self> {
        let [name]: [Value; 1] = to_array::<Self, 1>(row)?;
        Ok(Self {
            name: required_text::<Self>(name, "database name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRow {
    pub name: String,
}

impl FromRow for SchemaRow {
    const SHAPE: &'static str = "schema";

    fn from_row(row: Vec<Value>) -> Result<Self> {
        let [name] = to_array::<Self, 1>(row)?;
        Ok(Self {
            name: required_text::<Self>(name, "schema_name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    /// `BASE TABLE`, `VIEW`, ... as reported by the server
    pub table_type: Option<String>,
}

impl FromRow for TableRow {
    const SHAPE: &'static str = "table";

    fn from_row(row: Vec<Value>) -> Result<Self> {
        let [name, table_type] = to_array::<Self, 2>(row)?;
        Ok(Self {
            name: required_text::<Self>(name, "table_name")?,
            table_type: table_type.into_text(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub name: String,
    pub data_type: String,
}

impl FromRow for ColumnRow {
    const SHAPE: &'static str = "column";

    fn from_row(row: Vec<Value>) -> Result<Self> {
        let [name, data_type] = to_array::<Self, 2>(row)?;
        Ok(Self {
            name: required_text::<Self>(name, "column_name")?,
            // A NULL type only costs the column its glyph
            data_type: data_type.into_text().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRow {
    pub name: String,
    pub is_aggregate: bool,
}

impl FromRow for FunctionRow {
    const SHAPE: &'static str = "function";

    fn from_row(row: Vec<Value>) -> Result<Self> {
        let [name, is_aggregate] = to_array::<Self, 2>(row)?;
        let flag = is_aggregate.as_bool().ok_or_else(|| {
            AdapterError::query(format!(
                "is_aggregate is not a boolean in function row: {}",
                is_aggregate
            ))
        })?;
        Ok(Self {
            name: required_text::<Self>(name, "name")?,
            is_aggregate: flag,
        })
    }
}

fn to_array<T: FromRow, const N: usize>(row: Vec<Value>) -> Result<[Value; N]> {
    let row = expect_arity::<T>(row, N)?;
    row.try_into()
        .map_err(|_| AdapterError::query(format!("malformed {} row", T::SHAPE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_row() {
        let row = TableRow::from_row(vec![Value::text("users"), Value::text("BASE TABLE")])
            .unwrap();
        assert_eq!(row.name, "users");
        assert_eq!(row.table_type.as_deref(), Some("BASE TABLE"));
    }

    #[test]
    fn test_wrong_arity_is_query_error() {
        let err = ColumnRow::from_row(vec![Value::text("id")]).unwrap_err();
        assert_eq!(
            err,
            AdapterError::Query("expected 2 columns for column row, got 1".to_string())
        );
    }

    #[test]
    fn test_null_name_is_rejected() {
        let err = SchemaRow::from_row(vec![Value::Null]).unwrap_err();
        assert!(matches!(err, AdapterError::Query(_)));
    }

    #[test]
    fn test_function_row_flag_forms() {
        let agg = FunctionRow::from_row(vec![Value::text("sum"), Value::UInt(1)]).unwrap();
        assert!(agg.is_aggregate);
        let scalar = FunctionRow::from_row(vec![Value::text("abs"), Value::text("false")]).unwrap();
        assert!(!scalar.is_aggregate);
        assert!(FunctionRow::from_row(vec![Value::text("x"), Value::Null]).is_err());
    }

    #[test]
    fn test_column_row_null_type() {
        let row = ColumnRow::from_row(vec![Value::text("c"), Value::Null]).unwrap();
        assert_eq!(row.data_type, "");
    }
}
