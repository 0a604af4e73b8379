use crate::session::QueryResult;

/// Materialized result handed to the host for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

/// Result of one host statement
#[derive(Debug, Clone)]
pub struct DatabendCursor {
    result: QueryResult,
    limit: Option<usize>,
}

impl DatabendCursor {
    pub fn new(result: QueryResult) -> Self {
        Self {
            result,
            limit: None,
        }
    }

    /// `(name, type)` per result column
    pub fn columns(&self) -> Vec<(String, String)> {
        self.result
            .columns
            .iter()
            .map(|col| (col.name.clone(), col.type_name.clone()))
            .collect()
    }

    /// Record the host's row-limit hint; rows are not truncated
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn row_count(&self) -> usize {
        self.result.rows.len()
    }

    /// All rows rendered as display text
    pub fn fetchall(&self) -> ResultSet {
        ResultSet {
            columns: self.result.columns.iter().map(|c| c.name.clone()).collect(),
            rows: self
                .result
                .rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }
}
