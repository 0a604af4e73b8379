use anyhow::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use databend_adapter::{DatabendConnection, ResultSet};
use std::time::Instant;

pub struct QueryExecutor {
    /// Row-limit hint passed to every cursor
    limit: Option<usize>,
}

impl QueryExecutor {
    pub fn new() -> Self {
        QueryExecutor { limit: None }
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn execute(&self, connection: &mut DatabendConnection, query: &str) -> Result<()> {
        let start_time = Instant::now();

        if query.trim().is_empty() {
            return Ok(());
        }

        let mut cursor = connection.execute(query)?;
        if let Some(limit) = self.limit {
            cursor = cursor.set_limit(limit);
        }
        let result = cursor.fetchall();
        let duration = start_time.elapsed();

        if result.is_empty() {
            println!("Query OK ({:.3} sec)", duration.as_secs_f64());
            return Ok(());
        }

        println!("{}", render_table(&result, cursor.limit()));
        let row_count = result.rows.len();
        let shown = cursor.limit().map_or(row_count, |limit| limit.min(row_count));
        let noun = if row_count == 1 { "row" } else { "rows" };
        if shown < row_count {
            println!(
                "{} {} in set, showing {} ({:.3} sec)",
                row_count,
                noun,
                shown,
                duration.as_secs_f64()
            );
        } else {
            println!("{} {} in set ({:.3} sec)", row_count, noun, duration.as_secs_f64());
        }

        Ok(())
    }
}

/// Render at most `limit` rows of the result
pub fn render_table(result: &ResultSet, limit: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        result
            .columns
            .iter()
            .map(|column| Cell::new(column).add_attribute(Attribute::Bold)),
    );

    let shown = limit.unwrap_or(result.rows.len());
    for row in result.rows.iter().take(shown) {
        table.add_row(row.iter().map(Cell::new));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ResultSet {
        ResultSet {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec!["1".to_string(), "alice".to_string()],
                vec!["2".to_string(), "NULL".to_string()],
            ],
        }
    }

    #[test]
    fn test_render_all_rows() {
        let rendered = render_table(&result(), None).to_string();
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("NULL"));
        assert!(rendered.contains("name"));
    }

    #[test]
    fn test_render_respects_limit_hint() {
        let table = render_table(&result(), Some(1));
        assert_eq!(table.row_iter().count(), 1);
        assert!(!table.to_string().contains("NULL"));
    }
}
