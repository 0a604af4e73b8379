/*!
 * Metadata query construction
 *
 * Identifiers spliced in here come from earlier metadata queries on the same
 * session. They are still rendered as escaped string literals so a name
 * containing a quote cannot end the literal early.
 */

pub const SHOW_DATABASES: &str = "SHOW DATABASES";

pub const LIST_FUNCTIONS: &str = "SELECT name, is_aggregate FROM system.functions";

pub const RESERVED_SCHEMA: &str = "information_schema";

/// Render `value` as a single-quoted SQL string literal
pub fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\'' => quoted.push_str("''"),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Databend's `schemata.catalog_name` holds the catalog, not the database, so
/// schemas are read off the tables view where `table_catalog` is the database.
pub fn list_schemas(database: &str) -> String {
    format!(
        "SELECT DISTINCT table_schema \
         FROM information_schema.tables \
         WHERE table_catalog = {} AND table_schema != {} \
         ORDER BY table_schema ASC",
        quote_literal(database),
        quote_literal(RESERVED_SCHEMA)
    )
}

pub fn list_tables(database: &str, schema: &str) -> String {
    format!(
        "SELECT table_name, table_type \
         FROM information_schema.tables \
         WHERE table_catalog = {} AND table_schema = {} \
         ORDER BY table_name ASC",
        quote_literal(database),
        quote_literal(schema)
    )
}

pub fn list_columns(database: &str, schema: &str, table: &str) -> String {
    format!(
        "SELECT column_name, data_type \
         FROM information_schema.columns \
         WHERE table_catalog = {} AND table_schema = {} AND table_name = {} \
         ORDER BY ordinal_position ASC",
        quote_literal(database),
        quote_literal(schema),
        quote_literal(table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("sales"), "'sales'");
        assert_eq!(quote_literal("o'brien"), "'o''brien'");
        assert_eq!(quote_literal(r"a\b"), r"'a\\b'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn test_list_schemas_excludes_information_schema() {
        let sql = list_schemas("default");
        assert!(sql.starts_with("SELECT DISTINCT table_schema FROM information_schema.tables"));
        assert!(sql.contains("table_catalog = 'default'"));
        assert!(sql.contains("table_schema != 'information_schema'"));
        assert!(!sql.contains("schemata"));
        assert!(sql.ends_with("ORDER BY table_schema ASC"));
    }

    #[test]
    fn test_list_columns_orders_by_position() {
        let sql = list_columns("db", "public", "it's");
        assert!(sql.contains("table_name = 'it''s'"));
        assert!(sql.ends_with("ORDER BY ordinal_position ASC"));
    }

    #[test]
    fn test_list_tables_selects_type() {
        let sql = list_tables("db", "public");
        assert!(sql.starts_with("SELECT table_name, table_type"));
        assert!(sql.contains("table_schema = 'public'"));
    }
}
