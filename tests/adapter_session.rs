use databend_adapter::completion::keywords::Keyword;
use databend_adapter::completion::list_completions_with;
use databend_adapter::{
    build_catalog, AdapterError, ConnectionOptions, DatabendAdapter, QueryResult, Result, Session,
    Value,
};
use std::collections::HashSet;

/// Scripted server: answers by the metadata table each statement reads
struct ScriptedServer {
    statements: usize,
    fail_columns_of: Option<&'static str>,
}

impl ScriptedServer {
    fn new() -> Self {
        Self {
            statements: 0,
            fail_columns_of: None,
        }
    }
}

impl Session for ScriptedServer {
    fn execute(&mut self, sql: &str) -> Result<QueryResult> {
        self.statements += 1;
        if sql == "SHOW DATABASES" {
            return Ok(QueryResult::from_text_rows(
                &["Database"],
                vec![vec!["default"], vec!["system"]],
            ));
        }
        if sql.contains("DISTINCT table_schema") {
            let rows = if sql.contains("table_catalog = 'default'") {
                vec![vec!["default"]]
            } else {
                vec![]
            };
            return Ok(QueryResult::from_text_rows(&["table_schema"], rows));
        }
        if sql.contains("information_schema.tables") {
            return Ok(QueryResult::from_text_rows(
                &["table_name", "table_type"],
                vec![vec!["events", "BASE TABLE"], vec!["users", "BASE TABLE"]],
            ));
        }
        if sql.contains("information_schema.columns") {
            if let Some(table) = self.fail_columns_of {
                if sql.contains(&format!("table_name = '{}'", table)) {
                    return Err(AdapterError::query("permission denied"));
                }
            }
            // Ordinal order, deliberately not alphabetical
            let rows = if sql.contains("'users'") {
                vec![vec!["zeta", "VARCHAR"], vec!["alpha", "Nullable(Int64)"]]
            } else {
                vec![vec!["ts", "TIMESTAMP"]]
            };
            return Ok(QueryResult::from_text_rows(&["column_name", "data_type"], rows));
        }
        if sql.contains("system.functions") {
            return Ok(QueryResult::new(
                vec![],
                vec![
                    vec![Value::text("count"), Value::Int(1)],
                    vec![Value::text("abs"), Value::Int(0)],
                ],
            ));
        }
        Err(AdapterError::query(format!("unexpected: {}", sql)))
    }
}

#[test]
fn catalog_from_scripted_server() {
    let mut server = ScriptedServer::new();
    let catalog = build_catalog(&mut server).unwrap();

    // default, system, default.default, 2 tables, 3 columns
    assert_eq!(catalog.node_count(), 8);
    let ids: HashSet<&str> = catalog
        .iter()
        .map(|(_, node)| node.qualified_identifier.as_str())
        .collect();
    assert_eq!(ids.len(), 8);

    let users = catalog.find("default.default.users").unwrap();
    let columns: Vec<(&str, &str)> = users
        .children
        .iter()
        .map(|c| (c.label.as_str(), c.type_label.as_str()))
        .collect();
    assert_eq!(columns, vec![("zeta", "s"), ("alpha", "##")]);

    let system = &catalog.items[1];
    assert_eq!(system.label, "system");
    assert!(system.children.is_empty());
}

#[test]
fn column_failure_propagates_out_of_build() {
    let mut server = ScriptedServer::new();
    server.fail_columns_of = Some("users");
    let err = build_catalog(&mut server).unwrap_err();
    assert_eq!(err, AdapterError::Query("permission denied".to_string()));
}

#[test]
fn completions_merge_keywords_and_functions() {
    let keywords = vec![
        Keyword::new("FROM", "reserved"),
        Keyword::new("ANALYZE", "non-reserved"),
    ];
    let mut server = ScriptedServer::new();
    let completions = list_completions_with(&keywords, &mut server).unwrap();
    assert_eq!(server.statements, 1);

    let summary: Vec<(&str, &str, u32)> = completions
        .iter()
        .map(|c| (c.label.as_str(), c.type_label.as_str(), c.priority))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("abs", "fn", 1000),
            ("analyze", "kw", 1000),
            ("count", "agg", 1000),
            ("from", "kw", 100),
        ]
    );
}

#[test]
fn two_connection_strings_never_connect() {
    let adapter = DatabendAdapter::new(
        vec!["databend://root:@localhost:1/default".to_string(), String::new()],
        ConnectionOptions::default(),
    );
    let err = adapter.connect().err().unwrap();
    assert!(matches!(err, AdapterError::Connection { .. }));
}

#[test]
fn refused_connection_carries_the_databend_title() {
    let adapter = DatabendAdapter::new(
        Vec::new(),
        ConnectionOptions {
            host: Some("127.0.0.1".to_string()),
            port: Some("1".to_string()),
            ..Default::default()
        },
    );
    let err = adapter.connect().err().unwrap();
    assert!(matches!(
        err,
        AdapterError::Connection { ref title, .. } if title == "could not connect to databend"
    ));
}
