use crate::commands::QueryExecutor;
use anyhow::Result;
use databend_adapter::completion::metadata::SessionMetadata;
use databend_adapter::completion::DatabendHelper;
use databend_adapter::{Catalog, CompletionEntry, DatabendConnection};
use rustyline::error::ReadlineError;
use rustyline::{history::DefaultHistory, CompletionType, Config, Editor};
use std::sync::{Arc, Mutex};
use tracing::warn;

const HELP_LINES: [&str; 11] = [
    "\\c (\\clear)            Clear the current input statement.",
    "\\catalog               Show databases, schemas, tables and columns.",
    "\\completions [prefix]  List completion entries.",
    "\\d (\\databases)        List databases.",
    "\\h (\\help)             Display this help.",
    "\\limit [n]             Display at most n rows per result (no argument clears).",
    "\\q (\\quit)             Quit.",
    "\\refresh               Rebuild the catalog and completion list.",
    "\\s (\\status)           Get status information from the server.",
    "\\t (\\tables)           List tables in current database.",
    "\\u <db> (\\use)         Use database <db>.",
];

pub struct Cli {
    connection: DatabendConnection,
    query_executor: QueryExecutor,
    editor: Editor<DatabendHelper, DefaultHistory>,
    current_database: Option<String>,
    metadata: Arc<Mutex<SessionMetadata>>,
}

impl Cli {
    pub fn new(connection: DatabendConnection, database: Option<&str>) -> Result<Self> {
        let current_database = database.map(|d| d.to_string());

        println!("{}", connection.init_message());
        println!("Connection id: {}", connection.connection_id());
        println!("Server version: {}", connection.server_version());
        println!();
        println!("Type '\\h' for help. Statements end with ; or \\g.");
        println!();

        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .edit_mode(rustyline::EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(config)?;
        let metadata = Arc::new(Mutex::new(SessionMetadata::new()));
        let helper = DatabendHelper::with_metadata(metadata.clone());
        helper.set_current_database(current_database.clone());
        editor.set_helper(Some(helper));

        let mut cli = Self {
            connection,
            query_executor: QueryExecutor::new(),
            editor,
            current_database,
            metadata,
        };
        cli.update_metadata();
        Ok(cli)
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let prompt = self.get_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('\\') {
                        match self.handle_special_command(line) {
                            Ok(true) => continue,
                            Ok(false) => break,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        }
                    }

                    if line.ends_with(';') || line.ends_with("\\g") {
                        let query = line.trim_end_matches(';').trim_end_matches("\\g").trim();
                        if let Err(e) = self.execute_query(query) {
                            println!("ERROR: {}", e);
                        }
                    } else {
                        println!("Please end your SQL statement with ';' or '\\g'");
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
        println!("Bye");
        Ok(())
    }

    fn get_prompt(&self) -> String {
        match &self.current_database {
            Some(db) => format!("databend [{}]> ", db),
            None => "databend> ".to_string(),
        }
    }

    /// Returns false when the session should end
    fn handle_special_command(&mut self, command: &str) -> Result<bool> {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "\\q" | "\\quit" | "\\exit" => return Ok(false),
            "\\h" | "\\help" => self.show_help(),
            "\\c" | "\\clear" => println!("Query cleared."),
            "\\s" | "\\status" => self.show_status(),
            "\\d" | "\\databases" => self.execute_query("SHOW DATABASES")?,
            "\\t" | "\\tables" => self.execute_query("SHOW TABLES")?,
            "\\u" | "\\use" if !arg.is_empty() => self.use_database(arg)?,
            "\\catalog" => self.show_catalog(),
            "\\completions" => self.show_completions(arg),
            "\\refresh" => {
                self.update_metadata();
                println!("Catalog refreshed.");
            }
            "\\limit" => self.set_limit(arg)?,
            _ => {
                println!("Unknown command: {}", command);
                println!("Type '\\h' for help.");
            }
        }
        Ok(true)
    }

    fn show_help(&self) {
        for line in HELP_LINES {
            println!("{}", line);
        }
        println!();
    }

    fn show_status(&self) {
        println!("--------------");
        println!("Connection id:\t\t{}", self.connection.connection_id());
        println!(
            "Current database:\t{}",
            self.current_database.as_deref().unwrap_or("(none)")
        );
        println!("Server version:\t\t{}", self.connection.server_version());
        match self.query_executor.limit() {
            Some(limit) => println!("Row limit:\t\t{}", limit),
            None => println!("Row limit:\t\t(none)"),
        }
        println!("--------------");
    }

    fn show_catalog(&self) {
        match self.metadata.lock() {
            Ok(meta) => print!("{}", format_catalog(&meta.catalog)),
            Err(_) => println!("Catalog is being refreshed, try again."),
        }
    }

    fn show_completions(&self, prefix: &str) {
        if let Ok(meta) = self.metadata.lock() {
            for entry in filter_completions(&meta.completions, prefix) {
                println!("{:<40} {:<4} {}", entry.label, entry.type_label, entry.priority);
            }
        }
    }

    fn set_limit(&mut self, arg: &str) -> Result<()> {
        if arg.is_empty() {
            self.query_executor.set_limit(None);
            println!("Row limit cleared.");
            return Ok(());
        }
        let limit: usize = arg
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid row limit: {}", arg))?;
        self.query_executor.set_limit(Some(limit));
        println!("Row limit set to {}.", limit);
        Ok(())
    }

    fn use_database(&mut self, db_name: &str) -> Result<()> {
        self.execute_query(&format!("USE {}", db_name))?;
        println!("Database changed");
        Ok(())
    }

    fn execute_query(&mut self, query: &str) -> Result<()> {
        let trimmed_query = query.trim().to_uppercase();

        let should_refresh_metadata = trimmed_query.starts_with("CREATE")
            || trimmed_query.starts_with("DROP")
            || trimmed_query.starts_with("ALTER")
            || trimmed_query.starts_with("RENAME")
            || trimmed_query.starts_with("USE");

        self.query_executor.execute(&mut self.connection, query)?;

        if trimmed_query.starts_with("USE") {
            if let Some(db_name) = query.split_whitespace().nth(1) {
                self.current_database = Some(db_name.trim_matches('`').to_string());
                if let Some(helper) = self.editor.helper() {
                    helper.set_current_database(self.current_database.clone());
                }
            }
        }

        if should_refresh_metadata {
            self.update_metadata();
        }
        Ok(())
    }

    fn update_metadata(&mut self) {
        if let Ok(mut meta) = self.metadata.lock() {
            if let Err(e) = meta.refresh(&mut self.connection) {
                warn!(error = %e, "metadata refresh failed");
                println!("Warning: completions may be stale ({})", e);
            }
        }
    }
}

/// Indented tree with type tags, one node per line
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (depth, node) in catalog.iter() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.label);
        out.push_str(" [");
        out.push_str(&node.type_label);
        out.push_str("]\n");
    }
    out
}

pub fn filter_completions<'a>(
    entries: &'a [CompletionEntry],
    prefix: &'a str,
) -> impl Iterator<Item = &'a CompletionEntry> + 'a {
    let prefix = prefix.to_lowercase();
    entries
        .iter()
        .filter(move |entry| entry.label.to_lowercase().starts_with(&prefix))
}
