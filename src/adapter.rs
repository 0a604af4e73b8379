/*!
 * Adapter entry point
 *
 * What the host instantiates: it holds the connection arguments and opens
 * [`DatabendConnection`]s from them.
 */

use crate::database::{ConnectionTarget, DatabendConnection};
use crate::error::{AdapterError, Result};
use crate::options::{ConnectionOptions, TextOption, DATABEND_OPTIONS};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DatabendAdapter {
    conn_str: Vec<String>,
    options: ConnectionOptions,
    init_message: Option<String>,
}

impl DatabendAdapter {
    /// Options the host should expose for this adapter
    pub const ADAPTER_OPTIONS: [TextOption; 5] = DATABEND_OPTIONS;

    pub fn new(conn_str: Vec<String>, options: ConnectionOptions) -> Self {
        Self {
            conn_str,
            options,
            init_message: None,
        }
    }

    pub fn with_init_message(mut self, message: impl Into<String>) -> Self {
        self.init_message = Some(message.into());
        self
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Decide where to connect without touching the network
    ///
    /// A single non-empty connection string wins over the structured options.
    pub fn connection_target(&self) -> Result<ConnectionTarget> {
        if self.conn_str.len() > 1 {
            return Err(AdapterError::connection(format!(
                "Cannot provide multiple connection strings to the Databend adapter: {:?}",
                self.conn_str
            )));
        }

        match self.conn_str.first().filter(|s| !s.trim().is_empty()) {
            Some(conn_str) => Ok(ConnectionTarget::Url(conn_str.trim().to_string())),
            None => Ok(ConnectionTarget::Options(self.options.resolve()?)),
        }
    }

    pub fn connect(&self) -> Result<DatabendConnection> {
        let target = self.connection_target()?;
        debug!(
            from_url = matches!(target, ConnectionTarget::Url(_)),
            "opening databend connection"
        );
        DatabendConnection::open(&target, self.init_message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ResolvedOptions;

    #[test]
    fn test_multiple_connection_strings_rejected() {
        let adapter = DatabendAdapter::new(
            vec![
                "databend://root:@a:8000/default".to_string(),
                "databend://root:@b:8000/default".to_string(),
            ],
            ConnectionOptions::default(),
        );
        let err = adapter.connect().err().unwrap();
        assert!(err.is_connection());
        assert!(err
            .to_string()
            .contains("Cannot provide multiple connection strings"));
    }

    #[test]
    fn test_connection_string_wins() {
        let adapter = DatabendAdapter::new(
            vec!["databend://root:@db:8000/sales".to_string()],
            ConnectionOptions {
                host: Some("ignored".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            adapter.connection_target().unwrap(),
            ConnectionTarget::Url("databend://root:@db:8000/sales".to_string())
        );
    }

    #[test]
    fn test_empty_connection_string_uses_options() {
        let adapter = DatabendAdapter::new(
            vec![String::new()],
            ConnectionOptions {
                port: Some("8000".to_string()),
                user: Some("root".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            adapter.connection_target().unwrap(),
            ConnectionTarget::Options(ResolvedOptions {
                host: "127.0.0.1".to_string(),
                port: 8000,
                dbname: "default".to_string(),
                user: "root".to_string(),
                password: String::new(),
            })
        );
    }

    #[test]
    fn test_bad_port_fails_before_connecting() {
        let adapter = DatabendAdapter::new(
            Vec::new(),
            ConnectionOptions {
                port: Some("not-a-port".to_string()),
                ..Default::default()
            },
        );
        assert!(adapter.connect().err().unwrap().is_connection());
    }

    #[test]
    fn test_unreachable_server_is_connection_error() {
        let adapter = DatabendAdapter::new(
            vec!["databend://root:@127.0.0.1:1/default".to_string()],
            ConnectionOptions::default(),
        );
        match adapter.connect().err().unwrap() {
            AdapterError::Connection { title, message } => {
                assert_eq!(title, AdapterError::CONNECTION_TITLE);
                assert!(!message.is_empty());
            }
            other => panic!("expected a connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_adapter_options() {
        assert_eq!(DatabendAdapter::ADAPTER_OPTIONS.len(), 5);
        assert_eq!(DatabendAdapter::ADAPTER_OPTIONS[0].name, "host");
    }
}
