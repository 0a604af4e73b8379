/*!
 * Databend adapter for SQL IDE hosts
 *
 * Translates a host's adapter / connection / cursor / completion contract
 * into Databend calls:
 * - Catalog tree from `information_schema`
 * - Completion list from the keyword table and `system.functions`
 * - Connection setup from a connection string or structured options
 */

pub mod adapter;
pub mod catalog;
pub mod completion;
pub mod database;
pub mod error;
pub mod logging;
pub mod options;
pub mod session;

pub use adapter::DatabendAdapter;
pub use catalog::{build_catalog, shorten, Catalog, CatalogNode};
pub use completion::{list_completions, CompletionEntry};
pub use database::{DatabendConnection, DatabendCursor, ResultSet};
pub use error::{AdapterError, Result};
pub use options::{ConnectionOptions, TextOption, DATABEND_OPTIONS};
pub use session::{ColumnDescriptor, QueryResult, Session, Value};
