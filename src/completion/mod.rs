/*!
 * Databend completion module
 *
 * - Completion list from the packaged keyword table and `system.functions`
 * - Metadata snapshot and suggestion engine for the interactive host
 * - rustyline integration
 */

pub mod engine;
pub mod helper;
pub mod keywords;
pub mod lister;
pub mod metadata;
pub mod suggestion;

pub use helper::DatabendHelper;
pub use lister::{list_completions, list_completions_with, CompletionEntry};
