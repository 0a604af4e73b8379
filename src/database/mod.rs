pub mod connection;
pub mod cursor;

pub use connection::{ConnectionTarget, DatabendConnection};
pub use cursor::{DatabendCursor, ResultSet};
