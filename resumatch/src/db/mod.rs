mod connection;
mod repository;
mod schema;
mod traits;

pub mod backends;

pub use backends::LibSqlRecordStore;
pub use connection::Database;
pub use traits::RecordStore;
