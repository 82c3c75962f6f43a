pub mod ports;
pub mod postgres;

pub use postgres::PostgresDatabase;
