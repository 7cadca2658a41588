mod conversion;
mod db;
mod sql;

pub use conversion::{json_to_value, RowConversion};
pub use db::Database;
