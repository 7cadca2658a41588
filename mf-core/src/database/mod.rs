pub(crate) mod database_like;
pub(crate) mod db_message;
pub(crate) mod filter;
pub(crate) mod stored_message;
