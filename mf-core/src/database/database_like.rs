use std::path::Path;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use eyre::Result;

use crate::types::Layout;

use super::{db_message::DBMessage, filter::Filter, stored_message::StoredMessage};

// `Send` only: the database is owned by exactly one thread at a time,
// and rusqlite connections cannot be shared between threads anyway.
pub trait DatabaseLike: Send {
    fn new(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized;
    fn total_messages(&self) -> Result<usize>;
    fn count_matching(&self, filters: &[Filter]) -> Result<usize>;
    fn select_matching(&self, filters: &[Filter]) -> Result<Vec<StoredMessage>>;
    fn import(self, layout: Layout) -> (Sender<DBMessage>, JoinHandle<Result<usize>>);
}
