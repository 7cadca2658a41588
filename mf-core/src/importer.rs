use eyre::Result;
use std::thread::JoinHandle;

use crate::DatabaseLike;

pub trait Importerlike {
    fn import<Database: DatabaseLike + 'static>(
        self,
        database: Database,
    ) -> Result<(MessageReceiver, JoinHandle<Result<usize>>)>;
}

/// The message that informs of the importers progress
#[derive(Debug)]
pub enum Message {
    /// Emitted for every row that is handed to the database
    WriteOne,
    /// Once everything has been written, we need to wait for the database
    /// to sync
    FinishingUp,
    /// Finally, this indicates that we're done.
    Done,
}

pub type MessageSender = crossbeam_channel::Sender<Message>;
pub type MessageReceiver = crossbeam_channel::Receiver<Message>;
