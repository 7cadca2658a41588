use crate::types::MessageEntry;

/// Parameter for sending work to the database during `import`.
pub enum DBMessage {
    /// Send for each successfully parsed message
    Message(Box<MessageEntry>),
    /// Send once all parsing is done.
    /// This is used to break out of the receiving loop
    Done,
}
