use chrono::prelude::*;

/// Bit 0 of the `flags` column, the read marker tested by the folder
/// filter scripts.
pub const FLAG_READ: i64 = 0x1;

/// Representation of one message reconstructed from a header block.
#[derive(Debug, Clone)]
pub struct MessageEntry {
    pub msgid: Option<String>,
    pub datetime: DateTime<Utc>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub folder: i64,
    /// Only set when the run assigns random flags.
    pub flags: Option<i64>,
}

impl MessageEntry {
    /// Milliseconds since the epoch. Whole-second precision, any
    /// sub-second part of the original date is not retained.
    pub fn msgdate(&self) -> i64 {
        self.datetime.timestamp() * 1000
    }
}
