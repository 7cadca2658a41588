/// A `messages` row read back out of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub msgid: Option<String>,
    pub msgdate: i64,
    pub msgfrom: Option<String>,
    pub msgsubject: Option<String>,
    pub folder: i64,
    /// Only present in stores created with the flagged layout.
    pub flags: Option<i64>,
}
