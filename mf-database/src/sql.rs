pub const DROP_MESSAGES: &str = "DROP TABLE IF EXISTS messages";

pub const TBL_MESSAGES: &str = r#"
CREATE TABLE messages (
  msgid TEXT,
  msgdate INTEGER,
  msgfrom TEXT,
  msgsubject TEXT,
  folder INTEGER REFERENCES folders(id),
  flags INTEGER
);"#;

pub const TBL_MESSAGES_PLAIN: &str = r#"
CREATE TABLE messages (
  msgid TEXT,
  msgdate INTEGER,
  msgfrom TEXT,
  msgsubject TEXT,
  folder INTEGER REFERENCES folders(id)
);"#;

pub const QUERY_INSERT_MESSAGE: &str = r#"
INSERT INTO messages
    (msgid, msgdate, msgfrom, msgsubject, folder, flags)
VALUES
    (?, ?, ?, ?, ?, ?)
"#;

pub const QUERY_INSERT_MESSAGE_PLAIN: &str = r#"
INSERT INTO messages
    (msgid, msgdate, msgfrom, msgsubject, folder)
VALUES
    (?, ?, ?, ?, ?)
"#;

pub const QUERY_COUNT_MESSAGES: &str = "SELECT count(*) FROM messages";

pub const QUERY_SELECT_MESSAGES: &str = "SELECT * FROM messages";
