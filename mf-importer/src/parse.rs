use mf_core::chrono::{DateTime, Datelike, Utc};
use mf_core::eyre::{eyre, Context, Result};
use mf_core::rand::Rng;
use mf_core::{folder_for_year, MessageEntry, FLAG_READ};

use std::collections::HashMap;

/// Date format used by the export, e.g. `Mon, 15 Jan 2018 10:30:00 +0000`.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Accumulates `Key: Value` lines until the blank line that terminates
/// a message block.
///
/// The accumulator is only reset when a block is flushed. A blank line
/// after a block without a `Date` header flushes nothing, so such
/// headers keep accumulating into the following block - this mirrors
/// the behavior of the export's original consumer.
#[derive(Debug, Default)]
pub struct BlockParser {
    current: HashMap<String, String>,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, without its terminator.
    ///
    /// Returns the finished header record when `line` is the blank
    /// delimiter of a block that carries a `Date` header. Lines that are
    /// neither a delimiter nor shaped like a header (no `": "`) are
    /// ignored; that covers continuation lines and mbox `From ` envelopes.
    pub fn feed(&mut self, line: &str) -> Option<HashMap<String, String>> {
        if line.is_empty() && self.current.contains_key("Date") {
            return Some(std::mem::take(&mut self.current));
        }
        if line.contains(": ") {
            let trimmed = line.trim();
            if let Some((key, value)) = trimmed.split_once(' ') {
                self.current
                    .insert(key.trim_end_matches(':').to_owned(), value.to_owned());
            }
        }
        None
    }
}

/// Turn a finished header record into a [`MessageEntry`].
///
/// Parsing the `Date` header is the only way this can fail, and a failure
/// aborts the entire run. The other three projected headers are optional
/// and stored as NULL when missing. Flags are not assigned here, see
/// [`draw_flags`].
pub fn entry_from_record(mut record: HashMap<String, String>) -> Result<MessageEntry> {
    let date = record
        .remove("Date")
        .ok_or_else(|| eyre!("Header record without a Date header"))?;
    let datetime = DateTime::parse_from_str(&date, DATE_FORMAT)
        .with_context(|| format!("Could not parse date '{}'", &date))?;
    let folder = folder_for_year(datetime.year());

    Ok(MessageEntry {
        msgid: record.remove("Message-ID"),
        datetime: datetime.with_timezone(&Utc),
        from: record.remove("From"),
        subject: record.remove("Subject"),
        folder,
        flags: None,
    })
}

/// Draw the flags value for one message: the read bit is set with
/// probability one half, all other bits stay zero.
pub fn draw_flags<R: Rng>(rng: &mut R) -> i64 {
    let mut flags = 0;
    if rng.gen::<f64>() > 0.5 {
        flags |= FLAG_READ;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::rand::rngs::mock::StepRng;
    use mf_core::DEFAULT_FOLDER;

    fn feed_all(parser: &mut BlockParser, lines: &[&str]) -> Vec<HashMap<String, String>> {
        lines.iter().filter_map(|line| parser.feed(line)).collect()
    }

    #[test]
    fn test_block_flushes_on_blank_line() {
        let mut parser = BlockParser::new();
        let records = feed_all(
            &mut parser,
            &[
                "Message-ID: <abc@example.com>",
                "Date: Mon, 15 Jan 2018 10:30:00 +0000",
                "From: a@b.com",
                "Subject: Hello out there",
                "",
            ],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Message-ID"], "<abc@example.com>");
        assert_eq!(records[0]["Subject"], "Hello out there");
    }

    #[test]
    fn test_block_without_date_never_flushes() {
        let mut parser = BlockParser::new();
        let records = feed_all(&mut parser, &["Subject: No date here", ""]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_whitespace_line_is_not_a_delimiter() {
        let mut parser = BlockParser::new();
        let records = feed_all(
            &mut parser,
            &["Date: Mon, 15 Jan 2018 10:30:00 +0000", "   ", "\t"],
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_repeated_key_overwrites() {
        let mut parser = BlockParser::new();
        let records = feed_all(
            &mut parser,
            &[
                "Date: Mon, 15 Jan 2018 10:30:00 +0000",
                "Subject: First",
                "Subject: Second",
                "",
            ],
        );
        assert_eq!(records[0]["Subject"], "Second");
    }

    #[test]
    fn test_unshaped_lines_are_ignored() {
        let mut parser = BlockParser::new();
        let records = feed_all(
            &mut parser,
            &[
                "From nobody Mon Jan 15 10:30:00 2018",
                "Date: Mon, 15 Jan 2018 10:30:00 +0000",
                "\tboundary=something",
                "",
            ],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_entry_projection() {
        let mut parser = BlockParser::new();
        let record = parser.feed("Date: Mon, 15 Jan 2018 10:30:00 +0000");
        assert!(record.is_none());
        let record = parser.feed("").expect("flush");
        let entry = entry_from_record(record).expect("entry");
        assert_eq!(entry.msgdate(), 1516011000000);
        assert_eq!(entry.folder, 13);
        assert_eq!(entry.msgid, None);
        assert_eq!(entry.from, None);
        assert_eq!(entry.subject, None);
        assert_eq!(entry.flags, None);
    }

    #[test]
    fn test_msgdate_is_offset_invariant() {
        let utc = entry_from_record(HashMap::from([(
            "Date".to_owned(),
            "Mon, 15 Jan 2018 10:30:00 +0000".to_owned(),
        )]))
        .expect("entry");
        let cet = entry_from_record(HashMap::from([(
            "Date".to_owned(),
            "Mon, 15 Jan 2018 12:30:00 +0200".to_owned(),
        )]))
        .expect("entry");
        assert_eq!(utc.msgdate(), cet.msgdate());
    }

    #[test]
    fn test_unmapped_year_gets_default_folder() {
        let entry = entry_from_record(HashMap::from([(
            "Date".to_owned(),
            "Wed, 21 Jul 1999 23:59:59 -0700".to_owned(),
        )]))
        .expect("entry");
        assert_eq!(entry.folder, DEFAULT_FOLDER);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let result = entry_from_record(HashMap::from([(
            "Date".to_owned(),
            "not a real date".to_owned(),
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_flags_is_zero_or_read_bit() {
        // A rng that always yields 0.0 never sets the bit, one that
        // always yields (almost) 1.0 always does.
        let mut never = StepRng::new(0, 0);
        assert_eq!(draw_flags(&mut never), 0);
        let mut always = StepRng::new(u64::MAX, 0);
        assert_eq!(draw_flags(&mut always), FLAG_READ);
    }
}
