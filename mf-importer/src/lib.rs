//! Parses a mailbox export file into message rows.
//!
//! The export is line oriented: each message is a run of `Key: Value`
//! header lines terminated by one blank line. Only the `Message-ID`,
//! `Date`, `From` and `Subject` headers are carried into the database;
//! the `Date` header is what makes a block count as a message at all.

mod importer;
mod parse;

pub use importer::Importer;
pub use parse::{draw_flags, entry_from_record, BlockParser};

use mf_core::Config;

pub fn mbox_importer(config: Config) -> Importer {
    Importer::new(config)
}
