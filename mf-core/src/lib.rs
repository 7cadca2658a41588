//! # Core types, traits and imports
//!
//! This crate carries everything that is shared between the importer, the
//! database and the CLI.
//!
//! It contains the following modules:
//!
//! ## database
//!
//! The [`DatabaseLike`] trait that the importer writes into, the work items
//! sent to the database thread ([`DBMessage`]), the [`Filter`] restrictions
//! used by the count/select queries and the [`StoredMessage`] rows they
//! return.
//!
//! ## importer
//!
//! The [`Importerlike`] trait and the progress [`Message`] channel that an
//! import run reports through.
//!
//! ## types
//!
//! The run [`Config`], the parsed [`MessageEntry`] representation and the
//! static year-to-folder assignment.

mod database;
mod importer;
mod types;

pub use database::database_like::DatabaseLike;
pub use database::db_message::DBMessage;
pub use database::filter::Filter;
pub use database::stored_message::StoredMessage;
pub use importer::{Importerlike, Message, MessageReceiver, MessageSender};
pub use types::{folder_for_year, Config, Layout, MessageEntry, DEFAULT_FOLDER, FLAG_READ};

// Re-Export some dependencies so they don't
// need to be listed again in other Cargo tomls
pub use chrono;
pub use crossbeam_channel;
pub use eyre;
pub use rand;
pub use serde_json::{self, Value};
pub use tracing;

// Tracing

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn setup_tracing() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "error")
    }

    let collector = tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stdout));

    tracing::subscriber::set_global_default(collector).expect("Unable to set a global collector");
}
