use mf_core::crossbeam_channel::unbounded;
use mf_core::eyre::{bail, eyre, Context, Result};
use mf_core::{
    rand, tracing, Config, DBMessage, DatabaseLike, Importerlike, Message, MessageReceiver,
    MessageSender,
};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::thread::JoinHandle;

use crate::parse::{draw_flags, entry_from_record, BlockParser};

pub struct Importer {
    config: Config,
}

impl Importer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Importerlike for Importer {
    fn import<Database: DatabaseLike + 'static>(
        self,
        database: Database,
    ) -> Result<(MessageReceiver, JoinHandle<Result<usize>>)> {
        let Importer { config } = self;
        let (sender, receiver) = unbounded();

        let handle: JoinHandle<Result<usize>> = std::thread::spawn(move || {
            let processed = into_database(&config, database, sender)?;
            Ok(processed)
        });
        Ok((receiver, handle))
    }
}

/// Stream the mailbox file into the database.
///
/// The database writes on its own thread; this one owns the file, feeds
/// the parser and forwards every flushed record. Any parse failure
/// returns early, which drops the database sender before `Done` and
/// thereby leaves the import transaction uncommitted.
fn into_database<Database: DatabaseLike + 'static>(
    config: &Config,
    database: Database,
    tx: MessageSender,
) -> Result<usize> {
    let file = File::open(&config.mailbox_path)
        .with_context(|| format!("{}", config.mailbox_path.display()))?;
    let reader = BufReader::new(file);

    // Consume the connection to begin the import. It will return the
    // `handle` to wait for the database and the `sender` to submit work.
    let (db_sender, db_handle) = database.import(config.layout());

    let mut rng = rand::thread_rng();
    let mut parser = BlockParser::new();
    for line in reader.lines() {
        let line = line?;
        let record = match parser.feed(&line) {
            Some(n) => n,
            None => continue,
        };
        let mut entry = entry_from_record(record)?;
        if config.random_flags {
            entry.flags = Some(draw_flags(&mut rng));
        }
        if let Err(e) = tx.send(Message::WriteOne) {
            tracing::error!("Channel Failure: {:?}", &e);
        }
        if let Err(e) = db_sender.send(DBMessage::Message(Box::new(entry))) {
            bail!("Error Inserting into Database: {:?}", &e);
        }
    }
    // Whatever is still accumulated at this point never saw its
    // delimiter and is dropped.

    // Tell SQLite there's no more work coming. This will exit the listening loop
    if let Err(e) = db_sender.send(DBMessage::Done) {
        bail!("Channel Failure {:?}", &e);
    }

    // Wait for SQLite to finish writing
    tracing::info!("Waiting for SQLite to finish");

    if let Err(e) = tx.send(Message::FinishingUp) {
        bail!("Channel Failure {:?}", &e);
    }

    let output = match db_handle.join() {
        Ok(Ok(count)) => Ok(count),
        Ok(Err(e)) => Err(e),
        Err(e) => Err(eyre!("Join Error: {:?}", &e)),
    };

    if let Err(e) = tx.send(Message::Done) {
        bail!("Channel Failure {:?}", &e);
    }

    output
}
