use mf_core::crossbeam_channel::{unbounded, Sender};
use mf_core::eyre::{bail, eyre, Result};
use mf_core::{tracing, DBMessage, DatabaseLike, Filter, Layout, MessageEntry, StoredMessage};
use rusqlite::{params, params_from_iter, Connection, Statement};

use std::{path::Path, thread::JoinHandle};

use super::conversion::{json_to_value, RowConversion};
use super::sql::*;

#[derive(Debug)]
pub struct Database {
    connection: Option<Connection>,
}

impl DatabaseLike for Database {
    /// Open database at path `Path`.
    ///
    /// This only opens the connection. The `messages` table is dropped
    /// and recreated when an `import` begins, so a connection opened for
    /// querying leaves existing data alone.
    fn new(path: impl AsRef<Path>) -> Result<Self> {
        let connection = Connection::open(path.as_ref())?;

        // Improve the insertion performance.
        connection.pragma_update(None, "journal_mode", &"memory")?;
        connection.pragma_update(None, "synchronous", &"OFF")?;
        // The `messages.folder` column carries a dangling foreign key to an
        // external `folders` table that this component never creates (see
        // spec). The bundled SQLite is built with SQLITE_DEFAULT_FOREIGN_KEYS=1,
        // so enforcement must be turned off explicitly to match standard
        // SQLite's default; otherwise preparing any INSERT fails with
        // "no such table: folders".
        connection.pragma_update(None, "foreign_keys", &"OFF")?;

        Ok(Database {
            connection: Some(connection),
        })
    }

    fn total_messages(&self) -> Result<usize> {
        self.count_matching(&[])
    }

    fn count_matching(&self, filters: &[Filter]) -> Result<usize> {
        let connection = match &self.connection {
            Some(n) => n,
            None => bail!("No connection to database available in query"),
        };
        let (clause, values) = Filter::where_clause(filters);
        let sql = format!("{}{}", QUERY_COUNT_MESSAGES, clause);
        let mut converted = Vec::new();
        for value in &values {
            converted.push(json_to_value(value)?);
        }
        let count: i64 =
            connection.query_row(&sql, params_from_iter(converted.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    fn select_matching(&self, filters: &[Filter]) -> Result<Vec<StoredMessage>> {
        let connection = match &self.connection {
            Some(n) => n,
            None => bail!("No connection to database available in query"),
        };
        let (clause, values) = Filter::where_clause(filters);
        let sql = format!("{}{}", QUERY_SELECT_MESSAGES, clause);
        let mut converted = Vec::new();
        for value in &values {
            converted.push(json_to_value(value)?);
        }
        let mut stmt = connection.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(converted.iter()))?;
        let mut messages = Vec::new();
        while let Some(row) = rows.next()? {
            messages.push(StoredMessage::from_row(row)?);
        }
        Ok(messages)
    }

    /// Begin the data import.
    /// This will consume the `Database`. A new one has to be opened
    /// afterwards in order to run the summary queries.
    /// Returns an input `Sender` and a `JoinHandle`.
    /// The `Sender` is used to submit work to the database via `DBMessage`
    /// cases. The `JoinHandle` is used to wait for database completion.
    ///
    /// The whole import runs in one transaction: the table recreate, all
    /// inserts, and a single commit once `DBMessage::Done` arrives. If the
    /// channel disconnects before `Done` the transaction is never
    /// committed and the store keeps its previous contents.
    fn import(mut self, layout: Layout) -> (Sender<DBMessage>, JoinHandle<Result<usize>>) {
        let (sender, receiver) = unbounded();

        // Import can only be called *once* on a database created with `new`.
        // Therefore there should always be a value to unwrap;
        let mut connection = self.connection.take().unwrap();
        let handle = std::thread::spawn(move || {
            let mut counter = 0;
            {
                let transaction = connection.transaction()?;
                transaction.execute(DROP_MESSAGES, params![])?;
                let table = match layout {
                    Layout::Flagged => TBL_MESSAGES,
                    Layout::Plain => TBL_MESSAGES_PLAIN,
                };
                transaction.execute(table, params![])?;
                {
                    let insert = match layout {
                        Layout::Flagged => QUERY_INSERT_MESSAGE,
                        Layout::Plain => QUERY_INSERT_MESSAGE_PLAIN,
                    };
                    let mut prepared = transaction.prepare(insert)?;
                    loop {
                        let next = match receiver.recv() {
                            Ok(n) => n,
                            // All senders are gone without a `Done`. The
                            // producer aborted; leave the transaction
                            // uncommitted.
                            Err(_) => bail!("Channel closed before Done"),
                        };
                        match next {
                            DBMessage::Message(message) => {
                                counter += 1;
                                insert_message(&mut prepared, &message, layout)
                            }
                            DBMessage::Done => {
                                tracing::trace!("Received DBMessage::Done");
                                break;
                            }
                        }?;
                    }
                }
                if let Err(e) = transaction.commit() {
                    return Err(eyre!("Transaction Error: {:?}", &e));
                }
            }
            // In case closing the database fails, we try again until we succeed
            let mut c = connection;
            loop {
                tracing::trace!("Attempting close");
                match c.close() {
                    Ok(_n) => break,
                    Err((a, _b)) => c = a,
                }
            }
            tracing::trace!("Finished SQLITE: {}", &counter);
            Ok(counter)
        });
        (sender, handle)
    }
}

fn insert_message(statement: &mut Statement, message: &MessageEntry, layout: Layout) -> Result<()> {
    let msgdate = message.msgdate();
    match layout {
        Layout::Flagged => {
            statement.execute(params![
                message.msgid,
                msgdate,
                message.from,
                message.subject,
                message.folder,
                message.flags.unwrap_or(0),
            ])?;
        }
        Layout::Plain => {
            statement.execute(params![
                message.msgid,
                msgdate,
                message.from,
                message.subject,
                message.folder,
            ])?;
        }
    }
    tracing::trace!("Insert Message {:?}", &message.msgid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::chrono::prelude::*;
    use mf_core::Config;

    fn entry(datetime: DateTime<Utc>, folder: i64, flags: Option<i64>) -> MessageEntry {
        MessageEntry {
            msgid: Some(format!("<{}@test>", folder)),
            datetime,
            from: Some("someone@example.com".into()),
            subject: Some("A subject".into()),
            folder,
            flags,
        }
    }

    fn temporary_database() -> Config {
        Config::new(None, "unused.mbox", false).expect("Config")
    }

    #[test]
    fn test_import_commits_on_done() {
        let config = temporary_database();
        let db = Database::new(&config.database_path).expect("Database");
        let (sender, handle) = db.import(Layout::Flagged);
        let date = Utc.ymd(2018, 1, 15).and_hms(10, 30, 0);
        sender
            .send(DBMessage::Message(Box::new(entry(date, 13, Some(1)))))
            .unwrap();
        sender
            .send(DBMessage::Message(Box::new(entry(date, 2, Some(0)))))
            .unwrap();
        sender.send(DBMessage::Done).unwrap();
        let count = handle.join().expect("no panic").expect("import");
        assert_eq!(count, 2);

        let db = Database::new(&config.database_path).unwrap();
        assert_eq!(db.total_messages().unwrap(), 2);
        assert_eq!(db.count_matching(&[Filter::Folder(13)]).unwrap(), 1);
        assert_eq!(db.count_matching(&[Filter::read()]).unwrap(), 1);
        assert_eq!(db.count_matching(&[Filter::unread()]).unwrap(), 1);

        let rows = db.select_matching(&[Filter::Folder(13)]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].msgdate, 1516011000000);
        assert_eq!(rows[0].flags, Some(1));
    }

    #[test]
    fn test_reimport_replaces_previous_rows() {
        let config = temporary_database();
        let date = Utc.ymd(2022, 10, 1).and_hms(12, 0, 0);
        for _ in 0..2 {
            let db = Database::new(&config.database_path).expect("Database");
            let (sender, handle) = db.import(Layout::Plain);
            sender
                .send(DBMessage::Message(Box::new(entry(date, 19, None))))
                .unwrap();
            sender.send(DBMessage::Done).unwrap();
            handle.join().expect("no panic").expect("import");
        }

        let db = Database::new(&config.database_path).unwrap();
        assert_eq!(db.total_messages().unwrap(), 1);
        let rows = db.select_matching(&[]).unwrap();
        assert_eq!(rows[0].flags, None);
    }

    #[test]
    fn test_aborted_import_is_not_committed() {
        let config = temporary_database();
        let db = Database::new(&config.database_path).expect("Database");
        let (sender, handle) = db.import(Layout::Plain);
        let date = Utc.ymd(2020, 6, 1).and_hms(0, 0, 0);
        sender
            .send(DBMessage::Message(Box::new(entry(date, 15, None))))
            .unwrap();
        // Dropping the sender without a `Done` simulates a producer that
        // died mid-run.
        drop(sender);
        assert!(handle.join().expect("no panic").is_err());

        // Nothing was committed, the table does not even exist.
        let db = Database::new(&config.database_path).unwrap();
        assert!(db.total_messages().is_err());
    }
}
