use eyre::Result;
use rand::Rng;

use std::path::{Path, PathBuf};

/// Which shape the `messages` table takes.
///
/// The flagged layout carries the additional `flags` column that holds the
/// randomly assigned read bit. The plain layout omits the column entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Plain,
    Flagged,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The path to where the database should be stored
    pub database_path: PathBuf,
    /// The mailbox export file to read
    pub mailbox_path: PathBuf,
    /// Whether each imported message receives a randomly assigned read flag
    pub random_flags: bool,
}

impl Config {
    pub fn new<A: AsRef<Path>>(db: Option<A>, mailbox: A, random_flags: bool) -> Result<Self> {
        // If we don't have a database path, we use a temporary folder.
        let database_path = match db {
            Some(n) => n.as_ref().to_path_buf(),
            None => {
                let number: u32 = rand::thread_rng().gen();
                let folder = "mailfolders";
                let filename = format!("{}.sqlite", number);
                let mut temp_dir = std::env::temp_dir();
                temp_dir.push(folder);
                // the folder has to be created
                std::fs::create_dir_all(&temp_dir)?;
                temp_dir.push(filename);
                temp_dir
            }
        };
        Ok(Config {
            database_path,
            mailbox_path: mailbox.as_ref().to_path_buf(),
            random_flags,
        })
    }

    pub fn layout(&self) -> Layout {
        if self.random_flags {
            Layout::Flagged
        } else {
            Layout::Plain
        }
    }
}
