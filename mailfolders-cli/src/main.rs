mod options {
    use std::path::PathBuf;

    use clap::AppSettings;

    #[derive(Debug, clap::Parser)]
    #[clap(name = "mailfolders", about = "Sort a mailbox export into folder buckets", version = clap::crate_version!())]
    #[clap(setting = AppSettings::SubcommandRequiredElseHelp)]
    pub struct Args {
        /// Enable tracing for all components.
        #[clap(short = 'v', long)]
        pub verbose: bool,

        #[clap(subcommand)]
        pub cmds: SubCommands,
    }

    #[derive(Debug, clap::Parser)]
    pub enum SubCommands {
        /// Parse a mailbox export and store its messages into a database.
        Import {
            /// The path to which to write the database containing all imported data.
            ///
            /// Note that its messages table will be overwritten unconditionally.
            #[clap(short = 's', long, default_value = "./folders.sqlite")]
            database: PathBuf,

            /// Assign each message a random read flag.
            #[clap(long)]
            random_flags: bool,

            /// The mailbox export file to import.
            #[clap(default_value = "./messages.mbox")]
            mailbox: PathBuf,
        },
        /// Count the messages that match the given filters.
        Count {
            /// The database written by a previous import.
            #[clap(short = 's', long, default_value = "./folders.sqlite")]
            database: PathBuf,

            /// Only count messages in these folders.
            #[clap(
                short = 'f',
                long,
                multiple_occurrences = true,
                multiple_values = false
            )]
            folder: Vec<i64>,

            /// Only count messages with the read flag set.
            #[clap(long, conflicts_with = "unread")]
            read: bool,

            /// Only count messages with the read flag unset.
            #[clap(long)]
            unread: bool,
        },
    }
}

use clap::Parser;
use mf_core::eyre;
use options::{Args, SubCommands};

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    if args.verbose {
        mf_core::setup_tracing();
    }

    match args.cmds {
        SubCommands::Import {
            database,
            random_flags,
            mailbox,
        } => {
            use mf_core::{DatabaseLike, Importerlike};
            if !mailbox.is_file() {
                eyre::bail!(
                    "The mailbox file at '{}' isn't accessible",
                    mailbox.display()
                )
            }
            let config = mf_core::Config::new(Some(database), mailbox, random_flags)?;
            let importer = mf_importer::mbox_importer(config.clone());
            let db = mf_database::Database::new(&config.database_path)?;
            let (_progress_ignored_in_batch_mode, handle) = importer.import(db)?;
            handle.join().expect("no panic")?;

            // The reported total comes from the count query over the
            // freshly written table, not from the import thread.
            let db = mf_database::Database::new(&config.database_path)?;
            println!("{}", db.total_messages()?);
        }
        SubCommands::Count {
            database,
            folder,
            read,
            unread,
        } => {
            use mf_core::DatabaseLike;
            let mut filters = Vec::new();
            match folder.len() {
                0 => (),
                1 => filters.push(mf_core::Filter::Folder(folder[0])),
                _ => filters.push(mf_core::Filter::Folders(folder)),
            }
            if read {
                filters.push(mf_core::Filter::read());
            } else if unread {
                filters.push(mf_core::Filter::unread());
            }
            let database = mf_database::Database::new(&database)?;
            println!("{}", database.count_matching(&filters)?);
        }
    };
    Ok(())
}
