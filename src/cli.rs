use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "tour scoreboard backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, overrides PORT, defaults to 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the SQLite schema if it does not exist yet
    Setup {
        /// Database file (optional, defaults to DATABASE_PATH)
        #[arg(short, long)]
        database: Option<String>,
    },
}
