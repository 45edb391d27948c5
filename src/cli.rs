use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pintui")]
#[command(about = "A terminal map for places, pins and located todos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a place and print its coordinates
    Search {
        query: String,
    },
    /// Print the current location reported by the configured provider
    Locate,
    /// Write the default config file (keeps an existing one)
    InitConfig,
}
