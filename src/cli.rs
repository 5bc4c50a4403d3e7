use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "twchip")]
#[command(about = "Taiwan stock chip-data API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
        /// Directory holding the reference data files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Build brokers.json from an HTML snapshot of the branch picker
    ConvertBrokers {
        /// HTML snapshot containing the sel_BrokerBranch selects
        #[arg(long)]
        snapshot: PathBuf,
        /// Optional contacts CSV (branch_name,address,phone)
        #[arg(long)]
        contacts: Option<PathBuf>,
        /// Output path
        #[arg(long, default_value = "data/brokers.json")]
        output: PathBuf,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, data_dir } => commands::serve::run(port, &data_dir).await,
        Commands::ConvertBrokers {
            snapshot,
            contacts,
            output,
        } => commands::convert_brokers::run(&snapshot, contacts.as_deref(), &output),
    }
}
