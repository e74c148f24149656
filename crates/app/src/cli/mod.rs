use clap::{Parser, Subcommand};

mod table;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront products CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Table(table::TableCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Table(command) => table::run(command).await,
        }
    }
}
