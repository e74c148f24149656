use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct TableCommand {
    #[command(subcommand)]
    command: TableSubcommand,
}

#[derive(Debug, Subcommand)]
enum TableSubcommand {
    /// Create the products table
    Create(create::CreateTableArgs),
}

pub(crate) async fn run(command: TableCommand) -> Result<(), String> {
    match command.command {
        TableSubcommand::Create(args) => create::run(args).await,
    }
}
