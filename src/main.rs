use clap::Parser;
use pmp_users_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::GenPassword => {
            cli::gen_password();
            Ok(())
        }
    }
}
