//! # educred CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// EduCred — blockchain credential issuance and verification.
///
/// Issues academic credentials against the credential contract, stores
/// certificate files and metadata in the content store, and looks up
/// existing credentials by token identifier.
#[derive(Parser, Debug)]
#[command(name = "educred", version, about)]
struct Cli {
    #[command(flatten)]
    global: educred_cli::context::GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Issue a single credential.
    Issue(educred_cli::issue::IssueArgs),
    /// Bulk-issue credentials from a CSV file.
    Bulk(educred_cli::bulk::BulkArgs),
    /// Verify a credential by token identifier.
    Verify(educred_cli::verify::VerifyArgs),
    /// List credentials owned by an address.
    List(educred_cli::list::ListArgs),
    /// Print the metadata URI recorded for a token.
    Uri(educred_cli::uri::UriArgs),
    /// Interpret a free-text command.
    Agent(educred_cli::agent::AgentArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = educred_cli::context::build(&cli.global)?;

    match cli.command {
        Commands::Issue(args) => educred_cli::issue::run(&ctx, args).await,
        Commands::Bulk(args) => educred_cli::bulk::run(&ctx, args).await,
        Commands::Verify(args) => educred_cli::verify::run(&ctx, args).await,
        Commands::List(args) => educred_cli::list::run(&ctx, args).await,
        Commands::Uri(args) => educred_cli::uri::run(&ctx, args).await,
        Commands::Agent(args) => educred_cli::agent::run(args),
    }
}
