use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod repl;

#[derive(Parser)]
#[command(name = "byline")]
#[command(about = "Byline - ask questions against the newsroom archive", long_about = None)]
struct Cli {
    /// Base URL of the answering service
    #[arg(
        long,
        global = true,
        env = "BYLINE_BASE_URL",
        default_value = "http://localhost:5001"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange an identity-provider credential for a session
    Login {
        /// Opaque credential token issued by the identity provider
        token: String,
    },
    /// Ask one question, or start an interactive session when omitted
    Ask {
        /// Question text
        question: Vec<String>,
    },
    /// Show the service health banner
    Status,
    /// Show the signed-in profile
    Whoami,
    /// Clear the local session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = app::App::bootstrap(&cli.base_url).await?;

    match cli.command {
        Commands::Login { token } => app.login(&token).await?,
        Commands::Ask { question } if question.is_empty() => repl::run(&app).await?,
        Commands::Ask { question } => app.ask_once(&question.join(" ")).await?,
        Commands::Status => app.status().await?,
        Commands::Whoami => app.whoami().await?,
        Commands::Logout => app.logout().await?,
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
