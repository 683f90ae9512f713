use anyhow::{bail, Context, Result};
use askbot::{logging, ui, AskClient, Config, ConversationController, Logo};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "askbot")]
#[command(version)]
#[command(about = "Chat with a question-answering backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config and ASKBOT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Logo image to show in the header
    #[arg(long)]
    logo: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question and print the answer
    Ask { question: String },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_base_url_override(cli.base_url);
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }

    match cli.command {
        None => {
            logging::init_file_logging(&config)?;
            let logo = cli
                .logo
                .as_deref()
                .map(Logo::from_file)
                .transpose()?;
            ui::run(config, logo).await
        }
        Some(Commands::Ask { question }) => {
            logging::init_stderr_logging(&config)?;
            ask_once(&config, &question).await
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn ask_once(config: &Config, question: &str) -> Result<()> {
    let client = AskClient::new(config).context("Failed to create HTTP client")?;
    let mut controller = ConversationController::new(client);

    let Some(reply) = controller.submit(question).await else {
        bail!("Question must not be empty");
    };

    println!("{}", reply.text);
    Ok(())
}
