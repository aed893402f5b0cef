//! Tremor CLI entry point.

mod output;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tremor_api::{ClientConfig, TremorClient};

#[derive(Parser)]
#[command(
    name = "tremor",
    about = "Tremor: read and send TremorGames.com private messages from the terminal",
    version
)]
struct Cli {
    /// Account name.
    #[arg(short, long, env = "TREMOR_USERNAME", global = true)]
    username: Option<String>,

    /// Account password.
    #[arg(short, long, env = "TREMOR_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Site root. Also reads TREMOR_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds. Also reads TREMOR_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and out again to check the credentials.
    Check,
    /// List the inbox (newest 100 messages).
    Messages,
    /// Show one message. This marks it read.
    Read {
        /// Message id, as shown by `tremor messages`.
        id: String,
    },
    /// Send a private message.
    Send {
        /// Recipient username.
        to: String,
        subject: String,
        body: String,
    },
    /// Delete a message.
    Delete { id: String },
    /// Mark a message read without printing it.
    MarkRead { id: String },
    /// Show the logged-in username and user id.
    Whoami,
    /// Show the coin balance.
    Coins,
    /// List referred users.
    Referrals,
    /// Show the date on the site's clock.
    ServerTime,
    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   tremor completions bash > ~/.local/share/bash-completion/completions/tremor
    ///   tremor completions zsh > ~/.zfunc/_tremor
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "tremor", &mut std::io::stdout());
        return Ok(());
    }

    let username = cli
        .username
        .as_deref()
        .context("no username given (use --username or TREMOR_USERNAME)")?;
    let password = cli
        .password
        .as_deref()
        .context("no password given (use --password or TREMOR_PASSWORD)")?;

    let config = ClientConfig::resolve(cli.base_url.as_deref(), cli.timeout)?;
    tracing::debug!("using {}", config.base_url);

    let mut client = TremorClient::login(&config, username, password).await?;
    if !client.is_logged_in() {
        bail!("login failed for {username}");
    }

    let out = output::Output::new(cli.json);

    match cli.command {
        Commands::Check => {
            let logged_out = client.log_out().await?;
            out.status("login", true);
            out.status("logout", logged_out);
            if !logged_out {
                bail!("logout did not end the session");
            }
        }
        Commands::Messages => {
            let messages = client.get_all_messages().await?;
            out.messages(&messages)?;
        }
        Commands::Read { id } => {
            let message = client.get_message(&id).await?;
            out.message(&message)?;
        }
        Commands::Send { to, subject, body } => {
            let outcome = client.send_message(&to, &subject, &body).await?;
            out.outcome("send", outcome)?;
        }
        Commands::Delete { id } => {
            let outcome = client.delete_message(&id).await?;
            out.outcome("delete", outcome)?;
        }
        Commands::MarkRead { id } => {
            let outcome = client.mark_message_read(&id).await?;
            out.outcome("mark-read", outcome)?;
        }
        Commands::Whoami => {
            let user = client.get_user_info().await?;
            out.user(&user)?;
        }
        Commands::Coins => {
            let raw = client.get_coins().await?;
            out.coins(&raw)?;
        }
        Commands::Referrals => {
            let referrals = client.get_referrals().await?;
            out.referrals(&referrals)?;
        }
        Commands::ServerTime => {
            let date = client.get_server_time().await?;
            out.server_time(date)?;
        }
        Commands::Completions { .. } => unreachable!("handled before login"),
    }

    Ok(())
}
