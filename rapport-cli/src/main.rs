use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use rapport_cli::args::Shell;
use rapport_cli::commands::Commands;
use rapport_cli::handlers::*;
use rapport_cli::output::*;
use rapport_cli::RapportCliContext;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "rapport-cli")]
#[command(about = "Keep track of when you last talked to the people who matter", long_about = None)]
#[command(version = rapport::VERSION)]
struct Cli {
    /// Custom data directory for storage
    #[arg(long, short, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to rapport.toml / .rapport/config.* / the user config dir)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format (text, json) - use json for tool integration
    #[arg(long, short, default_value = "text", global = true)]
    output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let output_format = match std::env::var("RAPPORT_OUTPUT") {
        Ok(env_output) if cli.output == "text" => env_output,
        _ => cli.output.clone(),
    };
    let is_quiet = cli.quiet
        || std::env::var("RAPPORT_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    let log_level = if is_quiet || output_format == "json" {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli, &output_format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error_json(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output_format: &str) -> rapport::Result<()> {
    match cli.command {
        Commands::Version => {
            if output_format == "json" {
                print_json(&serde_json::json!({ "version": rapport::VERSION }));
            } else {
                println!("Rapport CLI v{}", rapport::VERSION);
            }
            return Ok(());
        }
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            let shell = match args.shell {
                Shell::Bash => clap_complete::Shell::Bash,
                Shell::Zsh => clap_complete::Shell::Zsh,
                Shell::Fish => clap_complete::Shell::Fish,
                Shell::Power => clap_complete::Shell::PowerShell,
                Shell::Elvish => clap_complete::Shell::Elvish,
            };
            clap_complete::generate(shell, &mut cmd, "rapport-cli", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let ctx = RapportCliContext::new(cli.data_dir, cli.config).await?;

    match cli.command {
        Commands::Diagnose => {
            let healthy = ctx.rapport.health_check().await;
            let metadata = ctx
                .rapport
                .store()
                .get_metadata()
                .await
                .unwrap_or_default();
            let config = ctx.rapport.config();

            if output_format == "json" {
                print_json(&serde_json::json!({
                    "storage": { "healthy": healthy, "metadata": metadata },
                    "friends": ctx.rapport.registry().len().await,
                    "groups": ctx.rapport.groups().list().await.len(),
                    "reminders": config.reminders,
                }));
            } else {
                if healthy {
                    println!("{}", format_success("Storage: Healthy"));
                } else {
                    println!("{}", format_error("Storage: Unhealthy"));
                }
                println!("Storage metadata: {}", metadata);
                println!(
                    "Friends: {}, groups: {}",
                    ctx.rapport.registry().len().await,
                    ctx.rapport.groups().list().await.len()
                );
                if config.reminders.enabled {
                    println!(
                        "Reminders: {} after {} days ({:?} selection)",
                        config.reminders.category,
                        config.reminders.delay_days,
                        config.reminders.selection
                    );
                } else {
                    println!("{}", format_warning("Reminders: disabled"));
                }
            }
        }

        Commands::Friend(cmd) => handle_friend_command(cmd, &ctx, output_format).await?,
        Commands::Contact(cmd) => handle_contact_command(cmd, &ctx, output_format).await?,
        Commands::Tag(cmd) => handle_tag_command(cmd, &ctx, output_format).await?,
        Commands::Group(cmd) => handle_group_command(cmd, &ctx, output_format).await?,
        Commands::Reminders(args) => handle_reminders_command(args, &ctx, output_format).await?,

        Commands::Clear(args) => {
            if !args.yes {
                return Err(rapport::RapportError::Validation(
                    "Refusing to delete every friend without --yes".to_string(),
                ));
            }
            let count = ctx.rapport.registry().clear().await?;
            if output_format == "json" {
                print_json(&serde_json::json!({ "cleared": count }));
            } else {
                println!("{}", format_success(&format!("Removed {} friend(s)", count)));
            }
        }

        Commands::Version | Commands::Completions(_) => {}
    }

    Ok(())
}
