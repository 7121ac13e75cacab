use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coachdash::cli::{self, assign::AssignArgs, assign::StdoutAssigner};
use coachdash::config::Config;

/// coachdash - Meal-plan templates for coaching dashboards
#[derive(Parser)]
#[command(name = "coachdash")]
#[command(about = "Normalize, scale and assign meal-plan templates", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a stored template (legacy, canonical or AI shape)
    Normalize {
        file: PathBuf,
    },
    /// Ingest a raw AI response, fenced or wrapped in prose
    Ai {
        file: PathBuf,
    },
    /// Recompute grams for a portion scale
    Scale {
        file: PathBuf,

        /// Portion scale (overrides config file)
        #[arg(long)]
        scale: Option<f64>,
    },
    /// Print the bulk assignment request for a template
    Assign {
        file: PathBuf,

        /// Target user id, repeatable
        #[arg(long = "user", required = true)]
        users: Vec<String>,

        /// Coach performing the assignment
        #[arg(long = "by")]
        assigned_by: String,

        /// Assignment title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    coachdash::observability::init_observability(
        "coachdash",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Normalize { file } => normalize_command(config, file),
        Commands::Ai { file } => ai_command(config, file),
        Commands::Scale { file, scale } => scale_command(config, file, scale),
        Commands::Assign {
            file,
            users,
            assigned_by,
            title,
        } => {
            assign_command(
                config,
                file,
                AssignArgs {
                    user_ids: users,
                    assigned_by,
                    title,
                },
            )
            .await
        }
    }
}

#[tracing::instrument(skip(config))]
fn normalize_command(config: Config, file: PathBuf) -> Result<()> {
    let template = cli::template::normalize(&file)?;
    println!("{}", cli::render(&template, config.output.pretty)?);

    Ok(())
}

#[tracing::instrument(skip(config))]
fn ai_command(config: Config, file: PathBuf) -> Result<()> {
    let template = cli::template::ai(&file)?;
    println!("{}", cli::render(&template, config.output.pretty)?);

    Ok(())
}

#[tracing::instrument(skip(config))]
fn scale_command(config: Config, file: PathBuf, scale_override: Option<f64>) -> Result<()> {
    let scale = scale_override.unwrap_or(config.portion.default_scale);
    let template = cli::template::scale(&file, scale)?;
    println!("{}", cli::render(&template, config.output.pretty)?);

    Ok(())
}

#[tracing::instrument(skip(config, args))]
async fn assign_command(config: Config, file: PathBuf, args: AssignArgs) -> Result<()> {
    let assigner = StdoutAssigner {
        pretty: config.output.pretty,
    };
    let request = cli::assign::assign(&assigner, &file, args).await?;
    tracing::info!(id = %request.metadata.id, users = request.user_ids.len(), "assignment submitted");

    Ok(())
}
