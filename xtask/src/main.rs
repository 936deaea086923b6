use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use duotoner::RenderConfig;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for duotoner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format check, clippy, build and test the whole workspace
    Ci,
    /// Write the default render configuration as JSON
    DefaultConfig {
        /// Destination file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => ci(),
        Commands::DefaultConfig { path } => default_config(&path),
    }
}

fn default_config(path: &PathBuf) -> Result<()> {
    RenderConfig::default()
        .write_config(path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run_command("cargo", &["build", "--workspace", "--all-features"])?;
    run_command("cargo", &["test", "--workspace", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
