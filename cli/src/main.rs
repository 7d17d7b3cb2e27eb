mod menu;
mod prompt;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use taskdeck_core::{FlatFileRepository, TaskRepository, TaskStore};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "An interactive personal task tracker", long_about = None)]
struct Cli {
    /// Storage file to load from and save to (default: ~/.taskdeck/tasks.txt)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let repo = FlatFileRepository::new(cli.file)?;
    let outcome = repo.load()?;
    for skipped in &outcome.skipped {
        println!(
            "Skipping line {} of {}: {}",
            skipped.line,
            repo.path().display(),
            skipped.reason
        );
    }
    info!(
        "session starts with {} tasks from {}",
        outcome.tasks.len(),
        repo.path().display()
    );

    menu::run(TaskStore::from_tasks(outcome.tasks), &repo)
}
