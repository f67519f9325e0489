use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use launchdeck::buttons::{ConfigStore, Dispatcher, JsonStore, ResolveContext};
use launchdeck::host::UiLink;
use launchdeck::terminal::TmuxHost;
use launchdeck::{config, tui};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "launchdeck")]
#[command(about = "Status bar command launcher for the terminal")]
#[command(version)]
struct Args {
    /// Path to the button store (defaults to buttons.json in the data directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Directory commands run in (defaults to the current directory)
    #[arg(long, short)]
    dir: Option<PathBuf>,

    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the configured button groups
    List,
    /// Run a command without the TUI
    Exec {
        /// Group number as shown by `list` (1-based)
        group: usize,
        /// Command number within the group (1-based, defaults to the first)
        entry: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;

    let store_path = match &args.store {
        Some(path) => path.clone(),
        None => JsonStore::default_path()?,
    };
    let store = JsonStore::new(store_path);

    let workspace_root = workspace_root(&args, &config);

    // Headless subcommands log to stderr and never touch the terminal state
    if let Some(command) = &args.command {
        init_stderr_logging()?;
        return match command {
            Command::List => run_list(&store),
            Command::Exec { group, entry } => run_exec(&store, workspace_root, *group, *entry),
        };
    }

    // The TUI owns the screen, so logs go to a file instead
    init_file_logging()?;
    tui::run(config, store, workspace_root).await
}

/// Resolve the directory new terminal sessions start in.
fn workspace_root(args: &Args, config: &config::Config) -> Option<String> {
    if let Some(dir) = &args.dir {
        return Some(dir.to_string_lossy().into_owned());
    }
    if let Some(dir) = &config.default_shell_dir {
        return Some(dir.clone());
    }
    std::env::current_dir()
        .ok()
        .map(|dir| dir.to_string_lossy().into_owned())
}

fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("launchdeck=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn init_file_logging() -> Result<()> {
    let path = config::log_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("launchdeck=info".parse()?),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_list(store: &JsonStore) -> Result<()> {
    let groups = store.get()?.unwrap_or_default();
    if groups.is_empty() {
        println!("No button groups configured.");
        println!("Store: {}", store.path().display());
        return Ok(());
    }

    for (position, group) in groups.iter().enumerate() {
        let text = if group.text.is_empty() {
            "(untitled)"
        } else {
            &group.text
        };
        let side = match group.alignment {
            launchdeck::buttons::Alignment::Left => "left",
            launchdeck::buttons::Alignment::Right => "right",
        };
        println!("{}. {text} [{side}, priority {}]", position + 1, group.priority);
        for (idx, entry) in group.commands.iter().enumerate() {
            let label = if entry.label.is_empty() {
                "(unlabeled)"
            } else {
                &entry.label
            };
            println!("   {}. {label}: {}", idx + 1, entry.command);
        }
    }
    Ok(())
}

fn run_exec(
    store: &JsonStore,
    workspace_root: Option<String>,
    group: usize,
    entry: Option<usize>,
) -> Result<()> {
    let groups = store.get()?.unwrap_or_default();

    if group == 0 || group > groups.len() {
        bail!(
            "No button group {group} (the store has {}, try `launchdeck list`)",
            groups.len()
        );
    }
    let position = group - 1;
    let target = &groups[position];

    let entry_number = entry.unwrap_or(1);
    if entry_number == 0 || entry_number > target.commands.len() {
        bail!(
            "No command {entry_number} in group {group} (it has {})",
            target.commands.len()
        );
    }
    let command_entry = &target.commands[entry_number - 1];

    // The picker channel is unused here; exec always names its entry
    let (ui, _ui_rx) = UiLink::channel();
    let terminal = Arc::new(TmuxHost::new(workspace_root.clone()));
    let dispatcher = Dispatcher::new(terminal, ui, ResolveContext::new(workspace_root));

    dispatcher.execute_entry(position, command_entry)?;
    println!(
        "Started tmux session '{}'",
        command_entry.session_name(position)
    );
    Ok(())
}
