//! Command dispatch: maps parsed arguments onto application services

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{BuildRequest, DemoDriver, TraversalSnapshot, TreeService};
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{render, Key, RenderStyle, TraversalOrder};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo { size, seed }) => cmd_demo(cli, *size, *seed),
        Some(Commands::Build {
            keys,
            insert,
            delete,
            rebalance,
            style,
        }) => {
            let request = BuildRequest {
                keys: keys.clone(),
                insert: insert.clone(),
                delete: delete.clone(),
                rebalance: *rebalance,
            };
            cmd_build(cli, &request, *style)
        }
        Some(Commands::Traverse { keys, order }) => cmd_traverse(keys, *order),
        Some(Commands::Find { key, keys }) => cmd_find(keys, *key),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            generate(*shell, &mut Cli::command(), "bstree", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run `bstree --help`".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config_dir.as_deref())?)
}

#[instrument(skip(cli))]
fn cmd_demo(cli: &Cli, size: Option<usize>, seed: Option<u64>) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(size) = size {
        settings.demo.size = size;
    }
    if seed.is_some() {
        settings.demo.seed = seed;
    }
    debug!(?settings, "demo settings");

    let report = DemoDriver::new(&settings).run()?;

    match report.seed {
        Some(seed) => output::header(&format!("Initial tree (seed {seed})")),
        None => output::header("Initial tree"),
    }
    output::detail(&format!("input: {}", output::keys(&report.input)));
    output::info(&report.initial_drawing);
    output::check(report.balanced_initially, "balanced");
    print_traversals(&report.initial_traversals);

    output::header(&format!(
        "Skewing with {}",
        output::keys(&report.skew_keys)
    ));
    output::info(&report.skewed_drawing);
    output::check(report.balanced_after_skew, "balanced");
    if let Some(key) = report.deleted_key {
        output::action("Deleted", &key);
    }

    output::header("Rebalanced tree");
    output::info(&report.final_drawing);
    output::check(report.balanced_after_rebalance, "balanced");
    print_traversals(&report.final_traversals);
    Ok(())
}

fn print_traversals(snapshots: &[TraversalSnapshot]) {
    for snapshot in snapshots {
        output::action(
            &format!("{:>5}-order", snapshot.order.to_string()),
            &output::keys(&snapshot.keys),
        );
    }
}

#[instrument(skip(cli))]
fn cmd_build(cli: &Cli, request: &BuildRequest, style: Option<RenderStyle>) -> CliResult<()> {
    let style = match style {
        Some(style) => style,
        None => load_settings(cli)?.render.style,
    };
    let outcome = TreeService::new().build(request);

    if outcome.tree.is_empty() {
        output::info("(empty tree)");
    } else {
        output::info(&render(&outcome.tree, style));
    }
    output::detail(&format!("keys:   {}", output::keys(&outcome.tree.keys())));
    output::detail(&format!("size:   {}", outcome.tree.len()));
    output::detail(&format!("height: {}", outcome.height));
    output::check(outcome.balanced, "balanced");
    Ok(())
}

#[instrument]
fn cmd_traverse(keys: &[Key], order: TraversalOrder) -> CliResult<()> {
    let visited = TreeService::new().traverse(keys, order)?;
    output::info(&output::keys(&visited));
    Ok(())
}

#[instrument]
fn cmd_find(keys: &[Key], key: Key) -> CliResult<()> {
    let location = TreeService::new().locate(keys, key);
    if location.found {
        output::success(&format!(
            "{} found at depth {} (subtree height {})",
            location.key, location.depth, location.height
        ));
    } else {
        output::failure(&format!("{} not found", location.key));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => print_config_path("global", &path),
                None => output::detail("global: (no config directory on this platform)"),
            }
            if let Some(dir) = &cli.config_dir {
                print_config_path("local", &local_config_path(dir));
            }
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = init_target(cli, *global)?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
            }
            fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn init_target(cli: &Cli, global: bool) -> CliResult<PathBuf> {
    if global {
        return global_config_path().ok_or_else(|| {
            CliError::Usage("cannot determine global config directory".to_string())
        });
    }
    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => PathBuf::from("."),
    };
    Ok(local_config_path(&dir))
}

fn print_config_path(label: &str, path: &Path) {
    let state = if path.exists() { "" } else { " (not found)" };
    output::detail(&format!("{label}: {}{state}", path.display()));
}
