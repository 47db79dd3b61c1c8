// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pocketledger::{Store, cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(format!("pocketledger={level}"))?)
        .with_writer(std::io::stderr)
        .init();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::default_db_path()?,
    };
    // Unusable schema means nothing else is safe to run.
    let store = Store::open_or_init(&path)
        .with_context(|| format!("Database initialization failed at {}", path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", store.path().display());
        }
        Some(("account", sub)) => commands::accounts::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("setting", sub)) => commands::settings::handle(&store, sub)?,
        Some(("theme", sub)) => commands::settings::handle_theme(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
