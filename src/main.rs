//! croptree CLI - copy a view's crop region onto views picked from a tree
//!
//! Usage: croptree <COMMAND>
//!
//! Commands:
//!   tree   Print the views that can take a source view's crop region
//!   apply  Copy the crop region onto checked views

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use serde_json::json;

use croptree::presentation::{Cli, Commands};

use crate::commands::apply::{cmd_apply, ApplyOptions};
use crate::commands::common::{load_config, report_config_warnings};
use crate::commands::tree::cmd_tree;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        if json {
            let _ = ui::json::emit(json!({ "event": "error", "message": format!("{:#}", err) }));
        } else {
            let unicode = ui::terminal::detect_capabilities().supports_unicode;
            eprintln!("{} {:#}", Icon::Error.render(unicode), err);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = load_config(cli.config.as_deref())?;
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &loaded.config);
    report_config_warnings(&ui, &loaded.warnings)?;

    if let Some(path) = &loaded.path {
        ui.debug(format!("config: {}", path.display()));
    }

    match cli.command {
        Commands::Tree { source, expand_all } => cmd_tree(&ui, &loaded.config, &source, expand_all),
        Commands::Apply {
            source,
            select,
            all,
            yes,
            dry_run,
            copy_visibility,
            copy_section_box,
            output,
        } => {
            let opts = ApplyOptions {
                select,
                all,
                yes,
                dry_run,
                copy_visibility,
                copy_section_box,
                output,
            };
            cmd_apply(&ui, &loaded.config, loaded.path.as_deref(), &source, &opts)
        }
    }
}
