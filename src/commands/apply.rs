//! Apply command handler
//!
//! Builds the candidate tree, lets the user check views (interactively or
//! through flags), then copies the source's crop region onto them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde_json::json;

use croptree::apply::copy_crop;
use croptree::config::{Config, Preferences};
use croptree::inventory;
use croptree::presentation::SourceArgs;
use croptree::selection::{checked_items, NodeId};
use croptree::ViewId;

use crate::commands::common::{match_token, open_session, report_cancelled, Session};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::theme::CropTreeTheme;
use crate::ui::views::apply::{render_apply_header, render_apply_preview, render_apply_result};
use crate::ui::widgets::tree_menu::{run_interactive, TreeMenu};

/// Flags of the apply command
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub select: Vec<String>,
    pub all: bool,
    pub yes: bool,
    pub dry_run: bool,
    pub copy_visibility: Option<bool>,
    pub copy_section_box: Option<bool>,
    pub output: Option<PathBuf>,
}

/// Execute the apply command
pub fn cmd_apply(
    ui: &UiContext,
    config: &Config,
    config_path: Option<&Path>,
    args: &SourceArgs,
    opts: &ApplyOptions,
) -> Result<()> {
    let Some(mut session) = open_session(ui, config, args)? else {
        return Ok(());
    };

    let mut prefs = effective_preferences(config.croptree, opts);

    if opts.all {
        let visible: Vec<NodeId> = session
            .tree
            .leaves()
            .filter(|&id| session.tree[id].visible())
            .collect();
        for id in visible {
            session.tree.set_checked(id, true);
        }
    } else if !opts.select.is_empty() {
        for token in &opts.select {
            let matches = match_token(&session, token);
            if matches.is_empty() {
                return Err(session.unknown_token(token));
            }
            for id in matches {
                session.tree.set_checked(id, true);
            }
        }
    } else if !ui.json && ui.caps.interactive() {
        match select_interactively(ui, session, prefs, config_path)? {
            Some((picked, picked_prefs)) => {
                session = picked;
                prefs = picked_prefs;
            }
            None => return report_cancelled(ui, "selection cancelled"),
        }
    } else {
        bail!("no views selected: pass --select or --all, or run in a terminal to pick views");
    }

    let targets: Vec<ViewId> = checked_items(&session.tree).copied().collect();
    if targets.is_empty() {
        return report_cancelled(ui, "no views selected");
    }

    if ui.json {
        json::emit(json!({
            "event": "apply_start",
            "source": session.source.id,
            "targets": targets,
            "dry_run": opts.dry_run,
            "copy_crop_visibility": prefs.copy_crop_visibility,
            "copy_section_box": prefs.copy_section_box,
        }))?;
    } else {
        print!(
            "{}",
            render_apply_header(&session.source, &prefs, opts.dry_run, ui.color, ui.unicode)
        );
        println!();
        print!(
            "{}",
            render_apply_preview(&session.inventory, &targets, ui.color, ui.unicode)
        );
        println!();
    }

    if !opts.dry_run && !opts.yes && !ui.json {
        if !ui.caps.interactive() {
            bail!("refusing to write without confirmation: pass --yes");
        }
        let confirmed = dialoguer::Confirm::with_theme(&CropTreeTheme::new(ui.unicode, ui.color))
            .with_prompt(format!("Copy crop region to {} views?", targets.len()))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let report = copy_crop(&mut session.inventory, &session.source, targets, &prefs);

    let written = if opts.dry_run || report.applied.is_empty() {
        None
    } else {
        let path = opts.output.as_deref().unwrap_or(&args.inventory);
        inventory::save(path, &session.inventory)?;
        ui.debug(format!("wrote {}", path.display()));
        Some(path)
    };

    if ui.json {
        for id in &report.applied {
            json::emit(json!({ "event": "view_updated", "id": id }))?;
        }
        for (id, failure) in &report.failed {
            json::emit(json!({
                "event": "view_failed",
                "id": id,
                "reason": failure,
                "message": failure.to_string(),
            }))?;
        }
        json::emit(json!({
            "event": "apply_complete",
            "applied": report.applied.len(),
            "failed": report.failed.len(),
            "dry_run": opts.dry_run,
            "written": written.map(|p| p.display().to_string()),
        }))?;
    } else {
        print!(
            "{}",
            render_apply_result(
                &session.inventory,
                &report,
                opts.dry_run,
                ui.color,
                ui.unicode
            )
        );
    }

    Ok(())
}

/// Config and env preferences with the command-line flags on top
fn effective_preferences(mut prefs: Preferences, opts: &ApplyOptions) -> Preferences {
    if let Some(v) = opts.copy_visibility {
        prefs.copy_crop_visibility = v;
    }
    if let Some(v) = opts.copy_section_box {
        prefs.copy_section_box = v;
    }
    prefs
}

/// Preferences as stored in the config file, without env overrides
fn stored_preferences(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }
    Ok(Config::load(path)?.croptree)
}

/// Run the tree menu; `None` when the user quit
///
/// Preferences toggled in a confirmed session are written back to the config
/// file so the next run starts from them. Values that came from flags or the
/// environment and were left alone are not persisted.
fn select_interactively(
    ui: &UiContext,
    session: Session,
    prefs: Preferences,
    config_path: Option<&Path>,
) -> Result<Option<(Session, Preferences)>> {
    let Session {
        inventory,
        source,
        tree,
        filter,
        candidate_count,
    } = session;

    let mut menu = TreeMenu::new(tree, filter, prefs);
    let title = format!(
        "Copy crop region of '{}' ({} candidate views)",
        source.name, candidate_count
    );
    let confirmed = run_interactive(&mut menu, &title, ui.unicode)?;
    if !confirmed {
        return Ok(None);
    }

    let prefs = menu.preferences();
    if menu.preferences_changed() {
        match config_path {
            Some(path) => {
                let merged = menu.merge_toggled_preferences(stored_preferences(path)?);
                Config::save_preferences(path, &merged)?;
                ui.debug(format!("saved preferences to {}", path.display()));
            }
            None => ui.debug("no config location; preferences not saved"),
        }
    }

    let (tree, filter) = menu.into_parts();
    let session = Session {
        inventory,
        source,
        tree,
        filter,
        candidate_count,
    };
    Ok(Some((session, prefs)))
}
