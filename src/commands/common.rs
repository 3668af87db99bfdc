//! Loading shared by the tree and apply commands

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;

use croptree::candidates;
use croptree::config::{self, Config, ConfigWarning};
use croptree::inventory;
use croptree::models::{Inventory, ViewRecord};
use croptree::presentation::SourceArgs;
use croptree::selection::{build_tree, NodeId, SearchFilter, SelectionTree};
use croptree::ViewId;

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Config plus the file preferences are saved to
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load `explicit` or the user config, then apply env overrides
///
/// An explicit path must exist. The user config is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(config::user_config_path);

    let (config, warnings) = match &path {
        Some(p) if explicit.is_some() || p.exists() => Config::load_with_warnings(p)?,
        _ => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: config.with_env_overrides(),
        path,
        warnings,
    })
}

/// Surface config warnings on stderr, or as events in JSON mode
pub fn report_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) -> Result<()> {
    for w in warnings {
        if ui.json {
            json::emit(json!({
                "event": "config_warning",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }))?;
            continue;
        }

        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        let hint = w
            .suggestion
            .as_deref()
            .map(|s| format!(" (did you mean '{}'?)", s))
            .unwrap_or_default();
        eprintln!(
            "{} {}",
            Icon::Warning.colored(ui.color, ui.unicode),
            ColoredText::warning(format!("unknown config key '{}' in {}{}", w.key, location, hint))
                .render(ui.color)
        );
    }
    Ok(())
}

/// A built candidate tree ready for selection
pub struct Session {
    pub inventory: Inventory,
    pub source: ViewRecord,
    pub tree: SelectionTree<ViewId>,
    pub filter: SearchFilter,
    pub candidate_count: usize,
}

/// Load the inventory, check the source and build its candidate tree
///
/// Returns `Ok(None)` after reporting when nothing can take the crop region.
pub fn open_session(ui: &UiContext, config: &Config, args: &SourceArgs) -> Result<Option<Session>> {
    let inventory = inventory::load(&args.inventory)?;
    ui.debug(format!(
        "loaded {} views from {}",
        inventory.views.len(),
        args.inventory.display()
    ));

    let (source, targets) = match candidates::resolve(&inventory, args.source) {
        Ok(found) => found,
        Err(e) if e.is_cancellation() => {
            report_cancelled(ui, &e.to_string())?;
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let source = source.clone();
    let candidate_count = targets.len();
    ui.debug(format!("{} candidate views for '{}'", candidate_count, source.name));

    let mut tree = build_tree(
        candidates::to_build_items(targets),
        inventory.organization.sort_order,
    );

    let mode = args.search.unwrap_or(config.search.mode);
    let filter = SearchFilter::new(mode);
    if let Some(query) = &args.filter {
        let shown = filter.apply(&mut tree, query);
        ui.debug(format!("filter '{}' ({:?}) matched {} views", query, mode, shown));
    }

    Ok(Some(Session {
        inventory,
        source,
        tree,
        filter,
        candidate_count,
    }))
}

/// Report an early, non-error exit
pub fn report_cancelled(ui: &UiContext, reason: &str) -> Result<()> {
    if ui.json {
        json::emit(json!({ "event": "cancelled", "reason": reason }))?;
    } else {
        println!("{}", ColoredText::dim(format!("Nothing to do: {}", reason)).render(ui.color));
    }
    Ok(())
}

/// Candidate ids that match a `--select` token, by id or by name
pub fn match_token(session: &Session, token: &str) -> Vec<NodeId> {
    let token = token.trim();
    let id = token.parse::<u64>().ok().map(ViewId);
    session
        .tree
        .leaves()
        .filter(|&n| {
            session.tree[n].as_leaf().is_some_and(|leaf| {
                Some(*leaf.item()) == id || leaf.name().eq_ignore_ascii_case(token)
            })
        })
        .collect()
}

impl Session {
    /// Error for a token that matched nothing
    pub fn unknown_token(&self, token: &str) -> anyhow::Error {
        anyhow::anyhow!(
            "no candidate view of '{}' matches '{}'",
            self.source.name,
            token.trim()
        )
    }
}
