//! Tree command handler
//!
//! Prints the candidate tree for a source view.

use anyhow::Result;
use serde_json::json;

use croptree::config::Config;
use croptree::presentation::SourceArgs;
use croptree::selection::SelectionTree;
use croptree::ViewId;

use crate::commands::common::open_session;
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::tree_menu::TreeMenu;

/// Execute the tree command
pub fn cmd_tree(ui: &UiContext, config: &Config, args: &SourceArgs, expand_all: bool) -> Result<()> {
    let Some(mut session) = open_session(ui, config, args)? else {
        return Ok(());
    };

    if ui.json {
        json::emit(json!({
            "event": "tree",
            "source": session.source.id,
            "candidates": session.candidate_count,
            "nodes": tree_nodes(&session.tree),
        }))?;
        return Ok(());
    }

    if expand_all {
        session.tree.set_all_expanded(true);
    }

    println!(
        "{}",
        ColoredText::plain(format!(
            "Views that can take the crop region of '{}':",
            session.source.name
        ))
        .bold()
        .render(ui.color)
    );
    let menu = TreeMenu::new(session.tree, session.filter, config.croptree);
    print!("{}", menu.render(ui.unicode, false));
    Ok(())
}

/// Visible nodes in pre-order with their depth
fn tree_nodes(tree: &SelectionTree<ViewId>) -> Vec<serde_json::Value> {
    let mut out = Vec::new();
    let mut stack: Vec<_> = tree.roots().iter().rev().map(|&id| (id, 0usize)).collect();

    while let Some((id, depth)) = stack.pop() {
        let node = &tree[id];
        if !node.visible() {
            continue;
        }
        match node.as_leaf() {
            Some(leaf) => out.push(json!({
                "type": "view",
                "depth": depth,
                "name": leaf.name(),
                "id": leaf.item(),
            })),
            None => {
                out.push(json!({
                    "type": "group",
                    "depth": depth,
                    "name": node.name(),
                    "views": tree.leaf_count(id),
                }));
                stack.extend(node.children().iter().rev().map(|&c| (c, depth + 1)));
            }
        }
    }
    out
}
