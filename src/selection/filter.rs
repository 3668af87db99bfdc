//! Live search over leaf names.
//!
//! Applying a query writes every leaf's `visible` flag and lets the tree
//! recompute group visibility. Matches get their ancestors expanded so they
//! show up without manual unfolding.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::tree::SelectionTree;

/// How a query is matched against leaf names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring
    #[default]
    Substring,
    /// Skim-style fuzzy match (characters in order, gaps allowed)
    Fuzzy,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(SearchMode::Substring),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

/// Matches leaf names against a query
pub struct SearchFilter {
    mode: SearchMode,
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for SearchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFilter")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl SearchFilter {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Whether `name` matches `query`. An empty query matches everything.
    pub fn matches(&self, name: &str, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        match self.mode {
            SearchMode::Substring => name.to_lowercase().contains(&query.to_lowercase()),
            SearchMode::Fuzzy => self.matcher.fuzzy_match(name, query).is_some(),
        }
    }

    /// Show matching leaves, hide the rest, and expand the ancestors of every
    /// match. An empty query makes everything visible again without changing
    /// expansion. Returns the number of visible leaves.
    pub fn apply<T>(&self, tree: &mut SelectionTree<T>, query: &str) -> usize {
        let searching = !query.trim().is_empty();
        let leaves: Vec<NodeId> = tree.leaves().collect();
        let mut shown = 0;

        for id in leaves {
            let visible = self.matches(tree[id].name(), query);
            tree.set_visible(id, visible);
            if visible {
                shown += 1;
                if searching {
                    tree.expand_parents(id);
                }
            }
        }
        shown
    }
}
