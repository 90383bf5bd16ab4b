//! Reconciling a selection of files with their remote publish flags.

use std::collections::HashSet;

use serde::Serialize;

/// Flag changes needed to make exactly `selected` published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    /// Selected files not published yet.
    pub to_publish: Vec<String>,
    /// Published files no longer selected.
    pub to_unpublish: Vec<String>,
}

impl DeployPlan {
    /// Diff the currently published set against the selection.
    ///
    /// Both lists keep input order and hold no duplicates.
    pub fn between(published: &[String], selected: &[String]) -> Self {
        let published_set: HashSet<&str> = published.iter().map(String::as_str).collect();
        let selected_set: HashSet<&str> = selected.iter().map(String::as_str).collect();

        Self {
            to_publish: ordered_difference(selected, &published_set),
            to_unpublish: ordered_difference(published, &selected_set),
        }
    }

    /// Whether nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_publish.is_empty() && self.to_unpublish.is_empty()
    }
}

fn ordered_difference(items: &[String], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !exclude.contains(item.as_str()) && seen.insert(item.as_str()))
        .cloned()
        .collect()
}
