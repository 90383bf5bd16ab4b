//! Name search over the local tree.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;

use notevault_core::types::NodeKind;
use notevault_core::types::path;
use notevault_entity::{FolderNode, Node};

/// A node whose name contains the search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// Root-relative path of the node.
    pub path: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Byte range of the match within the node's name.
    pub highlight: Range<usize>,
}

/// Case-insensitive substring search over node names, in tree order.
///
/// An empty (or whitespace-only) term matches nothing.
pub fn search(tree: &FolderNode, term: &str) -> Vec<SearchMatch> {
    let needle = term.trim().to_lowercase();
    let mut matches = Vec::new();
    if !needle.is_empty() {
        search_folder(tree, &needle, &mut matches);
    }
    matches
}

fn search_folder(folder: &FolderNode, needle: &str, out: &mut Vec<SearchMatch>) {
    for child in &folder.children {
        if let Some(highlight) = find_ignore_case(child.name(), needle) {
            out.push(SearchMatch {
                path: child.path().to_string(),
                kind: child.kind(),
                highlight,
            });
        }
        match child {
            Node::Folder(sub) => search_folder(sub, needle, out),
            Node::File(_) => {}
        }
    }
}

/// Byte range in `haystack` of the first match of the lowercase `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let needle_chars = needle.chars().count();
    for (start, _) in haystack.char_indices() {
        let window: String = haystack[start..].chars().take(needle_chars).collect();
        if window.to_lowercase() == needle {
            return Some(start..start + window.len());
        }
    }
    None
}

/// Matched paths plus every folder containing a match.
pub fn matching_paths(tree: &FolderNode, term: &str) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for found in search(tree, term) {
        let mut ancestor = path::parent_of(&found.path).to_string();
        while !ancestor.is_empty() {
            let next = path::parent_of(&ancestor).to_string();
            paths.insert(ancestor);
            ancestor = next;
        }
        paths.insert(found.path);
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use notevault_entity::FileNode;

    fn tree() -> FolderNode {
        FolderNode::root().with_children(vec![
            Node::Folder(FolderNode::new("Rust", "Rust").with_children(vec![
                Node::Folder(FolderNode::new("Async", "Rust/Async").with_children(vec![
                    Node::File(FileNode::new("Tokio Notes.md", "Rust/Async/Tokio Notes.md", None)),
                ])),
                Node::File(FileNode::new("ownership.md", "Rust/ownership.md", None)),
            ])),
            Node::File(FileNode::new("Über notes.md", "Über notes.md", None)),
        ])
    }

    #[test]
    fn test_search_is_case_insensitive_in_tree_order() {
        let found = search(&tree(), "NOTES");
        let paths: Vec<_> = found.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["Rust/Async/Tokio Notes.md", "Über notes.md"]);
        assert_eq!(found[0].highlight, 6..11);
        assert_eq!(found[0].kind, NodeKind::File);
    }

    #[test]
    fn test_highlight_uses_byte_offsets() {
        let found = search(&tree(), "über");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].highlight, 0.."Über".len());
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        assert!(search(&tree(), "").is_empty());
        assert!(search(&tree(), "   ").is_empty());
    }

    #[test]
    fn test_matching_paths_include_ancestors() {
        let paths = matching_paths(&tree(), "tokio");
        let expected: BTreeSet<String> = ["Rust", "Rust/Async", "Rust/Async/Tokio Notes.md"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_folder_names_match() {
        let found = search(&tree(), "async");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, NodeKind::Folder);
    }
}
