//! Depth-first lookups by exact path.
//!
//! Paths are assumed unique (the mutation engine rejects duplicates), so
//! the first match is the only match.

use notevault_core::types::NodeKind;

use crate::node::{FileNode, FolderNode, Node};

/// Find the folder at `path`; `""` is the root itself.
pub fn find_folder<'a>(path: &str, root: &'a FolderNode) -> Option<&'a FolderNode> {
    if path.is_empty() {
        return Some(root);
    }
    find_folder_in(root, path)
}

fn find_folder_in<'a>(folder: &'a FolderNode, path: &str) -> Option<&'a FolderNode> {
    if folder.path == path {
        return Some(folder);
    }
    for child in &folder.children {
        match child {
            Node::Folder(sub) => {
                if let Some(found) = find_folder_in(sub, path) {
                    return Some(found);
                }
            }
            Node::File(_) => {}
        }
    }
    None
}

/// Mutable variant of [`find_folder`].
pub fn find_folder_mut<'a>(path: &str, root: &'a mut FolderNode) -> Option<&'a mut FolderNode> {
    if path.is_empty() {
        return Some(root);
    }
    find_folder_in_mut(root, path)
}

fn find_folder_in_mut<'a>(folder: &'a mut FolderNode, path: &str) -> Option<&'a mut FolderNode> {
    if folder.path == path {
        return Some(folder);
    }
    for child in folder.children.iter_mut() {
        match child {
            Node::Folder(sub) => {
                if let Some(found) = find_folder_in_mut(sub, path) {
                    return Some(found);
                }
            }
            Node::File(_) => {}
        }
    }
    None
}

/// Find the node at `path` together with its immediate parent folder.
///
/// The root has no parent, so `""` never matches.
pub fn find_node_and_parent<'a>(
    path: &str,
    root: &'a FolderNode,
) -> Option<(&'a Node, &'a FolderNode)> {
    for child in &root.children {
        if child.path() == path {
            return Some((child, root));
        }
        match child {
            Node::Folder(sub) => {
                if let Some(hit) = find_node_and_parent(path, sub) {
                    return Some(hit);
                }
            }
            Node::File(_) => {}
        }
    }
    None
}

/// Find the node at `path`.
pub fn find_node<'a>(path: &str, root: &'a FolderNode) -> Option<&'a Node> {
    find_node_and_parent(path, root).map(|(node, _)| node)
}

/// Find the folder directly containing a node of `kind` at `path`.
pub fn find_parent_of<'a>(
    path: &str,
    kind: NodeKind,
    root: &'a FolderNode,
) -> Option<&'a FolderNode> {
    for child in &root.children {
        if child.path() == path && child.kind() == kind {
            return Some(root);
        }
        match child {
            Node::Folder(sub) => {
                if let Some(parent) = find_parent_of(path, kind, sub) {
                    return Some(parent);
                }
            }
            Node::File(_) => {}
        }
    }
    None
}

/// Find the file at `path`.
pub fn find_file<'a>(path: &str, root: &'a FolderNode) -> Option<&'a FileNode> {
    find_node(path, root).and_then(Node::as_file)
}

/// Mutable lookup of the file at `path`.
pub fn find_file_mut<'a>(path: &str, root: &'a mut FolderNode) -> Option<&'a mut FileNode> {
    for child in root.children.iter_mut() {
        match child {
            Node::File(file) => {
                if file.path == path {
                    return Some(file);
                }
            }
            Node::Folder(sub) => {
                if let Some(found) = find_file_mut(path, sub) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Inline content of the file at `path`, if the tree carries it.
pub fn file_content<'a>(path: &str, root: &'a FolderNode) -> Option<&'a str> {
    find_file(path, root).and_then(|file| file.content.as_deref())
}

/// Every node path in depth-first pre-order, root excluded.
pub fn collect_paths(root: &FolderNode) -> Vec<String> {
    let mut paths = Vec::with_capacity(root.descendant_count());
    collect_into(root, &mut paths);
    paths
}

fn collect_into(folder: &FolderNode, out: &mut Vec<String>) {
    for child in &folder.children {
        out.push(child.path().to_string());
        match child {
            Node::Folder(sub) => collect_into(sub, out),
            Node::File(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FolderNode {
        FolderNode::root().with_children(vec![
            Node::Folder(FolderNode::new("Notes", "Notes").with_children(vec![
                Node::Folder(FolderNode::new("Deep", "Notes/Deep").with_children(vec![
                    Node::File(FileNode::new("c.md", "Notes/Deep/c.md", Some("# c".into()))),
                ])),
                Node::File(FileNode::new("a.md", "Notes/a.md", None)),
            ])),
            Node::File(FileNode::new("top.md", "top.md", Some("# top".into()))),
        ])
    }

    #[test]
    fn test_find_folder_root_sentinel() {
        let root = sample();
        let found = find_folder("", &root).unwrap();
        assert!(std::ptr::eq(found, &root));
    }

    #[test]
    fn test_find_folder_nested() {
        let root = sample();
        assert_eq!(find_folder("Notes/Deep", &root).unwrap().name, "Deep");
        assert!(find_folder("Notes/a.md", &root).is_none());
        assert!(find_folder("Missing", &root).is_none());
    }

    #[test]
    fn test_find_folder_mut_root_sentinel() {
        let mut root = sample();
        let folder = find_folder_mut("", &mut root).unwrap();
        folder.name = "renamed-root".into();
        assert_eq!(root.name, "renamed-root");
    }

    #[test]
    fn test_find_node_and_parent() {
        let root = sample();
        let (node, parent) = find_node_and_parent("Notes/Deep/c.md", &root).unwrap();
        assert_eq!(node.name(), "c.md");
        assert_eq!(parent.path, "Notes/Deep");

        let (node, parent) = find_node_and_parent("top.md", &root).unwrap();
        assert_eq!(node.kind(), NodeKind::File);
        assert!(parent.is_root());

        assert!(find_node_and_parent("", &root).is_none());
        assert!(find_node_and_parent("nope.md", &root).is_none());
    }

    #[test]
    fn test_find_parent_of_matches_kind() {
        let root = sample();
        assert_eq!(
            find_parent_of("Notes/a.md", NodeKind::File, &root).unwrap().path,
            "Notes"
        );
        assert!(find_parent_of("Notes/a.md", NodeKind::Folder, &root).is_none());
        assert!(find_parent_of("Notes", NodeKind::Folder, &root).unwrap().is_root());
        assert!(find_parent_of("Notes", NodeKind::File, &root).is_none());
    }

    #[test]
    fn test_file_content() {
        let mut root = sample();
        assert_eq!(file_content("top.md", &root), Some("# top"));
        assert_eq!(file_content("Notes/a.md", &root), None);
        assert_eq!(file_content("Notes", &root), None);

        find_file_mut("Notes/a.md", &mut root).unwrap().content = Some("new".into());
        assert_eq!(file_content("Notes/a.md", &root), Some("new"));
    }

    #[test]
    fn test_collect_paths_preorder() {
        let root = sample();
        assert_eq!(
            collect_paths(&root),
            vec!["Notes", "Notes/Deep", "Notes/Deep/c.md", "Notes/a.md", "top.md"]
        );
    }
}
