//! Conversion of a remote listing into a vault tree.

use notevault_core::traits::ListingNode;
use notevault_core::types::RootPrefix;
use notevault_core::types::path;

use crate::node::{FileNode, FolderNode, Node};

/// Build a tree from a (projected) listing.
///
/// Paths are made root-relative and sibling order is kept as listed. File
/// content is left to be fetched on open.
pub fn build_tree(listing: &[ListingNode], root: &RootPrefix) -> FolderNode {
    FolderNode::root().with_children(build_children(listing, root))
}

fn build_children(listing: &[ListingNode], root: &RootPrefix) -> Vec<Node> {
    listing.iter().map(|entry| build_node(entry, root)).collect()
}

fn build_node(entry: &ListingNode, root: &RootPrefix) -> Node {
    let relative = path::to_relative(&entry.path, root);
    if entry.folder {
        Node::Folder(
            FolderNode::new(entry.name.clone(), relative)
                .with_children(build_children(&entry.children, root)),
        )
    } else {
        Node::File(FileNode::new(entry.name.clone(), relative, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::lookup;

    #[test]
    fn test_build_tree_relativizes_paths() {
        let root = RootPrefix::default();
        let listing = vec![
            ListingNode::folder(
                "Notes",
                "/default/note/Notes",
                vec![ListingNode::file("a.md", "/default/note/Notes/a.md", false)],
            ),
            ListingNode::file("b.md", "/default/note/b.md", true),
        ];

        let tree = build_tree(&listing, &root);

        assert!(tree.is_root());
        assert_eq!(tree.children.len(), 2);
        let file = lookup::find_file("Notes/a.md", &tree).unwrap();
        assert_eq!(file.id, "Notes/a.md");
        assert!(file.content.is_none());
        assert_eq!(tree.children[1].path(), "b.md");
    }

    #[test]
    fn test_build_tree_accepts_relative_listing() {
        let root = RootPrefix::default();
        let listing = vec![ListingNode::file("z.md", "z.md", false), ListingNode::folder("A", "A", vec![])];
        let tree = build_tree(&listing, &root);
        let names: Vec<_> = tree.children.iter().map(Node::name).collect();
        assert_eq!(names, vec!["z.md", "A"]);
    }
}
