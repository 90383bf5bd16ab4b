//! Structural edits on an owned tree.
//!
//! Every function validates before it touches `tree`; on error the tree is
//! exactly as it was. Callers that share a tree work on a clone and swap it
//! in on success.

use notevault_core::types::NodeKind;
use notevault_core::types::path;

use super::error::{TreeError, TreeResult};
use super::lookup;
use crate::node::{FileNode, FolderNode, Node};

/// Body placed under the heading of a freshly created note.
pub const DEFAULT_NOTE_BODY: &str = "Start writing here...";

/// Initial content of a new note called `name`.
pub fn default_note_content(name: &str) -> String {
    format!(
        "# {}\n\n{DEFAULT_NOTE_BODY}",
        path::strip_markdown_extension(name)
    )
}

/// Add a file under `parent_path` and return its path.
///
/// `content` of `None` seeds the note with [`default_note_content`].
pub fn add_file(
    parent_path: &str,
    file_name: &str,
    content: Option<String>,
    tree: &mut FolderNode,
) -> TreeResult<String> {
    let content = content.unwrap_or_else(|| default_note_content(file_name));
    insert_child(parent_path, file_name, tree, |name, new_path| {
        Node::File(FileNode::new(name, new_path, Some(content)))
    })
}

/// Add an empty folder under `parent_path` and return its path.
pub fn add_folder(parent_path: &str, folder_name: &str, tree: &mut FolderNode) -> TreeResult<String> {
    insert_child(parent_path, folder_name, tree, |name, new_path| {
        Node::Folder(FolderNode::new(name, new_path))
    })
}

fn insert_child<F>(parent_path: &str, name: &str, tree: &mut FolderNode, make: F) -> TreeResult<String>
where
    F: FnOnce(&str, &str) -> Node,
{
    if !path::is_valid_segment(name) {
        return Err(TreeError::InvalidName(name.to_string()));
    }
    let parent = lookup::find_folder_mut(parent_path, tree)
        .ok_or_else(|| TreeError::ParentNotFound(parent_path.to_string()))?;
    let new_path = path::join(parent_path, name);
    if parent.children.iter().any(|child| child.path() == new_path) {
        return Err(TreeError::AlreadyExists(new_path));
    }
    parent.children.push(make(name, &new_path));
    sort_children(parent);
    Ok(new_path)
}

/// Rename the file at `old_path` and return its new path.
pub fn rename_file(old_path: &str, new_name: &str, tree: &mut FolderNode) -> TreeResult<String> {
    rename_kind(old_path, new_name, NodeKind::File, tree)
}

/// Rename the folder at `old_path`, re-rooting its subtree, and return its new path.
pub fn rename_folder(old_path: &str, new_name: &str, tree: &mut FolderNode) -> TreeResult<String> {
    rename_kind(old_path, new_name, NodeKind::Folder, tree)
}

fn rename_kind(
    old_path: &str,
    new_name: &str,
    kind: NodeKind,
    tree: &mut FolderNode,
) -> TreeResult<String> {
    if !path::is_valid_segment(new_name) {
        return Err(TreeError::InvalidName(new_name.to_string()));
    }
    let parent_path = lookup::find_parent_of(old_path, kind, tree)
        .map(|parent| parent.path.clone())
        .ok_or_else(|| TreeError::NotFound(old_path.to_string()))?;
    let new_path = path::join(&parent_path, new_name);
    if new_path == old_path {
        return Ok(new_path);
    }

    let parent = lookup::find_folder_mut(&parent_path, tree)
        .ok_or_else(|| TreeError::NotFound(old_path.to_string()))?;
    if parent.children.iter().any(|child| child.path() == new_path) {
        return Err(TreeError::AlreadyExists(new_path));
    }
    let node = parent
        .children
        .iter_mut()
        .find(|child| child.path() == old_path)
        .ok_or_else(|| TreeError::NotFound(old_path.to_string()))?;
    node.relocate(&new_path);
    sort_children(parent);
    Ok(new_path)
}

/// Delete the file at `path`.
pub fn delete_file(path: &str, tree: &mut FolderNode) -> TreeResult<()> {
    delete_kind(path, NodeKind::File, tree)
}

/// Delete the folder at `path` together with everything beneath it.
pub fn delete_folder(path: &str, tree: &mut FolderNode) -> TreeResult<()> {
    delete_kind(path, NodeKind::Folder, tree)
}

fn delete_kind(node_path: &str, kind: NodeKind, tree: &mut FolderNode) -> TreeResult<()> {
    let parent_path = lookup::find_parent_of(node_path, kind, tree)
        .map(|parent| parent.path.clone())
        .ok_or_else(|| TreeError::NotFound(node_path.to_string()))?;
    let parent = lookup::find_folder_mut(&parent_path, tree)
        .ok_or_else(|| TreeError::NotFound(node_path.to_string()))?;
    parent.children.retain(|child| child.path() != node_path);
    Ok(())
}

/// Move the node at `node_path` into the folder at `target_folder_path`.
///
/// A folder cannot move into itself or one of its descendants. Moving a
/// node into the folder that already holds it is a no-op.
pub fn move_node(node_path: &str, target_folder_path: &str, tree: &mut FolderNode) -> TreeResult<()> {
    let (kind, name, parent_path) = match lookup::find_node_and_parent(node_path, tree) {
        Some((node, parent)) => (node.kind(), node.name().to_string(), parent.path.clone()),
        None => return Err(TreeError::NotFound(node_path.to_string())),
    };

    if kind == NodeKind::Folder && path::is_same_or_within(target_folder_path, node_path) {
        return Err(TreeError::IllegalMove {
            node: node_path.to_string(),
            target: target_folder_path.to_string(),
        });
    }

    let target = lookup::find_folder(target_folder_path, tree)
        .ok_or_else(|| TreeError::TargetNotFound(target_folder_path.to_string()))?;
    if target.path == parent_path {
        return Ok(());
    }
    let new_path = path::join(target_folder_path, &name);
    if target.children.iter().any(|child| child.path() == new_path) {
        return Err(TreeError::AlreadyExists(new_path));
    }

    let parent = lookup::find_folder_mut(&parent_path, tree)
        .ok_or_else(|| TreeError::NotFound(node_path.to_string()))?;
    let index = parent
        .children
        .iter()
        .position(|child| child.path() == node_path)
        .ok_or_else(|| TreeError::NotFound(node_path.to_string()))?;
    let mut node = parent.children.remove(index);

    node.relocate(&new_path);

    let target = lookup::find_folder_mut(target_folder_path, tree)
        .ok_or_else(|| TreeError::TargetNotFound(target_folder_path.to_string()))?;
    target.children.push(node);
    sort_children(target);
    Ok(())
}

/// Replace the inline content of the file at `path`.
pub fn update_file_content(path: &str, content: impl Into<String>, tree: &mut FolderNode) -> TreeResult<()> {
    let file = lookup::find_file_mut(path, tree).ok_or_else(|| TreeError::NotFound(path.to_string()))?;
    file.content = Some(content.into());
    Ok(())
}

/// Order a folder's children: folders first, then by name.
pub fn sort_children(folder: &mut FolderNode) {
    folder.children.sort_by(Node::sibling_order);
}
