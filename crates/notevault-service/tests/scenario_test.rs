//! End-to-end editing scenarios and publish flows.

mod helpers;

use std::sync::Arc;

use notevault_core::config::vault::ViewMode;
use notevault_core::types::NodeKind;
use notevault_entity::tree::lookup;
use notevault_service::search;
use notevault_service::{Vault, VaultContext, VaultState};

use helpers::memory;

#[tokio::test]
async fn test_create_folder_file_then_rename() {
    let vault = helpers::vault(Arc::new(memory()), ViewMode::Admin).await;

    vault.tree.create("", "Notes", NodeKind::Folder).await.unwrap();
    vault.tree.create("Notes", "a.md", NodeKind::File).await.unwrap();
    vault.tree.rename("Notes/a.md", "b.md").await.unwrap();

    let tree = vault.tree.snapshot().await;
    let notes = lookup::find_folder("Notes", &tree).unwrap();
    assert_eq!(notes.children.len(), 1);
    assert_eq!(notes.children[0].path(), "Notes/b.md");
    assert!(lookup::find_node("Notes/a.md", &tree).is_none());
    assert_eq!(
        vault.documents.read("Notes/b.md").await.unwrap(),
        "# a\n\nStart writing here..."
    );
}

#[tokio::test]
async fn test_close_inactive_tab_keeps_active_buffer() {
    let store = memory()
        .with_file("x.md", "x", false)
        .with_file("y.md", "y", false);
    let vault = helpers::vault(Arc::new(store), ViewMode::Admin).await;

    vault.documents.open("x.md").await.unwrap();
    vault.documents.change_content("x edited").await.unwrap();
    vault.documents.open("y.md").await.unwrap();
    vault.documents.close("x.md").await.unwrap();

    let state = vault.state().await;
    assert_eq!(state.session.active_file_path(), Some("y.md"));
    assert_eq!(state.session.file_content(), "y");
    assert_eq!(state.session.open_files().len(), 1);
}

#[tokio::test]
async fn test_student_view_shows_published_only() {
    let store = memory()
        .with_file("Course/intro.md", "i", true)
        .with_file("Course/draft.md", "d", false)
        .with_file("Private/secret.md", "s", false)
        .with_file("images/cat.png", "", true);
    let vault = helpers::vault(Arc::new(store), ViewMode::Student).await;

    let tree = vault.tree.snapshot().await;
    let names: Vec<_> = tree.children.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["Course"]);
    let course = lookup::find_folder("Course", &tree).unwrap();
    assert_eq!(course.children.len(), 1);
    assert!(lookup::find_file("Course/intro.md", &tree).is_some());
}

#[tokio::test]
async fn test_deploy_reconciles_publish_flags() {
    let store = memory()
        .with_file("a.md", "a", true)
        .with_file("b.md", "b", true)
        .with_file("c.md", "c", false);
    let vault = helpers::vault(Arc::new(store.clone()), ViewMode::Admin).await;

    assert_eq!(vault.publish.published_files().await.unwrap(), vec!["a.md", "b.md"]);

    let plan = vault
        .publish
        .deploy(&["b.md".to_string(), "c.md".to_string()])
        .await
        .unwrap();

    assert_eq!(plan.to_publish, vec!["c.md"]);
    assert_eq!(plan.to_unpublish, vec!["a.md"]);
    assert_eq!(store.is_published("a.md").await, Some(false));
    assert_eq!(store.is_published("c.md").await, Some(true));
    assert_eq!(vault.publish.published_files().await.unwrap(), vec!["b.md", "c.md"]);
}

#[tokio::test]
async fn test_page_url_requires_base() {
    let store = memory();
    let vault = Vault::new(VaultContext::new(
        Arc::new(store.clone()),
        VaultState::new(ViewMode::Admin),
    ));
    assert!(vault.publish.page_url("a.md").is_err());

    let vault = Vault::new(
        VaultContext::new(Arc::new(store), VaultState::new(ViewMode::Admin))
            .with_pages_base_url("https://pages.example.org"),
    );
    assert_eq!(
        vault.publish.page_url("Course/intro.md").unwrap(),
        "https://pages.example.org/pages/Course/intro"
    );
}

#[tokio::test]
async fn test_search_over_synced_tree() {
    let store = memory()
        .with_file("Rust/tokio.md", "", false)
        .with_file("Go/goroutines.md", "", false);
    let vault = helpers::vault(Arc::new(store), ViewMode::Admin).await;

    let tree = vault.tree.snapshot().await;
    let found = search::search(&tree, "TOKIO");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, "Rust/tokio.md");
    assert!(search::matching_paths(&tree, "tokio").contains("Rust"));
}
