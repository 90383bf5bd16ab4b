//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use notevault_entity::{FolderNode, Node};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print the vault tree as an indented outline or as JSON
pub fn print_tree(tree: &FolderNode, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if tree.children.is_empty() {
                println!("(empty vault)");
            }
            print_children(tree, 0);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(tree).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

fn print_children(folder: &FolderNode, depth: usize) {
    for child in &folder.children {
        let indent = "  ".repeat(depth);
        match child {
            Node::Folder(sub) => {
                println!("{indent}{}/", sub.name);
                print_children(sub, depth + 1);
            }
            Node::File(file) => println!("{indent}{}", file.name),
        }
    }
}

/// Print raw text, such as note content
pub fn print_text(text: &str) {
    println!("{text}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
