use anyhow::{Context, Result};
use colored::Colorize;
use workflowy_core::{Item, Node};

use super::session;

pub async fn show(session_flag: Option<String>, path: &[String]) -> Result<()> {
    let client = session::open(session_flag).await?;
    let item = client
        .lookup(path)
        .with_context(|| format!("Failed to look up '{}'", path.join(" / ")))?;

    print_item(&item);
    Ok(())
}

pub async fn tree(session_flag: Option<String>, path: &[String]) -> Result<()> {
    let client = session::open(session_flag).await?;
    let mut print = |node: &Node, depth: usize| println!("{}", outline_line(node, depth));

    if path.is_empty() {
        let tree = client
            .tree()
            .context("The server returned no document tree")?;
        tree.walk(&mut print);
    } else {
        let node = client
            .locate(path)
            .with_context(|| format!("Failed to look up '{}'", path.join(" / ")))?;
        println!("{}", outline_line(node, 0));
        node.walk(|child, depth| print(child, depth + 1));
    }
    Ok(())
}

fn styled_name(name: &str, completed: bool) -> String {
    if completed {
        name.dimmed().strikethrough().to_string()
    } else {
        name.bold().to_string()
    }
}

fn outline_line(node: &Node, depth: usize) -> String {
    format!(
        "{}- {}",
        "  ".repeat(depth),
        styled_name(&node.name, node.completed)
    )
}

fn print_item(item: &Item) {
    println!("{}", styled_name(&item.name, item.completed));
    println!("  {} {}", "id:".dimmed(), item.id);
    println!("  {} {}", "position:".dimmed(), item.priority);
    println!(
        "  {} {}",
        "completed:".dimmed(),
        if item.completed { "yes" } else { "no" }
    );
    if let Some(description) = &item.description {
        println!("  {} {}", "note:".dimmed(), description);
    }
    if !item.children_names.is_empty() {
        println!("  {}", "children:".dimmed());
        for name in &item.children_names {
            println!("    - {}", name);
        }
    }
}
