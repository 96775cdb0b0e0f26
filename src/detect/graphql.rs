//! GraphQL file metadata extraction.
//!
//! Classifies what a `.graphql`/`.gql` file contains (schema, query,
//! mutation, subscription, or free-form example) and takes the leading
//! `#` comment block as the description.

use std::path::Path;

use super::types::{GraphqlApiInfo, GraphqlKind};

/// Scrape GraphQL metadata from a classified file.
pub fn extract(file_path: &Path, content: &str) -> GraphqlApiInfo {
    GraphqlApiInfo {
        file_path: file_path.to_path_buf(),
        kind: classify_kind(content),
        description: leading_comment(content),
    }
}

/// Decide what the file contains from its first meaningful token,
/// falling back to a schema-definition scan.
fn classify_kind(content: &str) -> GraphqlKind {
    let first = first_meaningful_line(content).unwrap_or("");

    if first.starts_with("query") || first.starts_with('{') {
        return GraphqlKind::Query;
    }
    if first.starts_with("mutation") {
        return GraphqlKind::Mutation;
    }
    if first.starts_with("subscription") {
        return GraphqlKind::Subscription;
    }

    if defines_schema(content) {
        GraphqlKind::Schema
    } else {
        GraphqlKind::Example
    }
}

/// First line that is neither blank nor a `#` comment.
fn first_meaningful_line(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Any SDL definition keyword at the start of a line.
fn defines_schema(content: &str) -> bool {
    content.lines().map(str::trim_start).any(|line| {
        line.starts_with("schema")
            || line.starts_with("type ")
            || line.starts_with("interface ")
            || line.starts_with("input ")
            || line.starts_with("enum ")
            || line.starts_with("union ")
            || line.starts_with("scalar ")
            || line.starts_with("directive ")
            || line.starts_with("extend type ")
    })
}

/// The leading run of `#` comment lines, joined and trimmed.
fn leading_comment(content: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() && lines.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('#') {
            lines.push(rest.trim());
        } else {
            break;
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
