//! Table-of-contents generation.
//!
//! The TOC node lists every other node (the entry node included), ordered by
//! title, with a bold heading paragraph at each first-letter transition.

use crate::guide::{NodeId, NodeKind, Para, Registry, Run, Span};

/// Populate the table-of-contents node from the rest of the registry.
///
/// Appending is idempotent in shape: the "Table of Contents" heading is only
/// emitted while the node is still empty.
pub fn build_toc(registry: &mut Registry, toc: NodeId) {
    if registry.node(toc).paragraphs().is_empty() {
        let mut heading = Para::new();
        heading.break_after = true;
        heading.push(Run::Span(Span {
            text: "Table of Contents".to_string(),
            bold: true,
            underline: true,
            ..Default::default()
        }));
        registry.node_mut(toc).push_para(heading);
    }

    let mut entries: Vec<(NodeId, String)> = registry
        .ids()
        .filter(|&id| registry.node(id).kind() != NodeKind::TableOfContents)
        .map(|id| (id, registry.node(id).title().to_string()))
        .collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1));

    let mut last_letter = 'A';
    for (id, title) in entries {
        if let Some(first) = title.chars().next() {
            let first = first.to_ascii_uppercase();
            if first != last_letter {
                last_letter = first;
                let mut heading = Para::new();
                heading.break_after = true;
                heading.push(Run::Span(Span {
                    text: first.to_string(),
                    bold: true,
                    ..Default::default()
                }));
                registry.node_mut(toc).push_para(heading);
            }
        }

        let mut entry = Para::new();
        entry.span("  ");
        entry.link(id, title);
        registry.node_mut(toc).push_para(entry);
    }
}
