//! Plain-text rendering of tiers, results and the ledger

use ahash::AHashMap;

use crate::collection::CollectionLedger;
use crate::tree::{Level, NodeId, NodeStatus, SearchNode};

/// Results shown per node while its full list is hidden
const RESULT_PREVIEW: usize = 2;

pub const HELP: &str = "\
Commands (nodes are tier positions like 1.2, or raw ids):
  search <keyword>              start a new root exploration
  source <baidu|cc98>           source for new root searches
  expand <node> <keyword|#n>    search a follow-up as a child of <node>
  refresh <node>                re-run the search of <node>
  view <node>                   show/hide all results of <node>
  collect <node> <result#>      collect/uncollect a result
  collected                     list collected items
  summarize <node> <result#>    summarize a result
  integrate <main keyword>      merge collected items
  integrate-tree <main keyword> merge the whole tree
  tree | json | clear | health | help | quit";

/// Render every tier, one block per node
#[must_use]
pub fn render_levels(levels: &[Level]) -> String {
    if levels.is_empty() {
        return "No searches yet.".to_string();
    }

    let mut labels: AHashMap<&NodeId, String> = AHashMap::new();
    let mut out = String::new();

    for level in levels {
        let tier = level.depth + 1;
        let noun = if level.len() == 1 { "keyword" } else { "keywords" };
        out.push_str(&format!("Tier {tier} · {} {noun}\n", level.len()));

        for (position, item) in level.items.iter().enumerate() {
            let label = format!("{tier}.{}", position + 1);
            let origin = item
                .parent_id
                .as_ref()
                .and_then(|parent| labels.get(parent))
                .map(|parent| format!(" from [{parent}]"))
                .unwrap_or_default();
            out.push_str(&format!("  [{label}]{origin} {}\n", node_header(&item.node)));
            out.push_str(&render_node_body(&item.node, "        "));
            labels.insert(&item.node.id, label);
        }
    }
    out
}

fn node_header(node: &SearchNode) -> String {
    let status = match node.status {
        NodeStatus::Ready => "",
        NodeStatus::Refreshing => "  (refreshing...)",
        NodeStatus::Expanding => "  (expanding...)",
    };
    format!(
        "{}  ({}, {}){status}",
        node.keyword,
        node.search_source.label(),
        node.timestamp.format("%H:%M:%S"),
    )
}

fn render_node_body(node: &SearchNode, indent: &str) -> String {
    let mut out = String::new();
    let shown = if node.is_expanded {
        node.search_results.len()
    } else {
        node.search_results.len().min(RESULT_PREVIEW)
    };

    for (index, result) in node.search_results.iter().take(shown).enumerate() {
        out.push_str(&format!("{indent}{}. {} <{}>\n", index + 1, result.title, result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("{indent}   {}\n", result.snippet));
        }
    }
    if shown < node.search_results.len() {
        out.push_str(&format!(
            "{indent}... {} more result(s), 'view' to show all\n",
            node.search_results.len() - shown
        ));
    }

    if !node.generated_keywords.is_empty() {
        let follow_ups: Vec<String> = node
            .generated_keywords
            .iter()
            .enumerate()
            .map(|(index, keyword)| format!("#{} {keyword}", index + 1))
            .collect();
        out.push_str(&format!("{indent}follow-ups: {}\n", follow_ups.join("  ")));
    }

    if !node.children.is_empty() {
        out.push_str(&format!("{indent}expanded into {} child node(s)\n", node.children.len()));
    }
    out
}

/// Render the first `limit` collected items and the remainder count
#[must_use]
pub fn render_ledger(ledger: &CollectionLedger, limit: usize) -> String {
    if ledger.is_empty() {
        return "Nothing collected yet.".to_string();
    }
    let preview = ledger.preview(limit);
    let mut out = format!("Collected · {} item(s)\n", ledger.len());
    for item in preview.shown {
        out.push_str(&format!("  - {} [{}] <{}>\n", item.title, item.node_keyword, item.url));
    }
    if preview.remaining > 0 {
        out.push_str(&format!("  ... and {} more\n", preview.remaining));
    }
    out
}
