//! Line commands understood by the interactive shell

use anyhow::{Context, Result, bail};
use std::sync::Arc;

use crate::tree::{Level, NodeId, SearchNode, SearchSource};

/// A node addressed either by tier position (`2.1`) or by raw id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Zero-based tier and position within the tier
    Position { tier: usize, index: usize },
    Id(NodeId),
}

impl NodeRef {
    fn parse(token: &str) -> Result<Self> {
        if let Some((tier, index)) = token.split_once('.') {
            if let (Ok(tier), Ok(index)) = (tier.parse::<usize>(), index.parse::<usize>()) {
                if tier == 0 || index == 0 {
                    bail!("Tier positions start at 1.1, got '{token}'");
                }
                return Ok(NodeRef::Position {
                    tier: tier - 1,
                    index: index - 1,
                });
            }
        }
        Ok(NodeRef::Id(NodeId::from(token)))
    }

    /// Look the node up in the current tiers
    #[must_use]
    pub fn resolve(&self, levels: &[Level]) -> Option<Arc<SearchNode>> {
        match self {
            NodeRef::Position { tier, index } => levels
                .get(*tier)?
                .items
                .get(*index)
                .map(|item| Arc::clone(&item.node)),
            NodeRef::Id(id) => levels
                .iter()
                .flat_map(|level| level.items.iter())
                .find(|item| item.node.id == *id)
                .map(|item| Arc::clone(&item.node)),
        }
    }
}

/// Keyword given literally or as `#n`, the n-th follow-up of the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordArg {
    Literal(String),
    /// Zero-based index into `generated_keywords`
    Generated(usize),
}

impl KeywordArg {
    fn parse(text: &str) -> Result<Self> {
        match text.strip_prefix('#').map(str::parse::<usize>) {
            Some(Ok(0)) => bail!("Follow-up numbers start at #1"),
            Some(Ok(n)) => Ok(KeywordArg::Generated(n - 1)),
            _ => Ok(KeywordArg::Literal(text.to_string())),
        }
    }

    #[must_use]
    pub fn resolve(&self, node: &SearchNode) -> Option<String> {
        match self {
            KeywordArg::Literal(keyword) => Some(keyword.clone()),
            KeywordArg::Generated(index) => node.generated_keywords.get(*index).cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New root search with the current source
    Search { keyword: String },
    /// Switch the source used by new root searches
    Source(SearchSource),
    Expand { node: NodeRef, keyword: KeywordArg },
    Refresh { node: NodeRef },
    /// Toggle the full result list of a node
    View { node: NodeRef },
    /// Toggle collection of a result (zero-based index)
    Collect { node: NodeRef, result: usize },
    Collected,
    Summarize { node: NodeRef, result: usize },
    Integrate { keyword: String },
    IntegrateTree { keyword: String },
    Tree,
    Json,
    Clear,
    Health,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines
    ///
    /// # Errors
    ///
    /// Unknown commands and malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search {
                keyword: required(rest, "search <keyword>")?.to_string(),
            },
            "source" => Command::Source(
                required(rest, "source <baidu|cc98>")?.parse::<SearchSource>()?,
            ),
            "expand" | "e" => {
                let (node, keyword) = split_node(rest, "expand <node> <keyword|#n>")?;
                Command::Expand {
                    node,
                    keyword: KeywordArg::parse(required(keyword, "expand <node> <keyword|#n>")?)?,
                }
            }
            "refresh" | "r" => Command::Refresh {
                node: NodeRef::parse(required(rest, "refresh <node>")?)?,
            },
            "view" | "v" => Command::View {
                node: NodeRef::parse(required(rest, "view <node>")?)?,
            },
            "collect" | "c" => {
                let (node, result) = split_node_result(rest, "collect <node> <result#>")?;
                Command::Collect { node, result }
            }
            "collected" => Command::Collected,
            "summarize" => {
                let (node, result) = split_node_result(rest, "summarize <node> <result#>")?;
                Command::Summarize { node, result }
            }
            "integrate" => Command::Integrate {
                keyword: required(rest, "integrate <main keyword>")?.to_string(),
            },
            "integrate-tree" => Command::IntegrateTree {
                keyword: required(rest, "integrate-tree <main keyword>")?.to_string(),
            },
            "tree" | "t" => Command::Tree,
            "json" => Command::Json,
            "clear" => Command::Clear,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{other}', type 'help' for the list"),
        };
        Ok(Some(command))
    }

    /// Whether the command waits on the backend
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Command::Search { .. }
                | Command::Expand { .. }
                | Command::Refresh { .. }
                | Command::Summarize { .. }
                | Command::Integrate { .. }
                | Command::IntegrateTree { .. }
                | Command::Health
        )
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("Usage: {usage}");
    }
    Ok(rest)
}

fn split_node<'a>(rest: &'a str, usage: &str) -> Result<(NodeRef, &'a str)> {
    let rest = required(rest, usage)?;
    let (node, tail) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(node, tail)| (node, tail.trim()));
    Ok((NodeRef::parse(node)?, tail))
}

fn split_node_result(rest: &str, usage: &str) -> Result<(NodeRef, usize)> {
    let (node, result) = split_node(rest, usage)?;
    let number: usize = required(result, usage)?
        .parse()
        .with_context(|| format!("Usage: {usage}"))?;
    if number == 0 {
        bail!("Result numbers start at 1");
    }
    Ok((node, number - 1))
}
