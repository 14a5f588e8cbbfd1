use serde::Serialize;
use std::collections::BTreeMap;

/// One discovered internal page
#[derive(Debug, Clone, Serialize)]
pub struct SiteNode {
    /// Resolved absolute URL
    pub url: String,

    /// URL path component
    pub path: String,

    /// Display text: the anchor text when present, otherwise derived from
    /// the last path segment
    pub label: String,

    /// Link depth: hop distance from the root page (root = 0)
    pub depth: u32,

    /// Count of non-empty path segments, kept for path-shape displays
    pub path_segments: u32,
}

/// The set of internal pages discovered from one crawl, grouped by depth
///
/// Built once per crawl and read-only afterward.
#[derive(Debug, Clone, Serialize)]
pub struct SiteGraph {
    /// The crawl's root URL
    pub root: String,

    /// Depth -> nodes at that depth, in first-seen order
    pub levels: BTreeMap<u32, Vec<SiteNode>>,

    /// Total same-host links encountered, before deduplication
    pub total_links_found: u32,

    /// Number of unique pages collected (the root included)
    pub unique_pages: u32,

    /// Failure reason when the root page could not be fetched
    pub failure: Option<String>,
}

impl SiteGraph {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            levels: BTreeMap::new(),
            total_links_found: 0,
            unique_pages: 0,
            failure: None,
        }
    }

    /// An empty graph recording why the crawl could not start
    pub fn unreachable(root: &str, reason: String) -> Self {
        let mut graph = Self::new(root);
        graph.failure = Some(reason);
        graph
    }

    pub fn insert(&mut self, node: SiteNode) {
        self.levels.entry(node.depth).or_default().push(node);
        self.unique_pages += 1;
    }

    /// All nodes in depth order, first-seen order within a depth
    pub fn nodes(&self) -> impl Iterator<Item = &SiteNode> {
        self.levels.values().flatten()
    }

    /// The deepest level that holds at least one node
    pub fn max_depth(&self) -> u32 {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(url: &str, depth: u32) -> SiteNode {
        SiteNode {
            url: url.to_string(),
            path: "/".to_string(),
            label: "page".to_string(),
            depth,
            path_segments: 0,
        }
    }

    #[test]
    fn test_insert_groups_by_depth() {
        let mut graph = SiteGraph::new("https://example.com/");
        graph.insert(node("https://example.com/", 0));
        graph.insert(node("https://example.com/a", 1));
        graph.insert(node("https://example.com/b", 1));

        assert_eq!(graph.unique_pages, 3);
        assert_eq!(graph.levels[&1].len(), 2);
        assert_eq!(graph.max_depth(), 1);
    }

    #[test]
    fn test_nodes_iterates_depth_order() {
        let mut graph = SiteGraph::new("https://example.com/");
        graph.insert(node("https://example.com/deep", 2));
        graph.insert(node("https://example.com/", 0));

        let urls: Vec<&str> = graph.nodes().map(|n| n.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/", "https://example.com/deep"]);
    }

    #[test]
    fn test_unreachable_graph_is_empty() {
        let graph = SiteGraph::unreachable("https://example.com/", "HTTP 503".to_string());
        assert_eq!(graph.unique_pages, 0);
        assert_eq!(graph.failure.as_deref(), Some("HTTP 503"));
        assert_eq!(graph.nodes().count(), 0);
    }
}
