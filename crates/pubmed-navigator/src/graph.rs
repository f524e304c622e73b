//! Co-occurrence graph assembly and interactive HTML rendering.
//!
//! Builds one node per unique entity and one edge per qualifying
//! co-occurrence, then emits a self-contained vis-network document.
//! Layout is delegated to vis-network's forceAtlas2Based solver with
//! fixed physics constants; the markup is post-processed so the canvas
//! fills the browser viewport.

use serde::Serialize;

use crate::error::PipelineResult;
use crate::extract::{EntityIndex, RelationshipEdge};

/// Force-layout physics constants, chosen for readability.
pub mod physics {
    /// Repulsion (gravitational constant).
    pub const GRAVITY: f64 = -60.0;

    /// Pull toward the canvas center.
    pub const CENTRAL_GRAVITY: f64 = 0.002;

    /// Rest length of edge springs.
    pub const SPRING_LENGTH: f64 = 100.0;

    /// Edge spring stiffness.
    pub const SPRING_STRENGTH: f64 = 0.01;

    /// Velocity damping.
    pub const DAMPING: f64 = 0.6;
}

/// Canvas background color.
const BACKGROUND_COLOR: &str = "#222222";

/// Node label font color.
const FONT_COLOR: &str = "white";

/// Fallback color for entity types without an assigned color.
const DEFAULT_NODE_COLOR: &str = "#999999";

/// Full-viewport styling injected into the generated markup.
const VIEWPORT_CSS: &str = "\
<style>
    body, html { margin: 0; padding: 0; width: 100vw; height: 100vh; overflow: hidden; }
    #mynetwork { width: 100vw; height: 100vh; }
</style>
";

/// Color for a node of the given entity type (lookup is case-insensitive).
#[must_use]
pub fn node_color(entity_type: &str) -> &'static str {
    match entity_type.to_uppercase().as_str() {
        "CHEMICAL" => "green",
        "DISEASE" => "red",
        _ => DEFAULT_NODE_COLOR,
    }
}

/// A vis-network node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Node identifier (normalized entity text).
    pub id: String,

    /// Visible label, same as the identifier.
    pub label: String,

    /// Hover tooltip: line-break-joined source titles.
    pub title: String,

    /// Node color keyed by entity type.
    pub color: String,
}

/// A vis-network edge.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    /// Source node identifier.
    pub from: String,

    /// Target node identifier.
    pub to: String,

    /// Hover tooltip: the relationship label.
    pub title: String,
}

/// An assembled co-occurrence graph ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    /// Nodes, sorted by identifier for deterministic output.
    pub nodes: Vec<GraphNode>,

    /// Edges whose endpoints both exist in the node set.
    pub edges: Vec<GraphEdge>,
}

impl EntityGraph {
    /// Assemble the graph from the extraction output.
    ///
    /// Edges referencing an entity absent from the node set are silently
    /// dropped. An empty edge list yields a nodes-only graph.
    #[must_use]
    pub fn build(entities: &EntityIndex, edges: &[RelationshipEdge]) -> Self {
        let mut nodes: Vec<GraphNode> = entities
            .iter()
            .map(|(text, record)| GraphNode {
                id: text.clone(),
                label: text.clone(),
                title: record.titles.iter().cloned().collect::<Vec<_>>().join("<br>"),
                color: node_color(&record.entity_type).to_string(),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let edges = edges
            .iter()
            .filter(|edge| {
                entities.contains_key(&edge.source) && entities.contains_key(&edge.target)
            })
            .map(|edge| GraphEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                title: edge.label.clone(),
            })
            .collect();

        Self { nodes, edges }
    }

    /// Render a self-contained interactive HTML document.
    ///
    /// # Errors
    ///
    /// Returns error if node/edge serialization fails.
    pub fn to_html(&self) -> PipelineResult<String> {
        let nodes_json = serde_json::to_string(&self.nodes)?;
        let edges_json = serde_json::to_string(&self.edges)?;

        let html = format!(
            r#"<html>
<head>
<meta charset="utf-8">
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
</head>
<body style="background-color: {BACKGROUND_COLOR};">
<div id="mynetwork"></div>
<script type="text/javascript">
    var nodes = new vis.DataSet({nodes_json});
    var edges = new vis.DataSet({edges_json});
    var container = document.getElementById("mynetwork");
    var options = {{
        "nodes": {{ "font": {{ "color": "{FONT_COLOR}" }} }},
        "physics": {{
            "solver": "forceAtlas2Based",
            "forceAtlas2Based": {{
                "gravitationalConstant": {gravity},
                "centralGravity": {central_gravity},
                "springLength": {spring_length},
                "springConstant": {spring_strength},
                "damping": {damping}
            }}
        }}
    }};
    new vis.Network(container, {{ "nodes": nodes, "edges": edges }}, options);
</script>
</body>
</html>
"#,
            gravity = physics::GRAVITY,
            central_gravity = physics::CENTRAL_GRAVITY,
            spring_length = physics::SPRING_LENGTH,
            spring_strength = physics::SPRING_STRENGTH,
            damping = physics::DAMPING,
        );

        Ok(inject_viewport_css(&html))
    }
}

/// Post-process generated markup so the network canvas fills the viewport.
#[must_use]
fn inject_viewport_css(html: &str) -> String {
    html.replacen("<head>", &format!("<head>{VIEWPORT_CSS}"), 1)
}
