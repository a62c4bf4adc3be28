//! Graphviz DOT formatting for dependency graphs.
//!
//! Pure string formatting. Callers pass nodes and edges already in the
//! order they want emitted; nothing here sorts or deduplicates.
//!
//! Style strings come from user config, so they pass through [`dot_id`]
//! or [`escape_quoted`] before landing in the output.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Line that terminates a digraph body.
pub const CLOSING_LINE: &str = "}";

/// Header attributes of an emitted digraph.
///
/// The default reproduces the layout the rendering step expects:
///
/// ```text
/// digraph dep {
///   rankdir=LR;
///   node [shape=ellipse, fontname="Monaco", fontsize=11];
///   edge [fontname="Monaco", fontsize=9];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    /// Graph identifier after `digraph`.
    pub graph_name: String,
    /// Layout direction (`LR`, `TB`, ...).
    pub rankdir: String,
    /// Node shape attribute.
    pub node_shape: String,
    /// Font used for node and edge labels.
    pub font: String,
    /// Point size of node labels.
    pub node_font_size: u32,
    /// Point size of edge labels.
    pub edge_font_size: u32,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            graph_name: "dep".to_string(),
            rankdir: "LR".to_string(),
            node_shape: "ellipse".to_string(),
            font: "Monaco".to_string(),
            node_font_size: 11,
            edge_font_size: 9,
        }
    }
}

impl DotStyle {
    /// The four opening lines: graph declaration, direction, node and edge
    /// default attributes.
    #[must_use]
    pub fn header_lines(&self) -> [String; 4] {
        [
            format!("digraph {} {{", dot_id(&self.graph_name)),
            format!("  rankdir={};", dot_id(&self.rankdir)),
            format!(
                "  node [shape={}, fontname=\"{}\", fontsize={}];",
                dot_id(&self.node_shape),
                escape_quoted(&self.font),
                self.node_font_size
            ),
            format!(
                "  edge [fontname=\"{}\", fontsize={}];",
                escape_quoted(&self.font),
                self.edge_font_size
            ),
        ]
    }
}

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Render `value` as a DOT ID.
///
/// Alphanumeric identifiers (not starting with a digit) and plain integers
/// pass through unchanged. Anything else, including the empty string and
/// DOT keywords, is quoted.
#[must_use]
pub fn dot_id(value: &str) -> Cow<'_, str> {
    let identifier = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(value));
    let numeral = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());

    if identifier || numeral {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("\"{}\"", escape_quoted(value)))
    }
}

/// Escape `\` and `"` for use inside a double-quoted DOT string.
#[must_use]
pub fn escape_quoted(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Format a node declaration: `  "<id>" [label="<label>"];`
#[must_use]
pub fn node_line(id: &str, label: &str) -> String {
    format!(
        "  \"{}\" [label=\"{}\"];",
        escape_quoted(id),
        escape_quoted(label)
    )
}

/// Format an edge declaration: `  "<source>" -> "<target>";`
#[must_use]
pub fn edge_line(source: &str, target: &str) -> String {
    format!(
        "  \"{}\" -> \"{}\";",
        escape_quoted(source),
        escape_quoted(target)
    )
}

/// Emit a complete digraph.
///
/// `label` maps each node id to its display label. Lines are joined with
/// `\n` and the result has no trailing newline.
pub fn emit_digraph<'a, N, E, L>(style: &DotStyle, nodes: N, edges: E, label: L) -> String
where
    N: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = (&'a str, &'a str)>,
    L: Fn(&str) -> String,
{
    let mut lines: Vec<String> = style.header_lines().into_iter().collect();
    lines.extend(nodes.into_iter().map(|id| node_line(id, &label(id))));
    lines.extend(edges.into_iter().map(|(s, t)| edge_line(s, t)));
    lines.push(CLOSING_LINE.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_matches_renderer_layout() {
        let header = DotStyle::default().header_lines();
        assert_eq!(header[0], "digraph dep {");
        assert_eq!(header[1], "  rankdir=LR;");
        assert_eq!(
            header[2],
            "  node [shape=ellipse, fontname=\"Monaco\", fontsize=11];"
        );
        assert_eq!(header[3], "  edge [fontname=\"Monaco\", fontsize=9];");
    }

    #[test]
    fn declaration_shapes() {
        assert_eq!(node_line("x1", "x₁"), "  \"x1\" [label=\"x₁\"];");
        assert_eq!(edge_line("x1", "x2"), "  \"x1\" -> \"x2\";");
    }

    #[test]
    fn emit_keeps_caller_order() {
        let dot = emit_digraph(
            &DotStyle::default(),
            ["b", "a"],
            [("b", "a")],
            str::to_uppercase,
        );
        let lines: Vec<&str> = dot.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[4], "  \"b\" [label=\"B\"];");
        assert_eq!(lines[5], "  \"a\" [label=\"A\"];");
        assert_eq!(lines[6], "  \"b\" -> \"a\";");
        assert_eq!(lines[7], "}");
        assert!(!dot.ends_with('\n'));
    }

    #[test]
    fn custom_style_changes_header_only() {
        let style = DotStyle {
            graph_name: "deps".to_string(),
            rankdir: "TB".to_string(),
            font: "Helvetica".to_string(),
            ..DotStyle::default()
        };
        let dot = emit_digraph(&style, ["x1"], std::iter::empty(), |id| id.to_string());
        assert!(dot.starts_with("digraph deps {\n  rankdir=TB;"));
        assert!(dot.contains("fontname=\"Helvetica\", fontsize=11"));
        assert!(dot.contains("  \"x1\" [label=\"x1\"];"));
    }

    #[test]
    fn style_strings_with_spaces_are_quoted() {
        let style = DotStyle {
            graph_name: "my deps".to_string(),
            node_shape: "double circle".to_string(),
            font: "Fira \"Code\"".to_string(),
            ..DotStyle::default()
        };
        let header = style.header_lines();
        assert_eq!(header[0], "digraph \"my deps\" {");
        assert_eq!(header[1], "  rankdir=LR;");
        assert_eq!(
            header[2],
            "  node [shape=\"double circle\", fontname=\"Fira \\\"Code\\\"\", fontsize=11];"
        );
        assert_eq!(header[3], "  edge [fontname=\"Fira \\\"Code\\\"\", fontsize=9];");
    }

    #[test]
    fn dot_id_quotes_only_when_needed() {
        assert_eq!(dot_id("dep"), "dep");
        assert_eq!(dot_id("_dep2"), "_dep2");
        assert_eq!(dot_id("42"), "42");
        assert_eq!(dot_id(""), "\"\"");
        assert_eq!(dot_id("2x"), "\"2x\"");
        assert_eq!(dot_id("Graph"), "\"Graph\"");
        assert_eq!(dot_id("a-b"), "\"a-b\"");
        assert_eq!(dot_id("c:\\tmp"), "\"c:\\\\tmp\"");
        assert!(matches!(dot_id("dep"), Cow::Borrowed(_)));
    }

    #[test]
    fn node_ids_and_labels_are_escaped() {
        assert_eq!(node_line("a\"b", "a\"b"), "  \"a\\\"b\" [label=\"a\\\"b\"];");
        assert_eq!(edge_line("a\\", "b"), "  \"a\\\\\" -> \"b\";");
    }
}
