use std::borrow::Cow;

use crate::policy_ast::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotOptions {
    /// Escape `\` and `"` inside labels. Off by default, so a label with a
    /// double quote produces DOT that Graphviz rejects.
    pub escape_labels: bool,
}

pub fn render(graph: &PolicyGraph) -> String {
    render_with_options(graph, &DotOptions::default())
}

pub fn render_with_options(graph: &PolicyGraph, options: &DotOptions) -> String {
    let mut lines = Vec::with_capacity(graph.nodes.len() + graph.edges.len() + 2);
    lines.push("digraph G {".to_string());

    for node in &graph.nodes {
        lines.push(format!(
            "  \"{}\" [label=\"{}\"];",
            node.id,
            label(&node.label, options)
        ));
    }

    for edge in &graph.edges {
        lines.push(format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];",
            edge.from,
            edge.to,
            label(&edge.label, options)
        ));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn label<'a>(text: &'a str, options: &DotOptions) -> Cow<'a, str> {
    if options.escape_labels && text.contains(['\\', '"']) {
        Cow::Owned(text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy_parser::parse_policy;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_empty_graph() {
        assert_eq!(render(&PolicyGraph::default()), "digraph G {\n}");
    }

    #[test]
    fn render_nodes_then_edges() {
        let graph = parse_policy("# Access\n- Use MFA\n");
        let expected = "\
digraph G {
  \"section-1\" [label=\"Access\"];
  \"rule-1\" [label=\"Use MFA\"];
  \"section-1\" -> \"rule-1\" [label=\"contains\"];
}";
        assert_eq!(render(&graph), expected);
    }

    #[test]
    fn render_leaves_quotes_unescaped_by_default() {
        let graph = parse_policy("- say \"hi\"\n");
        let output = render(&graph);
        assert!(output.contains("[label=\"say \"hi\"\"];"), "got: {output}");
    }

    #[test]
    fn render_escapes_when_asked() {
        let graph = parse_policy("- say \"hi\" \\ bye\n");
        let options = DotOptions {
            escape_labels: true,
        };
        let output = render_with_options(&graph, &options);
        assert!(
            output.contains(r#"[label="say \"hi\" \\ bye"];"#),
            "got: {output}"
        );
    }

    #[test]
    fn render_has_no_trailing_newline() {
        let output = render(&parse_policy("# A\n"));
        assert!(output.ends_with('}'));
        assert!(!output.ends_with('\n'));
    }
}
