use winnow::prelude::*;
use winnow::combinator::alt;
use winnow::token::{one_of, rest, take_while};

use crate::policy_ast::*;

/// Builds the section/rule graph for a policy document.
///
/// Every input is valid: lines that are neither headings nor bullets become
/// rules, blank lines are skipped.
pub fn parse_policy(input: &str) -> PolicyGraph {
    let mut builder = GraphBuilder::default();
    for raw in input.split(is_line_break) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        builder.push(classify(line));
    }

    let graph = builder.finish();
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "parsed policy"
    );
    graph
}

/// Lone `\r` and the Unicode paragraph/line separators also end a line. The
/// empty piece between the halves of `\r\n` is dropped as a blank line.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[derive(Debug, PartialEq)]
enum PolicyLine<'s> {
    Heading { level: usize, title: &'s str },
    Bullet(&'s str),
    Statement(&'s str),
}

fn classify(line: &str) -> PolicyLine<'_> {
    let mut input = line;
    // `statement` accepts any remainder, so the alternation never fails.
    policy_line(&mut input).unwrap_or(PolicyLine::Statement(line))
}

fn policy_line<'s>(input: &mut &'s str) -> winnow::Result<PolicyLine<'s>> {
    alt((heading, bullet, statement)).parse_next(input)
}

fn heading<'s>(input: &mut &'s str) -> winnow::Result<PolicyLine<'s>> {
    let marks: &str = take_while(1.., '#').parse_next(input)?;
    let title: &str = rest.parse_next(input)?;
    Ok(PolicyLine::Heading {
        level: marks.len(),
        title: title.trim(),
    })
}

fn bullet<'s>(input: &mut &'s str) -> winnow::Result<PolicyLine<'s>> {
    one_of(['-', '*']).parse_next(input)?;
    take_while(0.., |c: char| c == '-' || c == '*' || c.is_whitespace()).parse_next(input)?;
    let label: &str = rest.parse_next(input)?;
    Ok(PolicyLine::Bullet(label))
}

fn statement<'s>(input: &mut &'s str) -> winnow::Result<PolicyLine<'s>> {
    rest.map(PolicyLine::Statement).parse_next(input)
}

#[derive(Default)]
struct GraphBuilder {
    graph: PolicyGraph,
    sections: usize,
    rules: usize,
    current_section: Option<String>,
}

impl GraphBuilder {
    fn push(&mut self, line: PolicyLine<'_>) {
        match line {
            PolicyLine::Heading { level, title } => self.add_section(title, level),
            PolicyLine::Bullet(label) | PolicyLine::Statement(label) => self.add_rule(label),
        }
    }

    fn add_section(&mut self, title: &str, level: usize) {
        self.sections += 1;
        let id = format!("section-{}", self.sections);
        self.graph.nodes.push(Node {
            id: id.clone(),
            label: title.to_string(),
            kind: NodeKind::Section,
            level: Some(level),
        });
        self.current_section = Some(id);
    }

    fn add_rule(&mut self, label: &str) {
        self.rules += 1;
        let id = format!("rule-{}", self.rules);
        if let Some(section) = &self.current_section {
            self.graph.edges.push(Edge {
                from: section.clone(),
                to: id.clone(),
                label: CONTAINS.to_string(),
            });
        }
        self.graph.nodes.push(Node {
            id,
            label: label.to_string(),
            kind: NodeKind::Rule,
            level: None,
        });
    }

    fn finish(self) -> PolicyGraph {
        self.graph
    }
}
