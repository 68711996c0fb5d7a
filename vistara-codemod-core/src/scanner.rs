// hardcoded value scanner - finds cataloged literals in raw source text

use crate::catalog::{catalog, PatternKind};
use serde::Serialize;

/// one occurrence of a hardcoded literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub value: String,
    pub suggestion: String,
}

/// scan source text for every cataloged literal.
///
/// patterns are visited in catalog order and matches in text order. the line
/// reported is the first line containing the literal text, so a literal
/// repeated further down reports the line of its first appearance.
pub fn scan(content: &str, file: &str) -> Vec<Finding> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut findings = Vec::new();

    for pattern in catalog() {
        for found in pattern.find_iter(content) {
            let value = found.as_str();
            let line = first_line_containing(&lines, value)
                .unwrap_or_else(|| line_at_offset(content, found.start()));

            findings.push(Finding {
                file: file.to_string(),
                line,
                kind: pattern.kind,
                value: value.to_string(),
                suggestion: pattern.suggestion_for(value),
            });
        }
    }

    findings
}

fn first_line_containing(lines: &[&str], literal: &str) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.contains(literal))
        .map(|index| index + 1)
}

// literals spanning a line break (rgb(...) split over lines) have no single line
fn line_at_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
