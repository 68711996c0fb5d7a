// auto-conversion - rewrites hardcoded literals and utility classes in place

use crate::catalog::{catalog, style_for_class};
use crate::error::CodemodError;
use crate::utils::{read_source, relative_display, source_files};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

const NORMALIZE_IMPORT: &str = "import { normalizeStyle } from '../utils/normalizeStyle';";

lazy_static! {
    static ref CLASS_ATTRIBUTE: Regex = Regex::new(r#"className=(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref REACT_IMPORT: Regex = Regex::new(r"import React[^;]*;").unwrap();
}

/// one edit made (or proposed) by the converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum Change {
    Token { from: String, to: String },
    ClassAttribute { from: String, to: String },
    ManualReview { attribute: String },
    ImportAdded,
}

impl Change {
    /// true when the change alters the text
    pub fn is_edit(&self) -> bool {
        !matches!(self, Change::ManualReview { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Token { from, to } => write!(f, "{from} → {to}"),
            Change::ClassAttribute { from, to } => write!(f, "{from} → {to}"),
            Change::ManualReview { attribute } => write!(f, "needs manual conversion: {attribute}"),
            Change::ImportAdded => write!(f, "added normalizeStyle import"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub content: String,
    pub changes: Vec<Change>,
}

impl Conversion {
    pub fn has_edits(&self) -> bool {
        self.changes.iter().any(Change::is_edit)
    }
}

/// convert literals and utility classes in a source text.
///
/// only token-table literals are replaced, always at whole-literal boundaries.
/// running the converter over its own output changes nothing.
pub fn convert_source(content: &str) -> Conversion {
    let mut changes = Vec::new();
    let mut converted = content.to_string();

    for pattern in catalog().iter().filter(|p| p.is_token_table()) {
        converted = pattern
            .rule
            .replace_all(&converted, |caps: &Captures| {
                let literal = &caps[0];
                match pattern.token_for(literal) {
                    Some(token) => {
                        push_unique(
                            &mut changes,
                            Change::Token {
                                from: literal.to_string(),
                                to: token.to_string(),
                            },
                        );
                        token.to_string()
                    }
                    None => literal.to_string(),
                }
            })
            .into_owned();
    }

    converted = convert_class_attributes(&converted, &mut changes);

    let edited = changes.iter().any(Change::is_edit);
    if edited && !converted.contains("normalizeStyle") {
        if let Some(import) = REACT_IMPORT.find(&converted) {
            converted.insert_str(import.end(), &format!("\n{NORMALIZE_IMPORT}"));
            changes.push(Change::ImportAdded);
        }
    }

    Conversion {
        content: converted,
        changes,
    }
}

fn convert_class_attributes(content: &str, changes: &mut Vec<Change>) -> String {
    CLASS_ATTRIBUTE
        .replace_all(content, |caps: &Captures| {
            let attribute = caps[0].to_string();
            let classes = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();

            let start = caps.get(0).map(|m| m.start()).unwrap_or_default();
            let has_style = opening_tag_around(content, start).contains("style=");

            match style_object_for(classes) {
                Some(style) if !has_style => {
                    changes.push(Change::ClassAttribute {
                        from: attribute,
                        to: style.clone(),
                    });
                    style
                }
                _ => {
                    if classes.split_whitespace().any(|c| style_for_class(c).is_some()) {
                        push_unique(changes, Change::ManualReview { attribute: attribute.clone() });
                    }
                    attribute
                }
            }
        })
        .into_owned()
}

// a style attribute, only when every class has a clean translation
fn style_object_for(classes: &str) -> Option<String> {
    let mut properties = Vec::new();
    for class in classes.split_whitespace() {
        for (property, value) in style_for_class(class)? {
            properties.push(format!("{property}: '{value}'"));
        }
    }
    if properties.is_empty() {
        return None;
    }
    Some(format!("style={{{{ {} }}}}", properties.join(", ")))
}

// the opening tag holding `offset`: back to the nearest `<`, forward to the
// first `>` outside quotes and `{...}` expressions
fn opening_tag_around(content: &str, offset: usize) -> &str {
    let start = content[..offset].rfind('<').unwrap_or(0);
    let mut end = content.len();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (index, c) in content[offset..].char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => {
                    end = offset + index + 1;
                    break;
                }
                _ => {}
            },
        }
    }
    &content[start..end]
}

fn push_unique(changes: &mut Vec<Change>, change: Change) {
    if !changes.contains(&change) {
        changes.push(change);
    }
}

/// per-file result of a directory conversion
#[derive(Debug, Clone, Serialize)]
pub struct FileConversion {
    pub file: String,
    pub changes: Vec<Change>,
}

/// convert every matching file under `root`; nothing is written on a dry run
pub fn convert_directory<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    dry_run: bool,
) -> Result<Vec<FileConversion>> {
    if !root.exists() {
        return Err(CodemodError::PathNotFound(root.to_path_buf()).into());
    }

    let mut results = Vec::new();
    for path in source_files(root, extensions)? {
        let original = read_source(&path)?;
        let conversion = convert_source(&original);
        if conversion.changes.is_empty() {
            continue;
        }

        if !dry_run && conversion.has_edits() {
            fs::write(&path, &conversion.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        results.push(FileConversion {
            file: relative_display(root, &path),
            changes: conversion.changes,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_replaces_whole_literals_only() {
        let conversion = convert_source("padding: 4px; font-size: 14px; gap: 7px;");
        assert_eq!(
            conversion.content,
            "padding: var(--space-1); font-size: var(--font-size-sm); gap: 7px;"
        );
        assert_eq!(
            conversion.changes,
            vec![
                Change::Token { from: "4px".into(), to: "var(--space-1)".into() },
                Change::Token { from: "14px".into(), to: "var(--font-size-sm)".into() },
            ]
        );
    }

    #[test]
    fn test_converts_hex_in_any_case() {
        let conversion = convert_source("color: '#FDCB6E'");
        assert_eq!(conversion.content, "color: 'var(--color-warning)'");
    }

    #[test]
    fn test_rewrites_fully_known_class_attribute() {
        let source = "import React from 'react';\nconst A = () => <div className=\"flex p-4 text-white\" />;";
        let conversion = convert_source(source);
        assert_eq!(
            conversion.content,
            "import React from 'react';\nimport { normalizeStyle } from '../utils/normalizeStyle';\n\
             const A = () => <div style={{ display: 'flex', padding: 'var(--space-4)', color: 'var(--color-text-inverse)' }} />;"
        );
        assert_eq!(conversion.changes.last(), Some(&Change::ImportAdded));
    }

    #[test]
    fn test_partially_known_classes_are_left_for_review() {
        let source = "<div className='flex animate-spin' />";
        let conversion = convert_source(source);
        assert_eq!(conversion.content, source);
        assert!(!conversion.has_edits());
        assert_eq!(
            conversion.changes,
            vec![Change::ManualReview { attribute: "className='flex animate-spin'".into() }]
        );
    }

    #[test]
    fn test_existing_style_attribute_blocks_rewrite() {
        let source = "<div className=\"flex\" style={{ top: 0 }} />";
        assert_eq!(convert_source(source).content, source);
    }

    #[test]
    fn test_style_attribute_on_a_later_line_blocks_rewrite() {
        let source = "<div\n  className=\"flex p-4\"\n  onClick={() => setOpen(a > b)}\n  style={{ top: 0 }}\n/>";
        let conversion = convert_source(source);

        assert_eq!(conversion.content, source);
        assert_eq!(conversion.content.matches("style=").count(), 1);
        assert_eq!(
            conversion.changes,
            vec![Change::ManualReview {
                attribute: "className=\"flex p-4\"".to_string()
            }]
        );
    }

    #[test]
    fn test_style_on_a_sibling_element_does_not_block_rewrite() {
        let conversion = convert_source("<p className=\"flex\" /><div style={{ top: 0 }} />");
        assert_eq!(
            conversion.content,
            "<p style={{ display: 'flex' }} /><div style={{ top: 0 }} />"
        );
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let source = "import React, { useState } from 'react';\n\
                      const s = { color: '#6c5ce7', margin: '16px', radius: '0.5rem', bg: 'rgb(0, 0, 0)' };\n\
                      const B = () => <p className=\"text-sm font-bold\">hi</p>;";
        let once = convert_source(source);
        let twice = convert_source(&once.content);
        assert_eq!(twice.content, once.content);
        assert!(twice.changes.is_empty());
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Box.jsx");
        fs::write(&file, "const s = { gap: '8px' };").unwrap();

        let results = convert_directory(temp_dir.path(), &[".jsx"], true).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file, "Box.jsx");
        assert_eq!(fs::read_to_string(&file).unwrap(), "const s = { gap: '8px' };");

        convert_directory(temp_dir.path(), &[".jsx"], false).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "const s = { gap: 'var(--space-2)' };");
    }
}
