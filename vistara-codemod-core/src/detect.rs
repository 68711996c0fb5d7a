// directory scanning and the hardcoded-values report

use crate::catalog::PatternKind;
use crate::error::CodemodError;
use crate::scanner::{scan, Finding};
use crate::utils::{read_source, relative_display, source_files};
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

const REPORT_TITLE: &str = "🔍 Vistara UI - Hardcoded Values Detection Report";

const QUICK_FIXES: [&str; 4] = [
    "Replace hex colors with CSS variables from tokens.css",
    "Replace pixel values with spacing tokens",
    "Replace Tailwind classes with style objects using CSS variables",
    "Use the normalizeStyle() utility for automatic conversion",
];

/// scan one file, naming findings by their path relative to `root`
pub fn scan_file(path: &Path, root: &Path) -> Result<Vec<Finding>> {
    let content = read_source(path)?;
    Ok(scan(&content, &relative_display(root, path)))
}

/// scan every matching file under `root`, in path order
pub fn scan_directory<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Result<Vec<Finding>> {
    if !root.exists() {
        return Err(CodemodError::PathNotFound(root.to_path_buf()).into());
    }

    let mut findings = Vec::new();
    for path in source_files(root, extensions)? {
        findings.extend(scan_file(&path, root)?);
    }
    Ok(findings)
}

#[derive(Debug, Clone, Serialize)]
pub struct FileGroup {
    pub file: String,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub count: usize,
}

/// findings grouped by file and by pattern kind, both in first-seen order
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total: usize,
    pub files: Vec<FileGroup>,
    pub kinds: Vec<KindCount>,
}

impl Report {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut by_file: IndexMap<&str, Vec<Finding>> = IndexMap::new();
        let mut by_kind: IndexMap<PatternKind, usize> = IndexMap::new();

        for finding in findings {
            by_file
                .entry(finding.file.as_str())
                .or_default()
                .push(finding.clone());
            *by_kind.entry(finding.kind).or_insert(0) += 1;
        }

        Self {
            total: findings.len(),
            files: by_file
                .into_iter()
                .map(|(file, findings)| FileGroup {
                    file: file.to_string(),
                    findings,
                })
                .collect(),
            kinds: by_kind
                .into_iter()
                .map(|(kind, count)| KindCount { kind, count })
                .collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    /// 0 when clean, 1 when anything needs fixing
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// human readable report
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(REPORT_TITLE);
        out.push('\n');
        out.push_str(&"=".repeat(50));
        out.push('\n');

        if self.is_clean() {
            out.push_str("✅ No hardcoded values found! Your code is clean.\n");
            return out;
        }

        out.push_str(&format!(
            "⚠️  Found {} hardcoded values that should use CSS variables:\n\n",
            self.total
        ));

        for group in &self.files {
            out.push_str(&format!("📁 {}:\n", group.file));
            for finding in &group.findings {
                out.push_str(&format!(
                    "   Line {}: {} → {}\n",
                    finding.line, finding.value, finding.suggestion
                ));
            }
            out.push('\n');
        }

        out.push_str("\n📊 Summary by type:\n");
        for kind in &self.kinds {
            out.push_str(&format!("   {}: {} issues\n", kind.kind, kind.count));
        }

        out.push_str("\n💡 Quick fixes:\n");
        for (index, hint) in QUICK_FIXES.iter().enumerate() {
            out.push_str(&format!("   {}. {}\n", index + 1, hint));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn finding(file: &str, kind: PatternKind, value: &str) -> Finding {
        Finding {
            file: file.to_string(),
            line: 1,
            kind,
            value: value.to_string(),
            suggestion: "s".to_string(),
        }
    }

    #[test]
    fn test_missing_root_fails_before_scanning() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let error = scan_directory(&missing, &[".js"]).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CodemodError>(),
            Some(CodemodError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_same_name_in_different_folders_stays_distinct() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/Card.jsx"), "gap: 8px").unwrap();
        fs::write(root.join("b/Card.jsx"), "gap: 8px").unwrap();

        let findings = scan_directory(root, &[".jsx"]).unwrap();
        let report = Report::from_findings(&findings);
        let files: Vec<&str> = report.files.iter().map(|g| g.file.as_str()).collect();
        assert_eq!(files, vec!["a/Card.jsx", "b/Card.jsx"]);
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let findings = vec![
            finding("b.js", PatternKind::PixelValues, "3px"),
            finding("a.js", PatternKind::HexColors, "#123"),
            finding("b.js", PatternKind::HexColors, "#456"),
        ];
        let report = Report::from_findings(&findings);

        let files: Vec<(&str, usize)> = report
            .files
            .iter()
            .map(|g| (g.file.as_str(), g.findings.len()))
            .collect();
        assert_eq!(files, vec![("b.js", 2), ("a.js", 1)]);
        assert_eq!(
            report.kinds,
            vec![
                KindCount { kind: PatternKind::PixelValues, count: 1 },
                KindCount { kind: PatternKind::HexColors, count: 2 },
            ]
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_render_lists_findings_summary_and_hints() {
        let findings = scan("color: #6c5ce7;", "Badge.jsx");
        let rendered = Report::from_findings(&findings).render();

        assert!(rendered.contains("Found 1 hardcoded values"));
        assert!(rendered.contains("📁 Badge.jsx:\n   Line 1: #6c5ce7 → var(--color-primary)\n"));
        assert!(rendered.contains("   hexColors: 1 issues\n"));
        assert!(rendered.contains("   4. Use the normalizeStyle() utility for automatic conversion\n"));
    }

    #[test]
    fn test_report_serializes_kind_names() {
        let report = Report::from_findings(&[finding("a.js", PatternKind::RemValues, "2rem")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kinds"][0]["type"], "remValues");
        assert_eq!(json["files"][0]["findings"][0]["type"], "remValues");
    }
}
