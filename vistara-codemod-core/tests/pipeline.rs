use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use vistara_codemod_core::batch::{BatchMigrator, JsonFileRepository, MapRepository, MigrationStatus};
use vistara_codemod_core::catalog::PatternKind;
use vistara_codemod_core::config::BatchConfig;
use vistara_codemod_core::utils::DEFAULT_EXTENSIONS;
use vistara_codemod_core::{build_component_map, convert_directory, scan_directory, Report, TemplateMigrator};

#[test]
fn empty_directory_is_clean() {
    let temp_dir = TempDir::new().unwrap();
    let findings = scan_directory(temp_dir.path(), &DEFAULT_EXTENSIONS).unwrap();
    let report = Report::from_findings(&findings);

    assert!(report.is_clean());
    assert_eq!(report.exit_code(), 0);
    assert!(report.render().contains("No hardcoded values found"));
}

#[test]
fn missing_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(scan_directory(&temp_dir.path().join("nope"), &DEFAULT_EXTENSIONS).is_err());
}

#[test]
fn report_groups_by_file_and_kind() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("cards")).unwrap();
    fs::write(
        temp_dir.path().join("cards/Card.jsx"),
        "const styles = {\n  color: '#6c5ce7',\n  background: '#ffffff',\n  padding: '16px',\n};\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("cards/notes.md"), "#6c5ce7 and 16px").unwrap();

    let findings = scan_directory(temp_dir.path(), &DEFAULT_EXTENSIONS).unwrap();
    let report = Report::from_findings(&findings);

    assert_eq!(report.total, 3);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].file, "cards/Card.jsx");

    let kinds: Vec<(PatternKind, usize)> = report.kinds.iter().map(|k| (k.kind, k.count)).collect();
    assert_eq!(kinds, vec![(PatternKind::HexColors, 2), (PatternKind::PixelValues, 1)]);

    let lines: Vec<usize> = report.files[0].findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert_eq!(report.files[0].findings[0].suggestion, "var(--color-primary)");

    let rendered = report.render();
    assert!(rendered.contains("📁 cards/Card.jsx:"));
    assert!(rendered.contains("   Line 4: 16px → var(--space-4)"));
}

#[test]
fn converted_tree_scans_clean_for_token_literals() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("Badge.tsx");
    fs::write(&file, "const badge = { color: '#FFF', margin: '8px', borderRadius: '0.5rem' };\n").unwrap();

    let dry = convert_directory(temp_dir.path(), &DEFAULT_EXTENSIONS, true).unwrap();
    assert_eq!(dry.len(), 1);
    assert!(fs::read_to_string(&file).unwrap().contains("'#FFF'"));

    convert_directory(temp_dir.path(), &DEFAULT_EXTENSIONS, false).unwrap();
    let converted = fs::read_to_string(&file).unwrap();
    assert!(converted.contains("var(--color-white)"));
    assert!(converted.contains("var(--space-2)"));
    assert!(converted.contains("var(--border-radius-md)"));

    let findings = scan_directory(temp_dir.path(), &DEFAULT_EXTENSIONS).unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn inventory_then_batch_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let legacy = temp_dir.path().join("legacy");
    fs::create_dir_all(legacy.join("forms")).unwrap();
    fs::create_dir_all(legacy.join("layout")).unwrap();
    fs::write(
        legacy.join("forms/SearchBox.jsx"),
        "import { useState } from 'react';\n\
         export const SearchBox = () => {\n  const [q, setQ] = useState('');\n  \
         return <input className=\"p-2 text-gray-400\" value={q} />;\n};\n",
    )
    .unwrap();
    fs::write(
        legacy.join("layout/Footer.jsx"),
        "const Footer = () => {\n  return <footer />;\n};\nexport default Footer;\n",
    )
    .unwrap();

    let map_file = temp_dir.path().join("components-map.json");
    let repository = JsonFileRepository::new(&map_file, temp_dir.path().join("logs"));
    repository.save(&build_component_map(&legacy).unwrap()).unwrap();

    let config = BatchConfig {
        source_base: legacy.clone(),
        target_base: temp_dir.path().join("vistara"),
        map_file: map_file.clone(),
        log_dir: temp_dir.path().join("logs"),
        throttle_ms: 0,
        ..BatchConfig::default()
    };
    let mut migrator = BatchMigrator::new(repository, TemplateMigrator, config).unwrap();

    // SearchBox carries more features, so it is scheduled first
    let batch = migrator.select_batch(1);
    assert_eq!(batch[0].name, "SearchBox");
    let log_path = migrator.migrate_entries(&batch).await.unwrap();

    let migrated = temp_dir.path().join("vistara/forms/SearchBox.jsx");
    assert!(fs::read_to_string(&migrated).unwrap().contains("useState"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&map_file).unwrap()).unwrap();
    let names: Vec<&String> = saved["components"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["SearchBox", "Footer"]);
    assert_eq!(saved["components"]["SearchBox"]["migrationStatus"], "completed");
    assert_eq!(saved["components"]["SearchBox"]["cssSystem"], "tailwind");
    assert_eq!(saved["components"]["Footer"]["migrationStatus"], "pending");
    assert_eq!(saved["meta"]["totalComponents"], json!(2));

    let log: Value = serde_json::from_str(&fs::read_to_string(&log_path).unwrap()).unwrap();
    assert_eq!(log["successful"][0]["name"], "SearchBox");
    assert_eq!(log["failed"], json!([]));

    let reloaded = JsonFileRepository::new(&map_file, temp_dir.path()).load().unwrap();
    assert_eq!(reloaded.components["SearchBox"].migration_status, MigrationStatus::Completed);
    assert_eq!(reloaded.completed(), 1);
}
