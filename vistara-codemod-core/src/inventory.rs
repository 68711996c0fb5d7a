// component inventory - builds the component map from a legacy source tree

use crate::batch::{ComponentMap, ComponentRecord, Complexity, MigrationStatus, Priority};
use crate::error::CodemodError;
use crate::utils::{read_source, relative_display, source_files};
use anyhow::Result;
use chrono::Utc;
use console::style;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

const INVENTORY_EXTENSIONS: [&str; 2] = [".jsx", ".js"];

/// directory names that carry over as record categories
const KNOWN_CATEGORIES: [&str; 11] = [
    "common",
    "features",
    "pages",
    "layout",
    "settings",
    "forms",
    "icons",
    "interaction",
    "monitoring",
    "tasks",
    "dashboard",
];

// react's own hooks don't count as custom hooks
const BUILTIN_HOOKS: [&str; 9] = [
    "useState",
    "useEffect",
    "useReducer",
    "useContext",
    "useRef",
    "useMemo",
    "useCallback",
    "useLayoutEffect",
    "useId",
];

lazy_static! {
    static ref DECLARATIONS: [Regex; 3] = [
        Regex::new(r"(?:const|function)\s+(\w+)\s*=?\s*(?:\([^)]*\)|[^=]*)\s*=>\s*\{").unwrap(),
        Regex::new(r"class\s+(\w+)\s+extends\s+(?:React\.)?Component").unwrap(),
        Regex::new(r"export\s+(?:default\s+)?(?:const|function|class)\s+(\w+)").unwrap(),
    ];
    static ref TAILWIND_CLASSES: Regex =
        Regex::new(r#"className=["'][^"']*(?:w-|h-|p-|m-|text-|bg-|border-|flex|grid)"#).unwrap();
    static ref STATE: Regex = Regex::new(r"useState|useReducer|this\.state").unwrap();
    static ref EFFECTS: Regex = Regex::new(r"useEffect|componentDidMount|componentDidUpdate").unwrap();
    static ref CONTEXT: Regex = Regex::new(r"useContext|Context\.Consumer").unwrap();
    static ref HOOK_CALL: Regex = Regex::new(r"\buse[A-Z]\w+").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFeatures {
    pub lines: usize,
    pub has_tailwind: bool,
    pub has_state: bool,
    pub has_effects: bool,
    pub has_context: bool,
    pub has_custom_hooks: bool,
}

impl ComponentFeatures {
    pub fn detect(content: &str) -> Self {
        Self {
            lines: content.split('\n').count(),
            has_tailwind: TAILWIND_CLASSES.is_match(content),
            has_state: STATE.is_match(content),
            has_effects: EFFECTS.is_match(content),
            has_context: CONTEXT.is_match(content),
            has_custom_hooks: HOOK_CALL
                .find_iter(content)
                .any(|hook| !BUILTIN_HOOKS.contains(&hook.as_str())),
        }
    }

    /// size counts up to two points, every feature one
    pub fn score(&self) -> u32 {
        let size = if self.lines > 500 {
            2
        } else if self.lines > 200 {
            1
        } else {
            0
        };
        let features = [
            self.has_state,
            self.has_effects,
            self.has_context,
            self.has_custom_hooks,
            self.has_tailwind,
        ];
        size + features.iter().filter(|present| **present).count() as u32
    }

    pub fn complexity(&self) -> Complexity {
        match self.score() {
            score if score >= 4 => Complexity::Complex,
            score if score >= 2 => Complexity::Medium,
            _ => Complexity::Simple,
        }
    }
}

/// declared component names, in pattern order then text order, without duplicates
pub fn component_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for pattern in DECLARATIONS.iter() {
        for caps in pattern.captures_iter(content) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if name != "default" && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}

/// the parent folder when it is a known category, `other` otherwise
pub fn category_for(path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| KNOWN_CATEGORIES.contains(&name.as_str()))
        .unwrap_or_else(|| "other".to_string())
}

fn is_auxiliary(file_name: &str) -> bool {
    file_name.contains(".test.") || file_name.contains(".stories.")
}

/// build a record for one legacy component file
pub fn inspect_component(path: &Path, root: &Path, content: &str) -> (String, ComponentRecord) {
    let file_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let declared = component_names(content);
    let name = declared.first().cloned().unwrap_or_else(|| file_name.clone());
    let features = ComponentFeatures::detect(content);
    let complexity = features.complexity();

    let components = if declared.is_empty() { vec![name.clone()] } else { declared };
    let css_system = if features.has_tailwind { "tailwind" } else { "css-modules" };

    let mut extra = Map::new();
    extra.insert("name".to_string(), json!(name));
    extra.insert("features".to_string(), json!(features));
    extra.insert("components".to_string(), json!(components));
    extra.insert("cssSystem".to_string(), json!(css_system));

    let record = ComponentRecord {
        path: relative_display(root, path),
        category: category_for(path),
        file_name,
        priority: Priority::for_complexity(complexity),
        complexity,
        migration_status: MigrationStatus::Pending,
        vistara_path: None,
        extra,
    };
    (name, record)
}

/// walk `root` and map every component file, all pending.
///
/// a later file declaring an already seen name replaces the earlier record.
pub fn build_component_map(root: &Path) -> Result<ComponentMap> {
    if !root.exists() {
        return Err(CodemodError::PathNotFound(root.to_path_buf()).into());
    }

    let paths = source_files(root, &INVENTORY_EXTENSIONS)?;
    Ok(map_components(root, &paths))
}

// unreadable files are reported and left out
fn map_components(root: &Path, paths: &[PathBuf]) -> ComponentMap {
    let mut map = ComponentMap::default();
    for path in paths {
        let is_aux = path
            .file_name()
            .map(|name| is_auxiliary(&name.to_string_lossy()))
            .unwrap_or(false);
        if is_aux {
            continue;
        }

        let content = match read_source(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "{} {}",
                    style(format!("❌ error processing {}:", path.display())).red(),
                    style(format!("{e:#}")).red()
                );
                continue;
            }
        };
        let (name, record) = inspect_component(path, root, &content);
        map.components.insert(name, record);
    }

    map.meta = summarize(&map);
    map
}

fn summarize(map: &ComponentMap) -> Value {
    let mut by_category: IndexMap<&str, Vec<&str>> = IndexMap::new();
    let mut by_complexity: IndexMap<&str, Vec<&str>> = [
        Complexity::Simple,
        Complexity::Medium,
        Complexity::Complex,
    ]
    .iter()
    .map(|c| (c.name(), Vec::new()))
    .collect();

    for (name, record) in &map.components {
        by_category.entry(&record.category).or_default().push(name);
        by_complexity
            .entry(record.complexity.name())
            .or_default()
            .push(name);
    }

    let mut order: Vec<(&String, &ComponentRecord)> = map.components.iter().collect();
    order.sort_by_key(|(_, record)| record.priority);

    json!({
        "scanDate": Utc::now().to_rfc3339(),
        "totalComponents": map.total(),
        "byCategory": by_category,
        "byComplexity": by_complexity,
        "migrationOrder": order.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
    })
}
