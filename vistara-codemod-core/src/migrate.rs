// component migration - scaffolds a token-styled component shell from a legacy file

use crate::utils::read_source;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref ICON_LIBRARY: Regex = Regex::new(r"lucide-react|react-icons").unwrap();
    static ref STATE_HOOKS: Regex = Regex::new(r"useState|useReducer").unwrap();
    static ref EFFECT_HOOKS: Regex = Regex::new(r"useEffect").unwrap();
    static ref CLASS_ATTRIBUTE: Regex = Regex::new(r#"className=["'][^"']*["']"#).unwrap();
}

/// what the legacy component relies on, detected from its raw text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub uses_icons: bool,
    pub uses_state: bool,
    pub uses_effects: bool,
}

pub fn detect_feature_flags(source: &str) -> FeatureFlags {
    FeatureFlags {
        uses_icons: ICON_LIBRARY.is_match(source),
        uses_state: STATE_HOOKS.is_match(source),
        uses_effects: EFFECT_HOOKS.is_match(source),
    }
}

/// every literal `className="..."` attribute, for manual review
pub fn class_attributes(source: &str) -> Vec<String> {
    CLASS_ATTRIBUTE
        .find_iter(source)
        .map(|m| m.as_str().to_string())
        .collect()
}

const COMPONENT_TEMPLATE: &str = r#"/**
 * Vistara UI - __NAME__ Component
 * "Command your Design."
 *
 * Migrated from TitanMind with CSS Variables styling
 * Original: __ORIGIN__
 */

import React__REACT_HOOKS__ from 'react';
__ICON_IMPORT__import { normalizeStyle, withNormalizedStyles } from '../../utils/normalizeStyle';

const __NAME__ = ({
  size = 'normal', // 'compact', 'normal', 'expanded'
  theme = 'default', // 'default', 'minimal', 'detailed'
  className,
  style,
  ...props
}) => {
__STATE__  const sizeConfigs = {
    compact: {
      padding: 'var(--space-3)',
      gap: 'var(--space-2)',
      iconSize: '16px',
      fontSize: 'var(--font-size-sm)'
    },
    normal: {
      padding: 'var(--space-4)',
      gap: 'var(--space-3)',
      iconSize: '20px',
      fontSize: 'var(--font-size-base)'
    },
    expanded: {
      padding: 'var(--space-6)',
      gap: 'var(--space-4)',
      iconSize: '24px',
      fontSize: 'var(--font-size-lg)'
    }
  };

  const config = sizeConfigs[size] || sizeConfigs.normal;
__EFFECTS__
  const containerStyles = normalizeStyle({
    backgroundColor: 'var(--color-surface)',
    borderRadius: 'var(--border-radius-lg)',
    boxShadow: 'var(--shadow-lg)',
    padding: config.padding,
    display: 'flex',
    flexDirection: 'column',
    gap: config.gap,
    ...style
  });

  return (
    <div className={`vistara-component vistara-theme-${theme} ${className || ''}`} style={containerStyles} {...props}>
      {/* TODO: Migrate component content here */}
      <div data-migrated="true" style={normalizeStyle({
        fontSize: config.fontSize,
        color: 'var(--color-text-primary)'
      })}>
        __NAME__ - Migrated to Vistara UI
      </div>
    </div>
  );
};

export default withNormalizedStyles(__NAME__);
"#;

/// render the component shell. pure: same inputs, same text
pub fn render_component(name: &str, original_path: &str, flags: FeatureFlags) -> String {
    let hooks: Vec<&str> = [
        (flags.uses_state, "useState"),
        (flags.uses_effects, "useEffect"),
    ]
    .iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, hook)| *hook)
    .collect();

    let react_hooks = if hooks.is_empty() {
        String::new()
    } else {
        format!(", {{ {} }}", hooks.join(", "))
    };

    let icon_import = if flags.uses_icons {
        "import { /* Add required icons */ } from 'lucide-react';\n"
    } else {
        ""
    };

    let state = if flags.uses_state {
        "  const [state, setState] = useState(null);\n\n"
    } else {
        ""
    };

    let effects = if flags.uses_effects {
        "\n  useEffect(() => {\n    // Add effects logic here\n  }, []);\n"
    } else {
        ""
    };

    COMPONENT_TEMPLATE
        .replace("__REACT_HOOKS__", &react_hooks)
        .replace("__ICON_IMPORT__", icon_import)
        .replace("__STATE__", state)
        .replace("__EFFECTS__", effects)
        .replace("__ORIGIN__", original_path)
        .replace("__NAME__", name)
}

/// outcome of one successful migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedComponent {
    pub destination: PathBuf,
    pub flags: FeatureFlags,
    pub class_hints: Vec<String>,
}

/// seam between the batch orchestrator and the file system
pub trait ComponentMigrator {
    fn migrate(&self, source: &Path, destination: &Path, name: &str) -> Result<MigratedComponent>;
}

/// reads the legacy file and writes the rendered template, overwriting the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateMigrator;

impl ComponentMigrator for TemplateMigrator {
    fn migrate(&self, source: &Path, destination: &Path, name: &str) -> Result<MigratedComponent> {
        let content = read_source(source)?;
        let flags = detect_feature_flags(&content);
        let rendered = render_component(name, &source.display().to_string(), flags);

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        fs::write(destination, rendered)
            .with_context(|| format!("failed to write {}", destination.display()))?;

        Ok(MigratedComponent {
            destination: destination.to_path_buf(),
            flags,
            class_hints: class_attributes(&content),
        })
    }
}
