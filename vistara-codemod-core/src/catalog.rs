// pattern catalog - literal detection rules and the design tokens they map to

use lazy_static::lazy_static;
use regex::{Matches, Regex};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// suggestion used when a matched literal has no table entry
pub const FALLBACK_SUGGESTION: &str = "Use appropriate CSS variable";

/// categories of hardcoded literals, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternKind {
    #[serde(rename = "hexColors")]
    HexColors,
    #[serde(rename = "pixelValues")]
    PixelValues,
    #[serde(rename = "remValues")]
    RemValues,
    #[serde(rename = "tailwindColors")]
    TailwindColors,
    #[serde(rename = "rgbColors")]
    RgbColors,
    #[serde(rename = "rgbaColors")]
    RgbaColors,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::HexColors,
        PatternKind::PixelValues,
        PatternKind::RemValues,
        PatternKind::TailwindColors,
        PatternKind::RgbColors,
        PatternKind::RgbaColors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::HexColors => "hexColors",
            PatternKind::PixelValues => "pixelValues",
            PatternKind::RemValues => "remValues",
            PatternKind::TailwindColors => "tailwindColors",
            PatternKind::RgbColors => "rgbColors",
            PatternKind::RgbaColors => "rgbaColors",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Table = &'static [(&'static str, &'static str)];

const HEX_TOKENS: Table = &[
    ("#ffffff", "var(--color-white)"),
    ("#fff", "var(--color-white)"),
    ("#000000", "var(--color-black)"),
    ("#000", "var(--color-black)"),
    ("#6c5ce7", "var(--color-primary)"),
    ("#a29bfe", "var(--color-primary-light)"),
    ("#5f3dc4", "var(--color-primary-dark)"),
    ("#0984e3", "var(--color-secondary)"),
    ("#74b9ff", "var(--color-secondary-light)"),
    ("#00b894", "var(--color-success)"),
    ("#55efc4", "var(--color-success-light)"),
    ("#e17055", "var(--color-error)"),
    ("#fab1a0", "var(--color-error-light)"),
    ("#fdcb6e", "var(--color-warning)"),
    ("#ffeaa7", "var(--color-warning-light)"),
];

// spacing owns the shared steps; font sizes only claim the steps spacing leaves free
const PIXEL_TOKENS: Table = &[
    ("4px", "var(--space-1)"),
    ("8px", "var(--space-2)"),
    ("12px", "var(--space-3)"),
    ("16px", "var(--space-4)"),
    ("20px", "var(--space-5)"),
    ("24px", "var(--space-6)"),
    ("32px", "var(--space-8)"),
    ("40px", "var(--space-10)"),
    ("48px", "var(--space-12)"),
    ("64px", "var(--space-16)"),
    ("14px", "var(--font-size-sm)"),
    ("18px", "var(--font-size-lg)"),
    ("30px", "var(--font-size-3xl)"),
    ("36px", "var(--font-size-4xl)"),
];

const REM_TOKENS: Table = &[
    ("0.25rem", "var(--border-radius-sm)"),
    ("0.5rem", "var(--border-radius-md)"),
    ("0.75rem", "var(--border-radius-lg)"),
    ("1rem", "var(--border-radius-xl)"),
];

const RGB_TOKENS: Table = &[
    ("rgb(255,255,255)", "var(--color-white)"),
    ("rgb(0,0,0)", "var(--color-black)"),
    ("rgb(108,92,231)", "var(--color-primary)"),
];

// advice, not tokens: a class name has to become a style property first
const TAILWIND_ADVICE: Table = &[
    ("bg-gray-900", "backgroundColor: \"var(--color-background-primary)\""),
    ("bg-white", "backgroundColor: \"var(--color-white)\""),
    ("bg-blue-500", "backgroundColor: \"var(--color-primary)\""),
    ("text-white", "color: \"var(--color-text-inverse)\""),
    ("text-gray-400", "color: \"var(--color-text-muted)\""),
    ("text-gray-900", "color: \"var(--color-text-primary)\""),
];

/// utility classes that translate cleanly into style-object properties
pub const STYLE_CLASSES: &[(&str, &[(&str, &str)])] = &[
    ("bg-white", &[("backgroundColor", "var(--color-white)")]),
    ("bg-gray-50", &[("backgroundColor", "var(--color-gray-50)")]),
    ("bg-gray-100", &[("backgroundColor", "var(--color-gray-100)")]),
    ("bg-gray-200", &[("backgroundColor", "var(--color-gray-200)")]),
    ("bg-gray-900", &[("backgroundColor", "var(--color-background-primary)")]),
    ("bg-blue-500", &[("backgroundColor", "var(--color-primary)")]),
    ("bg-green-500", &[("backgroundColor", "var(--color-success)")]),
    ("bg-red-500", &[("backgroundColor", "var(--color-error)")]),
    ("bg-yellow-500", &[("backgroundColor", "var(--color-warning)")]),
    ("text-white", &[("color", "var(--color-text-inverse)")]),
    ("text-gray-900", &[("color", "var(--color-text-primary)")]),
    ("text-gray-600", &[("color", "var(--color-text-secondary)")]),
    ("text-gray-400", &[("color", "var(--color-text-muted)")]),
    ("text-blue-500", &[("color", "var(--color-primary)")]),
    ("text-green-500", &[("color", "var(--color-success)")]),
    ("text-red-500", &[("color", "var(--color-error)")]),
    ("p-1", &[("padding", "var(--space-1)")]),
    ("p-2", &[("padding", "var(--space-2)")]),
    ("p-3", &[("padding", "var(--space-3)")]),
    ("p-4", &[("padding", "var(--space-4)")]),
    ("p-6", &[("padding", "var(--space-6)")]),
    ("px-2", &[("paddingLeft", "var(--space-2)"), ("paddingRight", "var(--space-2)")]),
    ("px-4", &[("paddingLeft", "var(--space-4)"), ("paddingRight", "var(--space-4)")]),
    ("py-2", &[("paddingTop", "var(--space-2)"), ("paddingBottom", "var(--space-2)")]),
    ("py-4", &[("paddingTop", "var(--space-4)"), ("paddingBottom", "var(--space-4)")]),
    ("mt-2", &[("marginTop", "var(--space-2)")]),
    ("mt-4", &[("marginTop", "var(--space-4)")]),
    ("mb-2", &[("marginBottom", "var(--space-2)")]),
    ("mb-4", &[("marginBottom", "var(--space-4)")]),
    ("text-xs", &[("fontSize", "var(--font-size-xs)")]),
    ("text-sm", &[("fontSize", "var(--font-size-sm)")]),
    ("text-base", &[("fontSize", "var(--font-size-base)")]),
    ("text-lg", &[("fontSize", "var(--font-size-lg)")]),
    ("text-xl", &[("fontSize", "var(--font-size-xl)")]),
    ("font-medium", &[("fontWeight", "var(--font-weight-medium)")]),
    ("font-semibold", &[("fontWeight", "var(--font-weight-semibold)")]),
    ("font-bold", &[("fontWeight", "var(--font-weight-bold)")]),
    ("rounded", &[("borderRadius", "var(--border-radius-md)")]),
    ("rounded-lg", &[("borderRadius", "var(--border-radius-lg)")]),
    ("rounded-full", &[("borderRadius", "var(--border-radius-full)")]),
    ("shadow", &[("boxShadow", "var(--shadow-md)")]),
    ("shadow-lg", &[("boxShadow", "var(--shadow-lg)")]),
    ("flex", &[("display", "flex")]),
    ("grid", &[("display", "grid")]),
    ("items-center", &[("alignItems", "center")]),
    ("justify-center", &[("justifyContent", "center")]),
    ("justify-between", &[("justifyContent", "space-between")]),
    ("gap-2", &[("gap", "var(--space-2)")]),
    ("gap-4", &[("gap", "var(--space-4)")]),
    ("w-full", &[("width", "100%")]),
    ("h-full", &[("height", "100%")]),
];

/// one detection rule with its optional lookup table
pub struct Pattern {
    pub kind: PatternKind,
    pub rule: Regex,
    table: Table,
    tokens: bool,
}

impl Pattern {
    fn new(kind: PatternKind, rule: &str, table: Table, tokens: bool) -> Self {
        Self {
            kind,
            rule: Regex::new(rule).expect("catalog rules are valid regexes"),
            table,
            tokens,
        }
    }

    /// look a matched literal up in this pattern's table
    pub fn lookup(&self, literal: &str) -> Option<&'static str> {
        let key = canonical_key(self.kind, literal);
        self.table
            .iter()
            .find(|(candidate, _)| *candidate == key.as_ref())
            .map(|(_, replacement)| *replacement)
    }

    /// the token reference for a literal, if this table holds tokens at all
    pub fn token_for(&self, literal: &str) -> Option<&'static str> {
        if self.tokens { self.lookup(literal) } else { None }
    }

    pub fn suggestion_for(&self, literal: &str) -> String {
        self.lookup(literal)
            .unwrap_or(FALLBACK_SUGGESTION)
            .to_string()
    }

    pub fn is_token_table(&self) -> bool {
        self.tokens
    }

    /// the lookup table in canonical form, literal first
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.table
    }

    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.rule.find_iter(text)
    }
}

fn canonical_key(kind: PatternKind, literal: &str) -> Cow<'_, str> {
    match kind {
        PatternKind::HexColors => Cow::Owned(literal.to_ascii_lowercase()),
        PatternKind::RgbColors => Cow::Owned(literal.chars().filter(|c| !c.is_whitespace()).collect()),
        _ => Cow::Borrowed(literal),
    }
}

lazy_static! {
    static ref CATALOG: Vec<Pattern> = vec![
        Pattern::new(PatternKind::HexColors, r"#[0-9A-Fa-f]{3,6}\b", HEX_TOKENS, true),
        Pattern::new(PatternKind::PixelValues, r"\b\d+px\b", PIXEL_TOKENS, true),
        Pattern::new(PatternKind::RemValues, r"\b\d+(\.\d+)?rem\b", REM_TOKENS, true),
        Pattern::new(
            PatternKind::TailwindColors,
            r"\b(bg|text|border)-(white|black|red|blue|green|yellow|purple|gray|orange|pink|indigo)(-\d+)?\b",
            TAILWIND_ADVICE,
            false,
        ),
        Pattern::new(
            PatternKind::RgbColors,
            r"rgb\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*\)",
            RGB_TOKENS,
            true,
        ),
        Pattern::new(
            PatternKind::RgbaColors,
            r"rgba\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*,\s*[\d.]+\s*\)",
            &[],
            true,
        ),
    ];
}

/// all patterns, in catalog order
pub fn catalog() -> &'static [Pattern] {
    &CATALOG
}

pub fn pattern(kind: PatternKind) -> &'static Pattern {
    // catalog order mirrors the enum's declaration order
    &CATALOG[kind as usize]
}

/// resolve a whole style value against every token table
pub fn token_for_literal(value: &str) -> Option<&'static str> {
    catalog()
        .iter()
        .filter(|pattern| pattern.is_token_table())
        .find_map(|pattern| pattern.token_for(value))
}

/// true for `var(--...)` design-token references
pub fn is_token_reference(value: &str) -> bool {
    value.trim_start().starts_with("var(--")
}

/// style properties for a utility class, when the class has a clean translation
pub fn style_for_class(class: &str) -> Option<&'static [(&'static str, &'static str)]> {
    STYLE_CLASSES
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, properties)| *properties)
}
