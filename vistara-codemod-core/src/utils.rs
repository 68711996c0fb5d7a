use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// front-end source extensions scanned by default
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".jsx", ".js", ".ts", ".tsx"];

/// dependency cache directory that is never descended into
pub const DEPENDENCY_DIR: &str = "node_modules";

/// read a source file, decoding it with its BOM encoding or utf-8
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(decode_source(&bytes))
}

/// decode raw bytes, replacing anything undecodable instead of failing
pub fn decode_source(bytes: &[u8]) -> String {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let (text, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    text.into_owned()
}

/// check whether a file name ends with one of the extensions
pub fn has_extension<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> bool {
    extensions
        .iter()
        .any(|extension| file_name.ends_with(extension.as_ref()))
}

/// hidden directories and dependency caches are skipped during traversal
pub fn is_pruned_dir(name: &str) -> bool {
    name.starts_with('.') || name == DEPENDENCY_DIR
}

/// every file under `root` with a matching extension, sorted by path.
///
/// an entry the walk cannot read fails the whole walk, so an unreadable
/// subtree is never reported as clean
pub fn source_files<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_pruned_dir(&entry.file_name().to_string_lossy())
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file()
            && has_extension(&entry.file_name().to_string_lossy(), extensions)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// display a path relative to the scan root with `/` separators
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let display = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if display.is_empty() {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        display
    }
}

/// truncate a string to a maximum length with ellipsis
pub fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        let mut end_pos = std::cmp::min(max_length.saturating_sub(3), text.len());

        // find the nearest character boundary before the cut
        while end_pos > 0 && !text.is_char_boundary(end_pos) {
            end_pos -= 1;
        }

        format!("{}...", &text[..end_pos])
    }
}

/// spinner shown while walking a source tree
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
