//! File and directory ignore pattern handling for srvgen template roots.
//! This module processes .srvgenignore files to exclude specific templates
//! from discovery, similar to .gitignore functionality.

use crate::constants::IGNORE_FILE;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Patterns excluded from every discovery run
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] =
    ["**/.git/**", "**/.DS_Store", "**/*.swp"];

/// Reads and processes the template root's .srvgenignore file into a set
/// of glob patterns, on top of the default patterns.
///
/// # Notes
/// - If the .srvgenignore file doesn't exist, only the defaults apply
/// - Each non-blank line in the file is treated as a separate glob pattern
/// - Patterns are matched against template paths relative to the root
///
/// # Errors
/// * `Error::Ignore` if a pattern fails to compile
pub fn parse_ignore_file<P: AsRef<Path>>(template_dir: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::Ignore(format!("{} loading failed: {}", IGNORE_FILE, e))
        })?);
    }

    let ignore_path = template_dir.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().filter(|line| !line.trim().is_empty()) {
            builder.add(Glob::new(line).map_err(|e| {
                Error::Ignore(format!("{} loading failed: {}", IGNORE_FILE, e))
            })?);
        }
    } else {
        debug!("{} does not exist", IGNORE_FILE);
    }

    builder
        .build()
        .map_err(|e| Error::Ignore(format!("{} loading failed: {}", IGNORE_FILE, e)))
}
