//! Template discovery for srvgen.
//! Recursively scans a template root for files carrying the template
//! suffix, derives each template's destination path and tags it with its
//! serialization-mode applicability.

use crate::config::SerializationMode;
use crate::constants::{MESSAGES_STEM, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use globset::GlobSet;
use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which serialization mode a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Only emitted when the service uses schema-compiled messages
    SchemaOnly,
    /// Only emitted when the service uses plain in-language messages
    PlainOnly,
    /// Emitted under both modes
    Unconditional,
}

impl Applicability {
    /// Pure inclusion decision for a template under the given mode.
    pub fn includes(self, mode: SerializationMode) -> bool {
        match (self, mode) {
            (Applicability::SchemaOnly, SerializationMode::Plain) => false,
            (Applicability::PlainOnly, SerializationMode::Schema) => false,
            _ => true,
        }
    }
}

/// One discovered template: its source path, the destination path it
/// renders to (relative to the output root) and its applicability tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub applicability: Applicability,
}

/// Derives the applicability tag from the destination file name: schema
/// files (`*.proto`) are schema-only, the reserved `messages` stem marks
/// the plain in-language message definitions, everything else is
/// unconditional.
fn applicability_of(destination: &Path) -> Applicability {
    let name =
        destination.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    if name.ends_with(".proto") {
        Applicability::SchemaOnly
    } else if Path::new(name).file_stem().and_then(|stem| stem.to_str())
        == Some(MESSAGES_STEM)
    {
        Applicability::PlainOnly
    } else {
        Applicability::Unconditional
    }
}

/// Recursively collects the template entries under `template_root`.
///
/// Only files whose name ends with the template suffix are selected;
/// directories themselves are skipped. Entries are returned in a
/// deterministic order (lexicographic per directory level) so repeated
/// runs over an identical tree emit files in the same sequence.
///
/// Any unreadable entry aborts discovery with `Error::Discovery`; the
/// run is meant to be repeated once the tree is fixed, consistent with
/// the fail-fast policy of the rest of the pipeline.
pub fn locate_templates<P: AsRef<Path>>(
    template_root: P,
    ignored: &GlobSet,
) -> Result<Vec<TemplateEntry>> {
    let template_root = template_root.as_ref();
    let mut catalog: IndexMap<PathBuf, TemplateEntry> = IndexMap::new();

    for dir_entry in WalkDir::new(template_root).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(|e| Error::Discovery {
            template_dir: template_root.display().to_string(),
            source: e.into(),
        })?;
        if !dir_entry.file_type().is_file() {
            continue;
        }

        let file_name = dir_entry.file_name().to_string_lossy().into_owned();
        let Some(stripped) = file_name.strip_suffix(TEMPLATE_SUFFIX) else {
            continue;
        };

        let relative = dir_entry.path().strip_prefix(template_root).map_err(|e| {
            anyhow::anyhow!(
                "template '{}' escaped the root: {}",
                dir_entry.path().display(),
                e
            )
        })?;
        if ignored.is_match(relative) {
            debug!("Skipping ignored template '{}'", relative.display());
            continue;
        }

        if stripped.is_empty() {
            return Err(Error::Validation(format!(
                "template '{}' has no destination file name",
                dir_entry.path().display()
            )));
        }

        let destination = relative.with_file_name(stripped);
        let entry = TemplateEntry {
            source: dir_entry.path().to_path_buf(),
            destination: destination.clone(),
            applicability: applicability_of(&destination),
        };
        debug!(
            "Discovered template '{}' -> '{}' ({:?})",
            entry.source.display(),
            entry.destination.display(),
            entry.applicability
        );

        if let Some(existing) = catalog.get(&destination) {
            return Err(Error::DuplicateDestination {
                destination: destination.display().to_string(),
                first: existing.source.display().to_string(),
                second: entry.source.display().to_string(),
            });
        }
        catalog.insert(destination, entry);
    }

    Ok(catalog.into_values().collect())
}
