//! Core generation pipeline for srvgen.
//! Discovers templates, filters them by serialization mode, renders each
//! one against the generation context and writes the result into the
//! output tree, then hands over to the post-processing steps. The first
//! error anywhere terminates the run; files already emitted stay on disk
//! and the run is meant to be repeated once the cause is fixed.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::locator::{locate_templates, TemplateEntry};
use crate::postprocess::{run_steps, PostProcessOptions, ToolRunner};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// Resolves the destination directory for a run.
///
/// The generated tree lands in a subfolder of `out_dir` named after the
/// service. An existing directory is only reused after the user confirms
/// (or unconditionally with `overwrite`); a file at that path is refused.
pub fn resolve_output_dir(
    out_dir: &Path,
    service_name: &str,
    overwrite: bool,
    prompter: &dyn Prompter,
) -> Result<PathBuf> {
    let output_dir = out_dir.join(service_name);

    if output_dir.is_file() {
        return Err(Error::Config(format!(
            "output path '{}' is actually a file",
            output_dir.display()
        )));
    }

    if output_dir.is_dir() {
        let replace = prompter.confirm(
            overwrite,
            format!(
                "Directory '{}' already exists. Overwrite its contents?",
                output_dir.display()
            ),
        )?;
        if !replace {
            return Err(Error::OutputDirectoryExists {
                output_dir: output_dir.display().to_string(),
            });
        }
    }

    Ok(output_dir)
}

/// Drives one generation run over a template root.
///
/// Holds only borrowed, read-only state so the pipeline can be invoked
/// repeatedly in-process with different configurations.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    runner: &'a dyn ToolRunner,
    config: &'a GenerationConfig,
    steps: &'a PostProcessOptions,
    template_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        runner: &'a dyn ToolRunner,
        config: &'a GenerationConfig,
        steps: &'a PostProcessOptions,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self { renderer, runner, config, steps, template_root, output_root }
    }

    /// Runs the full pipeline: discovery, filtering, rendering, emission
    /// and post-processing, strictly in that order.
    pub fn run(&self) -> Result<()> {
        fs::create_dir_all(self.output_root)?;

        debug!("Discovering templates under '{}'", self.template_root.display());
        let ignored: GlobSet = parse_ignore_file(self.template_root)?;
        let entries = locate_templates(self.template_root, &ignored)?;

        let context = self.config.context();
        for entry in &entries {
            if !entry.applicability.includes(self.config.mode) {
                debug!(
                    "Skipping '{}': not applicable to {} mode",
                    entry.source.display(),
                    self.config.mode
                );
                continue;
            }
            self.emit(entry, &context)?;
        }

        run_steps(self.runner, self.output_root, self.config.mode, self.steps)
    }

    /// Renders one template and writes it to its destination, creating
    /// missing parent directories first. The body is rendered fully in
    /// memory before the destination is opened, so a failed render leaves
    /// no partial file behind.
    fn emit(&self, entry: &TemplateEntry, context: &serde_json::Value) -> Result<()> {
        let destination = self.output_root.join(&entry.destination);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| self.render_error(entry, &destination, e))?;
        }

        let body = fs::read_to_string(&entry.source)
            .map_err(|e| self.render_error(entry, &destination, e))?;
        let rendered = self.renderer.render(
            &entry.source.display().to_string(),
            &body,
            context,
        )?;

        fs::write(&destination, rendered)
            .map_err(|e| self.render_error(entry, &destination, e))?;

        println!(
            "✓  Processing: {} -> {}",
            entry.source.display(),
            entry.destination.display()
        );
        Ok(())
    }

    fn render_error(
        &self,
        entry: &TemplateEntry,
        destination: &Path,
        source: io::Error,
    ) -> Error {
        Error::Render {
            template: entry.source.display().to_string(),
            destination: destination.display().to_string(),
            source,
        }
    }
}
