//! Error handling for the srvgen application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for srvgen operations.
///
/// Every pipeline stage maps its failures onto one of these variants, so a
/// failed run always reports the stage it died in together with the
/// underlying cause.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    /// The template root (or an entry inside it) could not be read
    #[error("Failed to scan template directory '{template_dir}': {source}.")]
    Discovery { template_dir: String, source: io::Error },

    /// Two templates derive the same destination path
    #[error("Templates '{first}' and '{second}' both target '{destination}'.")]
    DuplicateDestination { destination: String, first: String, second: String },

    /// Malformed template syntax or an unresolvable placeholder
    #[error("Template syntax error in '{template}': {source}.")]
    TemplateSyntax { template: String, source: minijinja::Error },

    /// Directory or file I/O failure while emitting a rendered template
    #[error("Failed to emit '{template}' to '{destination}': {source}.")]
    Render { template: String, destination: String, source: io::Error },

    /// The external source formatter failed or exited non-zero
    #[error("Code formatting failed: {0}.")]
    Format(String),

    /// The external schema compiler failed or exited non-zero
    #[error("Binding generation failed: {0}.")]
    BindingGen(String),

    /// The external version-control client failed or exited non-zero
    #[error("Repository initialization failed: {0}.")]
    RepoInit(String),

    /// Represents errors during options manifest parsing or preflight checks
    #[error("Configuration error: {0}.")]
    Config(String),

    /// Represents validation failures in scaffolding inputs
    #[error("Validation error: {0}.")]
    Validation(String),

    /// Represents errors in processing .srvgenignore files
    #[error("Ignore file error: {0}.")]
    Ignore(String),

    /// The destination already exists and overwriting was declined
    #[error("Output directory '{output_dir}' already exists. Use --overwrite to replace its contents.")]
    OutputDirectoryExists { output_dir: String },

    /// Catch-all for errors that fit no other variant
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with srvgen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("❌  {}", err);
    std::process::exit(1);
}
