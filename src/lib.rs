//! srvgen is a template-driven scaffolding tool for networked services.
//! It renders a directory of parameterized templates into a ready-to-build
//! service skeleton (message definitions, service stub, middleware wiring)
//! and optionally finishes the setup by invoking external toolchains.

/// Command-line interface module for the srvgen application
pub mod cli;

/// Generation context construction and options manifest handling
/// Supports JSON and YAML manifests (srvgen.json, srvgen.yml, srvgen.yaml)
pub mod config;

/// Common constants shared across modules
pub mod constants;

/// Error types and handling for the srvgen application
pub mod error;

/// File and directory ignore patterns
/// Processes .srvgenignore files to exclude specific templates
pub mod ignore;

/// Template discovery and serialization-mode tagging
pub mod locator;

/// External post-processing steps run after all files are emitted:
/// - source formatting
/// - message binding generation (schema mode)
/// - repository initialization
pub mod postprocess;

/// Core generation pipeline orchestration
/// Combines all components to emit the final output tree
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;
