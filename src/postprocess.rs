//! Post-processing orchestration for srvgen.
//! After every template has been emitted, a fixed sequence of optional
//! external steps runs over the generated tree: source formatting, message
//! binding generation (schema mode only) and repository initialization.
//! The first failing step aborts the run; files already on disk stay.

use crate::config::SerializationMode;
use crate::constants::SCHEMA_FILE;
use crate::error::{Error, Result};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One external-tool invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Trait for executing external tools.
///
/// Spawns the program, waits for it to exit and reports a non-zero exit
/// status as failure. Tests substitute a recording implementation.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> std::result::Result<(), String>;
}

/// Runner that executes invocations as child processes.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::result::Result<(), String> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| format!("failed to run '{}': {}", invocation.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("'{}' exited with {}", invocation.program, status))
        }
    }
}

/// Which post-processing steps are enabled for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessOptions {
    pub format: bool,
    pub bindings: bool,
    pub init_repo: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self { format: true, bindings: true, init_repo: true }
    }
}

/// The identity of a post-processing step, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Format,
    BindingGen,
    RepoInit,
}

impl StepKind {
    pub fn describe(self) -> &'static str {
        match self {
            StepKind::Format => "Formatted generated sources",
            StepKind::BindingGen => "Created initial message bindings",
            StepKind::RepoInit => "Initialized empty git repo",
        }
    }

    fn error(self, detail: String) -> Error {
        match self {
            StepKind::Format => Error::Format(detail),
            StepKind::BindingGen => Error::BindingGen(detail),
            StepKind::RepoInit => Error::RepoInit(detail),
        }
    }
}

/// A planned step: its identity and the invocation that performs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub invocation: Invocation,
}

/// Plans the enabled steps for a run, strictly in pipeline order:
/// formatting, then binding generation, then repository initialization.
/// Binding generation is additionally gated on schema mode; the other
/// steps run under either mode when enabled.
pub fn plan(
    output_root: &Path,
    mode: SerializationMode,
    options: &PostProcessOptions,
) -> Vec<Step> {
    let mut steps = Vec::new();

    if options.format {
        steps.push(Step {
            kind: StepKind::Format,
            invocation: Invocation {
                program: "cargo".to_string(),
                args: vec![
                    "fmt".to_string(),
                    "--manifest-path".to_string(),
                    output_root.join("Cargo.toml").display().to_string(),
                ],
            },
        });
    }

    if options.bindings && mode == SerializationMode::Schema {
        steps.push(Step {
            kind: StepKind::BindingGen,
            invocation: Invocation {
                program: "protoc".to_string(),
                args: vec![
                    format!("--prost_out={}", output_root.join("src").display()),
                    format!("--proto_path={}", output_root.display()),
                    output_root.join(SCHEMA_FILE).display().to_string(),
                ],
            },
        });
    }

    if options.init_repo {
        steps.push(Step {
            kind: StepKind::RepoInit,
            invocation: Invocation {
                program: "git".to_string(),
                args: vec!["init".to_string(), output_root.display().to_string()],
            },
        });
    }

    steps
}

/// Runs the planned steps in order, stopping at the first failure.
///
/// Steps are never retried and later steps are not attempted after a
/// failure; nothing already written to disk is rolled back.
pub fn run_steps(
    runner: &dyn ToolRunner,
    output_root: &Path,
    mode: SerializationMode,
    options: &PostProcessOptions,
) -> Result<()> {
    for step in plan(output_root, mode, options) {
        debug!(
            "Running {:?}: {} {:?}",
            step.kind, step.invocation.program, step.invocation.args
        );
        runner.run(&step.invocation).map_err(|detail| step.kind.error(detail))?;
        println!("✓  {}", step.kind.describe());
    }
    Ok(())
}

/// Locates an external tool on PATH, for preflight checks before
/// generation starts.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
