//! User interaction handling for srvgen.
//! The only interaction the tool needs is a yes/no confirmation before
//! reusing an existing destination directory.

use crate::error::{Error, Result};
use dialoguer::Confirm;

/// Trait for user confirmation prompts.
pub trait Prompter {
    /// Asks the user to confirm, unless `skip` short-circuits to yes.
    fn confirm(&self, skip: bool, message: String) -> Result<bool>;
}

/// Dialoguer-backed prompter used by the CLI.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, message: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
