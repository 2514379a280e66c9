//! Remote target control through nvmetcli
//!
//! Both operations shell out to `<nvmetcli> --remote=<url> <action> <subsysnqn>.json`
//! and block until it exits. There is no timeout.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::cli::SetupArgs;
use crate::config::TargetConfig;
use crate::error::{ControlError, Error};
use crate::template::{TargetDescriptor, TemplateRenderer};

/// nvmetcli subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Apply a saved configuration
    Restore,
    /// Remove a configuration
    Clear,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Restore => "restore",
            Action::Clear => "clear",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies and removes subsystems on the remote target
#[derive(Debug, Clone)]
pub struct TargetController {
    config: TargetConfig,
    renderer: TemplateRenderer,
    work_dir: PathBuf,
}

impl TargetController {
    /// Create a controller working in the current directory
    pub fn new(config: TargetConfig, renderer: TemplateRenderer) -> Self {
        Self {
            config,
            renderer,
            work_dir: PathBuf::from("."),
        }
    }

    /// Set the directory the rendered document is written to and nvmetcli runs in
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    fn skipped(&self, op: &str) -> bool {
        if self.config.main.skip_setup_cleanup {
            debug!(op, "skip_setup_cleanup set, nothing to do");
        }
        self.config.main.skip_setup_cleanup
    }

    /// Render the subsystem document and restore it on the target
    ///
    /// Returns the path of the rendered document, or `None` when setup is skipped.
    pub fn setup(&self, args: &SetupArgs) -> Result<Option<PathBuf>, Error> {
        if self.skipped("setup") {
            return Ok(None);
        }

        let descriptor = args.descriptor(self.config.blkdev()?);
        let path = self.apply(&descriptor)?;
        Ok(Some(path))
    }

    /// Render `descriptor` and run `nvmetcli restore` on it
    pub fn apply(&self, descriptor: &TargetDescriptor) -> Result<PathBuf, Error> {
        let path = self.renderer.render_to(descriptor, &self.work_dir)?;
        self.run(Action::Restore, &descriptor.subsysnqn)?;
        Ok(path)
    }

    /// Clear a previously restored subsystem
    ///
    /// The document written by setup is reused, not regenerated.
    pub fn cleanup(&self, subsysnqn: &str) -> Result<(), Error> {
        if self.skipped("cleanup") {
            return Ok(());
        }

        self.run(Action::Clear, subsysnqn)?;
        Ok(())
    }

    /// The nvmetcli invocation for an action on a subsystem
    pub fn command(&self, action: Action, subsysnqn: &str) -> Command {
        let mut cmd = Command::new(&self.config.main.nvmetcli);
        cmd.arg(format!("--remote={}", self.config.main.remote))
            .arg(action.as_str())
            .arg(format!("{}.json", subsysnqn))
            .current_dir(&self.work_dir);
        cmd
    }

    fn run(&self, action: Action, subsysnqn: &str) -> Result<(), ControlError> {
        let tool = &self.config.main.nvmetcli;
        let mut cmd = self.command(action, subsysnqn);
        info!(
            tool = %tool.display(),
            remote = %self.config.main.remote,
            %action,
            subsysnqn,
            "running nvmetcli"
        );

        let status = cmd.status().map_err(|source| ControlError::Spawn {
            tool: tool.clone(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }
        if self.config.main.ignore_tool_status {
            warn!(tool = %tool.display(), %action, %status, "nvmetcli failed, ignoring");
            return Ok(());
        }
        Err(ControlError::ToolFailed {
            tool: tool.clone(),
            action: action.as_str(),
            status,
        })
    }
}
