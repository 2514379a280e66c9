//! Error types for configuration, rendering and target control

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when locating or parsing the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    NoConfigDir,
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing config entry: {0}")]
    MissingField(&'static str),
}

/// Errors that can occur while rendering the nvmetcli document
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("error reading template file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Executable path has no directory to look for the template in
    #[error("cannot locate template directory: {} has no parent directory", .exe.display())]
    NoInstallDir { exe: PathBuf },

    /// Template refers to a parameter we do not provide
    #[error("unknown template parameter '{name}' at byte {offset}")]
    UnknownParameter { name: String, offset: usize },

    /// `{{` without a closing `}}`
    #[error("unterminated placeholder at byte {offset}")]
    Unterminated { offset: usize },

    /// Rendered output is not a JSON document
    #[error("rendered template is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Output file could not be written
    #[error("error writing {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors from running the external management tool
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("failed to run {}: {source}", .tool.display())]
    Spawn {
        tool: PathBuf,
        source: std::io::Error,
    },
    #[error("{} {action} exited with {status}", .tool.display())]
    ToolFailed {
        tool: PathBuf,
        action: &'static str,
        status: std::process::ExitStatus,
    },
}

/// Any error a subcommand can end with
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
