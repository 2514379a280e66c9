//! nvme-target-control - remote NVMe target setup for blktests
//!
//! blktests calls this tool through `NVME_TARGET_CONTROL` to set up and tear
//! down a remote target around each nvme test. The target is driven by
//! nvmetcli in REST API mode (`--remote`); the subsystem document it consumes
//! is rendered from `nvmet-subsys.json.tmpl`.
//!
//! ```text
//! NVME_TARGET_CONTROL=/usr/libexec/nvme-target-control ./check nvme
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod show;
pub mod target;
pub mod template;

pub use cli::{Cli, Commands, SetupArgs, ShowArgs};
pub use config::{ConfigField, TargetConfig};
pub use error::{ConfigError, ControlError, Error, TemplateError};
pub use target::{Action, TargetController};
pub use template::{TargetDescriptor, TemplateRenderer};

/// Run a parsed command line to completion
///
/// Output of `config` goes to `out`.
pub fn run<W: std::io::Write>(cli: &Cli, out: &mut W) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => TargetConfig::from_file(path)?,
        None => TargetConfig::load_default()?,
    };

    match &cli.command {
        Commands::Setup(args) => {
            controller(cli, config)?.setup(args)?;
        }
        Commands::Cleanup { subsysnqn } => {
            controller(cli, config)?.cleanup(subsysnqn)?;
        }
        Commands::Config(args) => {
            show::show(&config, args, out)?;
        }
    }
    Ok(())
}

fn controller(cli: &Cli, config: TargetConfig) -> Result<TargetController, Error> {
    let renderer = match &cli.template_dir {
        Some(dir) => TemplateRenderer::new(dir),
        None => TemplateRenderer::from_install_dir()?,
    };
    tracing::debug!(template = %renderer.template_path().display(), "using template");
    Ok(TargetController::new(config, renderer))
}
