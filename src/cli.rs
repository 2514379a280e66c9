//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigField;
use crate::template::TargetDescriptor;

#[derive(Parser, Debug)]
#[command(name = "nvme-target-control")]
#[command(about = "Set up and tear down remote NVMe targets for blktests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: $XDG_CONFIG_HOME/blktests/nvme_target_control.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding nvmet-subsys.json.tmpl (default: next to the executable)
    #[arg(long, global = true)]
    pub template_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the subsystem on the remote target
    Setup(SetupArgs),

    /// Remove the subsystem from the remote target
    Cleanup {
        /// Subsystem NQN used for the preceding setup
        #[arg(long)]
        subsysnqn: String,
    },

    /// Print a configuration value
    Config(ShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SetupArgs {
    #[arg(long)]
    pub subsysnqn: String,

    #[arg(long)]
    pub subsys_uuid: String,

    #[arg(long)]
    pub hostnqn: String,

    /// DH-HMAC-CHAP controller key
    #[arg(long, default_value = "")]
    pub ctrlkey: String,

    /// DH-HMAC-CHAP host key
    #[arg(long, default_value = "")]
    pub hostkey: String,
}

impl SetupArgs {
    /// Build the template parameters, taking the block device from config
    pub fn descriptor(&self, blkdev: &str) -> TargetDescriptor {
        TargetDescriptor::new(&self.subsysnqn, &self.subsys_uuid, &self.hostnqn, blkdev)
            .with_ctrlkey(&self.ctrlkey)
            .with_hostkey(&self.hostkey)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShowArgs {
    #[arg(long)]
    pub show_blkdev_type: bool,
    #[arg(long)]
    pub show_trtype: bool,
    #[arg(long)]
    pub show_hostnqn: bool,
    #[arg(long)]
    pub show_hostid: bool,
    #[arg(long)]
    pub show_host_traddr: bool,
    #[arg(long)]
    pub show_traddr: bool,
    #[arg(long)]
    pub show_trsvid: bool,
    #[arg(long)]
    pub show_subsys_uuid: bool,
    #[arg(long)]
    pub show_subsysnqn: bool,
}

impl ShowArgs {
    /// The requested field; the first set flag wins
    pub fn selected(&self) -> Option<ConfigField> {
        [
            (self.show_blkdev_type, ConfigField::BlkdevType),
            (self.show_trtype, ConfigField::Trtype),
            (self.show_hostnqn, ConfigField::Hostnqn),
            (self.show_hostid, ConfigField::Hostid),
            (self.show_host_traddr, ConfigField::HostTraddr),
            (self.show_traddr, ConfigField::Traddr),
            (self.show_trsvid, ConfigField::Trsvid),
            (self.show_subsysnqn, ConfigField::Subsysnqn),
            (self.show_subsys_uuid, ConfigField::SubsysUuid),
        ]
        .into_iter()
        .find_map(|(set, field)| set.then_some(field))
    }
}
