//! `config` subcommand: print one configuration value for the harness

use std::io::Write;

use crate::cli::ShowArgs;
use crate::config::TargetConfig;

/// Write the selected value followed by a newline
///
/// Nothing is written when no `--show-*` flag is set.
pub fn show<W: Write>(config: &TargetConfig, args: &ShowArgs, out: &mut W) -> std::io::Result<()> {
    if let Some(field) = args.selected() {
        writeln!(out, "{}", config.value(field))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[main]
skip_setup_cleanup = true
nvmetcli = "/usr/bin/nvmetcli"
remote = "http://nvmet.local:5000"

[host]
blkdev_type = "device"
trtype = "tcp"
hostnqn = "nqn.test"
hostid = "0f01fb42-9f7f-4856-b0b3-51e60b8de349"
host_traddr = "192.168.154.187"

[subsys_0]
traddr = "192.168.19.189"
trsvid = "4420"
subsysnqn = "blktests-subsystem-1"
subsys_uuid = "91fdba0d-f87b-4c25-b80f-db7be1418b9e"
"#;

    fn run(args: ShowArgs) -> String {
        let config = TargetConfig::from_str(CONFIG).unwrap();
        let mut out = Vec::new();
        show(&config, &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_hostnqn() {
        let out = run(ShowArgs {
            show_hostnqn: true,
            ..Default::default()
        });
        assert_eq!(out, "nqn.test\n");
    }

    #[test]
    fn test_show_trsvid() {
        let out = run(ShowArgs {
            show_trsvid: true,
            ..Default::default()
        });
        assert_eq!(out, "4420\n");
    }

    #[test]
    fn test_show_without_flag_prints_nothing() {
        assert_eq!(run(ShowArgs::default()), "");
    }
}
