//! Per-invocation parameters for the subsystem template

use std::collections::HashMap;

/// Everything needed to describe one exported subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub subsysnqn: String,
    pub subsys_uuid: String,
    pub hostnqn: String,
    /// Hosts permitted to connect; the harness only ever allows itself
    pub allowed_hosts: String,
    /// DH-HMAC-CHAP controller key, empty when unauthenticated
    pub ctrlkey: String,
    /// DH-HMAC-CHAP host key, empty when unauthenticated
    pub hostkey: String,
    pub blkdev: String,
}

impl TargetDescriptor {
    /// Create a descriptor without authentication keys
    pub fn new(
        subsysnqn: impl Into<String>,
        subsys_uuid: impl Into<String>,
        hostnqn: impl Into<String>,
        blkdev: impl Into<String>,
    ) -> Self {
        let hostnqn = hostnqn.into();
        Self {
            subsysnqn: subsysnqn.into(),
            subsys_uuid: subsys_uuid.into(),
            allowed_hosts: hostnqn.clone(),
            hostnqn,
            ctrlkey: String::new(),
            hostkey: String::new(),
            blkdev: blkdev.into(),
        }
    }

    /// Set the controller key
    pub fn with_ctrlkey(mut self, key: impl Into<String>) -> Self {
        self.ctrlkey = key.into();
        self
    }

    /// Set the host key
    pub fn with_hostkey(mut self, key: impl Into<String>) -> Self {
        self.hostkey = key.into();
        self
    }

    /// Name of the rendered document, a pure function of the subsystem NQN
    pub fn file_name(&self) -> String {
        format!("{}.json", self.subsysnqn)
    }

    /// Template parameters keyed by placeholder name
    pub fn parameters(&self) -> HashMap<&'static str, &str> {
        HashMap::from([
            ("subsysnqn", self.subsysnqn.as_str()),
            ("subsys_uuid", self.subsys_uuid.as_str()),
            ("hostnqn", self.hostnqn.as_str()),
            ("allowed_hosts", self.allowed_hosts.as_str()),
            ("ctrlkey", self.ctrlkey.as_str()),
            ("hostkey", self.hostkey.as_str()),
            ("blkdev", self.blkdev.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_hosts_follows_hostnqn() {
        let desc = TargetDescriptor::new("sub1", "u1", "h1", "/dev/nullb0");
        assert_eq!(desc.allowed_hosts, "h1");
        assert_eq!(desc.ctrlkey, "");
        assert_eq!(desc.hostkey, "");
    }

    #[test]
    fn test_file_name() {
        let desc = TargetDescriptor::new("blktests-subsystem-1", "u1", "h1", "/dev/nullb0");
        assert_eq!(desc.file_name(), "blktests-subsystem-1.json");
    }

    #[test]
    fn test_parameters_cover_all_placeholders() {
        let desc = TargetDescriptor::new("sub1", "u1", "h1", "/dev/nullb0")
            .with_ctrlkey("DHHC-1:00:ctrl:")
            .with_hostkey("DHHC-1:00:host:");
        let params = desc.parameters();
        assert_eq!(params.len(), 7);
        assert_eq!(params["ctrlkey"], "DHHC-1:00:ctrl:");
        assert_eq!(params["hostkey"], "DHHC-1:00:host:");
        assert_eq!(params["allowed_hosts"], "h1");
        assert_eq!(params["blkdev"], "/dev/nullb0");
    }
}
