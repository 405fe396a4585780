// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;
use crate::fs::read_json_member;
use crate::members::NETWORK_STATUS_FILE;

/// Network configuration saved by Podman alongside a checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkStatus {
    #[serde(default)]
    pub podman: PodmanNetwork,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PodmanNetwork {
    /// Keyed by interface name. Sorted so output is reproducible.
    #[serde(default)]
    pub interfaces: BTreeMap<String, NetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkInterface {
    #[serde(default)]
    pub subnets: Vec<NetworkSubnet>,
    #[serde(default)]
    pub mac_address: String,
}

/// Addresses are opaque strings; they are shown as found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkSubnet {
    #[serde(default)]
    pub ipnet: String,
    #[serde(default)]
    pub gateway: String,
}

/// Read the network status member from an extracted checkpoint directory.
/// Returns the decoded record and the path it was read from.
pub fn read_network_status(checkpoint_dir: &Path) -> Result<(NetworkStatus, PathBuf), DecodeError> {
    read_json_member(checkpoint_dir, NETWORK_STATUS_FILE)
}

pub fn format_network_info(status: Option<&NetworkStatus>) -> String {
    let Some(status) = status.filter(|s| !s.podman.interfaces.is_empty()) else {
        return "No network interfaces found".to_string();
    };

    let mut result = String::new();
    for (name, iface) in &status.podman.interfaces {
        // Writing into a String cannot fail.
        let _ = writeln!(result, "Interface: {name}");
        let _ = writeln!(result, "  MAC Address: {}", iface.mac_address);
        for subnet in &iface.subnets {
            let _ = writeln!(result, "  IP/Subnet: {}", subnet.ipnet);
            let _ = writeln!(result, "  Gateway: {}", subnet.gateway);
        }
        result.push('\n');
    }
    result
}
