// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

pub const NETWORK_STATUS: &str = r#"{"podman":{"interfaces":{"eth0":{"subnets":[{"ipnet":"10.88.0.9/16","gateway":"10.88.0.1"}],"mac_address":"f2:99:8d:fb:5a:57"}}}}"#;

/// Result of one checkpointctl invocation.
pub struct Run {
    pub output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn success(&self) -> bool {
        self.output.status.success()
    }
}

/// Run `checkpointctl inspect` with working directories created in `work_dir`.
pub fn inspect(work_dir: &Path, args: &[&str]) -> Run {
    let bin = env!("CARGO_BIN_EXE_checkpointctl");
    let output = Command::new(bin)
        .arg("inspect")
        .args(args)
        .env("CHECKPOINTCTL_TMPDIR", work_dir)
        .env("CHECKPOINTCTL_LOG_LEVEL", "warn")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run checkpointctl");

    let run = Run { output };
    eprintln!("[checkpointctl:out] {}", run.stdout());
    eprintln!("[checkpointctl:err] {}", run.stderr());
    run
}

/// Write an unpacked checkpoint named `name` into `dir`. The network status
/// member is written only when `network` is given.
pub fn write_checkpoint(dir: &Path, name: &str, network: Option<&str>) -> String {
    let root = dir.join(name);
    let images = root.join("checkpoint");
    std::fs::create_dir_all(&images).unwrap();

    std::fs::write(
        root.join("config.dump"),
        format!(r#"{{"id": "{name}-id", "name": "{name}", "runtime": "runc"}}"#),
    )
    .unwrap();
    std::fs::write(
        root.join("spec.dump"),
        r#"{"mounts": [{"destination": "/proc", "type": "proc", "source": "proc"}]}"#,
    )
    .unwrap();
    if let Some(network) = network {
        std::fs::write(root.join("network.status"), network).unwrap();
    }
    for image in ["pstree.img", "core-1.img", "files.img", "fdinfo-1.img"] {
        std::fs::write(images.join(image), b"").unwrap();
    }

    root.to_str().unwrap().to_string()
}

/// Count entries left behind in a working directory.
pub fn leftover_entries(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}
