// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Fixture checkpoints for unit tests
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

pub const CONFIG_DUMP: &str = r#"{
    "id": "8d5b4e0c2a71",
    "name": "counter",
    "rootfsImageName": "quay.io/adrianreber/counter:latest",
    "runtime": "runc",
    "createdTime": "2024-03-01T09:00:00Z",
    "checkpointedTime": "2024-03-01T09:10:00Z"
}"#;

pub const SPEC_DUMP: &str = r#"{
    "ociVersion": "1.1.0",
    "mounts": [
        {"destination": "/proc", "type": "proc", "source": "proc"},
        {"destination": "/etc/hosts", "type": "bind", "source": "/run/containers/hosts", "options": ["rbind", "ro"]}
    ],
    "annotations": {
        "io.kubernetes.cri-o.ContainerType": "container",
        "io.container.manager": "libpod"
    }
}"#;

pub const NETWORK_STATUS: &str = r#"{"podman":{"interfaces":{"eth0":{"subnets":[{"ipnet":"10.88.0.9/16","gateway":"10.88.0.1"}],"mac_address":"f2:99:8d:fb:5a:57"}}}}"#;

const IMAGES: &[&str] = &[
    "pstree.img",
    "core-1.img",
    "core-12.img",
    "files.img",
    "fs-1.img",
    "ids-1.img",
    "fdinfo-2.img",
    "pagemap-1.img",
    "pages-1.img",
    "mm-1.img",
    "inventory.img",
];

/// An unpacked checkpoint with metadata, network status, stats and a full
/// set of (empty) process images.
pub fn create_checkpoint_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(root.join("config.dump"), CONFIG_DUMP).unwrap();
    fs::write(root.join("spec.dump"), SPEC_DUMP).unwrap();
    fs::write(root.join("network.status"), NETWORK_STATUS).unwrap();
    fs::write(root.join("stats-dump"), b"\x01\x02").unwrap();
    fs::write(root.join("rootfs-diff.tar"), b"").unwrap();

    let images = root.join("checkpoint");
    fs::create_dir(&images).unwrap();
    for image in IMAGES {
        fs::write(images.join(image), b"").unwrap();
    }

    dir
}

/// Pack `source` into `checkpoint.tar` inside `dest_dir`.
pub fn create_checkpoint_tar(source: &Path, dest_dir: &Path) -> PathBuf {
    let path = dest_dir.join("checkpoint.tar");
    let mut builder = tar::Builder::new(fs::File::create(&path).unwrap());

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(source).unwrap();
            builder.append_path_with_name(entry.path(), rel).unwrap();
        }
    }
    builder.finish().unwrap();

    path
}
