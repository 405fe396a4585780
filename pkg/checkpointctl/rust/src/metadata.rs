// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Container metadata stored next to the process images: the engine's
//! container config (`config.dump`) and the OCI runtime spec (`spec.dump`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;
use crate::fs::read_json_member;
use crate::members::{CONFIG_DUMP_FILE, SPEC_DUMP_FILE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs_image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs_image_name: Option<String>,
    #[serde(default, rename = "runtime", skip_serializing_if = "Option::is_none")]
    pub oci_runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpointed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_time: Option<String>,
    #[serde(default)]
    pub restored: bool,
}

impl ContainerConfig {
    /// Best human-readable image reference available.
    pub fn image(&self) -> Option<&str> {
        self.rootfs_image_name
            .as_deref()
            .or(self.rootfs_image.as_deref())
            .or(self.rootfs_image_ref.as_deref())
    }
}

/// The parts of the OCI runtime spec shown in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeSpec {
    #[serde(default)]
    pub mounts: Vec<Mount>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mount {
    pub destination: String,
    #[serde(default, rename = "type")]
    pub mount_type: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

pub fn read_container_config(dir: &Path) -> Result<(ContainerConfig, PathBuf), DecodeError> {
    read_json_member(dir, CONFIG_DUMP_FILE)
}

pub fn read_runtime_spec(dir: &Path) -> Result<(RuntimeSpec, PathBuf), DecodeError> {
    read_json_member(dir, SPEC_DUMP_FILE)
}
