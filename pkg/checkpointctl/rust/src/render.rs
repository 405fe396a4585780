// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::BTreeMap;
use std::io::{self, Write};

use log::warn;
use serde::Serialize;

use crate::errors::Error;
use crate::members::{CHECKPOINT_DIRECTORY, STATS_DUMP_FILE};
use crate::metadata::{ContainerConfig, Mount, read_container_config, read_runtime_spec};
use crate::network::{NetworkStatus, read_network_status};
use crate::task::Task;
use crate::views::ViewSelection;

/// Writes the report for a list of materialized tasks.
pub trait Renderer {
    fn render(
        &self,
        tasks: &[Task],
        selection: &ViewSelection,
        out: &mut dyn Write,
    ) -> Result<(), Error>;
}

/// What is known about one task, limited to the selected views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub target: String,
    pub container: Option<ContainerConfig>,
    pub mounts: Option<Vec<Mount>>,
    pub annotations: Option<BTreeMap<String, String>>,
    /// Only filled in by the JSON renderer; the tree output prints network
    /// information ahead of the report instead.
    pub network: Option<NetworkStatus>,
    pub members: Vec<String>,
}

impl TaskReport {
    pub fn collect(task: &Task, selection: &ViewSelection) -> Result<Self, Error> {
        let members = task.members().map_err(Error::Render)?;

        let container = match read_container_config(&task.dir) {
            Ok((config, _)) => Some(config),
            Err(e) => {
                warn!("no container information for {}: {e}", task.target);
                None
            }
        };

        let (mut mounts, mut annotations) = (None, None);
        if selection.mounts || selection.show_metadata {
            match read_runtime_spec(&task.dir) {
                Ok((spec, _)) => {
                    if selection.mounts {
                        mounts = Some(spec.mounts);
                    }
                    if selection.show_metadata {
                        annotations = Some(spec.annotations);
                    }
                }
                Err(e) => warn!("no runtime spec for {}: {e}", task.target),
            }
        }

        Ok(Self {
            target: task.target.clone(),
            container,
            mounts,
            annotations,
            network: None,
            members,
        })
    }

    /// Attach the decoded `network.status` of `task`. An unreadable status is
    /// reported and left out.
    fn with_network(mut self, task: &Task) -> Self {
        match read_network_status(&task.dir) {
            Ok((status, _)) => self.network = Some(status),
            Err(e) => warn!(
                "failed to read network information for {}: {e}",
                task.target
            ),
        }
        self
    }

    fn process_images(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .map(String::as_str)
            .filter(|m| m.strip_prefix(CHECKPOINT_DIRECTORY).is_some_and(|r| r.starts_with('/')))
    }

    fn stats_members(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .map(String::as_str)
            .filter(|m| m.starts_with(STATS_DUMP_FILE))
    }
}

struct Branch {
    label: String,
    leaves: Vec<String>,
}

impl Branch {
    fn leaf(label: String) -> Self {
        Self {
            label,
            leaves: Vec::new(),
        }
    }
}

fn write_tree(out: &mut dyn Write, root: &str, branches: &[Branch]) -> io::Result<()> {
    writeln!(out, "{root}")?;
    for (i, branch) in branches.iter().enumerate() {
        let (connector, indent) = if i + 1 == branches.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        writeln!(out, "{connector}{}", branch.label)?;
        for (j, leaf) in branch.leaves.iter().enumerate() {
            let leaf_connector = if j + 1 == branch.leaves.len() {
                "└── "
            } else {
                "├── "
            };
            writeln!(out, "{indent}{leaf_connector}{leaf}")?;
        }
    }
    Ok(())
}

pub struct TreeRenderer;

impl TreeRenderer {
    fn branches(report: &TaskReport, selection: &ViewSelection) -> Vec<Branch> {
        let mut branches = Vec::new();

        if let Some(config) = &report.container {
            branches.push(Branch::leaf(format!(
                "Container: {} ({})",
                config.name, config.id
            )));
            if let Some(image) = config.image() {
                branches.push(Branch::leaf(format!("Image: {image}")));
            }
            if let Some(runtime) = &config.oci_runtime {
                branches.push(Branch::leaf(format!("Runtime: {runtime}")));
            }
            if let Some(created) = &config.created_time {
                branches.push(Branch::leaf(format!("Created: {created}")));
            }
            if let Some(checkpointed) = &config.checkpointed_time {
                branches.push(Branch::leaf(format!("Checkpointed: {checkpointed}")));
            }
        }

        if let Some(mounts) = &report.mounts {
            branches.push(Branch {
                label: "Mounts".to_string(),
                leaves: mounts
                    .iter()
                    .map(|m| {
                        format!(
                            "Destination: {}, Type: {}, Source: {}",
                            m.destination, m.mount_type, m.source
                        )
                    })
                    .collect(),
            });
        }

        if let Some(annotations) = &report.annotations {
            branches.push(Branch {
                label: "Metadata".to_string(),
                leaves: annotations
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect(),
            });
        }

        if selection.stats {
            branches.push(Branch {
                label: "Statistics".to_string(),
                leaves: report.stats_members().map(str::to_string).collect(),
            });
        }

        if selection.ps_tree {
            let images: Vec<String> = report.process_images().map(str::to_string).collect();
            branches.push(Branch {
                label: format!("Process images ({})", images.len()),
                leaves: images,
            });
        }

        branches
    }
}

impl Renderer for TreeRenderer {
    fn render(
        &self,
        tasks: &[Task],
        selection: &ViewSelection,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        for (i, task) in tasks.iter().enumerate() {
            let report = TaskReport::collect(task, selection)?;
            if i > 0 {
                writeln!(out).map_err(Error::Render)?;
            }
            write_tree(out, &report.target, &Self::branches(&report, selection))
                .map_err(Error::Render)?;
        }
        Ok(())
    }
}

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(
        &self,
        tasks: &[Task],
        selection: &ViewSelection,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        let reports = tasks
            .iter()
            .map(|task| -> Result<TaskReport, Error> {
                let report = TaskReport::collect(task, selection)?;
                Ok(if selection.show_network {
                    report.with_network(task)
                } else {
                    report
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        serde_json::to_writer_pretty(&mut *out, &reports).map_err(|e| Error::Render(e.into()))?;
        writeln!(out).map_err(Error::Render)
    }
}
