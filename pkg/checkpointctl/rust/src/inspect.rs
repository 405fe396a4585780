// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use log::{debug, info, warn};

use crate::errors::Error;
use crate::network::{format_network_info, read_network_status};
use crate::render::{JsonRenderer, Renderer, TreeRenderer};
use crate::resolver::{Resolution, resolve};
use crate::task::{Task, TaskProvider};
use crate::views::ViewSelection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(OutputFormat::Tree),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Tree => write!(f, "tree"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Drives one inspection: resolve the required members, materialize the
/// targets, print network information if asked, then hand the tasks to the
/// renderer for the chosen format. In JSON output the network information is
/// part of each task report, so stdout stays a single JSON document.
pub struct Inspector<'a> {
    provider: &'a dyn TaskProvider,
    tree: Box<dyn Renderer + 'a>,
    json: Box<dyn Renderer + 'a>,
}

impl<'a> Inspector<'a> {
    pub fn new(provider: &'a dyn TaskProvider) -> Self {
        Self {
            provider,
            tree: Box::new(TreeRenderer),
            json: Box::new(JsonRenderer),
        }
    }

    /// Replace the renderer used for `format`.
    pub fn with_renderer(mut self, format: OutputFormat, renderer: Box<dyn Renderer + 'a>) -> Self {
        match format {
            OutputFormat::Tree => self.tree = renderer,
            OutputFormat::Json => self.json = renderer,
        }
        self
    }

    /// Inspect `targets`. The format is validated before anything is
    /// extracted. Materialized tasks are cleaned up on every return path.
    pub fn run(
        &self,
        targets: &[String],
        selection: &ViewSelection,
        format: &str,
        out: &mut dyn Write,
    ) -> Result<(), Error> {
        let format: OutputFormat = format.parse()?;

        let Resolution { selection, members } = resolve(selection);
        info!(
            "inspecting {} target(s), required members: {}",
            targets.len(),
            members
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let tasks = self.provider.create_tasks(targets, &members)?;
        let tasks = scopeguard::guard(tasks, |tasks| self.provider.cleanup_tasks(tasks));

        if selection.show_network && format == OutputFormat::Tree {
            write_network_info(&tasks, out)?;
        }

        let renderer = match format {
            OutputFormat::Tree => &self.tree,
            OutputFormat::Json => &self.json,
        };
        debug!("rendering {} task(s) as {format}", tasks.len());
        renderer.render(&tasks, &selection, out)
    }
}

/// Print the network status of each task as soon as it is read. A task whose
/// status cannot be read is reported and skipped.
fn write_network_info(tasks: &[Task], out: &mut dyn Write) -> Result<(), Error> {
    for task in tasks {
        let status = match read_network_status(&task.dir) {
            Ok((status, path)) => {
                debug!("read network status from {}", path.display());
                status
            }
            Err(e) => {
                warn!(
                    "failed to read network information for {}: {e}",
                    task.target
                );
                continue;
            }
        };
        let info = format_network_info(Some(&status));
        // "No network interfaces found" comes without a line break.
        let end = if info.ends_with('\n') { "" } else { "\n" };
        write!(out, "\nNetwork Information for {}:\n{info}{end}", task.target)
            .and_then(|_| out.flush())
            .map_err(Error::Render)?;
    }
    Ok(())
}
