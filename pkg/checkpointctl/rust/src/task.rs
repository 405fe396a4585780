// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::Error;
use crate::members::RequiredMembers;

/// One checkpoint target with its required members extracted into `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Target as given on the command line.
    pub target: String,
    pub dir: PathBuf,
}

impl Task {
    /// Extracted member names, relative to the task directory, sorted.
    pub fn members(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.dir)
                && let Some(name) = rel.to_str()
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Materializes checkpoint targets into working directories and releases
/// them again.
pub trait TaskProvider {
    fn create_tasks(&self, targets: &[String], members: &RequiredMembers)
    -> Result<Vec<Task>, Error>;

    fn cleanup_tasks(&self, tasks: Vec<Task>);
}

/// Provider for checkpoints given either as an unpacked directory or as an
/// uncompressed tar archive. Only entries matching a required member are
/// copied into the task directory.
pub struct ArchiveTaskProvider {
    work_dir: PathBuf,
}

impl ArchiveTaskProvider {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn create_task(&self, target: &str, members: &RequiredMembers) -> Result<Task, Error> {
        let materialization = |source| Error::Materialization {
            target: target.to_string(),
            source,
        };

        let source = Path::new(target);
        let metadata = fs::metadata(source).map_err(materialization)?;

        // Removed on drop until the task is handed out.
        let dir = tempfile::Builder::new()
            .prefix("checkpointctl-")
            .tempdir_in(&self.work_dir)
            .map_err(materialization)?;

        let extracted = if metadata.is_dir() {
            copy_from_directory(source, dir.path(), members)
        } else {
            unpack_from_tar(source, dir.path(), members)
        }
        .map_err(materialization)?;

        info!(
            "extracted {extracted} member(s) from {target} into {}",
            dir.path().display()
        );

        Ok(Task {
            target: target.to_string(),
            dir: dir.keep(),
        })
    }
}

impl TaskProvider for ArchiveTaskProvider {
    fn create_tasks(
        &self,
        targets: &[String],
        members: &RequiredMembers,
    ) -> Result<Vec<Task>, Error> {
        let mut tasks = Vec::with_capacity(targets.len());
        for target in targets {
            match self.create_task(target, members) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    self.cleanup_tasks(tasks);
                    return Err(e);
                }
            }
        }
        Ok(tasks)
    }

    fn cleanup_tasks(&self, tasks: Vec<Task>) {
        for task in tasks {
            if let Err(e) = fs::remove_dir_all(&task.dir) {
                warn!(
                    "failed to remove working directory {} of {}: {e}",
                    task.dir.display(),
                    task.target
                );
            } else {
                debug!("removed working directory {}", task.dir.display());
            }
        }
    }
}

fn copy_from_directory(source: &Path, dest: &Path, members: &RequiredMembers) -> io::Result<usize> {
    let mut extracted = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        let Some(name) = rel.to_str() else {
            debug!("skipping non UTF-8 entry {}", rel.display());
            continue;
        };
        if !members.matches(name) {
            continue;
        }

        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        extracted += 1;
    }
    Ok(extracted)
}

fn unpack_from_tar(source: &Path, dest: &Path, members: &RequiredMembers) -> io::Result<usize> {
    let file = File::open(source)?;
    let mut archive = tar::Archive::new(BufReader::new(file));

    let mut extracted = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path()?.into_owned();
        let Some(name) = path.to_str() else {
            debug!("skipping non UTF-8 entry {}", path.display());
            continue;
        };
        if !members.matches(name) {
            continue;
        }
        // unpack_in refuses entries that would land outside dest
        if entry.unpack_in(dest)? {
            extracted += 1;
        } else {
            warn!("skipping entry {name} outside of the archive root");
        }
    }
    Ok(extracted)
}
