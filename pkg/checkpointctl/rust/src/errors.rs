// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to materialize checkpoint {target}: {source}")]
    Materialization {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid output format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to render report: {0}")]
    Render(#[source] io::Error),
}

/// Failure to read one JSON archive member. The member path is always kept
/// so callers can report where the bad data came from.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub fn path(&self) -> &Path {
        match self {
            DecodeError::Read { path, .. } | DecodeError::Parse { path, .. } => path,
        }
    }
}

