// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::errors::DecodeError;

/// JSON members are small (a few KiB in practice); anything bigger than this
/// is not something we produced.
pub const MAX_JSON_MEMBER_SIZE: u64 = 1024 * 1024; // 1 MiB

/// Returns a reader over `file` after checking that it is a regular file no
/// larger than `max_size`.
pub fn size_verified_reader(file: &File, max_size: u64) -> io::Result<impl Read + '_> {
    let metadata = file.metadata()?;

    // Don't try to read device files, etc.
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }

    let size = metadata.len();
    if size > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("file too large ({} bytes)", size),
        ));
    }

    // Limit the reader in case the file grows while we read it
    Ok(file.take(size.min(max_size)))
}

/// Decode the JSON member `name` inside `dir`.
///
/// The resolved member path is returned alongside the value, and is also
/// carried by the error, so the caller can always report provenance.
pub fn read_json_member<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
) -> Result<(T, PathBuf), DecodeError> {
    let path = dir.join(name);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(DecodeError::Read { path, source }),
    };
    let reader = match size_verified_reader(&file, MAX_JSON_MEMBER_SIZE) {
        Ok(reader) => reader,
        Err(source) => return Err(DecodeError::Read { path, source }),
    };

    match serde_json::from_reader(BufReader::new(reader)) {
        Ok(value) => Ok((value, path)),
        Err(source) => Err(DecodeError::Parse { path, source }),
    }
}
