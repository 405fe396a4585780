// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::env;
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: log::Level = log::Level::Warn;

fn parse_log_level(level: &str) -> log::Level {
    match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" | "warning" => log::Level::Warn,
        "error" | "critical" => log::Level::Error,
        "off" => log::Level::Error, // log::Level has no "off", keep errors only
        _ => DEFAULT_LOG_LEVEL,
    }
}

/// Gets the log level from the environment.
/// Priority: CHECKPOINTCTL_LOG_LEVEL > LOG_LEVEL > default Warn
pub fn log_level() -> log::Level {
    if let Ok(level) = env::var("CHECKPOINTCTL_LOG_LEVEL") {
        return parse_log_level(&level);
    }

    if let Ok(level) = env::var("LOG_LEVEL") {
        return parse_log_level(&level);
    }

    DEFAULT_LOG_LEVEL
}

/// Base directory under which task working directories are created.
pub fn work_dir() -> PathBuf {
    env::var("CHECKPOINTCTL_TMPDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}
