// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
#![deny(clippy::undocumented_unsafe_blocks)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod config;
mod errors;
mod fs;
pub mod inspect;
pub mod members;
pub mod metadata;
pub mod network;
pub mod render;
pub mod resolver;
pub mod task;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export the public API
pub use errors::{DecodeError, Error};
pub use inspect::{Inspector, OutputFormat};
pub use members::{RequiredMember, RequiredMembers};
pub use network::{NetworkStatus, format_network_info, read_network_status};
pub use resolver::{Resolution, resolve};
pub use task::{ArchiveTaskProvider, Task, TaskProvider};
pub use views::ViewSelection;
