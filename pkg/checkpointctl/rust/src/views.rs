// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fmt;

/// One inspectable aspect of a checkpoint report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Stats,
    Mounts,
    PsTree,
    PsTreeCmd,
    PsTreeEnv,
    Files,
    Sockets,
    Metadata,
    Network,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Stats,
        View::Mounts,
        View::PsTree,
        View::PsTreeCmd,
        View::PsTreeEnv,
        View::Files,
        View::Sockets,
        View::Metadata,
        View::Network,
    ];
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Stats => write!(f, "stats"),
            View::Mounts => write!(f, "mounts"),
            View::PsTree => write!(f, "ps-tree"),
            View::PsTreeCmd => write!(f, "ps-tree-cmd"),
            View::PsTreeEnv => write!(f, "ps-tree-env"),
            View::Files => write!(f, "files"),
            View::Sockets => write!(f, "sockets"),
            View::Metadata => write!(f, "metadata"),
            View::Network => write!(f, "network"),
        }
    }
}

/// The views requested for one invocation. Built once from parsed input and
/// passed by value; never shared mutably.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub stats: bool,
    pub mounts: bool,
    pub ps_tree: bool,
    pub ps_tree_cmd: bool,
    pub ps_tree_env: bool,
    pub files: bool,
    pub sockets: bool,
    pub show_all: bool,
    pub show_metadata: bool,
    pub show_network: bool,
    /// Restrict the process tree to this PID. Zero means no filter.
    pub pid_filter: u32,
}

impl ViewSelection {
    pub fn is_enabled(&self, view: View) -> bool {
        match view {
            View::Stats => self.stats,
            View::Mounts => self.mounts,
            View::PsTree => self.ps_tree,
            View::PsTreeCmd => self.ps_tree_cmd,
            View::PsTreeEnv => self.ps_tree_env,
            View::Files => self.files,
            View::Sockets => self.sockets,
            View::Metadata => self.show_metadata,
            View::Network => self.show_network,
        }
    }

    /// Turn `view` on. Returns true if it was off before.
    pub fn enable(&mut self, view: View) -> bool {
        let flag = match view {
            View::Stats => &mut self.stats,
            View::Mounts => &mut self.mounts,
            View::PsTree => &mut self.ps_tree,
            View::PsTreeCmd => &mut self.ps_tree_cmd,
            View::PsTreeEnv => &mut self.ps_tree_env,
            View::Files => &mut self.files,
            View::Sockets => &mut self.sockets,
            View::Metadata => &mut self.show_metadata,
            View::Network => &mut self.show_network,
        };
        !std::mem::replace(flag, true)
    }

    /// Apply `show_all`: every view flag is forced on. The PID filter is left
    /// untouched.
    pub fn expand_all(mut self) -> Self {
        if self.show_all {
            for view in View::ALL {
                self.enable(view);
            }
        }
        self
    }

    pub fn enabled_views(&self) -> impl Iterator<Item = View> + '_ {
        View::ALL.into_iter().filter(|v| self.is_enabled(*v))
    }
}
