// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Names of the archive members a checkpoint inspection may need.

use std::fmt;

/// Directory inside the archive holding the process images.
pub const CHECKPOINT_DIRECTORY: &str = "checkpoint";

pub const SPEC_DUMP_FILE: &str = "spec.dump";
pub const CONFIG_DUMP_FILE: &str = "config.dump";
pub const NETWORK_STATUS_FILE: &str = "network.status";
pub const STATS_DUMP_FILE: &str = "stats-dump";

pub const FILES_IMG: &str = "checkpoint/files.img";
pub const FS_PREFIX: &str = "checkpoint/fs-";
pub const IDS_PREFIX: &str = "checkpoint/ids-";
pub const FDINFO_PREFIX: &str = "checkpoint/fdinfo-";
pub const PAGEMAP_PREFIX: &str = "checkpoint/pagemap-";
pub const PAGES_PREFIX: &str = "checkpoint/pages-";
pub const MM_PREFIX: &str = "checkpoint/mm-";
pub const PSTREE_IMG: &str = "checkpoint/pstree.img";
pub const CORE_PREFIX: &str = "checkpoint/core-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MatchKind {
    /// The member name must equal the entry name.
    Exact,
    /// The member name is a prefix of the entry name.
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequiredMember {
    name: &'static str,
    kind: MatchKind,
}

impl RequiredMember {
    pub const fn exact(name: &'static str) -> Self {
        Self {
            name,
            kind: MatchKind::Exact,
        }
    }

    pub const fn prefix(name: &'static str) -> Self {
        Self {
            name,
            kind: MatchKind::Prefix,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check an archive entry name, relative to the archive root and using
    /// `/` separators, against this member.
    pub fn matches(&self, entry: &str) -> bool {
        let entry = entry.strip_prefix("./").unwrap_or(entry);
        match self.kind {
            MatchKind::Exact => entry == self.name,
            MatchKind::Prefix => entry.starts_with(self.name),
        }
    }
}

impl fmt::Display for RequiredMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MatchKind::Exact => write!(f, "{}", self.name),
            MatchKind::Prefix => write!(f, "{}*", self.name),
        }
    }
}

/// Members that every inspection needs.
pub const BASE_MEMBERS: [RequiredMember; 2] = [
    RequiredMember::exact(SPEC_DUMP_FILE),
    RequiredMember::exact(CONFIG_DUMP_FILE),
];

/// Distinct required members, kept in the order they were first added so
/// extraction is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredMembers(Vec<RequiredMember>);

impl RequiredMembers {
    pub fn with_base() -> Self {
        let mut members = Self::default();
        for member in BASE_MEMBERS {
            members.insert(member);
        }
        members
    }

    /// Add `member`. Returns true if it was not present yet.
    pub fn insert(&mut self, member: RequiredMember) -> bool {
        if self.0.contains(&member) {
            return false;
        }
        self.0.push(member);
        true
    }

    pub fn contains(&self, member: &RequiredMember) -> bool {
        self.0.contains(member)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.iter().any(|m| m.name == name)
    }

    /// True if some required member selects the archive entry `entry`.
    pub fn matches(&self, entry: &str) -> bool {
        self.0.iter().any(|m| m.matches(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequiredMember> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|m| m.name)
    }
}

impl<'a> IntoIterator for &'a RequiredMembers {
    type Item = &'a RequiredMember;
    type IntoIter = std::slice::Iter<'a, RequiredMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
