// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Maps requested views onto the archive members needed to show them.
//!
//! Views can imply other views: open files and sockets are attached to the
//! processes that own them, so they need the process tree, and the process
//! tree needs the core images. The rules below are applied until nothing
//! changes, so a view turned on by one rule still triggers the rules that
//! depend on it.

use log::debug;

use crate::members::{
    CORE_PREFIX, FDINFO_PREFIX, FILES_IMG, FS_PREFIX, IDS_PREFIX, MM_PREFIX, NETWORK_STATUS_FILE,
    PAGEMAP_PREFIX, PAGES_PREFIX, PSTREE_IMG, RequiredMember, RequiredMembers, STATS_DUMP_FILE,
};
use crate::views::{View, ViewSelection};

/// One row of the implication table.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&ViewSelection) -> bool,
    pub implies: &'static [View],
    pub members: &'static [RequiredMember],
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "network",
        applies: |s| s.show_network,
        implies: &[],
        members: &[RequiredMember::exact(NETWORK_STATUS_FILE)],
    },
    Rule {
        name: "stats",
        applies: |s| s.stats,
        implies: &[],
        members: &[RequiredMember::prefix(STATS_DUMP_FILE)],
    },
    Rule {
        name: "pid-filter",
        applies: |s| s.pid_filter != 0,
        implies: &[View::PsTree],
        members: &[],
    },
    Rule {
        name: "files",
        applies: |s| s.files,
        implies: &[View::PsTree],
        members: &[
            RequiredMember::exact(FILES_IMG),
            RequiredMember::prefix(FS_PREFIX),
            RequiredMember::prefix(IDS_PREFIX),
            RequiredMember::prefix(FDINFO_PREFIX),
        ],
    },
    Rule {
        name: "sockets",
        applies: |s| s.sockets,
        implies: &[View::PsTree],
        members: &[
            RequiredMember::exact(FILES_IMG),
            RequiredMember::prefix(IDS_PREFIX),
            RequiredMember::prefix(FDINFO_PREFIX),
        ],
    },
    Rule {
        name: "ps-tree-memory",
        applies: |s| s.ps_tree_cmd || s.ps_tree_env,
        implies: &[View::PsTree],
        members: &[
            RequiredMember::prefix(PAGEMAP_PREFIX),
            RequiredMember::prefix(PAGES_PREFIX),
            RequiredMember::prefix(MM_PREFIX),
        ],
    },
    Rule {
        name: "ps-tree",
        applies: |s| s.ps_tree,
        implies: &[],
        members: &[
            RequiredMember::exact(PSTREE_IMG),
            RequiredMember::prefix(CORE_PREFIX),
        ],
    },
];

/// Closed view selection and the members it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub selection: ViewSelection,
    pub members: RequiredMembers,
}

/// Resolve `selection` against the default rule table.
pub fn resolve(selection: &ViewSelection) -> Resolution {
    resolve_with(selection, RULES)
}

/// Apply `rules` to `selection` until a fixed point is reached.
///
/// `show_all` is expanded first. Rules only ever turn views on and add
/// members, so the loop ends after at most one pass per rule.
pub fn resolve_with(selection: &ViewSelection, rules: &[Rule]) -> Resolution {
    let mut selection = selection.expand_all();
    let mut members = RequiredMembers::with_base();

    for pass in 0..=rules.len() {
        let mut changed = false;
        for rule in rules {
            if !(rule.applies)(&selection) {
                continue;
            }
            for view in rule.implies {
                if selection.enable(*view) {
                    debug!("rule {} enabled view {view}", rule.name);
                    changed = true;
                }
            }
            for member in rule.members {
                changed |= members.insert(*member);
            }
        }
        if !changed {
            debug!(
                "resolved {} required member(s) after {} pass(es), enabled views: {}",
                members.iter().count(),
                pass + 1,
                selection
                    .enabled_views()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            break;
        }
    }

    Resolution { selection, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::{CONFIG_DUMP_FILE, SPEC_DUMP_FILE};

    fn names(resolution: &Resolution) -> Vec<&'static str> {
        resolution.members.names().collect()
    }

    fn sorted_names(resolution: &Resolution) -> Vec<&'static str> {
        let mut names = names(resolution);
        names.sort_unstable();
        names
    }

    fn reversed_rules() -> Vec<Rule> {
        RULES
            .iter()
            .rev()
            .map(|r| Rule {
                name: r.name,
                applies: r.applies,
                implies: r.implies,
                members: r.members,
            })
            .collect()
    }

    /// Every combination of the ten boolean flags, with and without a PID
    /// filter.
    fn every_selection() -> impl Iterator<Item = ViewSelection> {
        (0u16..1 << 10).flat_map(|mask| {
            let bit = |n: u16| mask & (1 << n) != 0;
            [0, 7].map(|pid_filter| ViewSelection {
                stats: bit(0),
                mounts: bit(1),
                ps_tree: bit(2),
                ps_tree_cmd: bit(3),
                ps_tree_env: bit(4),
                files: bit(5),
                sockets: bit(6),
                show_all: bit(7),
                show_metadata: bit(8),
                show_network: bit(9),
                pid_filter,
            })
        })
    }

    fn all_flags() -> ViewSelection {
        ViewSelection {
            stats: true,
            mounts: true,
            ps_tree: true,
            ps_tree_cmd: true,
            ps_tree_env: true,
            files: true,
            sockets: true,
            show_all: false,
            show_metadata: true,
            show_network: true,
            pid_filter: 0,
        }
    }

    #[test]
    fn test_empty_selection_yields_base_members() {
        let resolution = resolve(&ViewSelection::default());
        assert_eq!(names(&resolution), vec![SPEC_DUMP_FILE, CONFIG_DUMP_FILE]);
        assert_eq!(resolution.selection, ViewSelection::default());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let selection = ViewSelection {
            files: true,
            stats: true,
            ..Default::default()
        };
        assert_eq!(resolve(&selection), resolve(&selection));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let selection = ViewSelection {
            sockets: true,
            ps_tree_env: true,
            ..Default::default()
        };
        let first = resolve(&selection);
        let second = resolve(&first.selection);
        assert_eq!(first, second);
    }

    #[test]
    fn test_show_all_equals_every_flag() {
        let via_all = resolve(&ViewSelection {
            show_all: true,
            ..Default::default()
        });
        let via_flags = resolve(&all_flags());

        assert_eq!(via_all.members, via_flags.members);
        assert_eq!(
            ViewSelection {
                show_all: false,
                ..via_all.selection
            },
            via_flags.selection
        );
    }

    #[test]
    fn test_files_implies_ps_tree() {
        let resolution = resolve(&ViewSelection {
            files: true,
            ..Default::default()
        });
        assert!(resolution.selection.ps_tree);
        assert_eq!(
            names(&resolution),
            vec![
                SPEC_DUMP_FILE,
                CONFIG_DUMP_FILE,
                FILES_IMG,
                FS_PREFIX,
                IDS_PREFIX,
                FDINFO_PREFIX,
                PSTREE_IMG,
                CORE_PREFIX,
            ]
        );
    }

    #[test]
    fn test_sockets_implies_ps_tree() {
        let resolution = resolve(&ViewSelection {
            sockets: true,
            ..Default::default()
        });
        assert!(resolution.selection.ps_tree);
        assert!(resolution.members.contains(&RequiredMember::exact(PSTREE_IMG)));
        assert!(resolution.members.contains(&RequiredMember::prefix(CORE_PREFIX)));
        assert!(!resolution.members.contains_name(FS_PREFIX));
    }

    #[test]
    fn test_files_and_sockets_share_members() {
        let resolution = resolve(&ViewSelection {
            files: true,
            sockets: true,
            ..Default::default()
        });
        let files_img = resolution
            .members
            .iter()
            .filter(|m| m.name() == FILES_IMG)
            .count();
        assert_eq!(files_img, 1);
    }

    #[test]
    fn test_pid_filter_only_adds_process_tree() {
        let resolution = resolve(&ViewSelection {
            pid_filter: 1,
            ..Default::default()
        });
        assert!(resolution.selection.ps_tree);
        assert_eq!(
            names(&resolution),
            vec![SPEC_DUMP_FILE, CONFIG_DUMP_FILE, PSTREE_IMG, CORE_PREFIX]
        );
    }

    #[test]
    fn test_ps_tree_cmd_and_env_add_memory_images() {
        for selection in [
            ViewSelection {
                ps_tree_cmd: true,
                ..Default::default()
            },
            ViewSelection {
                ps_tree_env: true,
                ..Default::default()
            },
        ] {
            let resolution = resolve(&selection);
            assert!(resolution.selection.ps_tree);
            assert_eq!(
                names(&resolution),
                vec![
                    SPEC_DUMP_FILE,
                    CONFIG_DUMP_FILE,
                    PAGEMAP_PREFIX,
                    PAGES_PREFIX,
                    MM_PREFIX,
                    PSTREE_IMG,
                    CORE_PREFIX,
                ]
            );
        }
    }

    #[test]
    fn test_network_and_stats() {
        let resolution = resolve(&ViewSelection {
            show_network: true,
            stats: true,
            ..Default::default()
        });
        assert_eq!(
            names(&resolution),
            vec![
                SPEC_DUMP_FILE,
                CONFIG_DUMP_FILE,
                NETWORK_STATUS_FILE,
                STATS_DUMP_FILE
            ]
        );
        assert!(!resolution.selection.ps_tree);
    }

    #[test]
    fn test_mounts_and_metadata_need_only_base_members() {
        let resolution = resolve(&ViewSelection {
            mounts: true,
            show_metadata: true,
            ..Default::default()
        });
        assert_eq!(names(&resolution), vec![SPEC_DUMP_FILE, CONFIG_DUMP_FILE]);
    }

    #[test]
    fn test_implied_flag_same_as_direct_flag() {
        let implied = resolve(&ViewSelection {
            files: true,
            ..Default::default()
        });
        let direct = resolve(&ViewSelection {
            files: true,
            ps_tree: true,
            ..Default::default()
        });
        assert_eq!(implied, direct);
    }

    #[test]
    fn test_closure_does_not_depend_on_rule_order() {
        // ps-tree first: a single linear pass would miss pstree.img here.
        let reversed = reversed_rules();

        let selection = ViewSelection {
            sockets: true,
            ..Default::default()
        };
        let forward = resolve_with(&selection, RULES);
        let backward = resolve_with(&selection, &reversed);

        assert_eq!(forward.selection, backward.selection);
        assert_eq!(sorted_names(&forward), sorted_names(&backward));
        assert!(backward.members.contains_name(PSTREE_IMG));
    }

    #[test]
    fn test_every_selection_resolves_consistently() {
        let reversed = reversed_rules();
        let mut count = 0;
        for selection in every_selection() {
            let first = resolve(&selection);
            assert_eq!(first, resolve(&selection), "{selection:?}");

            let again = resolve(&first.selection);
            assert_eq!(again.members, first.members, "{selection:?}");
            assert_eq!(again.selection, first.selection, "{selection:?}");

            let backward = resolve_with(&selection, &reversed);
            assert_eq!(backward.selection, first.selection, "{selection:?}");
            assert_eq!(sorted_names(&backward), sorted_names(&first), "{selection:?}");

            if first.selection.files || first.selection.sockets || selection.pid_filter != 0 {
                assert!(first.selection.ps_tree, "{selection:?}");
            }
            count += 1;
        }
        assert_eq!(count, 2048);
    }
}
