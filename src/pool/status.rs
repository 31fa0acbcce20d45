//! Worst-status aggregation over device trees.
//!
//! Pure functions only: the tree is explicit input, there is no hidden
//! analyzer state and no caching, so repeated calls on an unchanged tree
//! always yield identical results.

use crate::pool::types::{Pool, Severity, VDev};

/// Worst health state found anywhere in `vdev`'s subtree.
///
/// Defined recursively:
/// 1. a node with no children and no disks returns its own status;
/// 2. a node with children returns the supremum of its own status and
///    every child's result (the fold is associative and commutative, so
///    child order cannot affect the outcome);
/// 3. a disk-bearing node without child vdevs folds its disks' statuses
///    into its own.
#[must_use]
pub fn vdev_worst_status(vdev: &VDev) -> Severity {
    let mut worst = vdev.status;
    for child in &vdev.children {
        worst = worst.worst(vdev_worst_status(child));
    }
    if vdev.children.is_empty() {
        for disk in &vdev.disks {
            worst = worst.worst(disk.status);
        }
    }
    worst
}

/// Worst health state across a pool's root, cache, and slog subtrees.
///
/// Sibling subtrees do not influence each other's local result; only the
/// pool-level rollup folds them together. The pool's own stored status is
/// source-reported display data and does not participate.
#[must_use]
pub fn pool_worst_status(pool: &Pool) -> Severity {
    let mut worst = vdev_worst_status(&pool.root);
    if let Some(cache) = &pool.cache {
        worst = worst.worst(vdev_worst_status(cache));
    }
    if let Some(slog) = &pool.slog {
        worst = worst.worst(vdev_worst_status(slog));
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::types::{DeviceKind, Disk};

    fn disk(name: &str, status: Severity) -> VDev {
        VDev::leaf(name, DeviceKind::Disk, status)
    }

    fn mirror(name: &str, status: Severity, children: Vec<VDev>) -> VDev {
        VDev::group(name, DeviceKind::Mirror, status, children)
    }

    // ── Base cases ──

    #[test]
    fn bare_leaf_returns_own_status() {
        assert_eq!(
            vdev_worst_status(&disk("sda", Severity::Degraded)),
            Severity::Degraded
        );
        assert_eq!(
            vdev_worst_status(&disk("sdb", Severity::Online)),
            Severity::Online
        );
    }

    #[test]
    fn disk_bearing_node_folds_disk_statuses() {
        let mut vdev = VDev::leaf("stripe-0", DeviceKind::Single, Severity::Online);
        vdev.disks = vec![
            Disk {
                name: "sdc".to_string(),
                status: Severity::Online,
                ..Disk::default()
            },
            Disk {
                name: "sdd".to_string(),
                status: Severity::Faulted,
                ..Disk::default()
            },
        ];
        assert_eq!(vdev_worst_status(&vdev), Severity::Faulted);
    }

    #[test]
    fn disks_ignored_when_children_present() {
        // A node with child vdevs derives from the children; the disks
        // vector is only consulted for leaf-logical nodes.
        let mut vdev = mirror(
            "mirror-0",
            Severity::Online,
            vec![disk("sda", Severity::Online)],
        );
        vdev.disks = vec![Disk {
            name: "ghost".to_string(),
            status: Severity::Faulted,
            ..Disk::default()
        }];
        assert_eq!(vdev_worst_status(&vdev), Severity::Online);
    }

    // ── Recursion ──

    #[test]
    fn degraded_child_dominates_online_parent() {
        let vdev = mirror(
            "mirror-0",
            Severity::Online,
            vec![
                disk("sda", Severity::Degraded),
                disk("sdb", Severity::Online),
            ],
        );
        assert_eq!(vdev_worst_status(&vdev), Severity::Degraded);
    }

    #[test]
    fn faulted_parent_dominates_online_children() {
        let vdev = mirror(
            "log",
            Severity::Faulted,
            vec![
                disk("nvme1n1p1", Severity::Online),
                disk("nvme1n2p1", Severity::Online),
            ],
        );
        assert_eq!(vdev_worst_status(&vdev), Severity::Faulted);
    }

    #[test]
    fn deep_nesting_propagates_worst() {
        let vdev = mirror(
            "raid-top",
            Severity::Online,
            vec![mirror(
                "mirror-1",
                Severity::Online,
                vec![mirror(
                    "mirror-2",
                    Severity::Online,
                    vec![disk("sdz", Severity::Faulted)],
                )],
            )],
        );
        assert_eq!(vdev_worst_status(&vdev), Severity::Faulted);
    }

    #[test]
    fn result_never_better_than_intrinsic_or_children() {
        let child = disk("sda", Severity::Degraded);
        let vdev = mirror("mirror-0", Severity::Online, vec![child.clone()]);

        let worst = vdev_worst_status(&vdev);
        assert!(!vdev.status.is_worse_than(worst));
        assert!(!vdev_worst_status(&child).is_worse_than(worst));
    }

    #[test]
    fn aggregation_is_deterministic_and_order_independent() {
        let mut vdev = mirror(
            "mirror-0",
            Severity::Online,
            vec![
                disk("sda", Severity::Faulted),
                disk("sdb", Severity::Online),
                disk("sdc", Severity::Degraded),
            ],
        );

        let first = vdev_worst_status(&vdev);
        assert_eq!(vdev_worst_status(&vdev), first);

        vdev.children.reverse();
        assert_eq!(vdev_worst_status(&vdev), first);
    }

    // ── Pool rollup ──

    fn pool_with(root: VDev, cache: Option<VDev>, slog: Option<VDev>) -> Pool {
        Pool {
            name: "tank".to_string(),
            status: Severity::Online,
            root,
            cache,
            slog,
        }
    }

    #[test]
    fn degraded_cache_degrades_the_pool() {
        let pool = pool_with(
            disk("sda", Severity::Online),
            Some(disk("nvme-cache", Severity::Degraded)),
            None,
        );
        assert_eq!(pool_worst_status(&pool), Severity::Degraded);
    }

    #[test]
    fn faulted_slog_faults_the_pool() {
        let pool = pool_with(
            disk("sda", Severity::Online),
            Some(disk("nvme-cache", Severity::Online)),
            Some(disk("nvme-slog", Severity::Faulted)),
        );
        assert_eq!(pool_worst_status(&pool), Severity::Faulted);
    }

    #[test]
    fn healthy_pool_stays_online() {
        let pool = pool_with(
            mirror(
                "mirror-0",
                Severity::Online,
                vec![disk("sda", Severity::Online), disk("sdb", Severity::Online)],
            ),
            None,
            None,
        );
        assert_eq!(pool_worst_status(&pool), Severity::Online);
    }

    #[test]
    fn pool_stored_status_does_not_participate() {
        let mut pool = pool_with(disk("sda", Severity::Online), None, None);
        pool.status = Severity::Faulted;
        assert_eq!(pool_worst_status(&pool), Severity::Online);
    }

    #[test]
    fn testpool_scenario_reports_degraded() {
        // Mirror root with one degraded disk: the pool-level rollup must
        // be Degraded even though the pool and root report Online.
        let pool = pool_with(
            mirror(
                "testpool",
                Severity::Online,
                vec![
                    disk("sda", Severity::Degraded),
                    disk("sdb", Severity::Online),
                ],
            ),
            None,
            None,
        );
        assert_eq!(pool_worst_status(&pool), Severity::Degraded);
    }
}
