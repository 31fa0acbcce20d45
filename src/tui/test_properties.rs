//! Property-based tests for aggregation and dashboard invariants.
//!
//! Uses `proptest` to verify the load-bearing contracts over arbitrary
//! trees and message sequences: severity-fold algebra, aggregation
//! monotonicity and order-independence, flatten/locate consistency, and
//! the structural impossibility of an out-of-bounds pool selection.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;

use crate::pool::status::{pool_worst_status, vdev_worst_status};
use crate::pool::types::{DeviceKind, Disk, Pool, Severity, VDev};
use crate::tui::flatten::{flatten, locate};
use crate::tui::model::{DashboardModel, DashboardMsg};
use crate::tui::render::render;
use crate::tui::theme::Theme;
use crate::tui::update::update;

// ──────────────────── strategies ────────────────────

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Online),
        Just(Severity::Degraded),
        Just(Severity::Faulted),
    ]
}

fn arb_kind() -> impl Strategy<Value = DeviceKind> {
    prop_oneof![
        Just(DeviceKind::Mirror),
        Just(DeviceKind::Raidz1),
        Just(DeviceKind::Raidz2),
        Just(DeviceKind::Single),
        Just(DeviceKind::Disk),
        Just(DeviceKind::Cache),
        Just(DeviceKind::Log),
    ]
}

fn arb_disk() -> impl Strategy<Value = Disk> {
    ("[a-z]{2,6}", arb_severity(), any::<bool>(), 0.0f64..100.0).prop_map(
        |(name, status, resilvering, progress)| Disk {
            name,
            path: None,
            status,
            resilvering,
            progress,
        },
    )
}

fn arb_vdev() -> impl Strategy<Value = VDev> {
    let leaf = (
        "[a-z]{2,8}",
        arb_kind(),
        arb_severity(),
        prop::collection::vec(arb_disk(), 0..3),
    )
        .prop_map(|(name, kind, status, disks)| VDev {
            name,
            kind,
            status,
            children: Vec::new(),
            disks,
        });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            "[a-z]{2,8}",
            arb_kind(),
            arb_severity(),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(name, kind, status, children)| VDev {
                name,
                kind,
                status,
                children,
                disks: Vec::new(),
            })
    })
}

fn arb_pool() -> impl Strategy<Value = Pool> {
    (
        "[a-z]{2,8}",
        arb_severity(),
        arb_vdev(),
        prop::option::of(arb_vdev()),
        prop::option::of(arb_vdev()),
    )
        .prop_map(|(name, status, root, cache, slog)| Pool {
            name,
            status,
            root,
            cache,
            slog,
        })
}

fn arb_msg() -> impl Strategy<Value = DashboardMsg> {
    let keys = prop_oneof![
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Down),
        Just(KeyCode::Up),
        Just(KeyCode::Char('e')),
        Just(KeyCode::Char('r')),
        Just(KeyCode::Char('x')),
    ]
    .prop_map(|code| DashboardMsg::Key(KeyEvent::new(code, KeyModifiers::NONE)));

    prop_oneof![
        Just(DashboardMsg::Tick),
        keys,
        prop::collection::vec(arb_pool(), 0..4)
            .prop_map(|pools| DashboardMsg::PoolsLoaded(Ok(pools))),
        Just(DashboardMsg::PoolsLoaded(Err("injected failure".to_string()))),
        (10u16..200, 5u16..60).prop_map(|(cols, rows)| DashboardMsg::Resize { cols, rows }),
    ]
}

fn reverse_tree(vdev: &mut VDev) {
    vdev.children.reverse();
    vdev.disks.reverse();
    for child in &mut vdev.children {
        reverse_tree(child);
    }
}

fn node_count(vdev: &VDev) -> usize {
    1 + vdev.children.iter().map(node_count).sum::<usize>()
}

// ──────────────────── properties ────────────────────

proptest! {
    // ── Severity fold algebra ──

    #[test]
    fn worst_is_commutative_and_associative(
        a in arb_severity(),
        b in arb_severity(),
        c in arb_severity(),
    ) {
        prop_assert_eq!(a.worst(b), b.worst(a));
        prop_assert_eq!(a.worst(b).worst(c), a.worst(b.worst(c)));
        prop_assert_eq!(a.worst(a), a);
    }

    #[test]
    fn is_worse_than_is_irreflexive_and_asymmetric(
        a in arb_severity(),
        b in arb_severity(),
    ) {
        prop_assert!(!a.is_worse_than(a));
        if a.is_worse_than(b) {
            prop_assert!(!b.is_worse_than(a));
        }
    }

    // ── Aggregation ──

    #[test]
    fn aggregation_is_monotone(vdev in arb_vdev()) {
        let worst = vdev_worst_status(&vdev);
        prop_assert!(!vdev.status.is_worse_than(worst));
        for child in &vdev.children {
            prop_assert!(!vdev_worst_status(child).is_worse_than(worst));
        }
    }

    #[test]
    fn aggregation_is_deterministic(vdev in arb_vdev()) {
        prop_assert_eq!(vdev_worst_status(&vdev), vdev_worst_status(&vdev));
    }

    #[test]
    fn aggregation_ignores_child_order(vdev in arb_vdev()) {
        let forward = vdev_worst_status(&vdev);
        let mut reversed = vdev.clone();
        reverse_tree(&mut reversed);
        prop_assert_eq!(vdev_worst_status(&reversed), forward);
    }

    #[test]
    fn pool_rollup_is_supremum_of_subtrees(pool in arb_pool()) {
        let mut expected = vdev_worst_status(&pool.root);
        if let Some(cache) = &pool.cache {
            expected = expected.worst(vdev_worst_status(cache));
        }
        if let Some(slog) = &pool.slog {
            expected = expected.worst(vdev_worst_status(slog));
        }
        prop_assert_eq!(pool_worst_status(&pool), expected);
    }

    // ── Flatten / locate ──

    #[test]
    fn flatten_visits_every_node_once(pool in arb_pool()) {
        let expected = node_count(&pool.root)
            + pool.cache.as_ref().map_or(0, node_count)
            + pool.slog.as_ref().map_or(0, node_count);
        prop_assert_eq!(flatten(&pool).len(), expected);
    }

    #[test]
    fn locate_returns_first_occurrence(pool in arb_pool()) {
        let flat = flatten(&pool);
        for (i, vdev) in flat.iter().enumerate() {
            let found = locate(&flat, &vdev.name);
            prop_assert!(found.is_some());
            let j = found.unwrap();
            prop_assert!(j <= i);
            prop_assert_eq!(&flat[j].name, &vdev.name);
        }
        prop_assert_eq!(locate(&flat, "definitely-not-a-vdev-name"), None);
    }

    // ── State machine invariants ──

    #[test]
    fn selection_is_structurally_in_bounds(
        msgs in prop::collection::vec(arb_msg(), 0..40),
    ) {
        let mut model = DashboardModel::new(Duration::from_secs(1), (80, 24));
        for msg in msgs {
            let _ = update(&mut model, msg);
            if model.pools.is_empty() {
                prop_assert_eq!(model.selected_pool, 0);
            } else {
                prop_assert!(model.selected_pool < model.pools.len());
            }
            if let Some(name) = &model.selected_vdev {
                prop_assert!(!name.is_empty());
            }
        }
    }

    #[test]
    fn render_never_panics(msgs in prop::collection::vec(arb_msg(), 0..30)) {
        let mut model = DashboardModel::new(Duration::from_secs(1), (80, 24));
        let plain = Theme::plain();
        let ansi = Theme::ansi();
        for msg in msgs {
            let _ = update(&mut model, msg);
            let frame = render(&model, &plain);
            prop_assert!(!frame.is_empty());
            let _ = render(&model, &ansi);
        }
    }

    #[test]
    fn empty_collection_renders_exactly_the_fixed_message(
        cols in 10u16..200,
        rows in 5u16..60,
    ) {
        let mut model = DashboardModel::new(Duration::from_secs(1), (cols, rows));
        model.apply_pools(Vec::new());
        prop_assert_eq!(render(&model, &Theme::plain()), "No pools found\n");
    }
}
