//! Storage pool topology model: pools, virtual device trees, and disks.
//!
//! A [`Pool`] owns exactly one root [`VDev`] tree plus optional cache and
//! slog subtrees. Every node carries an intrinsic [`Severity`]; the
//! *effective* severity of a node with descendants is always derived by
//! traversal (see [`crate::pool::status`]), never read off the node itself.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

/// Ranked health state of a device or pool.
///
/// Declaration order defines the total order used everywhere:
/// `Online < Degraded < Faulted`. The ordering is an opaque ranked
/// enumeration; no numeric encoding leaves this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Device is functioning normally.
    #[default]
    Online,
    /// Device operates with reduced redundancy but still serves I/O.
    Degraded,
    /// Device has failed or stopped responding to I/O.
    Faulted,
}

impl Severity {
    /// zpool-style uppercase display token.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Degraded => "DEGRADED",
            Self::Faulted => "FAULTED",
        }
    }

    /// Strict parse of a status token. Case-insensitive, no coercion.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ONLINE" => Some(Self::Online),
            "DEGRADED" => Some(Self::Degraded),
            "FAULTED" => Some(Self::Faulted),
            _ => None,
        }
    }

    /// True iff `self` is strictly more severe than `other`.
    ///
    /// Irreflexive; `Faulted` is the absorbing maximum.
    #[must_use]
    pub fn is_worse_than(self, other: Self) -> bool {
        self > other
    }

    /// Supremum of two severities under the `is_worse_than` order.
    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

// Lenient wire-format parsing: a collaborator handing us a status outside
// the known set must never crash the dashboard, and an unknown token must
// never win an aggregation. Fail closed to the least severe state.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw).unwrap_or_else(|| {
            log::warn!("unrecognized device status {raw:?}, treating as ONLINE");
            Self::Online
        }))
    }
}

/// Role of a virtual device within the pool topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// N-way mirrored group.
    Mirror,
    /// Single-parity RAID group.
    Raidz1,
    /// Double-parity RAID group.
    Raidz2,
    /// Triple-parity RAID group.
    Raidz3,
    /// Hot spare.
    Spare,
    /// Read cache device (L2ARC).
    Cache,
    /// Separate intent log device.
    Log,
    /// Non-redundant single device group.
    Single,
    /// Bare physical disk.
    Disk,
}

impl DeviceKind {
    /// Lowercase display token, e.g. `mirror`, `raidz2`.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::Raidz1 => "raidz1",
            Self::Raidz2 => "raidz2",
            Self::Raidz3 => "raidz3",
            Self::Spare => "spare",
            Self::Cache => "cache",
            Self::Log => "log",
            Self::Single => "single",
            Self::Disk => "disk",
        }
    }

    /// Whether this device kind provides redundancy on its own.
    #[must_use]
    pub const fn is_redundant(self) -> bool {
        matches!(self, Self::Mirror | Self::Raidz1 | Self::Raidz2 | Self::Raidz3)
    }
}

impl<'de> Deserialize<'de> for DeviceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "mirror" => Ok(Self::Mirror),
            "raidz1" => Ok(Self::Raidz1),
            "raidz2" => Ok(Self::Raidz2),
            "raidz3" => Ok(Self::Raidz3),
            "spare" => Ok(Self::Spare),
            "cache" => Ok(Self::Cache),
            "log" => Ok(Self::Log),
            "single" => Ok(Self::Single),
            "disk" => Ok(Self::Disk),
            other => Err(D::Error::custom(format!("unknown device kind {other:?}"))),
        }
    }
}

/// Physical disk leaf. Carries display-only live attributes and does not
/// participate in the aggregation recursion except as a base case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disk {
    /// Device name, e.g. `sda`.
    pub name: String,
    /// Optional device path, e.g. `/dev/disk/by-id/...`.
    pub path: Option<String>,
    /// Health state of this disk.
    pub status: Severity,
    /// Whether the disk is currently resilvering.
    pub resilvering: bool,
    /// Resilver progress percentage, meaningful only while resilvering.
    pub progress: f64,
}

impl Default for Disk {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: None,
            status: Severity::Online,
            resilvering: false,
            progress: 0.0,
        }
    }
}

/// Node in a pool's device tree: either a physical leaf device or a
/// logical grouping owning child devices.
///
/// Ownership is strictly top-down: a `VDev` belongs to exactly one pool
/// and holds its children by value, so traversal never needs back-pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VDev {
    /// Identifier, e.g. `mirror-0` or `sda`.
    pub name: String,
    /// Device role tag.
    pub kind: DeviceKind,
    /// Intrinsic health state. For nodes with descendants the effective
    /// severity is derived by traversal instead.
    pub status: Severity,
    /// Nested logical devices, in stored order. Empty for leaves.
    #[serde(default)]
    pub children: Vec<VDev>,
    /// Physical disks, used when this node's children are disks rather
    /// than nested logical devices.
    #[serde(default)]
    pub disks: Vec<Disk>,
}

impl VDev {
    /// Leaf constructor: a bare device with no descendants.
    #[must_use]
    pub fn leaf(name: impl Into<String>, kind: DeviceKind, status: Severity) -> Self {
        Self {
            name: name.into(),
            kind,
            status,
            children: Vec::new(),
            disks: Vec::new(),
        }
    }

    /// Grouping constructor: a logical device owning child vdevs.
    #[must_use]
    pub fn group(
        name: impl Into<String>,
        kind: DeviceKind,
        status: Severity,
        children: Vec<VDev>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            status,
            children,
            disks: Vec::new(),
        }
    }

    /// True when the node has no child vdevs and no disks.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.disks.is_empty()
    }
}

/// Top-level storage container: one mandatory root device tree plus
/// optional cache and slog subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool identifier.
    pub name: String,
    /// Health state as reported by the data source. Display only; the
    /// effective pool severity is always the subtree rollup.
    pub status: Severity,
    /// Main storage device tree.
    pub root: VDev,
    /// Optional read-cache subtree (L2ARC).
    #[serde(default)]
    pub cache: Option<VDev>,
    /// Optional separate intent log subtree.
    #[serde(default)]
    pub slog: Option<VDev>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Severity order ──

    #[test]
    fn severity_order_is_total() {
        use Severity::{Degraded, Faulted, Online};

        assert!(Faulted.is_worse_than(Degraded));
        assert!(Faulted.is_worse_than(Online));
        assert!(Degraded.is_worse_than(Online));

        assert!(!Degraded.is_worse_than(Faulted));
        assert!(!Online.is_worse_than(Faulted));
        assert!(!Online.is_worse_than(Degraded));

        assert!(!Online.is_worse_than(Online));
        assert!(!Degraded.is_worse_than(Degraded));
        assert!(!Faulted.is_worse_than(Faulted));
    }

    #[test]
    fn worst_is_commutative_supremum() {
        use Severity::{Degraded, Faulted, Online};

        assert_eq!(Online.worst(Degraded), Degraded);
        assert_eq!(Degraded.worst(Online), Degraded);
        assert_eq!(Degraded.worst(Faulted), Faulted);
        assert_eq!(Online.worst(Online), Online);
    }

    #[test]
    fn severity_label_round_trip() {
        for sev in [Severity::Online, Severity::Degraded, Severity::Faulted] {
            assert_eq!(Severity::from_label(sev.as_label()), Some(sev));
        }
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::from_label("online"), Some(Severity::Online));
        assert_eq!(Severity::from_label(" Degraded "), Some(Severity::Degraded));
        assert_eq!(Severity::from_label("REMOVED"), None);
    }

    #[test]
    fn unknown_status_deserializes_fail_closed() {
        // Documented policy: an unrecognized token can never win an
        // aggregation, so it maps to the least severe state.
        let sev: Severity = serde_json::from_str("\"UNAVAIL\"").unwrap();
        assert_eq!(sev, Severity::Online);

        let sev: Severity = serde_json::from_str("\"FAULTED\"").unwrap();
        assert_eq!(sev, Severity::Faulted);
    }

    #[test]
    fn severity_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Degraded).unwrap(),
            "\"DEGRADED\""
        );
    }

    // ── DeviceKind ──

    #[test]
    fn redundant_kinds() {
        assert!(DeviceKind::Mirror.is_redundant());
        assert!(DeviceKind::Raidz1.is_redundant());
        assert!(DeviceKind::Raidz2.is_redundant());
        assert!(DeviceKind::Raidz3.is_redundant());

        assert!(!DeviceKind::Disk.is_redundant());
        assert!(!DeviceKind::Cache.is_redundant());
        assert!(!DeviceKind::Log.is_redundant());
        assert!(!DeviceKind::Single.is_redundant());
        assert!(!DeviceKind::Spare.is_redundant());
    }

    #[test]
    fn kind_deserializes_lowercase() {
        let kind: DeviceKind = serde_json::from_str("\"raidz2\"").unwrap();
        assert_eq!(kind, DeviceKind::Raidz2);

        let err = serde_json::from_str::<DeviceKind>("\"draid\"").unwrap_err();
        assert!(err.to_string().contains("unknown device kind"));
    }

    // ── Tree shape ──

    #[test]
    fn leaf_and_group_constructors() {
        let leaf = VDev::leaf("sda", DeviceKind::Disk, Severity::Online);
        assert!(leaf.is_leaf());

        let group = VDev::group(
            "mirror-0",
            DeviceKind::Mirror,
            Severity::Online,
            vec![leaf],
        );
        assert!(!group.is_leaf());
        assert_eq!(group.children.len(), 1);
    }

    #[test]
    fn disk_bearing_vdev_is_not_a_leaf() {
        let mut vdev = VDev::leaf("stripe-0", DeviceKind::Single, Severity::Online);
        vdev.disks.push(Disk {
            name: "sdc".to_string(),
            ..Disk::default()
        });
        assert!(!vdev.is_leaf());
    }

    #[test]
    fn pool_json_round_trip() {
        let pool = Pool {
            name: "tank".to_string(),
            status: Severity::Online,
            root: VDev::group(
                "mirror-0",
                DeviceKind::Mirror,
                Severity::Online,
                vec![
                    VDev::leaf("sda", DeviceKind::Disk, Severity::Degraded),
                    VDev::leaf("sdb", DeviceKind::Disk, Severity::Online),
                ],
            ),
            cache: None,
            slog: Some(VDev::leaf("nvme0n1", DeviceKind::Log, Severity::Online)),
        };

        let raw = serde_json::to_string(&pool).unwrap();
        let parsed: Pool = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, pool);
    }

    #[test]
    fn pool_json_defaults_optional_subtrees() {
        let raw = r#"{
            "name": "tank",
            "status": "ONLINE",
            "root": { "name": "sda", "kind": "disk", "status": "ONLINE" }
        }"#;
        let pool: Pool = serde_json::from_str(raw).unwrap();
        assert!(pool.cache.is_none());
        assert!(pool.slog.is_none());
        assert!(pool.root.is_leaf());
    }
}
