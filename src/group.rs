//! Order group assignment.
//!
//! Orders placed for the same store within a short window are tagged with a
//! shared group id at creation time so they can be routed together later.
//! Assignment happens exactly once and is never revisited; serializing
//! concurrent same-store creations is the persistence layer's concern.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::{Order, OrderStatus};

/// Lookback window for joining an existing group, in seconds.
pub const GROUP_WINDOW_SECS: i64 = 4 * 60;

/// Identifier shared by a cluster of orders routed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Mints a fresh group id for the start of a new cluster.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Picks the group for an order being created for `store_id` at `created_at`.
///
/// Scans `existing` for the most recently created order for the same store
/// with creation time in `[created_at - GROUP_WINDOW_SECS, created_at]` and
/// status Pending or Confirmed. If one exists its group is adopted, otherwise
/// a fresh group id is minted. The window is measured against existing orders
/// directly, not chained through intermediate members.
pub fn assign_group<O: Order>(
    store_id: &O::StoreId,
    created_at: i64,
    existing: &[O],
) -> GroupId {
    let window_start = created_at - GROUP_WINDOW_SECS;

    let mut adopted: Option<(i64, GroupId)> = None;
    for order in existing {
        if order.store_id() != store_id {
            continue;
        }
        if !matches!(order.status(), OrderStatus::Pending | OrderStatus::Confirmed) {
            continue;
        }
        let at = order.created_at();
        if at < window_start || at > created_at {
            continue;
        }
        let Some(group) = order.group() else {
            continue;
        };
        // Most recently created candidate wins.
        match adopted {
            Some((best_at, _)) if best_at >= at => {}
            _ => adopted = Some((at, group)),
        }
    }

    match adopted {
        Some((_, group)) => group,
        None => GroupId::random(),
    }
}
