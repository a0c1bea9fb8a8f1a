//! Top-level route planning pipeline.
//!
//! Ties together waypoint construction, matrix building, sequencing, and
//! link generation for one agent's workload. Oracle failure is downgraded
//! here: the caller still gets the stop list for marker display, just no
//! navigable route.

use tracing::{debug, warn};

use crate::maps_link::navigation_url;
use crate::matrix::{DistanceMatrix, build_matrix};
use crate::sequencer::sequence;
use crate::traits::{DistanceOracle, OracleError, Order, Store};
use crate::waypoint::{Waypoint, build_waypoints};

/// A fully computed route for one agent.
#[derive(Debug, Clone)]
pub struct RoutePlan<OrderId, StoreId> {
    /// Waypoints in visiting order.
    pub stops: Vec<Waypoint<OrderId, StoreId>>,
    /// Directions link for the agent's map surface.
    pub maps_url: String,
    /// The matrix the sequence was computed on, indexed by the original
    /// (pre-sequencing) waypoint positions.
    pub matrix: DistanceMatrix,
}

/// Outcome of a route planning request.
#[derive(Debug)]
pub enum PlanOutcome<OrderId, StoreId> {
    /// Nothing to route. Distinct from failure so the UI can say so.
    NoRoute,
    /// Route computed end to end.
    Planned(RoutePlan<OrderId, StoreId>),
    /// The oracle failed for some pair; stops are still available for
    /// display, in builder order, without a route line.
    Degraded {
        stops: Vec<Waypoint<OrderId, StoreId>>,
        error: OracleError,
    },
}

/// Plans a visiting order over the pickups and deliveries for `orders`.
///
/// The whole computation is one synchronous unit of work: it either runs to
/// completion, reports `NoRoute` for an empty workload, or degrades on the
/// first oracle failure. No partial routes are ever produced.
pub fn plan_route<O, S, D>(orders: &[O], stores: &[S], oracle: &D) -> PlanOutcome<O::Id, S::Id>
where
    O: Order,
    S: Store<Id = O::StoreId>,
    D: DistanceOracle + Sync,
{
    let waypoints = build_waypoints(orders, stores);
    if waypoints.is_empty() {
        debug!("no waypoints in workload, nothing to route");
        return PlanOutcome::NoRoute;
    }
    debug!(orders = orders.len(), waypoints = waypoints.len(), "planning route");

    let addresses: Vec<String> = waypoints.iter().map(|wp| wp.address.clone()).collect();
    let matrix = match build_matrix(&addresses, oracle) {
        Ok(matrix) => matrix,
        Err(error) => {
            warn!(%error, "distance matrix build failed, returning stops without a route");
            return PlanOutcome::Degraded {
                stops: waypoints,
                error,
            };
        }
    };

    let route = sequence(&waypoints, &matrix);
    let maps_url = navigation_url(&waypoints, &route).unwrap_or_default();
    let stops = route.iter().map(|&i| waypoints[i].clone()).collect();

    PlanOutcome::Planned(RoutePlan {
        stops,
        maps_url,
        matrix,
    })
}
