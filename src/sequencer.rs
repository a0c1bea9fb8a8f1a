//! Precedence-constrained greedy route sequencing.

use std::collections::{HashMap, HashSet};

use crate::matrix::DistanceMatrix;
use crate::traits::Id;
use crate::waypoint::{Waypoint, WaypointKind};

/// Computes a visiting order over all waypoints: a permutation of
/// `0..waypoints.len()` in which every Delivery follows its store's Pickup.
///
/// The route is seeded with every Pickup in input order, so all stores are
/// reachable before the first delivery rather than optimizing store-visit
/// order itself. Deliveries are then appended nearest-first from the last
/// visited stop, restricted to those whose Pickup is already in the route;
/// ties break to the lowest waypoint index. When no delivery is eligible
/// (its store had no Pickup waypoint at all), the raw nearest unvisited
/// delivery is appended regardless of precedence.
///
/// Deterministic for a given waypoint list and matrix. The matrix must be
/// square with side `waypoints.len()`; mismatched dimensions panic through
/// indexing rather than producing a corrupt partial route.
pub fn sequence<OrderId, StoreId>(
    waypoints: &[Waypoint<OrderId, StoreId>],
    matrix: &DistanceMatrix,
) -> Vec<usize>
where
    StoreId: Id,
{
    let pickup_index: HashMap<&StoreId, usize> = waypoints
        .iter()
        .enumerate()
        .filter(|(_, wp)| wp.kind == WaypointKind::Pickup)
        .map(|(i, wp)| (&wp.store_id, i))
        .collect();

    let mut route: Vec<usize> = waypoints
        .iter()
        .enumerate()
        .filter(|(_, wp)| wp.kind == WaypointKind::Pickup)
        .map(|(i, _)| i)
        .collect();
    let mut in_route: HashSet<usize> = route.iter().copied().collect();

    let mut unvisited: Vec<usize> = waypoints
        .iter()
        .enumerate()
        .filter(|(_, wp)| wp.kind == WaypointKind::Delivery)
        .map(|(i, _)| i)
        .collect();

    while !unvisited.is_empty() {
        if route.is_empty() {
            // No pickups at all: start from the first delivery.
            let first = unvisited.remove(0);
            in_route.insert(first);
            route.push(first);
            continue;
        }
        let last = route[route.len() - 1];

        let eligible = |index: usize| {
            pickup_index
                .get(&waypoints[index].store_id)
                .is_some_and(|pickup| in_route.contains(pickup))
        };

        let next = nearest(&unvisited, last, matrix, &eligible)
            .unwrap_or_else(|| {
                // Precedence cannot be satisfied for any remaining delivery;
                // fall back to raw nearest-neighbor.
                nearest_unchecked(&unvisited, last, matrix)
            });

        unvisited.retain(|&i| i != next);
        in_route.insert(next);
        route.push(next);
    }

    route
}

/// Nearest candidate satisfying `eligible`, ties going to the first (lowest
/// index) candidate encountered.
fn nearest<F>(candidates: &[usize], from: usize, matrix: &DistanceMatrix, eligible: &F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for &index in candidates {
        if !eligible(index) {
            continue;
        }
        let distance = matrix.between(from, index);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

fn nearest_unchecked(candidates: &[usize], from: usize, matrix: &DistanceMatrix) -> usize {
    // Callers only reach this with candidates remaining.
    let mut best = candidates[0];
    let mut best_distance = matrix.between(from, best);
    for &index in &candidates[1..] {
        let distance = matrix.between(from, index);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}
