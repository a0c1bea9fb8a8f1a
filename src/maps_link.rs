//! Navigation link construction for a sequenced route.
//!
//! Produces a Google Maps directions URL the delivery-agent UI can open
//! directly. Origin is the first stop, destination the last, intermediate
//! stops `|`-joined, spaces `+`-encoded per the directions URL scheme.

use crate::waypoint::Waypoint;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Builds the directions URL for `route` over `waypoints`.
///
/// `route` holds waypoint indices in visiting order. Returns `None` for an
/// empty route: no stops means no link, not an error.
pub fn navigation_url<OrderId, StoreId>(
    waypoints: &[Waypoint<OrderId, StoreId>],
    route: &[usize],
) -> Option<String> {
    let (&first, rest) = route.split_first()?;
    let (&last, middle) = rest.split_last().unwrap_or((&first, &[]));

    let origin = encode(&waypoints[first].address);
    let destination = encode(&waypoints[last].address);
    let stops = middle
        .iter()
        .map(|&i| encode(&waypoints[i].address))
        .collect::<Vec<_>>()
        .join("|");

    Some(format!(
        "{DIRECTIONS_BASE}&origin={origin}&destination={destination}&waypoints={stops}&travelmode=driving"
    ))
}

fn encode(address: &str) -> String {
    address.replace(' ', "+")
}
