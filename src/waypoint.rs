//! Waypoint construction from an agent's order workload.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::traits::{Order, Store};

/// What happens at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaypointKind {
    /// Collect one or more orders from a store.
    Pickup,
    /// Drop an order at a customer address.
    Delivery,
}

/// One stop in a computed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint<OrderId, StoreId> {
    /// Textual location, also the distance-oracle key.
    pub address: String,
    pub kind: WaypointKind,
    /// For a Pickup, the store itself; for a Delivery, the store whose
    /// pickup must precede it.
    pub store_id: StoreId,
    /// Orders represented by this stop. A Pickup aggregates every order from
    /// its store; a Delivery aggregates orders sharing the same address.
    pub order_ids: Vec<OrderId>,
}

/// Full delivery address for an order, as queried against the oracle.
pub fn delivery_address<O: Order>(order: &O) -> String {
    format!(
        "{}, {}, {}, {}",
        order.street(),
        order.city(),
        order.state(),
        order.pincode()
    )
}

/// Converts orders into a deduplicated waypoint list.
///
/// All Pickup waypoints come first, one per store in first-encounter order,
/// followed by Delivery waypoints in order first-encounter order. The
/// sequencer's stores-first initialization relies on this layout.
///
/// Deduplication is per kind: two orders delivering to the identical address
/// collapse into one Delivery waypoint with merged order ids, but a store
/// address coinciding with a delivery address stays two distinct stops.
///
/// Stores missing from `stores` or carrying an empty address get no Pickup
/// waypoint; their deliveries are still emitted.
pub fn build_waypoints<O, S>(orders: &[O], stores: &[S]) -> Vec<Waypoint<O::Id, S::Id>>
where
    O: Order,
    S: Store<Id = O::StoreId>,
{
    let store_index: HashMap<&S::Id, &S> =
        stores.iter().map(|store| (store.id(), store)).collect();

    // Partition orders by store, preserving first-encounter order.
    let mut store_order: Vec<&O::StoreId> = Vec::new();
    let mut by_store: HashMap<&O::StoreId, Vec<&O>> = HashMap::new();
    for order in orders {
        let entry = by_store.entry(order.store_id()).or_default();
        if entry.is_empty() {
            store_order.push(order.store_id());
        }
        entry.push(order);
    }

    let mut waypoints: Vec<Waypoint<O::Id, S::Id>> = Vec::new();

    let mut seen_pickups: HashSet<String> = HashSet::new();
    for store_id in &store_order {
        let Some(store) = store_index.get(store_id) else {
            warn!("store missing from records, skipping pickup waypoint");
            continue;
        };
        let address = store.address();
        if address.is_empty() || seen_pickups.contains(address) {
            continue;
        }
        seen_pickups.insert(address.to_string());
        waypoints.push(Waypoint {
            address: address.to_string(),
            kind: WaypointKind::Pickup,
            store_id: store.id().clone(),
            order_ids: by_store[*store_id]
                .iter()
                .map(|order| order.id().clone())
                .collect(),
        });
    }

    let mut seen_deliveries: HashMap<String, usize> = HashMap::new();
    for order in orders {
        let address = delivery_address(order);
        if let Some(&index) = seen_deliveries.get(&address) {
            waypoints[index].order_ids.push(order.id().clone());
            continue;
        }
        seen_deliveries.insert(address.clone(), waypoints.len());
        waypoints.push(Waypoint {
            address,
            kind: WaypointKind::Delivery,
            store_id: order.store_id().clone(),
            order_ids: vec![order.id().clone()],
        });
    }

    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupId;
    use crate::traits::OrderStatus;

    #[derive(Clone, Debug)]
    struct TestOrder {
        id: u32,
        store: u32,
        street: String,
    }

    impl TestOrder {
        fn new(id: u32, store: u32, street: &str) -> Self {
            Self {
                id,
                store,
                street: street.to_string(),
            }
        }
    }

    impl Order for TestOrder {
        type Id = u32;
        type StoreId = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn store_id(&self) -> &u32 {
            &self.store
        }

        fn street(&self) -> &str {
            &self.street
        }

        fn city(&self) -> &str {
            "Springfield"
        }

        fn state(&self) -> &str {
            "IL"
        }

        fn pincode(&self) -> &str {
            "62701"
        }

        fn status(&self) -> OrderStatus {
            OrderStatus::Confirmed
        }

        fn created_at(&self) -> i64 {
            0
        }

        fn group(&self) -> Option<GroupId> {
            None
        }
    }

    #[derive(Clone, Debug)]
    struct TestStore {
        id: u32,
        address: String,
    }

    impl TestStore {
        fn new(id: u32, address: &str) -> Self {
            Self {
                id,
                address: address.to_string(),
            }
        }
    }

    impl Store for TestStore {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn address(&self) -> &str {
            &self.address
        }
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let waypoints = build_waypoints::<TestOrder, TestStore>(&[], &[]);
        assert!(waypoints.is_empty());
    }

    #[test]
    fn pickups_precede_deliveries() {
        let orders = vec![
            TestOrder::new(1, 10, "1 Elm St"),
            TestOrder::new(2, 20, "2 Oak St"),
        ];
        let stores = vec![
            TestStore::new(10, "Market Alpha"),
            TestStore::new(20, "Market Beta"),
        ];

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 4);
        assert_eq!(waypoints[0].kind, WaypointKind::Pickup);
        assert_eq!(waypoints[1].kind, WaypointKind::Pickup);
        assert_eq!(waypoints[2].kind, WaypointKind::Delivery);
        assert_eq!(waypoints[3].kind, WaypointKind::Delivery);
        assert_eq!(waypoints[0].address, "Market Alpha");
        assert_eq!(waypoints[2].address, "1 Elm St, Springfield, IL, 62701");
    }

    #[test]
    fn pickup_aggregates_orders_from_one_store() {
        let orders = vec![
            TestOrder::new(1, 10, "1 Elm St"),
            TestOrder::new(2, 10, "2 Oak St"),
        ];
        let stores = vec![TestStore::new(10, "Market Alpha")];

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[0].order_ids, vec![1, 2]);
    }

    #[test]
    fn duplicate_delivery_addresses_merge_order_ids() {
        let orders = vec![
            TestOrder::new(1, 10, "1 Elm St"),
            TestOrder::new(2, 10, "1 Elm St"),
        ];
        let stores = vec![TestStore::new(10, "Market Alpha")];

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 2);
        let delivery = &waypoints[1];
        assert_eq!(delivery.kind, WaypointKind::Delivery);
        assert_eq!(delivery.order_ids, vec![1, 2]);
    }

    #[test]
    fn store_and_delivery_sharing_an_address_stay_distinct() {
        let orders = vec![TestOrder::new(1, 10, "Shared Plaza")];
        let mut store = TestStore::new(10, "");
        store.address = delivery_address(&orders[0]);
        let stores = vec![store];

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].kind, WaypointKind::Pickup);
        assert_eq!(waypoints[1].kind, WaypointKind::Delivery);
        assert_eq!(waypoints[0].address, waypoints[1].address);
    }

    #[test]
    fn missing_store_skips_pickup_but_keeps_delivery() {
        let orders = vec![TestOrder::new(1, 99, "1 Elm St")];
        let stores: Vec<TestStore> = Vec::new();

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].kind, WaypointKind::Delivery);
    }

    #[test]
    fn empty_store_address_skips_pickup() {
        let orders = vec![TestOrder::new(1, 10, "1 Elm St")];
        let stores = vec![TestStore::new(10, "")];

        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].kind, WaypointKind::Delivery);
    }

    #[test]
    fn waypoint_count_bounded_by_distinct_addresses() {
        let orders = vec![
            TestOrder::new(1, 10, "1 Elm St"),
            TestOrder::new(2, 10, "1 Elm St"),
            TestOrder::new(3, 20, "2 Oak St"),
            TestOrder::new(4, 20, "1 Elm St"),
        ];
        let stores = vec![
            TestStore::new(10, "Market Alpha"),
            TestStore::new(20, "Market Beta"),
        ];

        // 2 distinct store addresses + 2 distinct delivery addresses.
        let waypoints = build_waypoints(&orders, &stores);
        assert_eq!(waypoints.len(), 4);
    }
}
