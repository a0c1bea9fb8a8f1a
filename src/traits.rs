//! Core domain traits for the dispatch router.
//!
//! These are intentionally minimal and domain-agnostic. The enclosing app
//! (persistence, HTTP, auth) implements them for its own data models.

use std::fmt;
use std::hash::Hash;

use crate::group::GroupId;

/// Unique identifier for router entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Picked,
    Delivered,
    Cancelled,
}

/// An order in a delivery agent's workload.
pub trait Order {
    type Id: Id;
    type StoreId: Id;

    fn id(&self) -> &Self::Id;

    /// The store this order is fulfilled from.
    fn store_id(&self) -> &Self::StoreId;

    /// Delivery address street line.
    fn street(&self) -> &str;

    fn city(&self) -> &str;

    fn state(&self) -> &str;

    fn pincode(&self) -> &str;

    fn status(&self) -> OrderStatus;

    /// Creation time (unix timestamp, seconds).
    fn created_at(&self) -> i64;

    /// Group this order was clustered into at creation, if assigned.
    fn group(&self) -> Option<GroupId>;
}

/// A store orders are picked up from.
pub trait Store {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Pickup address. An empty address means the store cannot be routed to.
    fn address(&self) -> &str;
}

/// Provides travel distance between two textual addresses, in kilometers.
///
/// Implementations call out to a mapping provider and may fail; the matrix
/// builder treats any failure as fatal for the whole routing request.
pub trait DistanceOracle {
    fn distance(&self, from: &str, to: &str) -> Result<f64, OracleError>;
}

/// Failure raised by a [`DistanceOracle`] implementation.
#[derive(Debug)]
pub enum OracleError {
    /// Transport-level failure (connect, timeout, non-success status).
    Http(reqwest::Error),
    /// The provider answered but could not resolve the pair.
    Provider(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Http(err) => write!(f, "distance oracle http error: {}", err),
            OracleError::Provider(msg) => write!(f, "distance oracle provider error: {}", msg),
        }
    }
}

impl std::error::Error for OracleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OracleError::Http(err) => Some(err),
            OracleError::Provider(_) => None,
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Http(err)
    }
}
