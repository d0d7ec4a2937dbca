//! Error types for the routing-slip core.

use thiserror::Error;

/// Errors from building or transporting a routing slip.
///
/// A hop's own processing failure is deliberately not represented here: it
/// reaches the router as an input signal ([`crate::router::HopFailure`]) and
/// halts the route without raising anything.
#[derive(Debug, Error)]
pub enum RoutingSlipError {
    #[error("routing slip requires at least one itinerary step")]
    EmptyItinerary,

    #[error("failed to encode routing slip for transport")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode routing slip header")]
    Decode(#[source] serde_json::Error),
}
