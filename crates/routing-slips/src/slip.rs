//! The routing slip data model and its wire form.
//!
//! A [`RoutingSlip`] is pure route state: identity, the FIFO itinerary of
//! destinations not yet visited, and the append-only log of destinations
//! already visited. It is serialized into a message header at every hop
//! boundary and reconstructed fresh on the receiving side, so it is never
//! shared across hops as a live object.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RoutingSlipError;

/// Destination identifier — the unit of route planning.
///
/// Opaque to this crate; the dispatch collaborator decides what it locates
/// (a queue, an endpoint, a process).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepAddress(pub String);

impl fmt::Display for StepAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepAddress {
    fn from(address: &str) -> Self {
        Self(address.to_owned())
    }
}

impl From<String> for StepAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

/// A single not-yet-visited destination in the itinerary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteStep {
    /// Where this step delivers the message. Immutable once planned.
    pub address: StepAddress,
}

impl RouteStep {
    pub fn new(address: impl Into<StepAddress>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Record of one successfully completed hop.
///
/// Failed hops are never recorded; absence from the log is the only trace a
/// failure leaves on the slip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingStepResult {
    /// The destination that was visited, copied from the completed step.
    pub address: StepAddress,
}

/// The route-in-progress carried by a message.
///
/// Fields are private so the two structural invariants hold by construction:
/// entries only move from the front of the itinerary to the tail of the log,
/// and only as a pair — a log entry exists exactly when its hop succeeded.
///
/// ## Wire form
///
/// Serialized as JSON with `Id` / `Itinerary` / `Log` / `Address` field
/// names; this shape is the cross-hop contract and must stay stable (see
/// [`crate::router::ROUTING_SLIP_HEADER_KEY`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutingSlip {
    id: Uuid,
    itinerary: VecDeque<RouteStep>,
    log: Vec<ProcessingStepResult>,
}

impl RoutingSlip {
    pub(crate) fn new(id: Uuid, itinerary: VecDeque<RouteStep>) -> Self {
        Self {
            id,
            itinerary,
            log: Vec::new(),
        }
    }

    /// Identity of this route, assigned once at creation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Destinations not yet visited, in visit order.
    pub fn itinerary(&self) -> &VecDeque<RouteStep> {
        &self.itinerary
    }

    /// Successfully completed hops, in completion order.
    pub fn log(&self) -> &[ProcessingStepResult] {
        &self.log
    }

    /// The hop currently due for execution, if any.
    pub fn next_step(&self) -> Option<&RouteStep> {
        self.itinerary.front()
    }

    /// True once every itinerary entry has been visited.
    pub fn is_complete(&self) -> bool {
        self.itinerary.is_empty()
    }

    /// Move the front itinerary entry into the log.
    ///
    /// Pop and append are a single operation so a log entry can never exist
    /// without its hop having been consumed from the itinerary. Returns the
    /// completed address, or `None` when the itinerary is already exhausted.
    pub(crate) fn advance(&mut self) -> Option<StepAddress> {
        let completed = self.itinerary.pop_front()?;
        self.log.push(ProcessingStepResult {
            address: completed.address.clone(),
        });
        Some(completed.address)
    }

    /// Serialize the full slip (id, itinerary, log) for header transport.
    pub fn to_wire(&self) -> Result<String, RoutingSlipError> {
        serde_json::to_string(self).map_err(RoutingSlipError::Encode)
    }

    /// Reconstruct a slip from its header form.
    pub fn from_wire(raw: &str) -> Result<Self, RoutingSlipError> {
        serde_json::from_str(raw).map_err(RoutingSlipError::Decode)
    }
}
