//! Routing-slip messaging core.
//!
//! A routing slip embeds the plan for a message's multi-hop journey in the
//! message itself: an ordered itinerary of destinations still to visit and a
//! log of destinations already visited. Each hop consumes the front itinerary
//! entry, records it in the log, and forwards the message to the next
//! destination. The slip travels as a serialized header, so no shared state
//! exists between hops.
//!
//! ## Routing rules
//!
//! - The itinerary is strict FIFO: the front entry is always the next hop,
//!   and each completed hop advances the route by exactly one step.
//! - A hop that reports failure halts the route permanently: nothing is
//!   logged, nothing is forwarded, and the slip is left naming the failed
//!   hop as current for outside inspection.
//! - An exhausted itinerary ends the route: the message rests at its final
//!   destination with no routing-slip header.
//!
//! The transport is abstracted behind [`Dispatcher`] and [`MessageContext`];
//! this crate never touches connections, queues, or retries.

#![deny(unsafe_code)]

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod router;
pub mod slip;

pub use builder::RoutingSlipBuilder;
pub use dispatch::{CurrentMessage, Dispatcher, Headers, InMemoryBus, MessageContext};
pub use error::RoutingSlipError;
pub use router::{current_slip, HopFailure, Router, ROUTING_SLIP_HEADER_KEY};
pub use slip::{ProcessingStepResult, RouteStep, RoutingSlip, StepAddress};
