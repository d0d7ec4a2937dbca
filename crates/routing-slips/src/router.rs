//! The routing-slip state machine driver.
//!
//! A route moves through four transitions: first dispatch, a step
//! completing, the whole route completing, and a step failing. [`Router`]
//! performs each one against a [`Dispatcher`], carrying the slip between
//! hops as a serialized header under [`ROUTING_SLIP_HEADER_KEY`].

use thiserror::Error;
use tracing::{debug, warn};

use crate::dispatch::{Dispatcher, MessageContext};
use crate::error::RoutingSlipError;
use crate::slip::RoutingSlip;

/// Header key under which the serialized slip travels between hops.
///
/// This key is the cross-hop contract: every participant in a route reads
/// and writes the slip under exactly this name, so it must never change.
pub const ROUTING_SLIP_HEADER_KEY: &str = "NServiceBus.MessageRouting.RoutingSlips.RoutingSlip";

/// Signal that a hop's local processing failed.
///
/// The router consumes only its presence — a failed hop halts the route, and
/// the reason feeds diagnostics, never the slip itself.
#[derive(Clone, Debug, Error)]
#[error("hop processing failed: {reason}")]
pub struct HopFailure {
    reason: String,
}

impl HopFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Drives a routing slip through its itinerary against a dispatch
/// collaborator.
///
/// The router owns its bus; everything else it touches (the slip, the
/// current-message context) arrives as an argument, once per hop.
pub struct Router<D> {
    bus: D,
}

impl<D: Dispatcher> Router<D> {
    pub fn new(bus: D) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &D {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut D {
        &mut self.bus
    }

    pub fn into_bus(self) -> D {
        self.bus
    }

    /// Dispatch a freshly built slip to its first destination.
    ///
    /// The front itinerary entry is read but not consumed — it becomes the
    /// in-flight hop, and only its completion (via
    /// [`send_to_next_step`](Self::send_to_next_step)) moves it into the
    /// log. Exactly one outgoing header is staged and exactly one explicit
    /// send is issued, carrying the message unmodified.
    pub fn send_to_first_step(
        &mut self,
        message: D::Message,
        slip: &RoutingSlip,
    ) -> Result<(), RoutingSlipError> {
        let Some(first) = slip.next_step() else {
            warn!(slip_id = %slip.id(), "itinerary exhausted; nothing to dispatch");
            return Ok(());
        };

        let wire = slip.to_wire()?;
        self.bus.set_outgoing_header(ROUTING_SLIP_HEADER_KEY, wire);

        debug!(
            slip_id = %slip.id(),
            destination = %first.address,
            "dispatching route to first step"
        );
        self.bus.send(&first.address, message);
        Ok(())
    }

    /// Advance the route after the current hop's local processing has run.
    ///
    /// Called once per hop with the outcome of that hop. On failure the
    /// route halts permanently: nothing is mutated, no header is written, no
    /// forward is issued, and the slip keeps naming the failed hop as
    /// current for outside inspection. On success the front entry moves into
    /// the log; if itinerary entries remain, the updated slip is written to
    /// the current message's header and the message is forwarded to the new
    /// front entry — otherwise the route is complete and the message rests
    /// where it is, with no routing-slip header.
    pub fn send_to_next_step(
        &mut self,
        ctx: &mut impl MessageContext,
        failure: Option<&HopFailure>,
        slip: &mut RoutingSlip,
    ) -> Result<(), RoutingSlipError> {
        if let Some(failure) = failure {
            warn!(
                slip_id = %slip.id(),
                reason = failure.reason(),
                "hop failed; route halted"
            );
            return Ok(());
        }

        let Some(completed) = slip.advance() else {
            warn!(slip_id = %slip.id(), "no in-flight step to complete");
            return Ok(());
        };

        let Some(next) = slip.next_step() else {
            debug!(
                slip_id = %slip.id(),
                completed = %completed,
                "itinerary exhausted; route complete"
            );
            return Ok(());
        };

        let wire = slip.to_wire()?;
        ctx.set_header(ROUTING_SLIP_HEADER_KEY, wire);

        debug!(
            slip_id = %slip.id(),
            completed = %completed,
            destination = %next.address,
            "hop completed; forwarding to next step"
        );
        self.bus.forward_current_message_to(&next.address);
        Ok(())
    }
}

/// Decode the routing slip off the current message, if one is present.
///
/// Hop handlers use this to recover the in-flight slip before reporting
/// their outcome. A missing header yields `Ok(None)` — a message can
/// legitimately arrive outside any route — while a malformed header is a
/// decode error.
pub fn current_slip(ctx: &impl MessageContext) -> Result<Option<RoutingSlip>, RoutingSlipError> {
    match ctx.header(ROUTING_SLIP_HEADER_KEY) {
        Some(raw) => RoutingSlip::from_wire(raw).map(Some),
        None => Ok(None),
    }
}
