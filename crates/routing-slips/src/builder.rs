//! Factory for routing slips.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::error::RoutingSlipError;
use crate::slip::{RouteStep, RoutingSlip, StepAddress};

/// Builds a [`RoutingSlip`] from a route id and an ordered list of
/// destination addresses.
///
/// The caller guarantees id uniqueness per route and supplies addresses in
/// the exact order they must be visited. An itinerary must describe at least
/// one hop, so [`build`](Self::build) rejects an empty one.
#[derive(Clone, Debug)]
pub struct RoutingSlipBuilder {
    id: Uuid,
    itinerary: VecDeque<RouteStep>,
}

impl RoutingSlipBuilder {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            itinerary: VecDeque::new(),
        }
    }

    /// Append one destination to the itinerary.
    pub fn step(mut self, address: impl Into<StepAddress>) -> Self {
        self.itinerary.push_back(RouteStep::new(address));
        self
    }

    /// Append destinations in iteration order.
    pub fn steps<I, A>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<StepAddress>,
    {
        for address in addresses {
            self.itinerary.push_back(RouteStep::new(address));
        }
        self
    }

    /// Produce the slip: the given addresses in order, an empty log.
    ///
    /// Fails fast with [`RoutingSlipError::EmptyItinerary`] when no
    /// destination was supplied — a caller contract violation, not a
    /// recoverable condition.
    pub fn build(self) -> Result<RoutingSlip, RoutingSlipError> {
        if self.itinerary.is_empty() {
            return Err(RoutingSlipError::EmptyItinerary);
        }
        Ok(RoutingSlip::new(self.id, self.itinerary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_preserves_id_and_step_order() {
        let id = Uuid::new_v4();

        let slip = RoutingSlipBuilder::new(id)
            .step("foo")
            .step("bar")
            .step("baz")
            .build()
            .unwrap();

        assert_eq!(slip.id(), id);
        let planned: Vec<&StepAddress> =
            slip.itinerary().iter().map(|step| &step.address).collect();
        assert_eq!(
            planned,
            [
                &StepAddress::from("foo"),
                &StepAddress::from("bar"),
                &StepAddress::from("baz")
            ]
        );
        assert!(slip.log().is_empty());
    }

    #[test]
    fn steps_appends_in_iteration_order() {
        let slip = RoutingSlipBuilder::new(Uuid::new_v4())
            .steps(["first", "second"])
            .step("third")
            .build()
            .unwrap();

        assert_eq!(slip.itinerary().len(), 3);
        assert_eq!(slip.next_step().unwrap().address, StepAddress::from("first"));
    }

    #[test]
    fn empty_itinerary_rejected_at_build() {
        let result = RoutingSlipBuilder::new(Uuid::new_v4()).build();

        assert!(matches!(result, Err(RoutingSlipError::EmptyItinerary)));
    }
}
