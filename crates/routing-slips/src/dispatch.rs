//! The dispatch collaborator contract, and an in-memory double.
//!
//! The router depends on two narrow capabilities instead of a concrete
//! transport: a [`Dispatcher`] that can send and forward messages, and a
//! [`MessageContext`] giving explicit access to the headers of the message
//! currently being processed. The context is always passed as a parameter —
//! never ambient state — so the state machine stays independently testable.

use std::collections::HashMap;

use crate::slip::StepAddress;

/// Header/metadata map carried by a message.
pub type Headers = HashMap<String, String>;

/// Mutable view of the message currently being processed at this hop.
pub trait MessageContext {
    fn header(&self, key: &str) -> Option<&str>;

    /// Set or overwrite a header on the in-flight message.
    fn set_header(&mut self, key: &str, value: String);
}

/// Message-dispatch capabilities the router consumes.
///
/// Transport failures (connection loss, queueing, retries) are entirely the
/// implementor's concern; these operations are infallible from the router's
/// perspective.
pub trait Dispatcher {
    /// Opaque payload type moved by this dispatcher.
    type Message;

    /// Stage a header to be carried by the next explicit [`send`](Self::send).
    fn set_outgoing_header(&mut self, key: &str, value: String);

    /// Explicitly send a message to a destination, independent of any
    /// in-flight message.
    fn send(&mut self, destination: &StepAddress, message: Self::Message);

    /// Forward the message currently being processed — payload preserved,
    /// current headers included — to a new destination.
    fn forward_current_message_to(&mut self, destination: &StepAddress);
}

/// Recording dispatcher for tests and local wiring.
///
/// Captures everything the router does: staged outgoing headers, explicit
/// sends, and forwards of the current message.
#[derive(Debug)]
pub struct InMemoryBus<M> {
    outgoing_headers: Headers,
    sent: Vec<(StepAddress, M)>,
    forwarded: Vec<StepAddress>,
}

impl<M> InMemoryBus<M> {
    pub fn new() -> Self {
        Self {
            outgoing_headers: Headers::new(),
            sent: Vec::new(),
            forwarded: Vec::new(),
        }
    }

    /// Headers staged for the next explicit send.
    pub fn outgoing_headers(&self) -> &Headers {
        &self.outgoing_headers
    }

    /// Explicit sends issued, in order.
    pub fn sent(&self) -> &[(StepAddress, M)] {
        &self.sent
    }

    /// Forward destinations issued, in order.
    pub fn forwarded(&self) -> &[StepAddress] {
        &self.forwarded
    }
}

impl<M> Default for InMemoryBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Dispatcher for InMemoryBus<M> {
    type Message = M;

    fn set_outgoing_header(&mut self, key: &str, value: String) {
        self.outgoing_headers.insert(key.to_owned(), value);
    }

    fn send(&mut self, destination: &StepAddress, message: M) {
        self.sent.push((destination.clone(), message));
    }

    fn forward_current_message_to(&mut self, destination: &StepAddress) {
        self.forwarded.push(destination.clone());
    }
}

/// Header view of one in-flight message, for hop-side processing.
#[derive(Clone, Debug, Default)]
pub struct CurrentMessage {
    headers: Headers,
}

impl CurrentMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl MessageContext for CurrentMessage {
    fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    fn set_header(&mut self, key: &str, value: String) {
        self.headers.insert(key.to_owned(), value);
    }
}
