//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use razerec_lib::RazerEc;
#[allow(unused_imports)]
pub use razerec_lib::constants::*;
#[allow(unused_imports)]
pub use razerec_lib::error::EcError;
#[allow(unused_imports)]
pub use razerec_lib::packet::{CommandId, Packet, Status, TransactionId};
#[allow(unused_imports)]
pub use razerec_lib::protocol::{Outcome, classify, exchange};
#[allow(unused_imports)]
pub use razerec_lib::transport::EcTransport;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

/// One outbound control transfer as the mock transport saw it.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentReport {
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub data: Vec<u8>,
    pub at: Instant,
}

/// Transport double: records outbound reports with timestamps and replays
/// canned inbound buffers.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    sent: Vec<SentReport>,
    replies: VecDeque<Vec<u8>>,
    reads: Vec<Instant>,
    write_cap: Option<usize>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw inbound buffer.
    pub fn push_reply(&self, bytes: Vec<u8>) {
        self.state.lock().unwrap().replies.push_back(bytes);
    }

    /// Queue a well-formed response echoing `request` with the given status.
    pub fn reply_echoing(&self, request: &Packet, status: Status) {
        self.push_reply(echo_wire(request, status));
    }

    /// Report fewer accepted bytes than were submitted.
    pub fn cap_writes(&self, cap: usize) {
        self.state.lock().unwrap().write_cap = Some(cap);
    }

    pub fn sent(&self) -> Vec<SentReport> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn reads(&self) -> Vec<Instant> {
        self.state.lock().unwrap().reads.clone()
    }
}

impl EcTransport for MockTransport {
    async fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, EcError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(SentReport {
            request,
            value,
            index,
            data: data.to_vec(),
            at: Instant::now(),
        });
        Ok(state.write_cap.unwrap_or(data.len()))
    }

    async fn control_in(
        &self,
        _request: u8,
        _value: u16,
        _index: u16,
        _length: u16,
    ) -> Result<Vec<u8>, EcError> {
        let mut state = self.state.lock().unwrap();
        state.reads.push(Instant::now());
        Ok(state.replies.pop_front().expect("no canned reply queued"))
    }
}

/// Wire image of a response echoing `request` with the given status.
#[allow(dead_code)]
pub fn echo_wire(request: &Packet, status: Status) -> Vec<u8> {
    let mut response = *request;
    response.set_status(status);
    response.as_wire().to_vec()
}
