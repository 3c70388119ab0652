//! The request/response engine: round-trip execution and response
//! classification.

use std::time::Duration;

use strum_macros::Display;
use tracing::warn;
use zerocopy::FromZeros;

use crate::constants::{REPORT_INDEX, REPORT_LEN, REPORT_VALUE, REQUEST_GET_REPORT, REQUEST_SET_REPORT};
use crate::error::EcError;
use crate::packet::{Packet, Status};
use crate::transport::EcTransport;

/// Classification of one completed (or failed) exchange.
#[derive(Debug, Display)]
pub enum Outcome {
    /// The response echoes the request and carries no fatal status.
    Matched,
    /// The response does not correspond to the request that was sent.
    FieldMismatch,
    /// The EC reported itself busy. The current decision order tolerates
    /// busy responses, so [`classify`] never produces this; the variant
    /// completes the status taxonomy for callers that map
    /// [`Status`](crate::packet::Status) themselves.
    DeviceBusy,
    /// The EC executed the command and reported failure.
    CommandFailed,
    /// The EC does not implement this command.
    CommandNotSupported,
    /// The EC gave up on the command internally.
    CommandTimedOut,
    /// The round-trip itself failed before a full report came back.
    TransferError(EcError),
}

impl Outcome {
    /// True when the exchange produced a usable response.
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched)
    }
}

/// Execute one full round-trip: stamp, send, settle, receive, decode.
///
/// The settle sleep between the two transfers is a hard ordering
/// requirement: the EC silently drops a query that follows a command too
/// quickly. Any point inside the window keeps it listening, so the sleep
/// aims for the middle. Callers hold the device lock across the whole
/// call; see [`RazerEc::send_payload`](crate::device::RazerEc::send_payload).
///
/// Transport failures and short transfers propagate as distinct errors.
/// Nothing is retried here; retry policy belongs to the caller.
pub async fn exchange<T: EcTransport>(
    transport: &T,
    request: &mut Packet,
    settle_min: Duration,
    settle_max: Duration,
) -> Result<Packet, EcError> {
    request.stamp_checksum();

    let written = transport
        .control_out(REQUEST_SET_REPORT, REPORT_VALUE, REPORT_INDEX, request.as_wire())
        .await?;
    if written != REPORT_LEN {
        return Err(EcError::IncompleteTransfer {
            expected: REPORT_LEN,
            actual: written,
        });
    }

    let settle = settle_min + settle_max.saturating_sub(settle_min) / 2;
    tokio::time::sleep(settle).await;

    let buf = transport
        .control_in(REQUEST_GET_REPORT, REPORT_VALUE, REPORT_INDEX, REPORT_LEN as u16)
        .await?;
    if buf.len() != REPORT_LEN {
        return Err(EcError::IncompleteTransfer {
            expected: REPORT_LEN,
            actual: buf.len(),
        });
    }

    Packet::from_wire(&buf)
}

/// Classify a completed round-trip against the request that produced it.
///
/// Decision order, first match wins: transport-level failure, then the
/// echo check on the fields the EC must return unchanged, then the status
/// byte. Busy and success are both non-fatal in this protocol generation.
///
/// A failed round-trip yields a zeroed report so the caller always gets a
/// packet back; the error rides along in the outcome.
pub fn classify(request: &Packet, result: Result<Packet, EcError>) -> (Packet, Outcome) {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            let zeroed = Packet::new_zeroed();
            log_erroneous(&zeroed, "invalid report length");
            return (zeroed, Outcome::TransferError(err));
        }
    };

    if response.remaining_packets != request.remaining_packets
        || response.command_class != request.command_class
        || response.command_byte() != request.command_byte()
    {
        log_erroneous(&response, "response does not match request");
        return (response, Outcome::FieldMismatch);
    }

    match response.status() {
        Status::Failure => {
            log_erroneous(&response, "command failed");
            (response, Outcome::CommandFailed)
        }
        Status::NotSupported => {
            log_erroneous(&response, "command not supported");
            (response, Outcome::CommandNotSupported)
        }
        Status::Timeout => {
            log_erroneous(&response, "command timed out");
            (response, Outcome::CommandTimedOut)
        }
        _ => (response, Outcome::Matched),
    }
}

/// One-line diagnostic carrying the head of the report and the first 16
/// argument bytes. The protocol has no negative-acknowledgement channel,
/// so this log line is the only record of what the EC actually said.
fn log_erroneous(report: &Packet, message: &str) {
    warn!(
        "{}: status={:#04x} transaction={:#04x} size={:#04x} class={:#04x} command={:#04x} args={}",
        message,
        u8::from(report.status()),
        report.transaction_byte(),
        report.data_size,
        report.command_class,
        report.command_byte(),
        hex::encode(&report.args[..16]),
    );
}
