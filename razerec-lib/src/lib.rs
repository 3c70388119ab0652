//! # Razer laptop EC control protocol
//!
//! Userspace implementation of the request/response protocol spoken by the
//! embedded controller (EC) in Razer Blade laptops, as observed in Synapse
//! USB traffic.
//!
//! ## Protocol overview
//!
//! Every exchange moves one fixed 90-byte report in each direction over HID
//! control transfers: a SET_REPORT carries the request, and a GET_REPORT
//! issued after a short settle delay collects the answer. The EC never
//! acknowledges or retransmits; a response is matched to its request purely
//! by echoed fields plus a status byte, and anomalies are only visible by
//! comparing the two reports.
//!
//! ### Core types
//!
//! - [`Packet`] — the 90-byte report: wire codec, checksum and the request
//!   builder.
//! - [`EcTransport`] — the control-transfer seam; [`NusbTransport`] is the
//!   `nusb`-backed implementation.
//! - [`Outcome`] — classification of one completed exchange.
//! - [`RazerEc`] — one physical device: a transport behind a lock, plus the
//!   command invocation surface.

pub mod constants;
pub mod device;
pub mod error;
pub mod packet;
pub mod protocol;
pub mod transport;

// Re-export the device handle for easy access
pub use device::RazerEc;
pub use error::EcError;
pub use packet::{Packet, Status};
pub use protocol::Outcome;
pub use transport::{EcTransport, NusbTransport};
