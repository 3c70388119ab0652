// Protocol constants for the Razer EC control protocol

use std::time::Duration;

/// Size of one control report in either direction (bytes)
pub const REPORT_LEN: usize = 90;

/// Capacity of the argument block inside a report
pub const ARGS_LEN: usize = 80;

/// First wire offset covered by the checksum
pub const CHECKSUM_START: usize = 2;

/// One past the last wire offset covered by the checksum (offsets 2..=87)
pub const CHECKSUM_END: usize = 88;

/// Fixed broadcast transaction byte carried by every request
pub const TRANSACTION_BROADCAST: u8 = 0x1F;

/// HID SET_REPORT request for the outbound control transfer
pub const REQUEST_SET_REPORT: u8 = 0x09;

/// HID GET_REPORT request for the inbound control transfer
pub const REQUEST_GET_REPORT: u8 = 0x01;

/// wValue shared by both directions (feature report)
pub const REPORT_VALUE: u16 = 0x0300;

/// wIndex: the HID interface the EC listens on
pub const REPORT_INDEX: u16 = 0x0002;

/// Lower bound of the post-send settle window
pub const SETTLE_MIN: Duration = Duration::from_micros(600);

/// Upper bound of the post-send settle window
pub const SETTLE_MAX: Duration = Duration::from_micros(800);

/// Timeout applied to each USB control transfer
pub const TRANSFER_TIMEOUT: Duration = Duration::from_secs(2);
