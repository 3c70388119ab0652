use std::io;
use thiserror::Error;

/// The primary error type for the `razerec-lib` library.
#[derive(Error, Debug)]
pub enum EcError {
    #[error("USB device not found. Is a supported Razer laptop present?")]
    DeviceNotFound,

    #[error("USB transfer error: {0}")]
    Usb(#[from] nusb::transfer::TransferError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout during USB operation: {0}")]
    Timeout(#[from] tokio::time::error::Elapsed),

    #[error("Incomplete control transfer: moved {actual} of {expected} bytes")]
    IncompleteTransfer { expected: usize, actual: usize },

    #[error("Malformed response: got {len} bytes, expected a full report")]
    MalformedResponse { len: usize },

    #[error("Argument block of {size} bytes exceeds the {max}-byte report capacity")]
    OversizeArgs { size: usize, max: usize },
}
