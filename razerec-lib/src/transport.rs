use nusb::Interface;
use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient};
use tokio::time::timeout;

use crate::constants::TRANSFER_TIMEOUT;
use crate::error::EcError;

/// Control-transfer primitive the protocol engine drives.
///
/// The engine owns the request/value/index constants; an implementation
/// only moves bytes. Both operations are class requests addressed to the
/// interface the EC listens on.
#[allow(async_fn_in_trait)]
pub trait EcTransport {
    /// Outbound control transfer. Returns the number of bytes the device
    /// accepted.
    async fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, EcError>;

    /// Inbound control transfer reading up to `length` bytes.
    async fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, EcError>;
}

/// `nusb`-backed transport speaking class requests to a claimed HID
/// interface.
pub struct NusbTransport {
    interface: Interface,
}

impl NusbTransport {
    pub fn new(interface: Interface) -> Self {
        Self { interface }
    }
}

impl EcTransport for NusbTransport {
    async fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, EcError> {
        let transfer = self.interface.control_out(ControlOut {
            control_type: ControlType::Class,
            recipient: Recipient::Interface,
            request,
            value,
            index,
            data,
        });

        let completion = timeout(TRANSFER_TIMEOUT, transfer).await?;
        let sent = completion.into_result()?;
        Ok(sent.actual_length())
    }

    async fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, EcError> {
        let transfer = self.interface.control_in(ControlIn {
            control_type: ControlType::Class,
            recipient: Recipient::Interface,
            request,
            value,
            index,
            length,
        });

        let completion = timeout(TRANSFER_TIMEOUT, transfer).await?;
        Ok(completion.into_result()?)
    }
}
