use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::info;

use crate::constants::{ARGS_LEN, REPORT_INDEX, SETTLE_MAX, SETTLE_MIN};
use crate::error::EcError;
use crate::packet::Packet;
use crate::protocol::{Outcome, classify, exchange};
use crate::transport::{EcTransport, NusbTransport};

// Constants for USB device identification
pub const VID: u16 = 0x1532;

/// Blade models speaking this EC protocol, by product id.
pub const SUPPORTED_PIDS: &[u16] = &[
    // 15"
    0x0224, 0x0233, 0x023B, 0x0240, 0x0246, 0x023A, 0x0245, 0x0255, 0x0253,
    // Stealth
    0x022D, 0x0232, 0x0239, 0x024A, 0x0252,
    // Pro
    0x0234, 0x022F, 0x0225, 0x0210,
    // QHD
    0x020F,
];

/// One physical EC: a transport behind a lock.
///
/// The EC exposes a single control endpoint and matches answers to
/// requests purely by echo, so at most one exchange may be in flight per
/// device. The lock is held for the whole round-trip, settle sleep
/// included.
pub struct RazerEc<T: EcTransport> {
    transport: Mutex<T>,
    settle_min: Duration,
    settle_max: Duration,
}

impl RazerEc<NusbTransport> {
    /// Find and open the first supported laptop on the bus.
    pub async fn open() -> Result<Self, EcError> {
        info!("Searching for a supported Razer laptop...");
        let device_info = nusb::list_devices()?
            .find(|d| d.vendor_id() == VID && SUPPORTED_PIDS.contains(&d.product_id()))
            .ok_or(EcError::DeviceNotFound)?;

        info!(
            "Found device {:04x}:{:04x} on bus {} addr {}",
            device_info.vendor_id(),
            device_info.product_id(),
            device_info.bus_number(),
            device_info.device_address()
        );

        let device = device_info.open()?;
        let interface = device.detach_and_claim_interface(REPORT_INDEX as u8)?;
        info!("EC interface claimed");

        Ok(Self::with_transport(NusbTransport::new(interface)))
    }
}

impl<T: EcTransport> RazerEc<T> {
    /// Wrap an already-connected transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            settle_min: SETTLE_MIN,
            settle_max: SETTLE_MAX,
        }
    }

    /// Override the post-send settle window.
    pub fn with_settle_interval(mut self, min: Duration, max: Duration) -> Self {
        self.settle_min = min;
        self.settle_max = max;
        self
    }

    /// Run one request through the EC and classify the answer.
    ///
    /// On a transport failure the returned packet is zeroed and the error
    /// rides in the outcome; the caller decides whether to retry.
    pub async fn send_payload(&self, request: &mut Packet) -> (Packet, Outcome) {
        let transport = self.transport.lock().await;
        let result = exchange(&*transport, request, self.settle_min, self.settle_max).await;
        classify(request, result)
    }

    /// Command invocation surface: build, submit and unwrap one command.
    ///
    /// Returns the classification together with the argument bytes the EC
    /// declared meaningful in its reply.
    pub async fn command(
        &self,
        command_class: u8,
        command_id: u8,
        args: &[u8],
    ) -> Result<(Outcome, Bytes), EcError> {
        let mut request = Packet::request_with_args(command_class, command_id, args)?;
        let (response, outcome) = self.send_payload(&mut request).await;

        // data_size comes from the device; never trust it past capacity
        let len = usize::from(response.data_size).min(ARGS_LEN);
        Ok((outcome, Bytes::copy_from_slice(&response.args[..len])))
    }
}
