use modular_bitfield::prelude::*;
use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;
use zerocopy::byteorder::little_endian::U16;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::constants::{ARGS_LEN, CHECKSUM_END, CHECKSUM_START, TRANSACTION_BROADCAST};
use crate::error::EcError;

/// Outcome code carried in the first byte of a response report.
///
/// Requests leave the byte at zero; the EC fills it in on the way back.
/// Codes outside the known set are preserved rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum Status {
    Unset = 0x00,
    Busy = 0x01,
    Success = 0x02,
    Failure = 0x03,
    Timeout = 0x04,
    NotSupported = 0x05,

    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Device selector and transaction stream id, packed into one byte.
///
/// The selector occupies the low three bits, the stream id the high five.
/// Requests always carry the fixed broadcast byte 0x1F; the sub-fields
/// matter when picking responses apart.
#[bitfield(bits = 8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionId {
    pub device: B3,
    pub id: B5,
}

/// Direction flag and command identifier, packed into one byte.
///
/// The direction flag occupies the low bit, the command identifier the
/// high seven. Validation compares the packed byte, not the sub-fields.
#[bitfield(bits = 8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandId {
    pub direction: bool,
    pub id: B7,
}

/// One 90-byte control report, the unit of every exchange with the EC.
///
/// The layout is fixed by the EC firmware and identical in both
/// directions. `zerocopy` guarantees the in-memory representation matches
/// the wire exactly, so serializing is a byte view and deserializing is a
/// length check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct Packet {
    status: u8,
    transaction_id: u8,
    /// Sequence counter for multi-report exchanges, zero otherwise. A
    /// correct response echoes it unchanged.
    pub remaining_packets: U16,
    /// Always zero for this protocol generation.
    pub protocol_type: u8,
    /// Number of meaningful leading bytes in `args`.
    pub data_size: u8,
    pub command_class: u8,
    command_id: u8,
    /// Opaque argument/result block, zero beyond `data_size` on the wire.
    pub args: [u8; ARGS_LEN],
    pub crc: u8,
    /// Always zero.
    pub reserved: u8,
}

impl Packet {
    /// Zero-initialized request pre-populated with the protocol constants
    /// and the caller-supplied command selector.
    ///
    /// `data_size` declares how many leading `args` bytes the caller will
    /// fill in before submission; everything beyond stays zero on the
    /// wire. Declaring more than the block holds is rejected here rather
    /// than letting it run past the report.
    pub fn request(command_class: u8, command_id: u8, data_size: u8) -> Result<Self, EcError> {
        if usize::from(data_size) > ARGS_LEN {
            return Err(EcError::OversizeArgs {
                size: usize::from(data_size),
                max: ARGS_LEN,
            });
        }

        let mut packet = Self::new_zeroed();
        packet.transaction_id = TRANSACTION_BROADCAST;
        packet.command_class = command_class;
        packet.command_id = command_id;
        packet.data_size = data_size;
        Ok(packet)
    }

    /// Request with the argument block copied in and `data_size` derived
    /// from its length.
    pub fn request_with_args(
        command_class: u8,
        command_id: u8,
        args: &[u8],
    ) -> Result<Self, EcError> {
        if args.len() > ARGS_LEN {
            return Err(EcError::OversizeArgs {
                size: args.len(),
                max: ARGS_LEN,
            });
        }

        let mut packet = Self::request(command_class, command_id, args.len() as u8)?;
        packet.args[..args.len()].copy_from_slice(args);
        Ok(packet)
    }

    /// Wire representation: exactly [`REPORT_LEN`](crate::constants::REPORT_LEN)
    /// bytes in field order.
    pub fn as_wire(&self) -> &[u8] {
        self.as_bytes()
    }

    /// Parse a received buffer. Anything other than a full report is
    /// rejected.
    pub fn from_wire(buf: &[u8]) -> Result<Self, EcError> {
        Self::read_from_bytes(buf).map_err(|_| EcError::MalformedResponse { len: buf.len() })
    }

    /// XOR of wire bytes 2..=87: every byte except `status`,
    /// `transaction_id`, `crc` and `reserved`.
    ///
    /// The EC expects this in `crc` on every request. Responses carry one
    /// too, but the protocol leaves verifying it to the caller.
    pub fn checksum(&self) -> u8 {
        self.as_bytes()[CHECKSUM_START..CHECKSUM_END]
            .iter()
            .fold(0, |acc, byte| acc ^ byte)
    }

    /// Stamp the checksum into `crc`. Done for every outgoing request.
    pub fn stamp_checksum(&mut self) {
        self.crc = self.checksum();
    }

    pub fn status(&self) -> Status {
        Status::from_primitive(self.status)
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status.into();
    }

    pub fn transaction_id(&self) -> TransactionId {
        TransactionId::from_bytes([self.transaction_id])
    }

    pub fn set_transaction_id(&mut self, id: TransactionId) {
        self.transaction_id = id.into_bytes()[0];
    }

    /// The transaction byte as it travels, both sub-fields packed.
    pub fn transaction_byte(&self) -> u8 {
        self.transaction_id
    }

    pub fn command_id(&self) -> CommandId {
        CommandId::from_bytes([self.command_id])
    }

    pub fn set_command_id(&mut self, id: CommandId) {
        self.command_id = id.into_bytes()[0];
    }

    /// The command byte as it travels, direction flag included.
    pub fn command_byte(&self) -> u8 {
        self.command_id
    }

    /// Sequence counter as a host integer.
    pub fn remaining(&self) -> u16 {
        self.remaining_packets.get()
    }
}
