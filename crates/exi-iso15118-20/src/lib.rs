//! # exi-iso15118-20
//!
//! Schema-informed EXI grammar engine and message data model for the
//! ISO 15118-20 DC charging namespace, built on [`exi_bitstream`].
//!
//! Every complex type compiles to a deterministic state machine: encoding
//! walks the type's fields in schema order, choosing the production whose
//! field is present, emitting that production's event code at the width
//! its state's production count demands, then the production's payload.
//! Decoding mirrors this, guided by event codes read from the stream.
//!
//! ```
//! use exi_iso15118_20::dc::{DcCableCheckReq};
//! use exi_iso15118_20::header::{MessageHeader, SessionId};
//! use exi_iso15118_20::primitives::Processing;
//! use exi_bitstream::{BitWriter, BitReader};
//!
//! let header = MessageHeader {
//!     session_id: SessionId::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap(),
//!     time_stamp: 0x0000_0000_6415_A9C0,
//!     signature_isUsed: false,
//!     signature: None,
//!     notification_isUsed: false,
//!     notification: None,
//! };
//! let msg = DcCableCheckReq { header, processing: Processing::Finished };
//!
//! let mut buf = [0u8; 32];
//! let mut w = BitWriter::new(&mut buf);
//! msg.encode(&mut w).unwrap();
//! let len = w.finish();
//!
//! let mut r = BitReader::new(&buf[..len]);
//! assert_eq!(DcCableCheckReq::decode(&mut r).unwrap(), msg);
//! ```

pub mod dc;
pub mod document;
pub mod grammar;
pub mod header;
pub mod primitives;
pub mod receipt;
pub mod xmldsig;

pub use exi_bitstream::{CodecError, CodecResult};
