//! Primitive value representations shared across complex types (spec §3, §6):
//! bounded octet sequences for strings/bytes, the `RationalNumber`
//! (`Exponent`/`Value`) pair used throughout the DC namespace, and the small
//! enumerations emitted as fixed-width n-bit uints.

use exi_bitstream::{BitReader, BitWriter, CodecError, CodecResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bounded octet sequence for `anyURI` / `string` / `NCName` sites. `N` is
/// the compile-time upper bound declared at the particle's occurrence site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedString<const N: usize> {
    pub characters: [u8; N],
    pub characters_len: u16,
}

impl<const N: usize> Default for FixedString<N> {
    fn default() -> Self {
        FixedString {
            characters: [0u8; N],
            characters_len: 0,
        }
    }
}

impl<const N: usize> FixedString<N> {
    pub fn from_str(s: &str) -> CodecResult<Self> {
        Self::from_bytes(s.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() > N {
            return Err(CodecError::BufferOverflow);
        }
        let mut characters = [0u8; N];
        characters[..bytes.len()].copy_from_slice(bytes);
        Ok(FixedString {
            characters,
            characters_len: bytes.len() as u16,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.characters[..self.characters_len as usize]
    }

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_string_value(self.as_slice())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let bytes = r.read_string_value()?;
        Self::from_bytes(&bytes)
    }
}

/// A bounded octet sequence for `base64Binary` / `hexBinary` / wildcard
/// `ANY` sites.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedBytes<const N: usize> {
    pub bytes: [u8; N],
    pub bytes_len: u16,
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        FixedBytes {
            bytes: [0u8; N],
            bytes_len: 0,
        }
    }
}

impl<const N: usize> FixedBytes<N> {
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() > N {
            return Err(CodecError::BufferOverflow);
        }
        let mut buf = [0u8; N];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(FixedBytes {
            bytes: buf,
            bytes_len: bytes.len() as u16,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.bytes_len as usize]
    }

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_bytes_value(self.as_slice())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let bytes = r.read_bytes_value()?;
        Self::from_bytes(&bytes)
    }
}

/// `Exponent`/`Value` pair used for every physical quantity in the DC
/// namespace (voltage, current, power, ...). `Exponent` is an 8-bit signed
/// field in `[-128, 127]` emitted biased by `+128` as a raw 8-bit uint;
/// `Value` is a 16-bit signed variable-length integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RationalNumber {
    pub exponent: i8,
    pub value: i16,
}

impl RationalNumber {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_nbit_uint(8, (self.exponent as i32 + 128) as u32)?;
        w.write_integer_16(self.value)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let biased = r.read_nbit_uint(8)? as i32;
        let exponent = (biased - 128) as i8;
        let value = r.read_integer_16()?;
        Ok(RationalNumber { exponent, value })
    }
}

/// 7-bit unsigned percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PercentValue(pub u8);

impl PercentValue {
    pub fn new(v: u8) -> CodecResult<Self> {
        if v > 100 {
            return Err(CodecError::UnknownEventCode);
        }
        Ok(PercentValue(v))
    }

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_nbit_uint(7, self.0 as u32)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        PercentValue::new(r.read_nbit_uint(7)? as u8)
    }
}

macro_rules! enumerated_type {
    ($name:ident, $width:expr, { $($variant:ident = $code:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $($variant = $code),+
        }

        impl $name {
            pub const WIDTH: u32 = $width;

            pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
                w.write_nbit_uint(Self::WIDTH, *self as u32)
            }

            pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
                let code = r.read_nbit_uint(Self::WIDTH)?;
                match code {
                    $($code => Ok($name::$variant)),+,
                    _ => Err(CodecError::UnknownEventCode),
                }
            }
        }
    };
}

// Widths per spec §6 ("ceil(log2(|enum|))"); the enumerations below are the
// subset of the schema's `responseCodeType` / `evseNotificationType` /
// `processingType` this crate wires up (SPEC_FULL.md §10.7).
enumerated_type!(ResponseCode, 6, {
    Ok = 0,
    OkCertificateExpiresSoon = 1,
    WarningGeneric = 2,
    FailedGeneric = 3,
    FailedSequenceError = 4,
    FailedUnknownSession = 5,
});

enumerated_type!(EvseNotification, 2, {
    None = 0,
    Terminate = 1,
    Pause = 2,
});

enumerated_type!(Processing, 1, {
    Finished = 0,
    Ongoing = 1,
});
