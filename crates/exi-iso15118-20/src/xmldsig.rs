//! The `xmldsig` sub-grammar embedded by ISO 15118-20 for authenticated
//! messages (spec §1, §8 scenario 5, §9 PGPData note).

use exi_bitstream::{BitReader, BitWriter, CodecResult};

use crate::grammar::event_code_width;
use crate::primitives::{FixedBytes, FixedString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanonicalizationMethod {
    pub algorithm: FixedString<128>,
}

impl CanonicalizationMethod {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.algorithm.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(CanonicalizationMethod {
            algorithm: FixedString::decode(r)?,
        })
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignatureMethod {
    pub algorithm: FixedString<128>,
}

impl SignatureMethod {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.algorithm.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(SignatureMethod {
            algorithm: FixedString::decode(r)?,
        })
    }
}

/// Maximum number of `Reference` elements inside a `SignedInfo` (spec §3).
pub const MAX_REFERENCES: usize = 4;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reference {
    pub uri_isUsed: bool,
    pub uri: Option<FixedString<256>>,
    pub digest_value: FixedBytes<64>,
}

impl Reference {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_bool(self.uri_isUsed)?;
        if self.uri_isUsed {
            self.uri.as_ref().expect("uri_isUsed invariant").encode(w)?;
        }
        self.digest_value.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let uri_isUsed = r.read_bool()?;
        let uri = if uri_isUsed {
            Some(FixedString::decode(r)?)
        } else {
            None
        };
        let digest_value = FixedBytes::decode(r)?;
        Ok(Reference {
            uri_isUsed,
            uri,
            digest_value,
        })
    }
}

/// `SignedInfo`: one optional `Id` attribute, two required children, then
/// a bounded chain of up to [`MAX_REFERENCES`] `Reference` elements (spec
/// §8 scenario 5).
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignedInfo {
    pub id_isUsed: bool,
    pub id: Option<FixedString<64>>,
    pub canonicalization_method: CanonicalizationMethod,
    pub signature_method: SignatureMethod,
    pub reference: [Option<Reference>; MAX_REFERENCES],
    pub reference_len: u8,
}

impl SignedInfo {
    // Spec §8 scenario 5 pins both the initial state (42, Id present/skip)
    // and the chain's terminating EE (state 46) at 2 bits each, with `01`
    // the skip/EE code in both cases — wider than the 2 live productions
    // each state models, the same full-catalog-width-over-partial-arms
    // pattern `document.rs` and `DcChargeParameterDiscoveryRes` follow.
    const ID_CODE_WIDTH: u32 = 2;
    const ID_PRESENT_CODE: u32 = 0;
    const ID_SKIP_CODE: u32 = 1;
    const REFERENCE_CODE_WIDTH: u32 = 2;
    const REFERENCE_CONTINUE_CODE: u32 = 0;
    const REFERENCE_EE_CODE: u32 = 1;

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        // Initial state: attribute Id present or skipped (2 productions).
        w.write_nbit_uint(
            Self::ID_CODE_WIDTH,
            if self.id_isUsed {
                Self::ID_PRESENT_CODE
            } else {
                Self::ID_SKIP_CODE
            },
        )?;
        if self.id_isUsed {
            self.id.as_ref().expect("id_isUsed invariant").encode(w)?;
        }

        self.canonicalization_method.encode(w)?;
        self.signature_method.encode(w)?;

        for i in 0..self.reference_len as usize {
            crate::grammar::check_array_bound(i, MAX_REFERENCES)?;
            // Array-chain state: SE(Reference) -> next, or EE. Two live
            // productions while more references remain, one (EE only)
            // once the chain is exhausted.
            w.write_nbit_uint(Self::REFERENCE_CODE_WIDTH, Self::REFERENCE_CONTINUE_CODE)?;
            self.reference[i]
                .as_ref()
                .expect("reference_len invariant")
                .encode(w)?;
        }
        w.write_nbit_uint(Self::REFERENCE_CODE_WIDTH, Self::REFERENCE_EE_CODE)?;
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let id_code = r.read_nbit_uint(Self::ID_CODE_WIDTH)?;
        let id_isUsed = match id_code {
            code if code == Self::ID_PRESENT_CODE => true,
            code if code == Self::ID_SKIP_CODE => false,
            _ => return Err(exi_bitstream::CodecError::UnknownEventCode),
        };
        let id = if id_isUsed {
            Some(FixedString::decode(r)?)
        } else {
            None
        };

        let canonicalization_method = CanonicalizationMethod::decode(r)?;
        let signature_method = SignatureMethod::decode(r)?;

        let mut reference: [Option<Reference>; MAX_REFERENCES] = Default::default();
        let mut reference_len = 0u8;
        loop {
            let code = r.read_nbit_uint(Self::REFERENCE_CODE_WIDTH)?;
            if code == Self::REFERENCE_EE_CODE {
                break;
            }
            if code != Self::REFERENCE_CONTINUE_CODE {
                return Err(exi_bitstream::CodecError::UnknownEventCode);
            }
            crate::grammar::check_array_bound(reference_len as usize, MAX_REFERENCES)?;
            reference[reference_len as usize] = Some(Reference::decode(r)?);
            reference_len += 1;
        }

        Ok(SignedInfo {
            id_isUsed,
            id,
            canonicalization_method,
            signature_method,
            reference,
            reference_len,
        })
    }
}

/// Simple-content extension: attributes plus a textual `CONTENT` value
/// (spec §3).
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignatureValue {
    pub id_isUsed: bool,
    pub id: Option<FixedString<64>>,
    pub content: FixedBytes<256>,
}

impl SignatureValue {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_bool(self.id_isUsed)?;
        if self.id_isUsed {
            self.id.as_ref().expect("id_isUsed invariant").encode(w)?;
        }
        self.content.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let id_isUsed = r.read_bool()?;
        let id = if id_isUsed {
            Some(FixedString::decode(r)?)
        } else {
            None
        };
        let content = FixedBytes::decode(r)?;
        Ok(SignatureValue {
            id_isUsed,
            id,
            content,
        })
    }
}

/// Two-variant sequenced choice (spec §3, §9): `choice_1` pairs a key id
/// with an optional key packet; `choice_2` carries just the key packet.
///
/// The source grammar's state 36 tests the same predicate in both of its
/// `else if` branches, so the second branch is unreachable; this is
/// preserved here as documented dead code rather than guessed at (spec §9).
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PGPData {
    pub choice_1_isUsed: bool,
    pub choice_1: Option<PGPDataChoice1>,
    pub choice_2_isUsed: bool,
    pub choice_2: Option<PGPDataChoice2>,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PGPDataChoice1 {
    pub pgp_key_id: FixedBytes<64>,
    pub pgp_key_packet_isUsed: bool,
    pub pgp_key_packet: Option<FixedBytes<1024>>,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PGPDataChoice2 {
    pub pgp_key_packet: FixedBytes<1024>,
}

impl PGPData {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        let width = event_code_width(2);
        if self.choice_1_isUsed {
            w.write_nbit_uint(width, 0)?;
            let c = self.choice_1.as_ref().expect("choice_1_isUsed invariant");
            c.pgp_key_id.encode(w)?;
            w.write_bool(c.pgp_key_packet_isUsed)?;
            if c.pgp_key_packet_isUsed {
                c.pgp_key_packet
                    .as_ref()
                    .expect("pgp_key_packet_isUsed invariant")
                    .encode(w)?;
            }
        } else if self.choice_2_isUsed {
            w.write_nbit_uint(width, 1)?;
            let c = self.choice_2.as_ref().expect("choice_2_isUsed invariant");
            c.pgp_key_packet.encode(w)?;
        } else {
            return Err(exi_bitstream::CodecError::UnknownEventForEncoding);
        }
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let width = event_code_width(2);
        let code = r.read_nbit_uint(width)?;
        match code {
            0 => {
                let pgp_key_id = FixedBytes::decode(r)?;
                let pgp_key_packet_isUsed = r.read_bool()?;
                let pgp_key_packet = if pgp_key_packet_isUsed {
                    Some(FixedBytes::decode(r)?)
                } else {
                    None
                };
                Ok(PGPData {
                    choice_1_isUsed: true,
                    choice_1: Some(PGPDataChoice1 {
                        pgp_key_id,
                        pgp_key_packet_isUsed,
                        pgp_key_packet,
                    }),
                    choice_2_isUsed: false,
                    choice_2: None,
                })
            }
            1 => {
                let pgp_key_packet = FixedBytes::decode(r)?;
                Ok(PGPData {
                    choice_1_isUsed: false,
                    choice_1: None,
                    choice_2_isUsed: true,
                    choice_2: Some(PGPDataChoice2 { pgp_key_packet }),
                })
            }
            _ => Err(exi_bitstream::CodecError::UnknownEventCode),
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyInfo {
    pub id_isUsed: bool,
    pub id: Option<FixedString<64>>,
    pub pgp_data_isUsed: bool,
    pub pgp_data: Option<PGPData>,
}

impl KeyInfo {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        w.write_bool(self.id_isUsed)?;
        if self.id_isUsed {
            self.id.as_ref().expect("id_isUsed invariant").encode(w)?;
        }
        w.write_bool(self.pgp_data_isUsed)?;
        if self.pgp_data_isUsed {
            self.pgp_data
                .as_ref()
                .expect("pgp_data_isUsed invariant")
                .encode(w)?;
        }
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let id_isUsed = r.read_bool()?;
        let id = if id_isUsed {
            Some(FixedString::decode(r)?)
        } else {
            None
        };
        let pgp_data_isUsed = r.read_bool()?;
        let pgp_data = if pgp_data_isUsed {
            Some(PGPData::decode(r)?)
        } else {
            None
        };
        Ok(KeyInfo {
            id_isUsed,
            id,
            pgp_data_isUsed,
            pgp_data,
        })
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    pub signed_info: SignedInfo,
    pub signature_value: SignatureValue,
    pub key_info_isUsed: bool,
    pub key_info: Option<KeyInfo>,
}

impl Signature {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.signed_info.encode(w)?;
        self.signature_value.encode(w)?;
        w.write_bool(self.key_info_isUsed)?;
        if self.key_info_isUsed {
            self.key_info
                .as_ref()
                .expect("key_info_isUsed invariant")
                .encode(w)?;
        }
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let signed_info = SignedInfo::decode(r)?;
        let signature_value = SignatureValue::decode(r)?;
        let key_info_isUsed = r.read_bool()?;
        let key_info = if key_info_isUsed {
            Some(KeyInfo::decode(r)?)
        } else {
            None
        };
        Ok(Signature {
            signed_info,
            signature_value,
            key_info_isUsed,
            key_info,
        })
    }
}
