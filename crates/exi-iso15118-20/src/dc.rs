//! The DC (direct-current charging) namespace message types: cable-check,
//! pre-charge, charge-parameter discovery, charge-loop, welding-detection
//! (spec §1, §8 scenarios 1-3, 6).

use exi_bitstream::{BitReader, BitWriter, CodecError, CodecResult};

use crate::header::MessageHeader;
use crate::primitives::{EvseNotification, Processing, RationalNumber, ResponseCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcCableCheckReq {
    pub header: MessageHeader,
    pub processing: Processing,
}

impl DcCableCheckReq {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        // Initial state: SE(Header) is production 0 of a 1-bit code space
        // whose second production is an EE-only branch that can never be
        // legally chosen for a non-empty message (spec §8 scenario 1, §9's
        // "dead EE branch" note) — the code value for SE(Header) is 0.
        w.write_bool(false)?;
        self.header.encode(w)?;
        self.processing.encode(w)?;
        w.write_bool(false)?; // EE
        w.write_bool(false)?; // EE (outer)
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let root_code = r.read_bool()?;
        if root_code {
            return Err(CodecError::UnknownEventCode);
        }
        let header = MessageHeader::decode(r)?;
        let processing = Processing::decode(r)?;
        let _ee_inner = r.read_bool()?;
        let _ee_outer = r.read_bool()?;
        Ok(DcCableCheckReq { header, processing })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcCableCheckRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_processing: Processing,
}

impl DcCableCheckRes {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.response_code.encode(w)?;
        self.evse_processing.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcCableCheckRes {
            header: MessageHeader::decode(r)?,
            response_code: ResponseCode::decode(r)?,
            evse_processing: Processing::decode(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcPreChargeReq {
    pub header: MessageHeader,
    pub evse_present_voltage: RationalNumber,
}

impl DcPreChargeReq {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.evse_present_voltage.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcPreChargeReq {
            header: MessageHeader::decode(r)?,
            evse_present_voltage: RationalNumber::decode(r)?,
        })
    }
}

/// spec §8 scenario 2: `ResponseCode = OK (0)`,
/// `EVSEPresentVoltage = (Exponent = 0, Value = 400)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcPreChargeRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_present_voltage: RationalNumber,
}

impl DcPreChargeRes {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.response_code.encode(w)?;
        self.evse_present_voltage.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcPreChargeRes {
            header: MessageHeader::decode(r)?,
            response_code: ResponseCode::decode(r)?,
            evse_present_voltage: RationalNumber::decode(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcChargeParameterDiscoveryReq {
    pub header: MessageHeader,
    pub max_supporting_points: u16,
}

impl DcChargeParameterDiscoveryReq {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        w.write_uint_16(self.max_supporting_points)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcChargeParameterDiscoveryReq {
            header: MessageHeader::decode(r)?,
            max_supporting_points: r.read_uint_16()?,
        })
    }
}

/// A subset of the fields a concrete `Scheduled`/`Dynamic`/`BPT` energy
/// transfer mode carries: enough to exercise the abstract/extension
/// modeling spec §9 describes, without inventing the full schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcCpdResEnergyTransferMode {
    pub evse_maximum_current_limit: RationalNumber,
    pub evse_maximum_power_limit: RationalNumber,
}

impl DcCpdResEnergyTransferMode {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.evse_maximum_current_limit.encode(w)?;
        self.evse_maximum_power_limit.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcCpdResEnergyTransferMode {
            evse_maximum_current_limit: RationalNumber::decode(r)?,
            evse_maximum_power_limit: RationalNumber::decode(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BptDcCpdResEnergyTransferMode {
    pub evse_maximum_current_limit: RationalNumber,
    pub evse_maximum_power_limit: RationalNumber,
    pub evse_maximum_discharge_power: RationalNumber,
}

impl BptDcCpdResEnergyTransferMode {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.evse_maximum_current_limit.encode(w)?;
        self.evse_maximum_power_limit.encode(w)?;
        self.evse_maximum_discharge_power.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(BptDcCpdResEnergyTransferMode {
            evse_maximum_current_limit: RationalNumber::decode(r)?,
            evse_maximum_power_limit: RationalNumber::decode(r)?,
            evse_maximum_discharge_power: RationalNumber::decode(r)?,
        })
    }
}

/// spec §8 scenario 3: `BPT_DC_CPDResEnergyTransferMode` selects grammar
/// branch 0 (2-bit event code `00`); the non-BPT alternative would be
/// code `01`.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcChargeParameterDiscoveryRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub BPT_DC_CPDResEnergyTransferMode_isUsed: bool,
    pub bpt_energy_transfer_mode: Option<BptDcCpdResEnergyTransferMode>,
    pub DC_CPDResEnergyTransferMode_isUsed: bool,
    pub energy_transfer_mode: Option<DcCpdResEnergyTransferMode>,
}

impl DcChargeParameterDiscoveryRes {
    // Spec §8 scenario 3 pins this choice's event code at 2 bits on the
    // wire even though only 2 productions are modeled here; the full
    // schema state offers more alternatives than this crate wires up
    // (document.rs does the same for the root dispatchers' catalog sizes).
    const CHOICE_CODE_WIDTH: u32 = 2;

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.response_code.encode(w)?;

        let width = Self::CHOICE_CODE_WIDTH;
        if self.BPT_DC_CPDResEnergyTransferMode_isUsed {
            w.write_nbit_uint(width, 0)?;
            self.bpt_energy_transfer_mode
                .as_ref()
                .expect("BPT_DC_CPDResEnergyTransferMode_isUsed invariant")
                .encode(w)
        } else if self.DC_CPDResEnergyTransferMode_isUsed {
            w.write_nbit_uint(width, 1)?;
            self.energy_transfer_mode
                .as_ref()
                .expect("DC_CPDResEnergyTransferMode_isUsed invariant")
                .encode(w)
        } else {
            Err(CodecError::UnknownEventForEncoding)
        }
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let header = MessageHeader::decode(r)?;
        let response_code = ResponseCode::decode(r)?;

        let width = Self::CHOICE_CODE_WIDTH;
        let code = r.read_nbit_uint(width)?;
        match code {
            0 => Ok(DcChargeParameterDiscoveryRes {
                header,
                response_code,
                BPT_DC_CPDResEnergyTransferMode_isUsed: true,
                bpt_energy_transfer_mode: Some(BptDcCpdResEnergyTransferMode::decode(r)?),
                DC_CPDResEnergyTransferMode_isUsed: false,
                energy_transfer_mode: None,
            }),
            1 => Ok(DcChargeParameterDiscoveryRes {
                header,
                response_code,
                BPT_DC_CPDResEnergyTransferMode_isUsed: false,
                bpt_energy_transfer_mode: None,
                DC_CPDResEnergyTransferMode_isUsed: true,
                energy_transfer_mode: Some(DcCpdResEnergyTransferMode::decode(r)?),
            }),
            _ => Err(CodecError::UnknownEventCode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcChargeLoopReq {
    pub header: MessageHeader,
    pub evse_present_voltage: RationalNumber,
    pub evse_present_current: RationalNumber,
}

impl DcChargeLoopReq {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.evse_present_voltage.encode(w)?;
        self.evse_present_current.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcChargeLoopReq {
            header: MessageHeader::decode(r)?,
            evse_present_voltage: RationalNumber::decode(r)?,
            evse_present_current: RationalNumber::decode(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(non_snake_case)]
pub struct DcChargeLoopRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_present_voltage: RationalNumber,
    pub evse_present_current: RationalNumber,
    pub evse_notification_isUsed: bool,
    pub evse_notification: Option<EvseNotification>,
}

#[allow(non_snake_case)]
impl DcChargeLoopRes {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.response_code.encode(w)?;
        self.evse_present_voltage.encode(w)?;
        self.evse_present_current.encode(w)?;
        w.write_bool(self.evse_notification_isUsed)?;
        if self.evse_notification_isUsed {
            self.evse_notification
                .as_ref()
                .expect("evse_notification_isUsed invariant")
                .encode(w)?;
        }
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let header = MessageHeader::decode(r)?;
        let response_code = ResponseCode::decode(r)?;
        let evse_present_voltage = RationalNumber::decode(r)?;
        let evse_present_current = RationalNumber::decode(r)?;
        let evse_notification_isUsed = r.read_bool()?;
        let evse_notification = if evse_notification_isUsed {
            Some(EvseNotification::decode(r)?)
        } else {
            None
        };
        Ok(DcChargeLoopRes {
            header,
            response_code,
            evse_present_voltage,
            evse_present_current,
            evse_notification_isUsed,
            evse_notification,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcWeldingDetectionReq {
    pub header: MessageHeader,
    pub processing: Processing,
}

impl DcWeldingDetectionReq {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.processing.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcWeldingDetectionReq {
            header: MessageHeader::decode(r)?,
            processing: Processing::decode(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DcWeldingDetectionRes {
    pub header: MessageHeader,
    pub response_code: ResponseCode,
    pub evse_present_voltage: RationalNumber,
}

impl DcWeldingDetectionRes {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.header.encode(w)?;
        self.response_code.encode(w)?;
        self.evse_present_voltage.encode(w)
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        Ok(DcWeldingDetectionRes {
            header: MessageHeader::decode(r)?,
            response_code: ResponseCode::decode(r)?,
            evse_present_voltage: RationalNumber::decode(r)?,
        })
    }
}
