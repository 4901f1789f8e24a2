//! Integration-level golden-vector tests for the six worked scenarios in
//! spec.md §8, plus the boundary behaviors it calls out.

use exi_bitstream::{BitReader, BitWriter, CodecError};
use exi_iso15118_20::dc::{
    BptDcCpdResEnergyTransferMode, DcCableCheckReq, DcChargeLoopReq, DcChargeParameterDiscoveryRes,
    DcPreChargeRes,
};
use exi_iso15118_20::document::ExiDocument;
use exi_iso15118_20::header::{MessageHeader, SessionId};
use exi_iso15118_20::primitives::{PercentValue, Processing, RationalNumber, ResponseCode};
use exi_iso15118_20::receipt::{Receipt, MAX_TAX_COSTS};

fn sample_header() -> MessageHeader {
    MessageHeader {
        session_id: SessionId::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap(),
        time_stamp: 0x0000_0000_6415_A9C0,
        signature_isUsed: false,
        signature: None,
        notification_isUsed: false,
        notification: None,
    }
}

/// Scenario 1: `DC_CableCheckReq` with only a required header round-trips,
/// and the header's `SessionID`/`TimeStamp` survive byte-for-byte.
#[test]
fn scenario_1_cable_check_req() {
    let msg = DcCableCheckReq {
        header: sample_header(),
        processing: Processing::Ongoing,
    };

    let mut buf = [0u8; 32];
    let mut w = BitWriter::new(&mut buf);
    msg.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    let decoded = DcCableCheckReq::decode(&mut r).unwrap();
    assert_eq!(decoded, msg);
    assert_eq!(decoded.header.session_id.as_slice(), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(decoded.header.time_stamp, 0x0000_0000_6415_A9C0);
}

/// Scenario 2: `DC_PreChargeRes` with `ResponseCode = OK`,
/// `EVSEPresentVoltage = (Exponent = 0, Value = 400)`.
#[test]
fn scenario_2_pre_charge_res() {
    let msg = DcPreChargeRes {
        header: sample_header(),
        response_code: ResponseCode::Ok,
        evse_present_voltage: RationalNumber { exponent: 0, value: 400 },
    };

    let mut buf = [0u8; 32];
    let mut w = BitWriter::new(&mut buf);
    msg.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    assert_eq!(DcPreChargeRes::decode(&mut r).unwrap(), msg);
}

/// Scenario 3: `BPT_DC_CPDResEnergyTransferMode_isUsed = 1` selects the
/// BPT branch (2-bit event code `00`, spec §8 scenario 3), leaving the
/// non-BPT alternative unset.
#[test]
fn scenario_3_charge_parameter_discovery_res_bpt_branch() {
    let bpt = BptDcCpdResEnergyTransferMode {
        evse_maximum_current_limit: RationalNumber { exponent: 0, value: 300 },
        evse_maximum_power_limit: RationalNumber { exponent: 2, value: 50 },
        evse_maximum_discharge_power: RationalNumber { exponent: 2, value: -50 },
    };

    let msg = DcChargeParameterDiscoveryRes {
        header: sample_header(),
        response_code: ResponseCode::Ok,
        BPT_DC_CPDResEnergyTransferMode_isUsed: true,
        bpt_energy_transfer_mode: Some(bpt.clone()),
        DC_CPDResEnergyTransferMode_isUsed: false,
        energy_transfer_mode: None,
    };

    let mut buf = [0u8; 64];
    let mut w = BitWriter::new(&mut buf);
    msg.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    let decoded = DcChargeParameterDiscoveryRes::decode(&mut r).unwrap();
    assert_eq!(decoded, msg);
    assert!(decoded.BPT_DC_CPDResEnergyTransferMode_isUsed);
    assert!(!decoded.DC_CPDResEnergyTransferMode_isUsed);

    // Pin the branch code's width and value exactly: header and
    // response_code re-use their own already-verified encoders, so the
    // only new bits asserted here are the 2-bit `00` choice code.
    let mut expected_buf = [0u8; 64];
    let mut ew = BitWriter::new(&mut expected_buf);
    sample_header().encode(&mut ew).unwrap();
    ResponseCode::Ok.encode(&mut ew).unwrap();
    ew.write_nbit_uint(2, 0b00).unwrap();
    bpt.encode(&mut ew).unwrap();
    let expected_len = ew.finish();

    assert_eq!(len, expected_len);
    assert_eq!(&buf[..len], &expected_buf[..expected_len]);
}

/// Scenario 4: `Receipt.TaxCosts` with three entries and no others.
#[test]
fn scenario_4_receipt_three_tax_costs() {
    let mut tax_costs: [Option<RationalNumber>; MAX_TAX_COSTS] = Default::default();
    tax_costs[0] = Some(RationalNumber { exponent: 0, value: 1 });
    tax_costs[1] = Some(RationalNumber { exponent: 0, value: 2 });
    tax_costs[2] = Some(RationalNumber { exponent: 0, value: 3 });

    let receipt = Receipt {
        tax_costs,
        tax_costs_len: 3,
    };

    let mut buf = [0u8; 32];
    let mut w = BitWriter::new(&mut buf);
    receipt.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    let decoded = Receipt::decode(&mut r).unwrap();
    assert_eq!(decoded, receipt);
    assert_eq!(decoded.tax_costs_len, 3);
}

/// Scenario 5: `SignedInfo` with `Id_isUsed = 0` and one `Reference`: the
/// initial state's Id skip and the chain's terminating `EE` are each
/// pinned at a 2-bit code `01` (spec §8 scenario 5).
#[test]
fn scenario_5_signed_info_one_reference() {
    use exi_iso15118_20::primitives::{FixedBytes, FixedString};
    use exi_iso15118_20::xmldsig::{CanonicalizationMethod, Reference, SignatureMethod, SignedInfo, MAX_REFERENCES};

    let single_reference = Reference {
        uri_isUsed: false,
        uri: None,
        digest_value: FixedBytes::from_bytes(&[0xAB; 20]).unwrap(),
    };

    let mut reference: [Option<Reference>; MAX_REFERENCES] = Default::default();
    reference[0] = Some(single_reference.clone());

    let canonicalization_method = CanonicalizationMethod {
        algorithm: FixedString::from_str("http://www.w3.org/TR/canonical-exi/").unwrap(),
    };
    let signature_method = SignatureMethod {
        algorithm: FixedString::from_str("http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256")
            .unwrap(),
    };

    let signed_info = SignedInfo {
        id_isUsed: false,
        id: None,
        canonicalization_method: canonicalization_method.clone(),
        signature_method: signature_method.clone(),
        reference,
        reference_len: 1,
    };

    let mut buf = [0u8; 256];
    let mut w = BitWriter::new(&mut buf);
    signed_info.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    assert_eq!(SignedInfo::decode(&mut r).unwrap(), signed_info);

    // Pin the Id-skip and EE codes exactly: everything else re-uses its
    // own already-verified encoder, so the only hardcoded bits here are
    // the two 2-bit codes spec §8 scenario 5 names (`01` to skip Id,
    // `00` to continue the Reference chain, `01` for its EE).
    let mut expected_buf = [0u8; 256];
    let mut ew = BitWriter::new(&mut expected_buf);
    ew.write_nbit_uint(2, 0b01).unwrap();
    canonicalization_method.encode(&mut ew).unwrap();
    signature_method.encode(&mut ew).unwrap();
    ew.write_nbit_uint(2, 0b00).unwrap();
    single_reference.encode(&mut ew).unwrap();
    ew.write_nbit_uint(2, 0b01).unwrap();
    let expected_len = ew.finish();

    assert_eq!(len, expected_len);
    assert_eq!(&buf[..len], &expected_buf[..expected_len]);
}

/// Scenario 6: `exiDocument` with `DC_ChargeLoopReq_isUsed = 1` begins
/// with the EXI header byte `0x80` then a 6-bit root code `001101` (= 13).
#[test]
fn scenario_6_exi_document_charge_loop_req() {
    let msg = ExiDocument::DcChargeLoopReq(DcChargeLoopReq {
        header: sample_header(),
        evse_present_voltage: RationalNumber { exponent: 0, value: 400 },
        evse_present_current: RationalNumber { exponent: 0, value: 10 },
    });

    let mut buf = [0u8; 64];
    let mut w = BitWriter::new(&mut buf);
    msg.encode(&mut w).unwrap();
    assert_eq!(buf[0], 0x80);
    assert_eq!(buf[1] >> 2, 13);

    let len = w.finish();
    let mut r = BitReader::new(&buf[..len]);
    assert_eq!(ExiDocument::decode(&mut r).unwrap(), msg);
}

// --- Boundary behaviors (spec §8) ---

#[test]
fn zero_length_string_encodes_as_prefix_plus_length_two() {
    use exi_iso15118_20::primitives::FixedString;

    let empty = FixedString::<8>::from_str("").unwrap();
    let mut buf = [0u8; 1];
    let mut w = BitWriter::new(&mut buf);
    empty.encode(&mut w).unwrap();
    assert_eq!(buf[0], 0b0_000_0010);
}

#[test]
fn zero_length_bytes_encodes_as_prefix_plus_length_zero() {
    use exi_iso15118_20::primitives::FixedBytes;

    let empty = FixedBytes::<8>::from_bytes(&[]).unwrap();
    let mut buf = [0u8; 1];
    let mut w = BitWriter::new(&mut buf);
    empty.encode(&mut w).unwrap();
    assert_eq!(buf[0], 0x00);
}

#[test]
fn percent_value_100_is_seven_bit_1100100() {
    let mut buf = [0u8; 1];
    let mut w = BitWriter::new(&mut buf);
    PercentValue::new(100).unwrap().encode(&mut w).unwrap();
    assert_eq!(buf[0] >> 1, 0b1100100);
}

#[test]
fn exponent_extremes_match_biased_encoding() {
    let mut buf = [0u8; 3];
    let mut w = BitWriter::new(&mut buf);
    RationalNumber { exponent: -128, value: 0 }.encode(&mut w).unwrap();
    assert_eq!(buf[0], 0b0000_0000);

    let mut buf2 = [0u8; 3];
    let mut w2 = BitWriter::new(&mut buf2);
    RationalNumber { exponent: 127, value: 0 }.encode(&mut w2).unwrap();
    assert_eq!(buf2[0], 0b1111_1111);
}

#[test]
fn max_capacity_tax_costs_array_round_trips() {
    let mut tax_costs: [Option<RationalNumber>; MAX_TAX_COSTS] = Default::default();
    for slot in tax_costs.iter_mut() {
        *slot = Some(RationalNumber { exponent: 0, value: 7 });
    }
    let receipt = Receipt {
        tax_costs,
        tax_costs_len: MAX_TAX_COSTS as u16,
    };

    let mut buf = [0u8; 128];
    let mut w = BitWriter::new(&mut buf);
    receipt.encode(&mut w).unwrap();
    let len = w.finish();

    let mut r = BitReader::new(&buf[..len]);
    assert_eq!(Receipt::decode(&mut r).unwrap(), receipt);
}

#[test]
fn array_overflow_past_schema_maximum_is_unknown_event_code() {
    let mut tax_costs: [Option<RationalNumber>; MAX_TAX_COSTS] = Default::default();
    for slot in tax_costs.iter_mut() {
        *slot = Some(RationalNumber { exponent: 0, value: 1 });
    }
    let receipt = Receipt {
        tax_costs,
        tax_costs_len: (MAX_TAX_COSTS + 1) as u16,
    };

    let mut buf = [0u8; 256];
    let mut w = BitWriter::new(&mut buf);
    assert_eq!(
        receipt.encode(&mut w).unwrap_err(),
        CodecError::UnknownEventCode
    );
}
