//! `Receipt`: a bounded `TaxCosts` array chain (spec §8 scenario 4).

use exi_bitstream::{BitReader, BitWriter, CodecResult};

use crate::grammar::check_array_bound;
use crate::primitives::RationalNumber;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Schema-declared maximum for `Receipt.TaxCosts` (spec §2, §9).
pub const MAX_TAX_COSTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Receipt {
    pub tax_costs: [Option<RationalNumber>; MAX_TAX_COSTS],
    pub tax_costs_len: u16,
}

impl Receipt {
    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        for i in 0..self.tax_costs_len as usize {
            check_array_bound(i, MAX_TAX_COSTS)?;
            // Array-chain state: SE(TaxCosts) -> next state, or EE.
            w.write_bool(true)?;
            self.tax_costs[i]
                .as_ref()
                .expect("tax_costs_len invariant")
                .encode(w)?;
        }
        w.write_bool(false)?; // EE
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let mut tax_costs: [Option<RationalNumber>; MAX_TAX_COSTS] = Default::default();
        let mut tax_costs_len = 0u16;
        loop {
            if !r.read_bool()? {
                break;
            }
            check_array_bound(tax_costs_len as usize, MAX_TAX_COSTS)?;
            tax_costs[tax_costs_len as usize] = Some(RationalNumber::decode(r)?);
            tax_costs_len += 1;
        }
        Ok(Receipt {
            tax_costs,
            tax_costs_len,
        })
    }
}
