//! `MessageHeader`: the required header carried at the front of every DC
//! request/response body (spec §8 scenario 1).

use exi_bitstream::{BitReader, BitWriter, CodecResult};

use crate::grammar::event_code_width;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `SessionID` is a `hexBinary` of at most 8 octets.
pub type SessionId = crate::primitives::FixedBytes<8>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(non_snake_case)]
pub struct MessageHeader {
    pub session_id: SessionId,
    pub time_stamp: u64,
    pub signature_isUsed: bool,
    pub signature: Option<crate::xmldsig::Signature>,
    pub notification_isUsed: bool,
    pub notification: Option<crate::primitives::EvseNotification>,
}

impl MessageHeader {
    /// Grammar state 0: required `SessionID`, required `TimeStamp`, then
    /// two optional particles (`Signature`, `Notification`) each a
    /// choice between `SE(particle)` and skipping ahead, before `EE`.
    /// Four live productions once both optionals are still open.
    fn initial_state_productions(&self) -> usize {
        4
    }

    pub fn encode(&self, w: &mut BitWriter) -> CodecResult<()> {
        self.session_id.encode(w)?;
        w.write_uint_64(self.time_stamp)?;

        let width = event_code_width(self.initial_state_productions());
        w.write_nbit_uint(width, if self.signature_isUsed { 0 } else { 1 })?;
        if self.signature_isUsed {
            self.signature.as_ref().expect("signature_isUsed invariant").encode(w)?;
        }

        w.write_bool(self.notification_isUsed)?;
        if self.notification_isUsed {
            self.notification
                .as_ref()
                .expect("notification_isUsed invariant")
                .encode(w)?;
        }
        Ok(())
    }

    pub fn decode(r: &mut BitReader) -> CodecResult<Self> {
        let session_id = SessionId::decode(r)?;
        let time_stamp = r.read_uint_64()?;

        let width = event_code_width(4);
        let code = r.read_nbit_uint(width)?;
        let signature_isUsed = code == 0;
        let signature = if signature_isUsed {
            Some(crate::xmldsig::Signature::decode(r)?)
        } else {
            None
        };

        let notification_isUsed = r.read_bool()?;
        let notification = if notification_isUsed {
            Some(crate::primitives::EvseNotification::decode(r)?)
        } else {
            None
        };

        Ok(MessageHeader {
            session_id,
            time_stamp,
            signature_isUsed,
            signature,
            notification_isUsed,
            notification,
        })
    }
}
