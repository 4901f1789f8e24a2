//! The flat error taxonomy surfaced by every layer of the codec (spec §7).
//!
//! Every bit-stream operation and every grammar-state transition returns
//! one of these kinds or `Ok`. There is no recovery: the first error
//! terminates the current codec call and the cursor is left at its
//! point-of-failure position.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Writer is out of space: the remaining capacity is less than the
    /// number of bits the operation needs to emit.
    BufferOverflow,
    /// Reader is past the end of the stream.
    BufferUnderflow,
    /// Internal: a grammar state id was reached that the table does not
    /// define. Indicates a table/code mismatch, never a malformed stream.
    UnknownGrammarId,
    /// Decoder read an event code outside the state's production range,
    /// or an encoder attempted to emit a value with no matching
    /// production (e.g. an array already at its schema maximum).
    UnknownEventCode,
    /// No root alternative is marked used when encoding a document,
    /// fragment, or xmldsig fragment.
    UnknownEventForEncoding,
    /// A grammar position deliberately left unsupported (certain
    /// wildcard `ANY` fragments).
    NotImplementedYet,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CodecError::BufferOverflow => "buffer overflow: writer out of space",
            CodecError::BufferUnderflow => "buffer underflow: read past end of stream",
            CodecError::UnknownGrammarId => "unknown grammar id (table/code mismatch)",
            CodecError::UnknownEventCode => "unknown event code for the current grammar state",
            CodecError::UnknownEventForEncoding => "no root alternative is marked used",
            CodecError::NotImplementedYet => "grammar position not implemented",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for CodecError {}

pub type CodecResult<T> = Result<T, CodecError>;
