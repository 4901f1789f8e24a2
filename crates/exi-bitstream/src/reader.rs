//! The decode-side mirror of [`crate::writer::BitWriter`]: a sequential bit
//! cursor over a caller-owned byte slice (spec §4.1).

use crate::errors::{CodecError, CodecResult};

pub struct BitReader<'a> {
    buf: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_pos
    }

    /// Whether the cursor has consumed the entire stream.
    pub fn is_exhausted(&self) -> bool {
        self.bit_pos >= self.buf.len() * 8
    }

    fn read_bit(&mut self) -> CodecResult<u8> {
        let byte_index = self.bit_pos / 8;
        let byte = *self
            .buf
            .get(byte_index)
            .ok_or(CodecError::BufferUnderflow)?;
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Reads `n` bits MSB-first as an unsigned value (1 <= n <= 32).
    pub fn read_nbit_uint(&mut self, n: u32) -> CodecResult<u32> {
        if self.bit_pos + n as usize > self.buf.len() * 8 {
            return Err(CodecError::BufferUnderflow);
        }
        let mut v: u32 = 0;
        for _ in 0..n {
            v = (v << 1) | self.read_bit()? as u32;
        }
        Ok(v)
    }

    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_bit()? == 1)
    }

    fn read_unsigned_varint(&mut self) -> CodecResult<u64> {
        let mut v: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.read_nbit_uint(8)?;
            v |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= 64 {
                return Err(CodecError::BufferUnderflow);
            }
        }
        Ok(v)
    }

    pub fn read_uint_16(&mut self) -> CodecResult<u16> {
        Ok(self.read_unsigned_varint()? as u16)
    }

    pub fn read_uint_32(&mut self) -> CodecResult<u32> {
        Ok(self.read_unsigned_varint()? as u32)
    }

    pub fn read_uint_64(&mut self) -> CodecResult<u64> {
        self.read_unsigned_varint()
    }

    fn read_signed_varint(&mut self) -> CodecResult<i64> {
        let negative = self.read_bool()?;
        let magnitude = self.read_unsigned_varint()? as i64;
        Ok(if negative { -magnitude - 1 } else { magnitude })
    }

    pub fn read_integer_16(&mut self) -> CodecResult<i16> {
        Ok(self.read_signed_varint()? as i16)
    }

    pub fn read_integer_32(&mut self) -> CodecResult<i32> {
        Ok(self.read_signed_varint()? as i32)
    }

    /// Reads `len` raw octets starting at the current bit position.
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        // Validate against the remaining stream before allocating: a
        // corrupt or adversarial length prefix must not reach `with_capacity`.
        if self.bit_pos + len.saturating_mul(8) > self.buf.len() * 8 {
            return Err(CodecError::BufferUnderflow);
        }
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_nbit_uint(8)? as u8);
        }
        Ok(out)
    }

    /// Fills `out[..len]` with `len` raw octets; fails if `len > out.len()`.
    pub fn read_bytes_into(&mut self, out: &mut [u8], len: usize) -> CodecResult<()> {
        if len > out.len() {
            return Err(CodecError::BufferOverflow);
        }
        for slot in out.iter_mut().take(len) {
            *slot = self.read_nbit_uint(8)? as u8;
        }
        Ok(())
    }

    pub fn align_to_byte(&mut self) -> CodecResult<()> {
        let rem = self.bit_pos % 8;
        if rem != 0 {
            self.read_nbit_uint((8 - rem) as u32)?;
        }
        Ok(())
    }

    /// `base64Binary` / `hexBinary` / wildcard `ANY` payload (spec §6).
    pub fn read_bytes_value(&mut self) -> CodecResult<Vec<u8>> {
        let _table_miss = self.read_bool()?;
        let len = self.read_unsigned_varint()? as usize;
        self.read_bytes(len)
    }

    /// `string` / `anyURI` / `NCName` payload (spec §6): the length prefix
    /// carries the `+2` string-table-miss offset.
    pub fn read_string_value(&mut self) -> CodecResult<Vec<u8>> {
        let _table_miss = self.read_bool()?;
        let encoded_len = self.read_unsigned_varint()?;
        let len = encoded_len.saturating_sub(2) as usize;
        self.read_bytes(len)
    }
}
