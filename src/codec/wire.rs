//! Wire primitives.
//!
//! Little-endian fixed-width integers and floats, 1-byte booleans, 4-byte
//! length prefixes for strings and raw payloads, and 1-byte count prefixes
//! for small integer arrays. The format is versionless: writer and reader
//! stay in lockstep by construction.

use crate::error::{CodecError, CodecResult};

/// Largest array a 1-byte count prefix can describe.
pub const MAX_ARRAY_LEN: usize = u8::MAX as usize;

/// Append-only encoder.
#[derive(Clone, Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// 4-byte length, then the bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// 4-byte length, then UTF-8.
    pub fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// 1-byte count, then each value as a 4-byte int.
    pub fn write_i32_array(&mut self, values: &[i32]) -> CodecResult<()> {
        let count = u8::try_from(values.len()).map_err(|_| CodecError::ArrayTooLong(values.len()))?;
        self.write_u8(count);
        for value in values {
            self.write_i32(*value);
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn write_len(&mut self, len: usize) {
        // Payloads past i32::MAX cannot be described by the format.
        let len = i32::try_from(len).unwrap_or(i32::MAX);
        self.write_i32(len);
    }
}

/// Cursor over a received payload.
#[derive(Clone, Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i32(&mut self) -> CodecResult<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> CodecResult<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_bytes(&mut self) -> CodecResult<&'a [u8]> {
        let len = self.read_len()?;
        self.take(len)
    }

    pub fn read_string(&mut self) -> CodecResult<String> {
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8)
    }

    pub fn read_i32_array(&mut self) -> CodecResult<Vec<i32>> {
        let count = usize::from(self.read_u8()?);
        // Check the whole array is present before allocating for it.
        self.ensure(count * 4)?;
        (0..count).map(|_| self.read_i32()).collect()
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(CodecError::TrailingBytes(extra)),
        }
    }

    /// Read a non-negative 4-byte count, bounded by the bytes left.
    pub(crate) fn read_count(&mut self, min_item_size: usize) -> CodecResult<usize> {
        let len = self.read_len()?;
        self.ensure(len.saturating_mul(min_item_size))?;
        Ok(len)
    }

    fn read_len(&mut self) -> CodecResult<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| CodecError::NegativeLength(len))
    }

    fn ensure(&self, needed: usize) -> CodecResult<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        self.ensure(len)?;
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
