//! Low-level binary primitives of the Vapor wire format.
//!
//! - unsigned LEB128 varints (at most 10 bytes), range-checked to 63 or 31 bits
//! - `varstr31`: varint31 length followed by that many bytes
//! - extensible strings: a `varstr31` whose contents are parsed by a nested
//!   reader; bytes the parser leaves unread are returned as the suffix
//!
//! The [`Writer`] produces the same primitives plus the little-endian `u64`s
//! used by entry hashing.

use crate::error::DecodeError;

/// Longest valid encoding of a `u64` varint.
pub const MAX_VARINT_LEN: usize = 10;

const MAX_VARINT63: u64 = i64::MAX as u64;
const MAX_VARINT31: u64 = i32::MAX as u64;

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Unsigned LEB128, rejecting encodings that overflow 64 bits.
    pub fn read_uvarint(&mut self) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        for i in 0..MAX_VARINT_LEN {
            let b = self.read_byte()?;
            if b < 0x80 {
                if i == MAX_VARINT_LEN - 1 && b > 1 {
                    return Err(DecodeError::VarintOverflow);
                }
                return Ok(value | u64::from(b) << shift);
            }
            value |= u64::from(b & 0x7f) << shift;
            shift += 7;
        }
        Err(DecodeError::VarintOverflow)
    }

    pub fn read_varint63(&mut self) -> Result<u64, DecodeError> {
        let value = self.read_uvarint()?;
        if value > MAX_VARINT63 {
            return Err(DecodeError::OutOfRange {
                value,
                max: MAX_VARINT63,
            });
        }
        Ok(value)
    }

    pub fn read_varint31(&mut self) -> Result<u32, DecodeError> {
        let value = self.read_uvarint()?;
        if value > MAX_VARINT31 {
            return Err(DecodeError::OutOfRange {
                value,
                max: MAX_VARINT31,
            });
        }
        Ok(value as u32)
    }

    pub fn read_varstr31(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint31()? as usize;
        self.read_bytes(len)
    }

    pub fn read_varstr_list(&mut self) -> Result<Vec<Vec<u8>>, DecodeError> {
        let count = self.read_varint31()? as usize;
        // Every item costs at least one byte; never trust the count for capacity.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(self.read_varstr31()?.to_vec());
        }
        Ok(items)
    }

    /// Read a `varstr31` and parse its contents with `f`.
    ///
    /// Returns the parsed value and whatever bytes `f` left unread.
    pub fn read_extensible<T>(
        &mut self,
        f: impl FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
    ) -> Result<(T, &'a [u8]), DecodeError> {
        let body = self.read_varstr31()?;
        let mut inner = Reader::new(body);
        let value = f(&mut inner)?;
        let suffix = &body[inner.pos..];
        Ok((value, suffix))
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

/// Growable output buffer for the same primitives.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_byte(&mut self, b: u8) -> &mut Self {
        self.buf.push(b);
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn write_uvarint(&mut self, mut value: u64) -> &mut Self {
        while value >= 0x80 {
            self.buf.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
        self
    }

    pub fn write_u64_le(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_varstr31(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_uvarint(bytes.len() as u64);
        self.write_bytes(bytes)
    }

    pub fn write_varstr_list(&mut self, items: &[Vec<u8>]) -> &mut Self {
        self.write_uvarint(items.len() as u64);
        for item in items {
            self.write_varstr31(item);
        }
        self
    }

    /// Write the output of `f` as a length-prefixed extensible string.
    pub fn write_extensible(&mut self, f: impl FnOnce(&mut Writer)) -> &mut Self {
        let mut inner = Writer::new();
        f(&mut inner);
        self.write_varstr31(&inner.buf)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(v: u64) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_uvarint(v);
        w.into_bytes()
    }

    #[test]
    fn uvarint_known_encodings() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(varint_bytes(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn uvarint_reads_back() {
        for v in [0u64, 1, 127, 128, 16_383, 16_384, 1 << 35, i64::MAX as u64, u64::MAX] {
            let bytes = varint_bytes(v);
            let mut r = Reader::new(&bytes);
            assert_eq!(r.read_uvarint().unwrap(), v);
            assert!(r.is_empty());
        }
    }

    #[test]
    fn uvarint_overflow_rejected() {
        // Ten bytes whose last byte carries more than one bit.
        let mut bytes = vec![0xffu8; 9];
        bytes.push(0x02);
        assert_eq!(
            Reader::new(&bytes).read_uvarint(),
            Err(DecodeError::VarintOverflow)
        );

        // Eleven continuation bytes.
        let bytes = vec![0x80u8; 11];
        assert_eq!(
            Reader::new(&bytes).read_uvarint(),
            Err(DecodeError::VarintOverflow)
        );
    }

    #[test]
    fn uvarint_truncated() {
        let bytes = [0x80u8, 0x80];
        assert!(matches!(
            Reader::new(&bytes).read_uvarint(),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn varint63_range() {
        let ok = varint_bytes(i64::MAX as u64);
        assert_eq!(Reader::new(&ok).read_varint63().unwrap(), i64::MAX as u64);

        let too_big = varint_bytes(1u64 << 63);
        assert!(matches!(
            Reader::new(&too_big).read_varint63(),
            Err(DecodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn varint31_range() {
        let ok = varint_bytes(i32::MAX as u64);
        assert_eq!(Reader::new(&ok).read_varint31().unwrap(), i32::MAX as u32);

        let too_big = varint_bytes(1u64 << 31);
        assert!(matches!(
            Reader::new(&too_big).read_varint31(),
            Err(DecodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn varstr_and_list() {
        let mut w = Writer::new();
        w.write_varstr31(b"abc");
        w.write_varstr_list(&[b"x".to_vec(), Vec::new(), b"yz".to_vec()]);
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_varstr31().unwrap(), b"abc");
        let list = r.read_varstr_list().unwrap();
        assert_eq!(list, vec![b"x".to_vec(), Vec::new(), b"yz".to_vec()]);
        r.finish().unwrap();
    }

    #[test]
    fn varstr_length_past_end() {
        let bytes = [0x05u8, 1, 2];
        assert_eq!(
            Reader::new(&bytes).read_varstr31(),
            Err(DecodeError::UnexpectedEof {
                needed: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn huge_list_count_does_not_preallocate() {
        let bytes = varint_bytes(i32::MAX as u64);
        assert!(matches!(
            Reader::new(&bytes).read_varstr_list(),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn extensible_string_keeps_suffix() {
        let mut w = Writer::new();
        w.write_extensible(|inner| {
            inner.write_byte(7).write_bytes(&[0xaa, 0xbb]);
        });
        w.write_byte(0x42);
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        let (first, suffix) = r.read_extensible(|inner| inner.read_byte()).unwrap();
        assert_eq!(first, 7);
        assert_eq!(suffix, &[0xaa, 0xbb]);
        assert_eq!(r.read_byte().unwrap(), 0x42);
        r.finish().unwrap();
    }

    #[test]
    fn extensible_inner_cannot_read_past_its_body() {
        let mut w = Writer::new();
        w.write_extensible(|inner| {
            inner.write_byte(1);
        });
        w.write_bytes(&[9, 9, 9]);
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert!(matches!(
            r.read_extensible(|inner| inner.read_bytes(2)),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn finish_reports_trailing() {
        let bytes = [1u8, 2, 3];
        let mut r = Reader::new(&bytes);
        r.read_byte().unwrap();
        assert_eq!(r.finish(), Err(DecodeError::TrailingBytes(2)));
    }

    #[test]
    fn u64_le_layout() {
        let mut w = Writer::new();
        w.write_u64_le(1);
        assert_eq!(w.as_slice(), &[1, 0, 0, 0, 0, 0, 0, 0]);
    }
}
