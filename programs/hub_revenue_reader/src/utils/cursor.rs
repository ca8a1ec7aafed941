use anchor_lang::prelude::Pubkey;

use crate::error::*;
use crate::state::RecordKind;

/**
 * Bounds-checked reader over raw account data
 *
 * Every read checks the remaining length first and fails with `TooSmall`
 * instead of indexing past the end, so decoders can walk a layout field by
 * field without any offset arithmetic of their own. Integers are little-endian;
 * option flags and bools are strict 0/1 bytes.
 */
#[derive(Debug, Clone)]
pub struct AccountCursor<'a> {
    kind: RecordKind,
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountCursor<'a> {
    pub fn new(kind: RecordKind, data: &'a [u8]) -> Self {
        Self {
            kind,
            data,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Fails unless at least `required` bytes are present in total
    pub fn require_len(&self, required: usize) -> Result<()> {
        if self.data.len() < required {
            return Err(self.too_small(required));
        }
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads a strict 0/1 byte
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(HubReaderError::UnknownEnumValue {
                kind: self.kind,
                field,
                value,
            }),
        }
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        Ok(Pubkey::new_from_array(self.take_array()?))
    }

    /// Reads a Borsh `Option<Pubkey>`: a presence flag, then the key if set
    pub fn read_option_pubkey(&mut self, field: &'static str) -> Result<Option<Pubkey>> {
        if self.read_bool(field)? {
            Ok(Some(self.read_pubkey()?))
        } else {
            Ok(None)
        }
    }

    /// Reads a Borsh `Option<i64>`
    pub fn read_option_i64(&mut self, field: &'static str) -> Result<Option<i64>> {
        if self.read_bool(field)? {
            Ok(Some(self.read_i64()?))
        } else {
            Ok(None)
        }
    }

    /// Unread bytes, without advancing
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or_else(|| self.too_small(usize::MAX))?;
        let bytes = self.data.get(self.offset..end).ok_or_else(|| self.too_small(end))?;
        self.offset = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        <[u8; N]>::try_from(bytes).map_err(|_| self.too_small(self.offset))
    }

    fn too_small(&self, required: usize) -> HubReaderError {
        HubReaderError::TooSmall {
            kind: self.kind,
            actual: self.data.len(),
            required,
        }
    }
}
