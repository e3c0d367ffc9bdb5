//! Published transaction frame format.
//!
//! A frame carries every record staged in one transaction, already encoded
//! by the codec registry. It is what travels between group members.
//!
//! # Format
//!
//! ```text
//! Frame Layout:
//! ┌──────────────────┬──────────────────────────────────────────────┐
//! │ Count (4 bytes)  │ Entries (variable)                           │
//! └──────────────────┴──────────────────────────────────────────────┘
//!
//! Entry Layout:
//! ┌────────────────┬──────────────┬──────────────────┬──────────────┐
//! │ Id (16 bytes)  │ Tag (4 bytes)│ Length (4 bytes) │ Payload      │
//! └────────────────┴──────────────┴──────────────────┴──────────────┘
//! ```
//!
//! All integers are big-endian. The tag is carried raw so that a receiver
//! can report records it has no codec for.

use shapecache_core::{wire, Error, RecordId, Result};
use std::io::Read;

/// One encoded record inside a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    /// Record identifier
    pub id: RecordId,
    /// Raw type tag
    pub tag: u32,
    /// Codec-encoded record
    pub payload: Vec<u8>,
}

/// A published transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Entries in staging order
    pub entries: Vec<FrameEntry>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Frame {
            entries: Vec::new(),
        }
    }

    /// Create a frame with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Frame {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add an entry.
    pub fn push(&mut self, id: RecordId, tag: u32, payload: Vec<u8>) {
        self.entries.push(FrameEntry { id, tag, payload });
    }

    /// Check if frame is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize frame to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload_bytes: usize = self.entries.iter().map(|e| 24 + e.payload.len()).sum();
        let mut bytes = Vec::with_capacity(4 + payload_bytes);

        wire::write_u32(&mut bytes, to_u32(self.entries.len(), "entry count")?)?;
        for entry in &self.entries {
            bytes.extend_from_slice(entry.id.as_bytes());
            wire::write_u32(&mut bytes, entry.tag)?;
            wire::write_u32(&mut bytes, to_u32(entry.payload.len(), "payload length")?)?;
            bytes.extend_from_slice(&entry.payload);
        }

        Ok(bytes)
    }

    /// Deserialize frame from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut source = bytes;
        let count = wire::read_u32(&mut source)? as usize;
        // Each entry needs at least 24 bytes; reject counts the buffer cannot hold.
        if count > source.len() / 24 {
            return Err(Error::DecodeFailure(format!(
                "frame announces {} entries in {} bytes",
                count,
                source.len()
            )));
        }

        let mut frame = Frame::with_capacity(count);
        for _ in 0..count {
            let mut id = [0u8; 16];
            source
                .read_exact(&mut id)
                .map_err(|_| Error::DecodeFailure("record id: source exhausted".to_string()))?;
            let tag = wire::read_u32(&mut source)?;
            let len = wire::read_u32(&mut source)? as usize;
            if source.len() < len {
                return Err(Error::DecodeFailure(format!(
                    "payload of {} bytes truncated to {}",
                    len,
                    source.len()
                )));
            }
            let (payload, rest) = source.split_at(len);
            frame.push(RecordId::from_bytes(id), tag, payload.to_vec());
            source = rest;
        }

        if !source.is_empty() {
            return Err(Error::DecodeFailure(format!(
                "{} trailing bytes after frame",
                source.len()
            )));
        }

        Ok(frame)
    }
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::EncodeFailure(format!("{} {} exceeds u32", what, value)))
}
