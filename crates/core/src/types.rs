//! Core types for shapecache
//!
//! This module defines the foundational types:
//! - RecordId: Unique identifier for a replicated record
//! - TypeTag: Discriminator telling the cache which codec owns a record
//! - GroupAddress: Multicast group and port a cache joins

use crate::error::{Error, Result};
use std::fmt;
use std::net::Ipv4Addr;
use std::num::NonZeroU32;
use uuid::Uuid;

/// Unique identifier for a replicated record
///
/// A RecordId is a wrapper around a UUID v4. It is minted by the cache when
/// a record is created and identifies that record across every replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random RecordId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a RecordId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a RecordId from a string representation
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this RecordId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag stored alongside every record
///
/// Tags are positive integers; 0 is reserved and cannot be represented.
/// The cache uses the tag to pick the codec that encodes, decodes and
/// releases the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(NonZeroU32);

impl TypeTag {
    /// Create a tag, returning None for the reserved value 0
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Raw wire value of this tag
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Multicast group address and port identifying a replication group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupAddress {
    group: Ipv4Addr,
    port: u16,
}

impl GroupAddress {
    /// Build an address from an already parsed group
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the group is not an IPv4 multicast
    /// address or the port is 0.
    pub fn new(group: Ipv4Addr, port: u16) -> Result<Self> {
        if !group.is_multicast() {
            return Err(Error::invalid_argument(format!(
                "{} is not a multicast group address",
                group
            )));
        }
        if port == 0 {
            return Err(Error::invalid_argument("port must be non-zero"));
        }
        Ok(Self { group, port })
    }

    /// Parse the dotted group string and validate it
    pub fn parse(group: &str, port: u16) -> Result<Self> {
        let parsed: Ipv4Addr = group.trim().parse().map_err(|_| {
            Error::invalid_argument(format!("'{}' is not an IPv4 address", group))
        })?;
        Self::new(parsed, port)
    }

    /// Multicast group
    pub fn group(&self) -> Ipv4Addr {
        self.group
    }

    /// UDP port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.port)
    }
}
