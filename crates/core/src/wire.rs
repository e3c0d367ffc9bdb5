//! Fixed-width wire primitives
//!
//! Every record codec is written in terms of these helpers. Fields are
//! written back to back with no padding, in network byte order.
//!
//! | Field  | Width   |
//! |--------|---------|
//! | byte   | 1       |
//! | u32    | 4 (BE)  |
//! | f64    | 8 (BE, IEEE-754) |

use crate::error::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Byte order used on the wire
pub type WireOrder = BigEndian;

fn encode_error(field: &str, e: io::Error) -> Error {
    Error::EncodeFailure(format!("{}: {}", field, e))
}

fn decode_error(field: &str, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::DecodeFailure(format!("{}: source exhausted", field))
    } else {
        Error::DecodeFailure(format!("{}: {}", field, e))
    }
}

/// Write a single byte
pub fn write_byte(sink: &mut dyn Write, value: u8) -> Result<()> {
    sink.write_u8(value).map_err(|e| encode_error("byte", e))
}

/// Write an unsigned 32-bit integer
pub fn write_u32(sink: &mut dyn Write, value: u32) -> Result<()> {
    sink.write_u32::<WireOrder>(value)
        .map_err(|e| encode_error("u32", e))
}

/// Write a 64-bit float
pub fn write_f64(sink: &mut dyn Write, value: f64) -> Result<()> {
    sink.write_f64::<WireOrder>(value)
        .map_err(|e| encode_error("f64", e))
}

/// Read a single byte
pub fn read_byte(source: &mut dyn Read) -> Result<u8> {
    source.read_u8().map_err(|e| decode_error("byte", e))
}

/// Read an unsigned 32-bit integer
pub fn read_u32(source: &mut dyn Read) -> Result<u32> {
    source
        .read_u32::<WireOrder>()
        .map_err(|e| decode_error("u32", e))
}

/// Read a 64-bit float
pub fn read_f64(source: &mut dyn Read) -> Result<f64> {
    source
        .read_f64::<WireOrder>()
        .map_err(|e| decode_error("f64", e))
}
