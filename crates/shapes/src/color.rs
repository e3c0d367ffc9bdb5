//! RGB color shared by every shape

use shapecache_core::{wire, Result};
use std::io::{Read, Write};

/// 24-bit color, encoded as three bytes: red, green, blue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Color {
    /// Encoded size in bytes
    pub const WIRE_SIZE: usize = 3;

    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Write the three channels
    pub fn encode(&self, sink: &mut dyn Write) -> Result<()> {
        wire::write_byte(sink, self.red)?;
        wire::write_byte(sink, self.green)?;
        wire::write_byte(sink, self.blue)
    }

    /// Read a color
    pub fn decode(source: &mut dyn Read) -> Result<Self> {
        let mut color = Color::default();
        color.decode_into(source)?;
        Ok(color)
    }

    /// Read the three channels into `self`
    pub fn decode_into(&mut self, source: &mut dyn Read) -> Result<()> {
        self.red = wire::read_byte(source)?;
        self.green = wire::read_byte(source)?;
        self.blue = wire::read_byte(source)?;
        Ok(())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Color { red, green, blue }
    }
}
