/// The height of each glyph in the built-in font in bytes (one byte per row)
const GLYPH_SIZE_BYTES: usize = 5;
/// The number of glyphs in the built-in font (one per hexadecimal digit)
const GLYPH_COUNT: usize = 16;
/// The sprites of the built-in hexadecimal font, where each glyph is one byte wide
/// and `GLYPH_SIZE_BYTES` bytes tall.  Each bit represents one pixel in the sprite.
const FONT_DATA: [u8; GLYPH_SIZE_BYTES * GLYPH_COUNT] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// An abstraction of the built-in hexadecimal font (prior to loading to memory).
#[derive(Debug)]
pub(crate) struct Font {
    /// The height of each glyph in bytes
    glyph_size: usize,
    /// A vector containing the font sprite data, glyphs 0x0 to 0xF in order
    font_data: Vec<u8>,
}

impl Font {
    /// Constructor that returns the built-in font data
    pub(crate) fn new() -> Self {
        Font {
            glyph_size: GLYPH_SIZE_BYTES,
            font_data: Vec::from(FONT_DATA),
        }
    }

    /// Returns a reference to the font data vector.
    pub(crate) fn font_data(&self) -> &Vec<u8> {
        &self.font_data
    }

    /// Returns the length of the font data vector.
    pub(crate) fn font_data_size(&self) -> usize {
        self.font_data.len()
    }

    /// Returns the height of each glyph in bytes.
    pub(crate) fn glyph_size(&self) -> usize {
        self.glyph_size
    }

    /// Returns the number of glyphs in the font.
    pub(crate) fn glyph_count(&self) -> usize {
        self.font_data.len() / self.glyph_size
    }
}
