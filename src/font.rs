/// The size of each character of the CHIP-8 font in bytes.
const CHAR_SIZE: usize = 5;
/// The sprites of the standard CHIP-8 hex-digit font, where each character is one byte
/// wide and `CHAR_SIZE` bytes tall.  Each bit represents one pixel in the sprite.  ROMs
/// rely on this table bit-for-bit, so it must not be altered.
const FONT_DATA: [u8; 80] = [
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

/// An abstraction of the Ocho font (prior to loading to memory).
#[derive(Debug)]
pub(crate) struct Font {
    /// The size of each character in the font in bytes.
    char_size: usize,
    /// A vector containing the font sprite data.
    font_data: Vec<u8>,
}

impl Default for Font {
    /// Constructor that returns the standard CHIP-8 font data
    fn default() -> Self {
        Font {
            char_size: CHAR_SIZE,
            font_data: Vec::from(FONT_DATA),
        }
    }
}

impl Font {
    /// Returns a reference to the font data vector.
    pub(crate) fn font_data(&self) -> &Vec<u8> {
        &self.font_data
    }

    /// Returns the length of the font data vector.
    pub(crate) fn font_data_size(&self) -> usize {
        self.font_data.len()
    }

    /// Returns the size of each character in the font in bytes.
    pub(crate) fn char_size(&self) -> usize {
        self.char_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_dimensions() {
        let font: Font = Font::default();
        // Sixteen hex digit glyphs of five bytes each
        assert!(font.font_data_size() == 80 && font.char_size() == 5);
    }

    #[test]
    fn test_font_zero_glyph() {
        let font: Font = Font::default();
        assert_eq!(font.font_data()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }
}
