use std::cmp;
use std::ops::{Index, IndexMut};

/// The CHIP-8 display size (64 x 32 pixels).
const ROW_SIZE_PIXELS: usize = 64;
const COLUMN_SIZE_PIXELS: usize = 32;
const ROW_SIZE_BYTES: usize = ROW_SIZE_PIXELS / 8;

/// An abstraction of the CHIP-8 frame buffer.
///
/// This is only instantiated and written to from within the Ocho crate, but is exposed
/// publically for read access by hosting applications so the display can be graphically
/// rendered, either directly via [Processor::frame_buffer()](crate::Processor::frame_buffer)
/// or through a [StateSnapshot](crate::StateSnapshot) obtained from a call to
/// [Processor::export_state_snapshot()](crate::Processor::export_state_snapshot).
///
/// Each row of the display is stored as eight bytes, one bit per pixel (1 means on,
/// 0 means off), with the [std::ops::Index] trait implemented so a coordinate within
/// the display is accessed as `display[row][column_byte]`.  Coordinate (0, 0) is the
/// top-left of the display, with positive coordinates extending right and down.
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    pixels: [u8; ROW_SIZE_BYTES * COLUMN_SIZE_PIXELS],
}

// Allow the 1D pixel array to be indexed as a 2D array
impl Index<usize> for Display {
    type Output = [u8];

    fn index(&self, index: usize) -> &Self::Output {
        &self.pixels[index * ROW_SIZE_BYTES..(index + 1) * ROW_SIZE_BYTES]
    }
}

// Allow the 1D pixel array to be indexed as a 2D array mutably
impl IndexMut<usize> for Display {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.pixels[index * ROW_SIZE_BYTES..(index + 1) * ROW_SIZE_BYTES]
    }
}

impl Display {
    /// Constructor that returns a [Display] instance with all pixels set to off.
    pub(crate) fn new() -> Self {
        Self {
            pixels: [0x0; ROW_SIZE_BYTES * COLUMN_SIZE_PIXELS],
        }
    }

    /// Getter that returns the display width in pixels
    pub fn width_pixels(&self) -> usize {
        ROW_SIZE_PIXELS
    }

    /// Getter that returns the display height in pixels
    pub fn height_pixels(&self) -> usize {
        COLUMN_SIZE_PIXELS
    }

    /// Getter that returns the display row size in bytes
    pub fn row_size_bytes(&self) -> usize {
        ROW_SIZE_BYTES
    }

    /// Returns true if the pixel at the specified coordinate is on.
    ///
    /// # Arguments
    ///
    /// * `x` - the zero-based column of the pixel (0 to 63)
    /// * `y` - the zero-based row of the pixel (0 to 31)
    pub fn is_pixel_on(&self, x: usize, y: usize) -> bool {
        self[y][x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Clears the display by setting all pixels to off.
    pub(crate) fn clear(&mut self) {
        self.pixels.fill(0x0);
    }

    /// Draws a sprite to the display as per the CHIP-8 specification, XOR-toggling the
    /// target pixels.  Returns true if any pixel was turned off as a result (a collision).
    ///
    /// The starting coordinates wrap at the display edges; the sprite itself does not.
    /// Rows that extend past the bottom of the display, and columns that extend past the
    /// right-hand edge, are clipped.
    ///
    /// # Arguments
    ///
    /// * `x_start_pixel` - a zero-based integer giving the starting x coordinate of the sprite
    /// * `y_start_pixel` - a zero-based integer giving the starting y coordinate of the sprite
    /// * `sprite` - an array slice holding the bytes that make up the sprite
    pub(crate) fn draw_sprite(
        &mut self,
        x_start_pixel: usize,
        y_start_pixel: usize,
        sprite: &[u8],
    ) -> bool {
        // Wrap the blit origin only
        let x_start_pixel: usize = x_start_pixel % ROW_SIZE_PIXELS;
        let y_start_pixel: usize = y_start_pixel % COLUMN_SIZE_PIXELS;
        // Determine how many sprite rows fit before the bottom of the display; the rest clip
        let pixel_rows_to_draw: usize =
            cmp::min(sprite.len(), COLUMN_SIZE_PIXELS - y_start_pixel);
        // Calculate the offset (in pixels) of the sprite X position relative to the start
        // of the display byte, and which horizontal display byte the sprite starts in
        let x_offset: usize = x_start_pixel % 8;
        let x_byte: usize = x_start_pixel / 8;
        // If the sprite does not align to the start of a display byte it spills over into
        // the next display byte, except at the right-hand edge where the overspill clips
        let second_byte_needed: bool = (x_offset > 0) && x_byte < ROW_SIZE_BYTES - 1;
        // Keep track of whether any pixel is turned off as a result of drawing the sprite
        let mut collision: bool = false;
        for j in 0..pixel_rows_to_draw {
            // Right bit-shift the sprite row to align with the display byte
            let sprite_byte: u8 = sprite[j] >> x_offset;
            let display_byte: &mut u8 = &mut self[y_start_pixel + j][x_byte];
            // A pixel is turned off by the XOR exactly when a display bit and the
            // corresponding sprite bit are both set beforehand
            if (*display_byte & sprite_byte) > 0 {
                collision = true;
            }
            *display_byte ^= sprite_byte;
            if second_byte_needed {
                // Left-shift the sprite row to isolate and align the overspill portion
                let sprite_byte: u8 = sprite[j] << (8 - x_offset);
                let display_byte: &mut u8 = &mut self[y_start_pixel + j][x_byte + 1];
                if (*display_byte & sprite_byte) > 0 {
                    collision = true;
                }
                *display_byte ^= sprite_byte;
            }
        }
        collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_display() -> Display {
        let mut display: Display = Display::new();
        // Setup test display as follows:
        // 00001111 01010101   (i.e. 0F 55 in hex)
        // 11110000 10101010   (i.e. F0 AA in hex)
        // 00110011 11001100   (i.e. 33 CC in hex)
        display[0][0] = 0x0F;
        display[0][1] = 0x55;
        display[1][0] = 0xF0;
        display[1][1] = 0xAA;
        display[2][0] = 0x33;
        display[2][1] = 0xCC;
        display
    }

    fn setup_test_sprite() -> [u8; 2] {
        // Setup test sprite as follows:
        // 10110110   (i.e. B6 in hex)
        // 11100011   (i.e. E3 in hex)
        let sprite: [u8; 2] = [0xB6, 0xE3];
        sprite
    }

    #[test]
    fn test_draw_sprite_aligned() {
        let mut display: Display = setup_test_display();
        let sprite: [u8; 2] = setup_test_sprite();
        // Draw sprite at coordinate (0, 0)
        let collision: bool = display.draw_sprite(0, 0, &sprite);
        // Result should be:
        // 10111001 01010101   (i.e. B9 55 in hex)
        // 00010011 10101010   (i.e. 13 AA in hex)
        // 00110011 11001100   (i.e. 33 CC in hex)
        assert!(
            collision
                && display[0][0] == 0xB9
                && display[0][1] == 0x55
                && display[1][0] == 0x13
                && display[1][1] == 0xAA
                && display[2][0] == 0x33
                && display[2][1] == 0xCC
        )
    }

    #[test]
    fn test_draw_sprite_unaligned() {
        let mut display: Display = setup_test_display();
        let sprite: [u8; 2] = setup_test_sprite();
        // Draw sprite at coordinate (3, 0)
        let collision: bool = display.draw_sprite(3, 0, &sprite);
        // Result should be:
        // 00011001 10010101   (i.e. 19 95 in hex)
        // 11101100 11001010   (i.e. EC CA in hex)
        // 00110011 11001100   (i.e. 33 CC in hex)
        assert!(
            collision
                && display[0][0] == 0x19
                && display[0][1] == 0x95
                && display[1][0] == 0xEC
                && display[1][1] == 0xCA
                && display[2][0] == 0x33
                && display[2][1] == 0xCC
        )
    }

    #[test]
    fn test_draw_sprite_no_collision() {
        let mut display: Display = Display::new();
        let sprite: [u8; 2] = setup_test_sprite();
        let collision: bool = display.draw_sprite(0, 0, &sprite);
        assert!(!collision && display[0][0] == 0xB6 && display[1][0] == 0xE3);
    }

    #[test]
    fn test_draw_sprite_clips_right_edge() {
        let mut display: Display = Display::new();
        let sprite: [u8; 1] = [0xFF];
        // Draw at x = 60; the right-hand four sprite columns fall off the display
        // and must be dropped rather than wrapping to the start of the row
        display.draw_sprite(60, 0, &sprite);
        assert!(display[0][7] == 0x0F && display[0][0] == 0x00);
    }

    #[test]
    fn test_draw_sprite_clips_bottom_edge() {
        let mut display: Display = Display::new();
        let sprite: [u8; 2] = [0xFF, 0xFF];
        // Draw a two-row sprite on the final display row; the second row must clip
        display.draw_sprite(0, COLUMN_SIZE_PIXELS - 1, &sprite);
        assert!(display[COLUMN_SIZE_PIXELS - 1][0] == 0xFF && display[0][0] == 0x00);
    }

    #[test]
    fn test_draw_sprite_wraps_start_coordinates() {
        let mut display: Display = Display::new();
        let sprite: [u8; 1] = [0xFF];
        // Starting coordinates are taken modulo the display size, so (67, 33) is (3, 1)
        display.draw_sprite(ROW_SIZE_PIXELS + 3, COLUMN_SIZE_PIXELS + 1, &sprite);
        assert!(display[1][0] == 0x1F && display[1][1] == 0xE0);
    }

    #[test]
    fn test_draw_sprite_twice_self_inverse() {
        let mut display: Display = Display::new();
        let sprite: [u8; 2] = setup_test_sprite();
        let first_collision: bool = display.draw_sprite(13, 9, &sprite);
        let second_collision: bool = display.draw_sprite(13, 9, &sprite);
        // XOR drawing is self-inverse: the second draw collides and restores the display
        assert!(!first_collision && second_collision && display == Display::new());
    }

    #[test]
    fn test_is_pixel_on() {
        let mut display: Display = Display::new();
        display[5][1] = 0x80;
        assert!(display.is_pixel_on(8, 5) && !display.is_pixel_on(9, 5));
    }

    #[test]
    fn test_clear() {
        let mut display: Display = setup_test_display();
        display.clear();
        assert_eq!(display, Display::new());
    }
}
