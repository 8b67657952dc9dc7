/// The CHIP-8 display size (64 x 32 pixels).
const ROW_SIZE_PIXELS: usize = 64;
const COLUMN_SIZE_PIXELS: usize = 32;
/// The size of one display row in bytes, at one bit per pixel
const ROW_SIZE_BYTES: usize = ROW_SIZE_PIXELS / 8;

/// An abstraction of the CHIP-8 frame buffer.
///
/// This is only instantiated and written to from within the crate, but is exposed
/// publically for read access by hosting applications so the display can be rendered, via a
/// [StateSnapshot](crate::StateSnapshot) obtained from a call to
/// [Processor::export_state_snapshot()](crate::Processor::export_state_snapshot).
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    /// A two-dimensional array holding the state of the display pixels (1 means on, 0 means
    /// off).  Each inner array of bytes represents a row of the display, using one bit per
    /// pixel with the most-significant bit leftmost.  The outer array is the collection of
    /// rows, so a coordinate within the display is accessed as `pixels[row][column_byte]`.
    /// Note that (0, 0) is the top-left of the display, with positive coordinates extending
    /// right and down.
    pub pixels: [[u8; ROW_SIZE_BYTES]; COLUMN_SIZE_PIXELS],
}

impl Display {
    /// The width of the display in pixels
    pub const WIDTH_PIXELS: usize = ROW_SIZE_PIXELS;
    /// The height of the display in pixels
    pub const HEIGHT_PIXELS: usize = COLUMN_SIZE_PIXELS;

    /// Constructor that returns a [Display] instance with all pixels set to off.
    pub(crate) fn new() -> Self {
        Display {
            pixels: [[0x0; ROW_SIZE_BYTES]; COLUMN_SIZE_PIXELS],
        }
    }

    /// Sets all pixels to off.
    pub(crate) fn clear(&mut self) {
        self.pixels = [[0x0; ROW_SIZE_BYTES]; COLUMN_SIZE_PIXELS];
    }

    /// XORs the supplied sprite onto the display at the specified coordinates, one byte of
    /// the sprite per display row, returning true if this caused any set pixel to be unset.
    ///
    /// The starting coordinates wrap modulo the display size, and each drawn pixel wraps
    /// independently, so sprites drawn near the right or bottom edge continue on the
    /// opposite side rather than being clipped.
    ///
    /// # Arguments
    ///
    /// * `x_start_pixel` - the x coordinate of the top-left corner of the sprite
    /// * `y_start_pixel` - the y coordinate of the top-left corner of the sprite
    /// * `sprite` - the sprite bytes, one byte (eight pixels) per row
    pub(crate) fn draw_sprite(
        &mut self,
        x_start_pixel: usize,
        y_start_pixel: usize,
        sprite: &[u8],
    ) -> bool {
        let x_start_pixel: usize = x_start_pixel % ROW_SIZE_PIXELS;
        let y_start_pixel: usize = y_start_pixel % COLUMN_SIZE_PIXELS;
        // The sprite starting position may not be byte-aligned within the row, in which
        // case each sprite byte straddles two display bytes
        let x_offset: usize = x_start_pixel % 8;
        let x_byte: usize = x_start_pixel / 8;
        let mut pixel_turned_off: bool = false;
        for (j, sprite_byte) in sprite.iter().enumerate() {
            let row: usize = (y_start_pixel + j) % COLUMN_SIZE_PIXELS;
            let first_byte: u8 = sprite_byte >> x_offset;
            if self.pixels[row][x_byte] & first_byte > 0 {
                pixel_turned_off = true;
            }
            self.pixels[row][x_byte] ^= first_byte;
            if x_offset > 0 {
                // The spilled portion of the sprite byte lands in the following display
                // byte, wrapping to the start of the row when drawn across the right edge
                let second_byte: u8 = sprite_byte << (8 - x_offset);
                let next_byte: usize = (x_byte + 1) % ROW_SIZE_BYTES;
                if self.pixels[row][next_byte] & second_byte > 0 {
                    pixel_turned_off = true;
                }
                self.pixels[row][next_byte] ^= second_byte;
            }
        }
        pixel_turned_off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_display_blank() {
        let display: Display = Display::new();
        assert!(display
            .pixels
            .iter()
            .all(|row| row.iter().all(|&byte| byte == 0x0)));
    }

    #[test]
    fn test_clear() {
        let mut display: Display = Display::new();
        display.pixels[0x5][0x3] = 0xFF;
        display.clear();
        assert!(display
            .pixels
            .iter()
            .all(|row| row.iter().all(|&byte| byte == 0x0)));
    }

    #[test]
    fn test_draw_sprite_aligned() {
        let mut display: Display = Display::new();
        display.pixels[0x1][0x1] = 0x55;
        // Sprite:          00001111
        // Display:         01010101
        // XORed:           01011010
        let collision: bool = display.draw_sprite(0x8, 0x1, &[0x0F]);
        assert!(display.pixels[0x1][0x1] == 0x5A && collision);
    }

    #[test]
    fn test_draw_sprite_aligned_no_collision() {
        let mut display: Display = Display::new();
        let collision: bool = display.draw_sprite(0x8, 0x1, &[0x0F]);
        assert!(display.pixels[0x1][0x1] == 0x0F && !collision);
    }

    #[test]
    fn test_draw_sprite_unaligned() {
        let mut display: Display = Display::new();
        display.pixels[0x0][0x0] = 0x0F;
        display.pixels[0x0][0x1] = 0x55;
        // Sprite (offset 3):   00010110 11000000
        // Display:             00001111 01010101
        // XORed:               00011001 10010101
        let collision: bool = display.draw_sprite(0x3, 0x0, &[0xB6]);
        assert!(display.pixels[0x0][0x0] == 0x19 && display.pixels[0x0][0x1] == 0x95 && collision);
    }

    #[test]
    fn test_draw_sprite_multiple_rows() {
        let mut display: Display = Display::new();
        let collision: bool = display.draw_sprite(0x0, 0xA, &[0xB6, 0xE3]);
        assert!(
            display.pixels[0xA][0x0] == 0xB6 && display.pixels[0xB][0x0] == 0xE3 && !collision
        );
    }

    #[test]
    fn test_draw_sprite_right_edge_wraps() {
        let mut display: Display = Display::new();
        // Drawing at x = 60 places the high nibble of the sprite byte in the last display
        // byte of the row and the low nibble in the first
        let collision: bool = display.draw_sprite(0x3C, 0x0, &[0xB6]);
        assert!(display.pixels[0x0][0x7] == 0x0B && display.pixels[0x0][0x0] == 0x60 && !collision);
    }

    #[test]
    fn test_draw_sprite_bottom_edge_wraps() {
        let mut display: Display = Display::new();
        let collision: bool = display.draw_sprite(0x0, 0x1F, &[0xB6, 0xE3]);
        assert!(
            display.pixels[0x1F][0x0] == 0xB6 && display.pixels[0x0][0x0] == 0xE3 && !collision
        );
    }

    #[test]
    fn test_draw_sprite_start_coordinates_wrap() {
        let mut display: Display = Display::new();
        // (67, 33) wraps to (3, 1)
        display.draw_sprite(0x43, 0x21, &[0xFF]);
        assert!(display.pixels[0x1][0x0] == 0x1F && display.pixels[0x1][0x1] == 0xE0);
    }

    // Since drawing is a XOR, drawing the same sprite twice at the same coordinates
    // must restore the prior display contents, reporting a collision the second time.
    #[test]
    fn test_draw_sprite_redraw_restores_display() {
        let mut display: Display = Display::new();
        display.pixels[0x0][0x0] = 0x0F;
        display.pixels[0x0][0x1] = 0x55;
        display.draw_sprite(0x3, 0x0, &[0xB6, 0xE3]);
        let collision: bool = display.draw_sprite(0x3, 0x0, &[0xB6, 0xE3]);
        assert!(
            display.pixels[0x0][0x0] == 0x0F
                && display.pixels[0x0][0x1] == 0x55
                && display.pixels[0x1][0x0] == 0x0
                && display.pixels[0x1][0x1] == 0x0
                && collision
        );
    }
}
