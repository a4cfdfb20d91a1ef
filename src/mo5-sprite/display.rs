//! # Bitmap video
//!
//! The screen is 320×200 pixels stored as two overlaid planes of
//! `SCREEN_WIDTH_BYTES * SCREEN_HEIGHT` bytes at `VRAM`:
//!
//! | Plane   | Byte meaning                                              |
//! |---------|-----------------------------------------------------------|
//! | `Form`  | 8 pixels, 1 bit each. Set bits show the foreground color. |
//! | `Color` | Attribute for the same 8 pixels, see [`Attribute`].       |
//!
//! Only one plane is visible to the CPU at a time. Switching is the
//! expensive part, so every primitive below selects each plane at most once
//! and writes everything it needs there before moving on. No primitive
//! restores the previous selection, so always select before writing.
//!
//! Coordinates are `x` in byte units (8 pixels) and `y` in lines. Nothing
//! is clipped: callers keep rectangles on screen (see
//! [`Actor::clamp`](crate::Actor::clamp)). Debug builds assert it.

use super::color::Attribute;
use super::device::{BankFlags, VideoFlags, PRC, VIDEO_REG, VRAM};
use super::sprite::Sprite;
use super::vbl;
use super::{MemoryMappedDevice, SCREEN_HEIGHT, SCREEN_SIZE_BYTES, SCREEN_WIDTH_BYTES};

/// One of the two planes overlaid on `VRAM`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    Form,
    Color,
}

/// `y * SCREEN_WIDTH_BYTES` for every line, so row addressing never multiplies.
pub struct RowOffsets([u16; SCREEN_HEIGHT]);

impl RowOffsets {
    pub fn new() -> Self {
        let mut offsets = [0; SCREEN_HEIGHT];
        for (y, offset) in offsets.iter_mut().enumerate() {
            *offset = (y * SCREEN_WIDTH_BYTES) as u16;
        }

        Self(offsets)
    }

    #[inline(always)]
    pub fn address(&self, x: i16, y: i16) -> u16 {
        VRAM + self.0[y as usize] + x as u16
    }
}

impl Default for RowOffsets {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Video<D: MemoryMappedDevice> {
    device: D,
    rows: RowOffsets,
}

impl<D: MemoryMappedDevice> Video<D> {
    /// Switch the device to bitmap mode and paint the whole screen with
    /// `background`: the color plane gets the attribute, the form plane is
    /// zeroed so only backgrounds show.
    ///
    /// Call once at startup, before any other drawing.
    pub fn init(device: D, background: Attribute) -> Self {
        let mut video = Self {
            device,
            rows: RowOffsets::new(),
        };

        video.device.write(PRC, 0x00);
        let mode = VideoFlags::from_bits_retain(video.device.read(VIDEO_REG)) | VideoFlags::BITMAP;
        video
            .device
            .write(VIDEO_REG, (mode - VideoFlags::VBLANK).bits());
        video.clear_screen(background);

        log::info!(
            "bitmap mode enabled, background {:#04x}",
            background.bits()
        );

        video
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    pub fn rows(&self) -> &RowOffsets {
        &self.rows
    }

    /// Route subsequent `VRAM` accesses to `plane`.
    #[inline(always)]
    pub fn select(&mut self, plane: Plane) {
        let mut bank = BankFlags::from_bits_retain(self.device.read(PRC));
        bank.set(BankFlags::FORM_PLANE, plane == Plane::Form);
        self.device.write(PRC, bank.bits());
    }

    /// Block until the next vertical blank starts.
    pub fn wait_vbl(&mut self) {
        vbl::wait_vbl(&mut self.device);
    }

    /// Fill the color plane with `color` and zero the form plane.
    pub fn clear_screen(&mut self, color: Attribute) {
        self.select(Plane::Color);
        for offset in 0..SCREEN_SIZE_BYTES as u16 {
            self.device.write(VRAM + offset, color.bits());
        }

        self.select(Plane::Form);
        for offset in 0..SCREEN_SIZE_BYTES as u16 {
            self.device.write(VRAM + offset, 0x00);
        }

        log::debug!("screen cleared to {:#04x}", color.bits());
    }

    /// Paint a rectangle with a uniform background color.
    pub fn fill_rect(&mut self, x: i16, y: i16, width: i16, height: i16, color: Attribute) {
        self.debug_assert_on_screen(x, y, width, height);

        self.select(Plane::Color);
        self.fill(x, y, width, height, color.bits());

        self.select(Plane::Form);
        self.fill(x, y, width, height, 0x00);
    }

    /// Draw `sprite` with its top left corner at `(x, y)`: colors first, then
    /// shapes.
    pub fn draw_sprite(&mut self, x: i16, y: i16, sprite: &Sprite) {
        self.debug_assert_on_screen(x, y, sprite.width_bytes(), sprite.height());

        self.select(Plane::Color);
        self.blit(x, y, sprite, sprite.color());

        self.select(Plane::Form);
        self.blit(x, y, sprite, sprite.form());
    }

    /// Zero both planes over a rectangle.
    ///
    /// The color plane is cleared too, so no stale attribute is left behind
    /// where the sprite used to be.
    pub fn clear_sprite(&mut self, x: i16, y: i16, width_bytes: i16, height: i16) {
        self.debug_assert_on_screen(x, y, width_bytes, height);

        self.select(Plane::Color);
        self.fill(x, y, width_bytes, height, 0x00);

        self.select(Plane::Form);
        self.fill(x, y, width_bytes, height, 0x00);
    }

    /// Relocate `sprite` from `(old_x, old_y)` to `(new_x, new_y)`.
    ///
    /// When the old and new footprints overlap, only the strips of the old
    /// footprint that the move uncovers are zeroed, then the sprite is
    /// redrawn in full at its new position. Per plane that costs
    /// `height * |dx| + width * |dy| + width * height` writes instead of
    /// `2 * width * height`. Footprints that don't overlap fall back to
    /// `clear_sprite` followed by `draw_sprite`.
    pub fn move_sprite(&mut self, old_x: i16, old_y: i16, new_x: i16, new_y: i16, sprite: &Sprite) {
        let width = sprite.width_bytes();
        let height = sprite.height();
        let dx = new_x - old_x;
        let dy = new_y - old_y;

        let overlap_w = width - dx.abs();
        let overlap_h = height - dy.abs();
        if overlap_w <= 0 || overlap_h <= 0 {
            self.clear_sprite(old_x, old_y, width, height);
            self.draw_sprite(new_x, new_y, sprite);
            return;
        }

        self.debug_assert_on_screen(old_x, old_y, width, height);
        self.debug_assert_on_screen(new_x, new_y, width, height);

        for &(plane, data) in &[(Plane::Color, sprite.color()), (Plane::Form, sprite.form())] {
            self.select(plane);

            if dx != 0 {
                let strip_x = if dx > 0 { old_x } else { old_x + width + dx };
                self.fill(strip_x, old_y, dx.abs(), height, 0x00);
            }

            if dy != 0 {
                let strip_y = if dy > 0 { old_y } else { old_y + height + dy };
                self.fill(old_x, strip_y, width, dy.abs(), 0x00);
            }

            self.blit(new_x, new_y, sprite, data);
        }
    }

    /// Write `value` over a rectangle of the selected plane.
    #[inline(always)]
    fn fill(&mut self, x: i16, y: i16, width: i16, height: i16, value: u8) {
        for line in y..y + height {
            let address = self.rows.address(x, line);
            for column in 0..width as u16 {
                self.device.write(address + column, value);
            }
        }
    }

    /// Copy one plane's worth of sprite data into the selected plane.
    #[inline(always)]
    fn blit(&mut self, x: i16, y: i16, sprite: &Sprite, data: &[u8]) {
        let width = sprite.width_bytes() as usize;
        for (line, row) in data.chunks_exact(width).enumerate() {
            let address = self.rows.address(x, y + line as i16);
            for (column, &byte) in row.iter().enumerate() {
                self.device.write(address + column as u16, byte);
            }
        }
    }

    #[inline(always)]
    fn debug_assert_on_screen(&self, x: i16, y: i16, width: i16, height: i16) {
        debug_assert!(
            x >= 0 && y >= 0 && x + width <= SCREEN_WIDTH_BYTES as i16 && y + height <= SCREEN_HEIGHT as i16,
            "Rectangle {}x{} at ({}, {}) is off screen",
            width,
            height,
            x,
            y
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{Plane, RowOffsets, Video};
    use crate::color::{Attribute, BLUE, GREEN, WHITE};
    use crate::device::VRAM;
    use crate::memory::SimulatedMemory;
    use crate::sprite::Sprite;
    use crate::{MemoryMappedDevice, SCREEN_HEIGHT, SCREEN_SIZE_BYTES, SCREEN_WIDTH_BYTES};

    const FORM: [u8; 32] = [
        0x07, 0xE0, 0x1F, 0xF8, 0x3F, 0xFC, 0x7F, 0xFE, 0x7F, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F, 0xFE, 0x7F, 0xFE, 0x3F, 0xFC, 0x1F, 0xF8,
        0x07, 0xE0,
    ];
    const COLOR: [u8; 32] = [0x21; 32];
    static BALL: Sprite<'static> = Sprite::new(&FORM, &COLOR, 2, 16);

    fn make_test_video() -> Video<SimulatedMemory> {
        let mut video = Video::init(SimulatedMemory::default(), Attribute::new(0, 0));
        video.device_mut().reset_counters();

        video
    }

    fn byte_at(video: &Video<SimulatedMemory>, plane: Plane, x: i16, y: i16) -> u8 {
        video.device().plane(plane)[(y as usize) * SCREEN_WIDTH_BYTES + x as usize]
    }

    #[test]
    fn test_row_offsets() {
        let rows = RowOffsets::new();

        assert_eq!(rows.address(0, 0), VRAM);
        assert_eq!(rows.address(3, 1), VRAM + 43);
        assert_eq!(rows.address(39, 199), VRAM + 7999);
    }

    #[test]
    fn test_init() {
        let video = Video::init(SimulatedMemory::default(), Attribute::new(BLUE, WHITE));
        let memory = video.device();

        assert!(memory.is_bitmap_mode());
        assert!(memory.plane(Plane::Color)[..SCREEN_SIZE_BYTES]
            .iter()
            .all(|&b| b == 0x74));
        assert!(memory.plane(Plane::Form)[..SCREEN_SIZE_BYTES]
            .iter()
            .all(|&b| b == 0));
        assert_eq!(memory.writes(Plane::Color), SCREEN_SIZE_BYTES);
        assert_eq!(memory.writes(Plane::Form), SCREEN_SIZE_BYTES);
        assert_eq!(memory.selected_plane(), Plane::Form);
    }

    #[test]
    fn test_clear_screen() {
        let mut video = make_test_video();
        video.draw_sprite(5, 5, &BALL);

        video.clear_screen(Attribute::new(GREEN, 0));

        assert_eq!(byte_at(&video, Plane::Color, 5, 5), GREEN);
        assert_eq!(byte_at(&video, Plane::Form, 6, 10), 0);
    }

    #[test]
    fn test_fill_rect() {
        let mut video = make_test_video();
        video.select(Plane::Form);
        video.device_mut().write(VRAM + 41, 0xFF);
        video.device_mut().reset_counters();

        video.fill_rect(1, 1, 3, 2, Attribute::new(GREEN, WHITE));

        for y in 1..3 {
            for x in 1..4 {
                assert_eq!(byte_at(&video, Plane::Color, x, y), 0x72);
                assert_eq!(byte_at(&video, Plane::Form, x, y), 0);
            }
        }
        assert_eq!(byte_at(&video, Plane::Color, 4, 1), 0);
        assert_eq!(byte_at(&video, Plane::Color, 1, 3), 0);
        assert_eq!(video.device().writes(Plane::Color), 6);
        assert_eq!(video.device().writes(Plane::Form), 6);
        assert_eq!(video.device().bank_selects(), 2);
    }

    #[test]
    fn test_draw_sprite() {
        let mut video = make_test_video();

        video.draw_sprite(19, 92, &BALL);

        for line in 0..16 {
            for column in 0..2 {
                let index = (line * 2 + column) as usize;
                assert_eq!(byte_at(&video, Plane::Form, 19 + column, 92 + line), FORM[index]);
                assert_eq!(byte_at(&video, Plane::Color, 19 + column, 92 + line), COLOR[index]);
            }
        }
        assert_eq!(video.device().writes(Plane::Form), 32);
        assert_eq!(video.device().writes(Plane::Color), 32);
        assert_eq!(video.device().bank_selects(), 2);
        assert_eq!(video.device().selected_plane(), Plane::Form);
    }

    #[test]
    fn test_draw_then_clear_restores_baseline() {
        let mut video = make_test_video();

        video.draw_sprite(0, 184, &BALL);
        video.clear_sprite(0, 184, BALL.width_bytes(), BALL.height());

        assert!(video.device().plane(Plane::Form).iter().all(|&b| b == 0));
        assert!(video.device().plane(Plane::Color).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_sprite_selects_each_plane_once() {
        let mut video = make_test_video();

        video.clear_sprite(10, 10, 4, 8);

        assert_eq!(video.device().writes(Plane::Form), 32);
        assert_eq!(video.device().writes(Plane::Color), 32);
        assert_eq!(video.device().bank_selects(), 2);
    }

    #[test]
    fn test_move_horizontal_slide() {
        let mut video = make_test_video();
        video.draw_sprite(19, 92, &BALL);
        video.device_mut().reset_counters();

        video.move_sprite(19, 92, 20, 92, &BALL);

        for plane in [Plane::Form, Plane::Color].iter() {
            assert_eq!(video.device().writes(*plane), 48);
            for line in 92..108 {
                assert_eq!(byte_at(&video, *plane, 19, line), 0);
            }
        }
        assert_eq!(byte_at(&video, Plane::Form, 20, 92), FORM[0]);
        assert_eq!(byte_at(&video, Plane::Form, 21, 107), FORM[31]);
        assert_eq!(video.device().bank_selects(), 2);
    }

    #[test]
    fn test_move_writes_less_than_clear_and_draw() {
        let mut video = make_test_video();
        video.draw_sprite(10, 50, &BALL);
        video.device_mut().reset_counters();

        video.move_sprite(10, 50, 10, 58, &BALL);

        // 2 * 8 strip + 32 redraw, versus 64 for clear + draw.
        assert_eq!(video.device().writes(Plane::Form), 48);
        assert_eq!(video.device().writes(Plane::Color), 48);
    }

    #[test]
    fn test_move_diagonal_up_left() {
        let mut video = make_test_video();
        video.draw_sprite(10, 50, &BALL);

        video.move_sprite(10, 50, 9, 47, &BALL);

        let mut expected = make_test_video();
        expected.draw_sprite(9, 47, &BALL);
        assert_eq!(
            video.device().plane(Plane::Form),
            expected.device().plane(Plane::Form)
        );
        assert_eq!(
            video.device().plane(Plane::Color),
            expected.device().plane(Plane::Color)
        );
    }

    #[test]
    fn test_move_without_overlap_matches_clear_and_draw() {
        let mut moved = make_test_video();
        moved.draw_sprite(4, 4, &BALL);
        moved.device_mut().reset_counters();
        moved.move_sprite(4, 4, 6, 30, &BALL);

        let mut reference = make_test_video();
        reference.draw_sprite(4, 4, &BALL);
        reference.device_mut().reset_counters();
        reference.clear_sprite(4, 4, 2, 16);
        reference.draw_sprite(6, 30, &BALL);

        assert_eq!(
            moved.device().plane(Plane::Form),
            reference.device().plane(Plane::Form)
        );
        assert_eq!(
            moved.device().plane(Plane::Color),
            reference.device().plane(Plane::Color)
        );
        assert_eq!(moved.device().total_writes(), reference.device().total_writes());
    }

    #[test]
    fn test_random_moves_leave_only_the_sprite() {
        let mut rng = StdRng::seed_from_u64(0x4D4F35);
        let mut video = make_test_video();
        let (mut x, mut y) = (10, 100);
        video.draw_sprite(x, y, &BALL);

        for _ in 0..200 {
            let new_x = rng.gen_range(0, (SCREEN_WIDTH_BYTES - 2) as i16 + 1);
            let new_y = rng.gen_range(0, (SCREEN_HEIGHT - 16) as i16 + 1);
            let (new_x, new_y) = if rng.gen() {
                (
                    (x + rng.gen_range(-2, 3)).max(0).min(38),
                    (y + rng.gen_range(-20, 21)).max(0).min(184),
                )
            } else {
                (new_x, new_y)
            };

            video.move_sprite(x, y, new_x, new_y, &BALL);
            x = new_x;
            y = new_y;
        }

        let mut expected = make_test_video();
        expected.draw_sprite(x, y, &BALL);
        assert_eq!(
            video.device().plane(Plane::Form),
            expected.device().plane(Plane::Form)
        );
        assert_eq!(
            video.device().plane(Plane::Color),
            expected.device().plane(Plane::Color)
        );
    }

    #[test]
    fn test_wait_vbl_returns_at_blank_start() {
        let mut video = make_test_video();
        video.device_mut().set_scanline(10);

        video.wait_vbl();

        assert!(video.device().in_vblank());
    }
}
