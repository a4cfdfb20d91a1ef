use super::{SCREEN_HEIGHT, SCREEN_WIDTH_BYTES};

/// An immutable bitmap, as produced by the asset converter.
///
/// `form` and `color` are row-major with `width_bytes` bytes per line. A
/// sprite is shared by reference between every actor that shows it.
#[derive(Debug)]
pub struct Sprite<'a> {
    form: &'a [u8],
    color: &'a [u8],
    width_bytes: u8,
    height: u8,
}

impl<'a> Sprite<'a> {
    /// Usable in a `static`, in which case a size mismatch fails the build.
    pub const fn new(form: &'a [u8], color: &'a [u8], width_bytes: u8, height: u8) -> Self {
        assert!(width_bytes > 0 && height > 0, "Sprite must not be empty");
        assert!(
            form.len() == width_bytes as usize * height as usize,
            "Form data does not match sprite dimensions"
        );
        assert!(
            color.len() == form.len(),
            "Color data does not match sprite dimensions"
        );

        Self {
            form,
            color,
            width_bytes,
            height,
        }
    }

    pub fn form(&self) -> &'a [u8] {
        self.form
    }

    pub fn color(&self) -> &'a [u8] {
        self.color
    }

    pub fn width_bytes(&self) -> i16 {
        self.width_bytes as i16
    }

    pub fn height(&self) -> i16 {
        self.height as i16
    }
}

/// A screen position: `x` in byte units (8 pixels), `y` in lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The nearest position at which all of `sprite` is on screen.
    pub fn clamp_to_screen(self, sprite: &Sprite) -> Self {
        let max_x = SCREEN_WIDTH_BYTES as i16 - sprite.width_bytes();
        let max_y = SCREEN_HEIGHT as i16 - sprite.height();

        Self {
            x: self.x.max(0).min(max_x),
            y: self.y.max(0).min(max_y),
        }
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}
