use super::display::Video;
use super::sprite::{Position, Sprite};
use super::MemoryMappedDevice;

/// A positioned, movable view of a shared sprite.
///
/// `old_pos` is where the actor was before its last successful move. Until
/// the first move it equals the starting position.
#[derive(Debug)]
pub struct Actor<'a> {
    sprite: &'a Sprite<'a>,
    pub pos: Position,
    pub old_pos: Position,
}

impl<'a> Actor<'a> {
    pub fn new(sprite: &'a Sprite<'a>, pos: Position) -> Self {
        Self {
            sprite,
            pos,
            old_pos: pos,
        }
    }

    pub fn sprite(&self) -> &'a Sprite<'a> {
        self.sprite
    }

    pub fn draw<D: MemoryMappedDevice>(&self, video: &mut Video<D>) {
        video.draw_sprite(self.pos.x, self.pos.y, self.sprite);
    }

    pub fn clear<D: MemoryMappedDevice>(&self, video: &mut Video<D>) {
        video.clear_sprite(
            self.pos.x,
            self.pos.y,
            self.sprite.width_bytes(),
            self.sprite.height(),
        );
    }

    /// Move to `(x, y)`, redrawing only what changed. Returns `false` without
    /// touching video memory when the actor is already there.
    ///
    /// The target must be on screen. Run candidates through [`Actor::clamped`]
    /// first.
    pub fn move_to<D: MemoryMappedDevice>(&mut self, video: &mut Video<D>, x: i16, y: i16) -> bool {
        let target = Position::new(x, y);
        if target == self.pos {
            return false;
        }

        self.old_pos = self.pos;
        self.pos = target;
        video.move_sprite(self.old_pos.x, self.old_pos.y, x, y, self.sprite);

        true
    }

    /// Pull `pos` back on screen. Only updates the position, nothing is drawn.
    pub fn clamp(&mut self) {
        self.pos = self.pos.clamp_to_screen(self.sprite);
    }

    /// The on-screen position nearest to the candidate `(x, y)`.
    pub fn clamped(&self, x: i16, y: i16) -> Position {
        Position::new(x, y).clamp_to_screen(self.sprite)
    }
}
