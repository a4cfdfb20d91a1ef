mod actor;
pub mod color;
mod device;
mod display;
mod memory;
mod sprite;
pub mod stdio;
mod vbl;

pub use actor::Actor;
pub use color::Attribute;
pub use device::{BankFlags, RawDevice, VideoFlags, PRC, VBL_REG, VIDEO_REG, VRAM};
pub use display::{Plane, RowOffsets, Video};
pub use memory::{SimulatedMemory, BLANK_START, LINES_PER_FRAME};
pub use sprite::{Position, Sprite};
pub use vbl::{wait_vbl, BeamState};

/// Screen width in byte units. One byte covers 8 horizontal pixels.
pub const SCREEN_WIDTH_BYTES: usize = 40;
/// Screen height in pixel lines.
pub const SCREEN_HEIGHT: usize = 200;
/// Size of one plane's visible area in bytes.
pub const SCREEN_SIZE_BYTES: usize = SCREEN_WIDTH_BYTES * SCREEN_HEIGHT;
/// Screen width in pixels.
pub const SCREEN_WIDTH_PIXELS: usize = SCREEN_WIDTH_BYTES * 8;

/// Byte-wide access to the machine's address space.
///
/// Every component that touches hardware goes through this trait, so the
/// same drawing code runs against real registers or a simulated bus.
pub trait MemoryMappedDevice {
    fn read(&mut self, address: u16) -> u8;
    fn write(&mut self, address: u16, value: u8);
}

/// Blocking single character input and output, as provided by the monitor.
pub trait CharIo {
    fn read_char(&mut self) -> u8;
    fn write_char(&mut self, c: u8);
}
