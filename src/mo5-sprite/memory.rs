use super::color::{Attribute, PALETTE_RGB};
use super::device::{BankFlags, VideoFlags, PRC, VIDEO_REG, VRAM};
use super::display::Plane;
use super::{MemoryMappedDevice, SCREEN_HEIGHT, SCREEN_WIDTH_BYTES, SCREEN_WIDTH_PIXELS};

const PLANE_SIZE: usize = 0x2000;
pub const LINES_PER_FRAME: u16 = 312;
/// First line of the vertical blank. Lines before it are actively scanned.
pub const BLANK_START: u16 = 256;

/// An in-memory stand-in for the video hardware.
///
/// Both planes overlay `VRAM` and the bank bit in `PRC` picks which one a
/// write lands in, exactly like the real gate array. Every write is counted
/// so callers can check how much traffic a drawing operation produced.
///
/// The beam advances one line every time the status register is read, so
/// a VBL wait always terminates.
pub struct SimulatedMemory {
    form: [u8; PLANE_SIZE],
    color: [u8; PLANE_SIZE],
    bank: BankFlags,
    video: VideoFlags,
    scanline: u16,

    form_writes: usize,
    color_writes: usize,
    bank_selects: usize,
    bank_switches: usize,
    status_reads: usize,
}

impl SimulatedMemory {
    fn new() -> Self {
        Self {
            form: [0; PLANE_SIZE],
            color: [0; PLANE_SIZE],
            bank: BankFlags::empty(),
            video: VideoFlags::empty(),
            scanline: 0,

            form_writes: 0,
            color_writes: 0,
            bank_selects: 0,
            bank_switches: 0,
            status_reads: 0,
        }
    }

    pub fn plane(&self, plane: Plane) -> &[u8] {
        match plane {
            Plane::Form => &self.form,
            Plane::Color => &self.color,
        }
    }

    /// The plane `VRAM` accesses currently land in.
    pub fn selected_plane(&self) -> Plane {
        if self.bank.contains(BankFlags::FORM_PLANE) {
            Plane::Form
        } else {
            Plane::Color
        }
    }

    pub fn is_bitmap_mode(&self) -> bool {
        self.video.contains(VideoFlags::BITMAP)
    }

    pub fn writes(&self, plane: Plane) -> usize {
        match plane {
            Plane::Form => self.form_writes,
            Plane::Color => self.color_writes,
        }
    }

    pub fn total_writes(&self) -> usize {
        self.form_writes + self.color_writes
    }

    /// Number of writes to the bank select register.
    pub fn bank_selects(&self) -> usize {
        self.bank_selects
    }

    /// Number of bank select writes that actually changed the plane.
    pub fn bank_switches(&self) -> usize {
        self.bank_switches
    }

    pub fn status_reads(&self) -> usize {
        self.status_reads
    }

    pub fn reset_counters(&mut self) {
        self.form_writes = 0;
        self.color_writes = 0;
        self.bank_selects = 0;
        self.bank_switches = 0;
        self.status_reads = 0;
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn set_scanline(&mut self, line: u16) {
        assert!(
            line < LINES_PER_FRAME,
            "Invalid scanline {}. {} is the max",
            line,
            LINES_PER_FRAME - 1
        );
        self.scanline = line;
    }

    pub fn in_vblank(&self) -> bool {
        self.scanline >= BLANK_START
    }

    /// Render the visible screen as `0x00RRGGBB` pixels, row-major.
    pub fn rgba_framebuffer(&self) -> Vec<u32> {
        let mut pixels = Vec::with_capacity(SCREEN_WIDTH_PIXELS * SCREEN_HEIGHT);

        for y in 0..SCREEN_HEIGHT {
            for x_byte in 0..SCREEN_WIDTH_BYTES {
                let offset = y * SCREEN_WIDTH_BYTES + x_byte;
                let shape = self.form[offset];
                let attribute = Attribute::from(self.color[offset]);
                let fg = PALETTE_RGB[attribute.foreground() as usize];
                let bg = PALETTE_RGB[attribute.background() as usize];

                pixels.extend((0..8).map(|bit| {
                    if (shape << bit) & 0x80 != 0 {
                        fg
                    } else {
                        bg
                    }
                }));
            }
        }

        pixels
    }

    fn vram_index(address: u16) -> usize {
        let index = address.wrapping_sub(VRAM) as usize;
        assert!(index < PLANE_SIZE, "Invalid memory address {:#06x}", address);

        index
    }
}

impl Default for SimulatedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for SimulatedMemory {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            PRC => self.bank.bits(),
            VIDEO_REG => {
                self.status_reads += 1;
                let mut value = self.video;
                value.set(VideoFlags::VBLANK, self.in_vblank());
                self.scanline = (self.scanline + 1) % LINES_PER_FRAME;

                value.bits()
            }
            _ => {
                let index = Self::vram_index(address);
                match self.selected_plane() {
                    Plane::Form => self.form[index],
                    Plane::Color => self.color[index],
                }
            }
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        match address {
            PRC => {
                let bank = BankFlags::from_bits_retain(value);
                self.bank_selects += 1;
                if bank.contains(BankFlags::FORM_PLANE) != self.bank.contains(BankFlags::FORM_PLANE)
                {
                    self.bank_switches += 1;
                }
                self.bank = bank;
            }
            VIDEO_REG => {
                // The blank flag is driven by the beam, not by writes.
                self.video = VideoFlags::from_bits_retain(value) - VideoFlags::VBLANK;
            }
            _ => {
                let index = Self::vram_index(address);
                match self.selected_plane() {
                    Plane::Form => {
                        self.form[index] = value;
                        self.form_writes += 1;
                    }
                    Plane::Color => {
                        self.color[index] = value;
                        self.color_writes += 1;
                    }
                }
            }
        }
    }
}
