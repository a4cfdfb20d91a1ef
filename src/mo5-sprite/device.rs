use super::MemoryMappedDevice;

/// Bank select register. Bit 0 chooses the plane `VRAM` writes land in.
pub const PRC: u16 = 0xA7C0;
/// Video mode register.
pub const VIDEO_REG: u16 = 0xA7E7;
/// Status register, shared with the video mode register.
pub const VBL_REG: u16 = 0xA7E7;
/// Base of the video range. Both planes overlay it.
pub const VRAM: u16 = 0x0000;

bitflags::bitflags! {
    /// Bits of the bank select register at `PRC`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BankFlags: u8 {
        /// Set: form (bitmap) plane. Clear: color (attribute) plane.
        const FORM_PLANE = 0b0000_0001;
    }

    /// Bits of the register at `VIDEO_REG`/`VBL_REG`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct VideoFlags: u8 {
        /// Bitmap display mode.
        const BITMAP = 0b0000_0001;
        /// Read only, high during the vertical blank.
        const VBLANK = 0b1000_0000;
    }
}

/// The real bus. Reads and writes go straight to absolute addresses.
pub struct RawDevice {
    _private: (),
}

impl RawDevice {
    /// # Safety
    ///
    /// Only valid on the target machine, where the register map above is
    /// backed by hardware. Only one instance may exist at a time.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemoryMappedDevice for RawDevice {
    #[inline(always)]
    fn read(&mut self, address: u16) -> u8 {
        unsafe { core::ptr::read_volatile(address as usize as *const u8) }
    }

    #[inline(always)]
    fn write(&mut self, address: u16, value: u8) {
        unsafe { core::ptr::write_volatile(address as usize as *mut u8, value) }
    }
}
