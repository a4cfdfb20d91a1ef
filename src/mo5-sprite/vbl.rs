use super::device::{VideoFlags, VBL_REG};
use super::MemoryMappedDevice;

/// What the beam is doing, as reported by the status register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BeamState {
    InBlank,
    Scanning,
}

impl BeamState {
    pub fn sample<D: MemoryMappedDevice + ?Sized>(device: &mut D) -> Self {
        if VideoFlags::from_bits_retain(device.read(VBL_REG)).contains(VideoFlags::VBLANK) {
            BeamState::InBlank
        } else {
            BeamState::Scanning
        }
    }
}

/// Spin until the start of the next vertical blank.
///
/// If called during a blank, that blank is skipped first, so the caller
/// always gets a full blank interval to draw in. There is no timeout: a
/// status bit that never toggles hangs here forever.
pub fn wait_vbl<D: MemoryMappedDevice + ?Sized>(device: &mut D) {
    while BeamState::sample(device) == BeamState::InBlank {
        core::hint::spin_loop();
    }

    while BeamState::sample(device) == BeamState::Scanning {
        core::hint::spin_loop();
    }
}
