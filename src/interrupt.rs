//! Latched interrupt flags
//!
//! The INT_FLAG register may be cleared by the hardware before it is polled again, so every set
//! flag seen on a refresh is kept in a software latch until it is taken by a consumer.

/// Interrupt flags of the INT_FLAG register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptFlag {
    /// Proximity dropped below the low threshold
    ProximityAway = 8,

    /// Proximity rose above the high threshold
    ProximityClose = 9,

    /// Ambient light exceeded the high threshold
    LightHigh = 12,

    /// Ambient light dropped below the low threshold
    LightLow = 13,
}

impl InterruptFlag {
    pub const ALL: [InterruptFlag; 4] = [
        InterruptFlag::ProximityAway,
        InterruptFlag::ProximityClose,
        InterruptFlag::LightHigh,
        InterruptFlag::LightLow,
    ];

    /// Bit offset of the flag in the interrupt status register.
    pub const fn bit(self) -> u8 {
        self as u8
    }

    pub const fn is_set(self, status: u16) -> bool {
        status & (1 << self.bit()) != 0
    }

    const fn slot(self) -> usize {
        match self {
            InterruptFlag::ProximityAway => 0,
            InterruptFlag::ProximityClose => 1,
            InterruptFlag::LightHigh => 2,
            InterruptFlag::LightLow => 3,
        }
    }
}

/// Pending state of every [`InterruptFlag`]; all clear when created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InterruptCache {
    pending: [bool; 4],
}

impl InterruptCache {
    pub const fn new() -> Self {
        Self {
            pending: [false; 4],
        }
    }

    /// Latches every known flag set in `status`. Flags are never cleared here.
    pub fn update(&mut self, status: u16) {
        for flag in InterruptFlag::ALL {
            if flag.is_set(status) {
                self.pending[flag.slot()] = true;
            }
        }
    }

    pub fn is_pending(&self, flag: InterruptFlag) -> bool {
        self.pending[flag.slot()]
    }

    /// Returns whether `flag` was pending and clears it.
    pub fn take(&mut self, flag: InterruptFlag) -> bool {
        core::mem::replace(&mut self.pending[flag.slot()], false)
    }
}
