//! Operating modes and their priority order
//!
//! Modes are declared in ascending priority: when several are enabled, the
//! one declared last is shown.

use crate::pattern::{Pattern, library};

const MODE_NAME_NONE: &str = "none";
const MODE_NAME_TRACKING: &str = "tracking";
const MODE_NAME_WAIT_SERVER: &str = "wait_server";
const MODE_NAME_WAIT_CONNECT: &str = "wait_connect";
const MODE_NAME_SMART_CONFIG: &str = "smart_config";
const MODE_NAME_BOOT: &str = "boot";
const MODE_NAME_REVERSING: &str = "reversing";
const MODE_NAME_SETED: &str = "seted";
const MODE_NAME_CAL_STEP: &str = "cal_step";
const MODE_NAME_CAL_DONE: &str = "cal_done";

/// Named operating condition that requests a pattern on the indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Mode {
    None = 0,
    Tracking = 1,
    WaitServer = 2,
    WaitConnect = 3,
    SmartConfig = 4,
    Boot = 5,
    Reversing = 6,
    /// A setting was stored
    Seted = 7,
    CalibrationStep = 8,
    CalibrationDone = 9,
}

impl Mode {
    /// All modes in ascending priority
    pub const ALL: [Self; 10] = [
        Self::None,
        Self::Tracking,
        Self::WaitServer,
        Self::WaitConnect,
        Self::SmartConfig,
        Self::Boot,
        Self::Reversing,
        Self::Seted,
        Self::CalibrationStep,
        Self::CalibrationDone,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Priority of the mode; higher wins arbitration
    pub const fn priority(self) -> u8 {
        self as u8
    }

    /// Pattern shown while the mode is active
    pub fn pattern(self) -> &'static Pattern {
        match self {
            Self::None => &library::NONE,
            Self::Tracking => &library::TRACKING_PATTERN,
            Self::WaitServer => &library::WAIT_SERVER,
            Self::WaitConnect => &library::WAIT_CONNECT,
            Self::SmartConfig => &library::SMART_CONFIG,
            Self::Boot => &library::BOOT,
            Self::Reversing => &library::REVERSING,
            Self::Seted => &library::SETED,
            Self::CalibrationStep => &library::CAL_STEP,
            Self::CalibrationDone => &library::CAL_DONE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => MODE_NAME_NONE,
            Self::Tracking => MODE_NAME_TRACKING,
            Self::WaitServer => MODE_NAME_WAIT_SERVER,
            Self::WaitConnect => MODE_NAME_WAIT_CONNECT,
            Self::SmartConfig => MODE_NAME_SMART_CONFIG,
            Self::Boot => MODE_NAME_BOOT,
            Self::Reversing => MODE_NAME_REVERSING,
            Self::Seted => MODE_NAME_SETED,
            Self::CalibrationStep => MODE_NAME_CAL_STEP,
            Self::CalibrationDone => MODE_NAME_CAL_DONE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Fixed-size set of enabled modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeSet {
    bits: u16,
}

impl ModeSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn set(&mut self, mode: Mode, enabled: bool) {
        if enabled {
            self.bits |= mode.bit();
        } else {
            self.bits &= !mode.bit();
        }
    }

    pub const fn contains(&self, mode: Mode) -> bool {
        self.bits & mode.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Highest-priority enabled mode, `Mode::None` when nothing is enabled
    pub fn highest(&self) -> Mode {
        Mode::ALL
            .into_iter()
            .rev()
            .find(|mode| self.contains(*mode))
            .unwrap_or(Mode::None)
    }

    /// Enabled modes in ascending priority
    pub fn iter(&self) -> impl Iterator<Item = Mode> + '_ {
        Mode::ALL.into_iter().filter(|mode| self.contains(*mode))
    }
}
