use std::fmt;

/// Position of an adapter in OS enumeration order.
pub type AdapterIndex = usize;

/// Pixel depths a mode may report.
pub const VALID_BIT_DEPTHS: [u32; 6] = [4, 8, 15, 16, 24, 32];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Default,
    Clockwise,
    UpsideDown,
    AntiClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Default),
            90 => Some(Self::Clockwise),
            180 => Some(Self::UpsideDown),
            270 => Some(Self::AntiClockwise),
            _ => None,
        }
    }

    /// The `DMDO_*` value the OS stores for this orientation.
    ///
    /// The OS counts quarter turns anticlockwise, so `Clockwise` is `DMDO_270`.
    pub fn native_code(self) -> u32 {
        match self {
            Self::Default => 0,
            Self::AntiClockwise => 1,
            Self::UpsideDown => 2,
            Self::Clockwise => 3,
        }
    }

    pub fn from_native_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Default),
            1 => Some(Self::AntiClockwise),
            2 => Some(Self::UpsideDown),
            3 => Some(Self::Clockwise),
            _ => None,
        }
    }

    /// Degrees shown in bare reports: the native code in quarter turns.
    pub fn reported_degrees(self) -> u32 {
        self.native_code() * 90
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::Default | Self::UpsideDown => Axis::Landscape,
            Self::Clockwise | Self::AntiClockwise => Axis::Portrait,
        }
    }
}

/// One configuration an adapter reported as supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub refresh_rate: u32,
    pub orientation: Orientation,
}

impl Mode {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Compares everything except orientation.
    pub fn matches(&self, width: u32, height: u32, bit_depth: u32, refresh_rate: u32) -> bool {
        self.bit_depth == bit_depth
            && self.refresh_rate == refresh_rate
            && self.width == width
            && self.height == height
    }

    /// Comma separated form for piping, e.g. `1920,1080,32,60` or `1920,1080,32,60:270`.
    pub fn bare(&self, with_orientation: bool) -> String {
        let mut out = format!(
            "{},{},{},{}",
            self.width, self.height, self.bit_depth, self.refresh_rate
        );

        if with_orientation {
            out.push_str(&format!(":{}", self.orientation.reported_degrees()));
        }

        out
    }

    pub fn describe(&self, with_orientation: bool) -> String {
        let mut out = format!(
            "{} x {}, {} bits, {} Hz",
            self.width, self.height, self.bit_depth, self.refresh_rate
        );

        if with_orientation {
            out.push_str(&format!(" (Orientation: {:?})", self.orientation));
        }

        out
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true))
    }
}
