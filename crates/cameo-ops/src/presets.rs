//! Film-emulation tone curves.
//!
//! Point tables are literal constants in 8-bit levels, channels in frame
//! order. Provia and Cross-Process have no master curve.

use cameo_core::BitDepth;
use cameo_curve::ControlPoint;

use crate::OpsResult;
use crate::curves::ChannelCurveFilter;

type Points = &'static [(u8, u8)];

/// Named film stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePreset {
    /// Kodak Portra: warm, gentle contrast.
    Portra,
    /// Fuji Provia: neutral slide film.
    Provia,
    /// Fuji Velvia: saturated slide film.
    Velvia,
    /// Slide film developed in negative chemistry.
    CrossProcess,
}

/// Master plus per-channel point tables of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetPoints {
    /// Shared curve composed under every channel.
    pub master: Points,
    /// Blue channel.
    pub blue: Points,
    /// Green channel.
    pub green: Points,
    /// Red channel.
    pub red: Points,
}

const PORTRA: PresetPoints = PresetPoints {
    master: &[(0, 0), (23, 20), (157, 173), (255, 255)],
    blue: &[(0, 0), (41, 46), (231, 228), (255, 255)],
    green: &[(0, 0), (52, 47), (189, 196), (255, 255)],
    red: &[(0, 0), (69, 69), (213, 218), (255, 255)],
};

const PROVIA: PresetPoints = PresetPoints {
    master: &[],
    blue: &[(0, 0), (35, 25), (205, 227), (255, 255)],
    green: &[(0, 0), (27, 21), (196, 207), (255, 255)],
    red: &[(0, 0), (59, 54), (202, 210), (255, 255)],
};

const VELVIA: PresetPoints = PresetPoints {
    master: &[(0, 0), (128, 118), (221, 215), (255, 255)],
    blue: &[(0, 0), (25, 21), (122, 153), (165, 206), (255, 255)],
    green: &[(0, 0), (25, 21), (95, 102), (181, 208), (255, 255)],
    red: &[(0, 0), (41, 28), (183, 209), (255, 255)],
};

const CROSS_PROCESS: PresetPoints = PresetPoints {
    master: &[],
    blue: &[(0, 20), (255, 235)],
    green: &[(0, 0), (56, 39), (208, 226), (255, 255)],
    red: &[(0, 0), (56, 22), (211, 255), (255, 255)],
};

fn to_points(raw: Points) -> Vec<ControlPoint> {
    raw.iter().map(|&p| p.into()).collect()
}

impl CurvePreset {
    /// All presets.
    pub const ALL: [CurvePreset; 4] = [
        CurvePreset::Portra,
        CurvePreset::Provia,
        CurvePreset::Velvia,
        CurvePreset::CrossProcess,
    ];

    /// Point tables.
    pub const fn points(self) -> PresetPoints {
        match self {
            Self::Portra => PORTRA,
            Self::Provia => PROVIA,
            Self::Velvia => VELVIA,
            Self::CrossProcess => CROSS_PROCESS,
        }
    }

    /// Display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portra => "Portra",
            Self::Provia => "Provia",
            Self::Velvia => "Velvia",
            Self::CrossProcess => "Cross-Process",
        }
    }

    /// Builds the channel curve filter for `depth`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_core::BitDepth;
    /// use cameo_ops::presets::CurvePreset;
    ///
    /// let cross = CurvePreset::CrossProcess.build(BitDepth::U8).unwrap();
    /// // blue is lifted off black and pulled down from white
    /// assert_eq!(cross.table(0).unwrap().get(0), Some(20));
    /// assert_eq!(cross.table(0).unwrap().get(255), Some(235));
    /// ```
    pub fn build(self, depth: BitDepth) -> OpsResult<ChannelCurveFilter> {
        let p = self.points();
        let (blue, green, red) = (to_points(p.blue), to_points(p.green), to_points(p.red));
        ChannelCurveFilter::new(&to_points(p.master), [&blue, &green, &red], depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_build() {
        for preset in CurvePreset::ALL {
            let f = preset.build(BitDepth::U8).unwrap();
            for c in 0..3 {
                let t = f.table(c).unwrap();
                assert_eq!(t.len(), 256, "{}", preset.label());
                assert!(t.entries().iter().all(|&e| e <= 255));
            }
        }
    }

    #[test]
    fn test_provia_channels_pass_through_knots() {
        // no master, so each table hits its own control points exactly
        let f = CurvePreset::Provia.build(BitDepth::U8).unwrap();
        let p = CurvePreset::Provia.points();
        for (c, pts) in [p.blue, p.green, p.red].into_iter().enumerate() {
            let t = f.table(c).unwrap();
            for &(x, y) in pts {
                assert_eq!(t.get(x as usize), Some(y as u16), "channel {c} at {x}");
            }
        }
    }

    #[test]
    fn test_endpoints_fixed() {
        for preset in [CurvePreset::Portra, CurvePreset::Velvia, CurvePreset::Provia] {
            let f = preset.build(BitDepth::U8).unwrap();
            for c in 0..3 {
                let t = f.table(c).unwrap();
                assert_eq!(t.get(0), Some(0));
                assert_eq!(t.get(255), Some(255));
            }
        }
    }

    #[test]
    fn test_master_only_presets() {
        assert!(CurvePreset::Provia.points().master.is_empty());
        assert!(CurvePreset::CrossProcess.points().master.is_empty());
        assert_eq!(CurvePreset::Velvia.points().blue.len(), 5);
    }
}
