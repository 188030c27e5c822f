//! The closed set of selectable filters.
//!
//! [`Filter`] is a sum type over every filter kind with one shared
//! `apply(src, dst)` contract. Recolor ops carry no state and are simply a
//! variant like the others, so callers never branch on filter kind.
//!
//! [`FilterId`] names the registered filters and builds them.

use std::fmt;
use std::str::FromStr;

use cameo_core::{BitDepth, Frame};

use crate::convolve::ConvolutionFilter;
use crate::curves::{ChannelCurveFilter, ValueCurveFilter};
use crate::presets::CurvePreset;
use crate::recolor::RecolorOp;
use crate::{OpsError, OpsResult};

/// Any filter the pipeline can run.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Kernel convolution.
    Convolution(ConvolutionFilter),
    /// Per-channel curves over a master curve.
    ChannelCurve(ChannelCurveFilter),
    /// One curve over every sample.
    ValueCurve(ValueCurveFilter),
    /// Stateless channel algebra.
    Recolor(RecolorOp),
}

impl Filter {
    /// Runs the filter from `src` into `dst`.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`] if the frames differ in size, plus any
    /// error of the wrapped filter.
    pub fn apply(&self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        match self {
            Self::Convolution(f) => f.apply(src, dst),
            Self::ChannelCurve(f) => f.apply(src, dst),
            Self::ValueCurve(f) => f.apply(src, dst),
            Self::Recolor(op) => op.apply(src, dst),
        }
    }

    /// Runs the filter on `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) -> OpsResult<()> {
        match self {
            Self::Convolution(f) => f.apply_in_place(frame),
            Self::ChannelCurve(f) => f.apply_in_place(frame),
            Self::ValueCurve(f) => f.apply_in_place(frame),
            Self::Recolor(op) => {
                op.apply_in_place(frame);
                Ok(())
            }
        }
    }

    /// Short kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Convolution(_) => "convolution",
            Self::ChannelCurve(_) => "curves",
            Self::ValueCurve(_) => "value curve",
            Self::Recolor(_) => "recolor",
        }
    }
}

impl From<ConvolutionFilter> for Filter {
    fn from(f: ConvolutionFilter) -> Self {
        Self::Convolution(f)
    }
}

impl From<ChannelCurveFilter> for Filter {
    fn from(f: ChannelCurveFilter) -> Self {
        Self::ChannelCurve(f)
    }
}

impl From<ValueCurveFilter> for Filter {
    fn from(f: ValueCurveFilter) -> Self {
        Self::ValueCurve(f)
    }
}

impl From<RecolorOp> for Filter {
    fn from(op: RecolorOp) -> Self {
        Self::Recolor(op)
    }
}

/// Identifier of a registered filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FilterId {
    /// Portra film curves.
    #[default]
    Portra,
    /// Provia film curves.
    Provia,
    /// Velvia film curves.
    Velvia,
    /// Cross-process curves.
    Cross,
    /// Sharpen kernel.
    Sharpen,
    /// Emboss kernel.
    Emboss,
    /// 5x5 box blur.
    Blur,
    /// Edge-isolating kernel.
    Edges,
    /// RC recolor.
    Rc,
    /// RGV recolor.
    Rgv,
    /// CMV recolor.
    Cmv,
}

impl FilterId {
    /// Every identifier, in key order.
    pub const ALL: [FilterId; 11] = [
        FilterId::Portra,
        FilterId::Provia,
        FilterId::Velvia,
        FilterId::Cross,
        FilterId::Sharpen,
        FilterId::Emboss,
        FilterId::Blur,
        FilterId::Edges,
        FilterId::Rc,
        FilterId::Rgv,
        FilterId::Cmv,
    ];

    /// Lowercase identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portra => "portra",
            Self::Provia => "provia",
            Self::Velvia => "velvia",
            Self::Cross => "cross",
            Self::Sharpen => "sharpen",
            Self::Emboss => "emboss",
            Self::Blur => "blur",
            Self::Edges => "edges",
            Self::Rc => "rc",
            Self::Rgv => "rgv",
            Self::Cmv => "cmv",
        }
    }

    /// Constructs the filter this identifier stands for.
    ///
    /// # Errors
    ///
    /// Curve presets can fail only if their point tables were malformed.
    pub fn build(self, depth: BitDepth) -> OpsResult<Filter> {
        let filter = match self {
            Self::Portra => CurvePreset::Portra.build(depth)?.into(),
            Self::Provia => CurvePreset::Provia.build(depth)?.into(),
            Self::Velvia => CurvePreset::Velvia.build(depth)?.into(),
            Self::Cross => CurvePreset::CrossProcess.build(depth)?.into(),
            Self::Sharpen => ConvolutionFilter::sharpen().into(),
            Self::Emboss => ConvolutionFilter::emboss().into(),
            Self::Blur => ConvolutionFilter::blur().into(),
            Self::Edges => ConvolutionFilter::find_edges().into(),
            Self::Rc => RecolorOp::Rc.into(),
            Self::Rgv => RecolorOp::Rgv.into(),
            Self::Cmv => RecolorOp::Cmv.into(),
        };
        Ok(filter)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterId {
    type Err = OpsError;

    /// Case-insensitive; `crossprocess` and `cross-process` are accepted for `cross`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if matches!(key.as_str(), "crossprocess" | "cross-process") {
            return Ok(Self::Cross);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.name() == key)
            .ok_or_else(|| OpsError::UnknownFilter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in FilterId::ALL {
            assert_eq!(id.name().parse::<FilterId>().unwrap(), id);
        }
        assert_eq!("Cross-Process".parse::<FilterId>().unwrap(), FilterId::Cross);
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            "sepia".parse::<FilterId>(),
            Err(OpsError::UnknownFilter(name)) if name == "sepia"
        ));
    }

    #[test]
    fn test_build_kinds() {
        let kinds: Vec<_> = FilterId::ALL
            .iter()
            .map(|id| id.build(BitDepth::U8).unwrap().kind())
            .collect();
        assert_eq!(&kinds[..4], ["curves"; 4]);
        assert_eq!(&kinds[4..8], ["convolution"; 4]);
        assert_eq!(&kinds[8..], ["recolor"; 3]);
    }

    #[test]
    fn test_apply_and_in_place_agree() {
        let mut src = Frame::new(8, 6);
        for y in 0..6 {
            for x in 0..8 {
                src.set_pixel(x, y, [(x * 30) as u8, (y * 40) as u8, ((x + y) * 15) as u8]);
            }
        }
        for id in FilterId::ALL {
            let filter = id.build(BitDepth::U8).unwrap();
            let mut dst = Frame::new(8, 6);
            filter.apply(&src, &mut dst).unwrap();
            let mut inplace = src.clone();
            filter.apply_in_place(&mut inplace).unwrap();
            assert_eq!(inplace, dst, "{id}");
        }
    }
}
