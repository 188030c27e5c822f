//! Lookup-table curve filters.
//!
//! [`ChannelCurveFilter`] holds one table per channel, each built from the
//! channel curve composed over an optional shared master curve
//! (`channel(master(x))`). [`ValueCurveFilter`] holds a single table applied
//! to every sample regardless of channel.
//!
//! Tables are built once at construction and sized from the [`BitDepth`].
//! A channel whose composite curve is absent keeps its source samples.

use cameo_core::{BitDepth, CHANNELS, Frame};
use cameo_curve::{ControlPoint, Curve, LookupTable, apply_lookup, apply_lookup_in_place};
use tracing::debug;

use crate::error::ensure_same_size;
use crate::{OpsError, OpsResult};

/// Frames carry 8-bit samples; wider tables cannot be applied to them.
fn ensure_frame_depth(depth: BitDepth) -> OpsResult<()> {
    if depth != BitDepth::U8 {
        return Err(OpsError::InvalidParameter(format!(
            "{depth:?} tables cannot be applied to 8-bit frames"
        )));
    }
    Ok(())
}

fn curve_from(points: &[ControlPoint]) -> OpsResult<Option<Curve>> {
    Ok(Curve::from_points(points)?)
}

/// Per-channel tone curves over a shared master curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCurveFilter {
    tables: [Option<LookupTable>; CHANNELS],
    depth: BitDepth,
}

impl ChannelCurveFilter {
    /// Builds from control-point lists.
    ///
    /// `channels` is in frame order (blue, green, red). Lists with fewer than
    /// two points contribute no curve.
    ///
    /// # Errors
    ///
    /// [`OpsError::Curve`] if a list is not strictly increasing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cameo_core::{BitDepth, Frame};
    /// use cameo_curve::ControlPoint;
    /// use cameo_ops::curves::ChannelCurveFilter;
    ///
    /// let invert = [ControlPoint::new(0.0, 255.0), ControlPoint::new(255.0, 0.0)];
    /// let filter = ChannelCurveFilter::new(&[], [&invert, &[], &[]], BitDepth::U8).unwrap();
    ///
    /// let src = Frame::filled(2, 2, [10, 20, 30]);
    /// let mut dst = Frame::new(2, 2);
    /// filter.apply(&src, &mut dst).unwrap();
    /// assert_eq!(dst.pixel(0, 0), [245, 20, 30]);
    /// ```
    pub fn new(
        master: &[ControlPoint],
        channels: [&[ControlPoint]; CHANNELS],
        depth: BitDepth,
    ) -> OpsResult<Self> {
        let master = curve_from(master)?;
        let [b, g, r] = channels;
        let curves = [curve_from(b)?, curve_from(g)?, curve_from(r)?];
        Ok(Self::from_curves(master, curves, depth))
    }

    /// Builds from ready-made curves.
    pub fn from_curves(
        master: Option<Curve>,
        channels: [Option<Curve>; CHANNELS],
        depth: BitDepth,
    ) -> Self {
        let levels = depth.levels();
        let tables = channels.map(|channel| {
            let composite = Curve::compose(channel, master.clone());
            LookupTable::build(composite.as_ref(), levels)
        });
        debug!(
            ?depth,
            blue = tables[0].is_some(),
            green = tables[1].is_some(),
            red = tables[2].is_some(),
            "built channel curve filter"
        );
        Self { tables, depth }
    }

    /// Table for channel `index`, if any.
    pub fn table(&self, index: usize) -> Option<&LookupTable> {
        self.tables.get(index).and_then(Option::as_ref)
    }

    /// Depth the tables were sized for.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Splits `src`, maps each plane through its table and merges into `dst`.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if the frames differ in size
    /// - [`OpsError::InvalidParameter`] if the tables were built for 16-bit samples
    pub fn apply(&self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        ensure_same_size(src, dst)?;
        ensure_frame_depth(self.depth)?;
        let mut planes = src.split();
        for (plane, table) in planes.iter_mut().zip(&self.tables) {
            apply_lookup_in_place(table.as_ref(), plane.data_mut())?;
        }
        dst.merge_into(&planes)?;
        Ok(())
    }

    /// Applies the tables to `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) -> OpsResult<()> {
        ensure_frame_depth(self.depth)?;
        if self.tables.iter().all(Option::is_none) {
            return Ok(());
        }
        let mut planes = frame.split();
        for (plane, table) in planes.iter_mut().zip(&self.tables) {
            apply_lookup_in_place(table.as_ref(), plane.data_mut())?;
        }
        frame.merge_into(&planes)?;
        Ok(())
    }
}

/// One tone curve applied to every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCurveFilter {
    table: Option<LookupTable>,
    depth: BitDepth,
}

impl ValueCurveFilter {
    /// Builds from control points.
    ///
    /// # Errors
    ///
    /// [`OpsError::Curve`] if the list is not strictly increasing.
    pub fn new(points: &[ControlPoint], depth: BitDepth) -> OpsResult<Self> {
        Ok(Self::from_curve(curve_from(points)?, depth))
    }

    /// Builds from an optional curve.
    pub fn from_curve(curve: Option<Curve>, depth: BitDepth) -> Self {
        let table = LookupTable::build(curve.as_ref(), depth.levels());
        debug!(?depth, present = table.is_some(), "built value curve filter");
        Self { table, depth }
    }

    /// The table, if any.
    pub fn table(&self) -> Option<&LookupTable> {
        self.table.as_ref()
    }

    /// Maps every sample of `src` into `dst`. An absent table leaves `dst` as it was.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if the frames differ in size
    /// - [`OpsError::InvalidParameter`] if the table was built for 16-bit samples
    pub fn apply(&self, src: &Frame, dst: &mut Frame) -> OpsResult<()> {
        ensure_same_size(src, dst)?;
        ensure_frame_depth(self.depth)?;
        apply_lookup(self.table.as_ref(), src.data(), dst.data_mut())?;
        Ok(())
    }

    /// Maps every sample of `frame` in place.
    pub fn apply_in_place(&self, frame: &mut Frame) -> OpsResult<()> {
        ensure_frame_depth(self.depth)?;
        apply_lookup_in_place(self.table.as_ref(), frame.data_mut())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(u8, u8)]) -> Vec<ControlPoint> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_no_curves_copies_source() {
        let f = ChannelCurveFilter::new(&[], [&[], &[], &[]], BitDepth::U8).unwrap();
        assert!(f.table(0).is_none());
        let src = Frame::filled(3, 3, [1, 2, 3]);
        let mut dst = Frame::new(3, 3);
        f.apply(&src, &mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_master_applies_to_every_channel() {
        let master = pts(&[(0, 0), (255, 127)]);
        let f = ChannelCurveFilter::new(&master, [&[], &[], &[]], BitDepth::U8).unwrap();
        let mut frame = Frame::filled(2, 2, [254, 100, 0]);
        f.apply_in_place(&mut frame).unwrap();
        assert_eq!(frame.pixel(1, 1), [126, 49, 0]);
    }

    #[test]
    fn test_channel_over_master() {
        // master doubles up to 128, blue then inverts
        let master = pts(&[(0, 0), (128, 255), (255, 255)]);
        let blue = pts(&[(0, 255), (255, 0)]);
        let f = ChannelCurveFilter::new(&master, [&blue, &[], &[]], BitDepth::U8).unwrap();
        let t = f.table(0).unwrap();
        // master(64) = 127.5, blue(127.5) = 127.5
        assert_eq!(t.get(64), Some(127));
        assert_eq!(t.get(200), Some(0));
        assert_eq!(f.table(1).unwrap().get(64), Some(127));
    }

    #[test]
    fn test_sixteen_bit_tables_rejected_on_frames() {
        let f = ChannelCurveFilter::new(&pts(&[(0, 0), (255, 255)]), [&[], &[], &[]], BitDepth::U16)
            .unwrap();
        assert_eq!(f.table(0).unwrap().len(), 65536);
        let src = Frame::new(1, 1);
        let mut dst = Frame::new(1, 1);
        assert!(matches!(
            f.apply(&src, &mut dst),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_value_filter() {
        let f = ValueCurveFilter::from_curve(Some(Curve::from_fn(|x| 255.0 - x)), BitDepth::U8);
        let src = Frame::filled(2, 1, [0, 100, 255]);
        let mut dst = Frame::new(2, 1);
        f.apply(&src, &mut dst).unwrap();
        assert_eq!(dst.pixel(0, 0), [255, 155, 0]);
    }

    #[test]
    fn test_absent_value_filter_leaves_destination() {
        let f = ValueCurveFilter::new(&[], BitDepth::U8).unwrap();
        let src = Frame::filled(2, 2, [9, 9, 9]);
        let mut dst = Frame::filled(2, 2, [4, 5, 6]);
        f.apply(&src, &mut dst).unwrap();
        assert_eq!(dst, Frame::filled(2, 2, [4, 5, 6]));
    }

    #[test]
    fn test_unsorted_points_rejected() {
        let bad = pts(&[(10, 0), (5, 9)]);
        assert!(matches!(
            ValueCurveFilter::new(&bad, BitDepth::U8),
            Err(OpsError::Curve(_))
        ));
    }
}
