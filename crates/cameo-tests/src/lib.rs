//! Integration tests for cameo crates.
//!
//! End-to-end checks of the frame pipeline across crate boundaries:
//! curves into filters, filters into the session, the session into files.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cameo_cli::{Cameo, CaptureManager, ManualClock, NoKeys, ScriptedKeys, SessionConfig, WindowManager};
    use cameo_core::{BitDepth, Frame};
    use cameo_curve::{ControlPoint, Curve, LookupTable};
    use cameo_io::{Codec, MemorySink, PngSequenceSink, SequenceSource, StillSource, png};
    use cameo_ops::curves::ValueCurveFilter;
    use cameo_ops::presets::CurvePreset;
    use cameo_ops::stroke::EdgeStroke;
    use cameo_ops::{FilterId, FilterSelector, OpsError};
    use tempfile::tempdir;

    fn checker(w: u32, h: u32) -> Frame {
        let mut f = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = if (x / 4 + y / 4) % 2 == 0 { 40 } else { 210 };
                f.set_pixel(x, y, [v, v / 2, 255 - v]);
            }
        }
        f
    }

    /// Flat frames have no edges, so the stroke leaves them untouched and
    /// the curve filter reduces to a per-channel table lookup.
    #[test]
    fn test_flat_frame_pipeline() {
        let px = [90u8, 140, 200];
        let mut frame = Frame::filled(16, 12, px);
        EdgeStroke::default().apply_in_place(&mut frame).unwrap();
        assert_eq!(frame, Frame::filled(16, 12, px));

        let filter = CurvePreset::Velvia.build(BitDepth::U8).unwrap();
        let expected: Vec<u8> = (0..3)
            .map(|c| match filter.table(c) {
                Some(t) => t.get(px[c] as usize).unwrap() as u8,
                None => px[c],
            })
            .collect();

        let sel = FilterSelector::new(BitDepth::U8, FilterId::Velvia).unwrap();
        sel.apply_active(&mut frame).unwrap();
        assert_eq!(frame.pixel(5, 5).to_vec(), expected);
        assert_eq!(frame.pixel(0, 11).to_vec(), expected);
    }

    #[test]
    fn test_preset_tables_cover_every_level() {
        for preset in CurvePreset::ALL {
            let filter = preset.build(BitDepth::U8).unwrap();
            for c in 0..3 {
                let table = filter
                    .table(c)
                    .unwrap_or_else(|| panic!("{} channel {c} has no table", preset.label()));
                assert_eq!(table.len(), 256, "{} channel {c}", preset.label());
            }
        }
    }

    #[test]
    fn test_value_curve_from_function() {
        let gamma = Curve::from_fn(|x| 255.0 * (x / 255.0).powf(0.5));
        let table = LookupTable::build(Some(&gamma), 256).unwrap();
        approx::assert_relative_eq!(gamma.evaluate(64.0), (64.0f64 * 255.0).sqrt(), epsilon = 1e-9);
        assert_eq!(table.get(64), Some(127));

        let filter = ValueCurveFilter::from_curve(Some(gamma), BitDepth::U8);
        let mut frame = Frame::filled(3, 3, [0, 64, 255]);
        filter.apply_in_place(&mut frame).unwrap();
        assert_eq!(frame.pixel(1, 1), [0, 127, 255]);

        let points = [ControlPoint::new(0.0, 0.0), ControlPoint::new(255.0, 255.0)];
        let identity = ValueCurveFilter::new(&points, BitDepth::U8).unwrap();
        let src = checker(8, 8);
        let mut same = src.clone();
        identity.apply_in_place(&mut same).unwrap();
        assert_eq!(same, src);
    }

    #[test]
    fn test_selector_rejects_unknown_name() {
        let mut sel = FilterSelector::new(BitDepth::U8, FilterId::Sharpen).unwrap();
        assert!(matches!(sel.select("lomo"), Err(OpsError::UnknownFilter(name)) if name == "lomo"));
        assert_eq!(sel.active(), FilterId::Sharpen);
        assert_eq!(sel.select("Cross").unwrap(), FilterId::Cross);
    }

    /// Preview frames match the pipeline applied by hand, and filter keys
    /// take effect on the following cycle.
    #[test]
    fn test_session_preview_matches_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        let src = checker(16, 16);
        let mut paths = Vec::new();
        for i in 0..3 {
            let p = input.join(format!("f{i}.png"));
            png::write_frame(&p, &src).unwrap();
            paths.push(p);
        }

        let preview = dir.path().join("preview");
        let window = WindowManager::new(
            "Cameo",
            Box::new(PngSequenceSink::new(&preview, "preview").unwrap()),
            Box::new("5,none,esc".parse::<ScriptedKeys>().unwrap()),
        );
        let config = SessionConfig {
            mirror_preview: false,
            ..SessionConfig::default()
        };
        let source = SequenceSource::open(paths, 0.0).unwrap();
        let mut cameo = Cameo::new(window, CaptureManager::new(source, true), &config).unwrap();
        let summary = cameo.run().unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.active_filter, FilterId::Sharpen);

        let mut stroked = src.clone();
        EdgeStroke::default().apply_in_place(&mut stroked).unwrap();

        let mut portra = stroked.clone();
        FilterId::Portra.build(BitDepth::U8).unwrap().apply_in_place(&mut portra).unwrap();
        let mut sharpen = stroked.clone();
        FilterId::Sharpen.build(BitDepth::U8).unwrap().apply_in_place(&mut sharpen).unwrap();

        assert_eq!(png::read_frame(preview.join("preview_00000.png")).unwrap(), portra);
        assert_eq!(png::read_frame(preview.join("preview_00001.png")).unwrap(), sharpen);
        assert_eq!(png::read_frame(preview.join("preview_00002.png")).unwrap(), sharpen);
    }

    /// A source without a frame rate records nothing until the warmup count
    /// is reached, then opens the stream at the measured rate.
    #[test]
    fn test_deferred_screencast() {
        let dir = tempdir().unwrap();
        let cast = dir.path().join("cast.y4m");
        let clock = ManualClock::new();
        let still = StillSource::new(Frame::filled(6, 4, [0, 0, 255]), 0.0);
        let mut capture = CaptureManager::with_clock(still, true, Box::new(clock.clone()))
            .with_fps_warmup(20);
        capture.start_writing_video(&cast, Codec::I420).unwrap();

        let mut preview = MemorySink::new();
        for i in 0..25 {
            capture.enter_frame().unwrap();
            capture.exit_frame(Some(&mut preview)).unwrap();
            clock.advance(Duration::from_millis(40));
            assert_eq!(capture.is_video_open(), i >= 19, "cycle {i}");
        }
        assert_eq!(capture.video_frames_written(), 6);
        capture.stop_writing_video().unwrap();

        let bytes = std::fs::read(&cast).unwrap();
        let header = b"YUV4MPEG2 W6 H4 F25:1 Ip A1:1 C420jpeg\n";
        assert!(bytes.starts_with(header));
        let frame_len = 6 + 24 + 2 * 6;
        assert_eq!(bytes.len(), header.len() + 6 * frame_len);
        // pure red luma
        assert!(bytes[header.len() + 6..header.len() + 30].iter().all(|&y| y == 76));
        assert_eq!(preview.frames().len(), 25);
    }

    #[test]
    fn test_screenshot_key_writes_processed_frame() {
        let dir = tempdir().unwrap();
        let config = SessionConfig {
            initial_filter: "rc".into(),
            screenshot_path: dir.path().join("shot.png"),
            ..SessionConfig::default()
        };
        let frame = Frame::filled(8, 8, [100, 50, 10]);
        let window = WindowManager::new(
            "Cameo",
            Box::new(MemorySink::new()),
            Box::new("space".parse::<ScriptedKeys>().unwrap()),
        );
        let capture = CaptureManager::new(StillSource::new(frame, 30.0), true);
        let mut cameo = Cameo::new(window, capture, &config)
            .unwrap()
            .with_max_frames(2);
        let summary = cameo.run().unwrap();
        assert_eq!(summary.screenshots, 1);

        // RC: blue and green become their average, red stays
        let shot = png::read_frame(dir.path().join("shot.png")).unwrap();
        assert_eq!(shot.pixel(3, 3), [75, 75, 10]);
    }

    #[test]
    fn test_no_keys_runs_to_end_of_input() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("one.png");
        png::write_frame(&p, &Frame::filled(4, 4, [1, 2, 3])).unwrap();
        let window = WindowManager::new("Cameo", Box::new(MemorySink::new()), Box::new(NoKeys));
        let capture = CaptureManager::new(SequenceSource::open(vec![p], 0.0).unwrap(), false);
        let mut cameo = Cameo::new(window, capture, &SessionConfig::default()).unwrap();
        let summary = cameo.run().unwrap();
        assert_eq!((summary.cycles, summary.frames), (1, 1));
        assert!(!cameo.window().is_window_created());
    }
}
