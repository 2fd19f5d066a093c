//! Rasterized chart checks on the framebuffer surface

use epd_ticker::{ChartLayout, Color, EpdSurface, Framebuffer, OhlcBar, Timespan, render_update};

fn two_sessions() -> Vec<OhlcBar> {
    vec![
        OhlcBar::new(150.0, 155.0, 148.0, 152.0),
        OhlcBar::new(152.0, 160.0, 151.0, 158.0),
    ]
}

fn rendered() -> EpdSurface {
    let layout = ChartLayout::EPD_2IN9;
    let mut surface = EpdSurface::for_layout(&layout);
    render_update(&mut surface, &two_sessions(), "AAPL", Timespan::Day, &layout).unwrap();
    surface
}

fn ink_in(frame: &Framebuffer, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>) -> usize {
    let mut count = 0;
    for y in ys {
        for x in xs.clone() {
            if frame.pixel(x, y) == Some(Color::Black) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_candles_rasterized() {
    let surface = rendered();
    let frame = surface.committed();

    // Older candle: outlined body from row 22, wick from row 0 through 95
    assert_eq!(frame.pixel(0, 22), Some(Color::Black));
    assert_eq!(frame.pixel(10, 22), Some(Color::Black));
    assert_eq!(frame.pixel(2, 50), Some(Color::White));
    assert_eq!(frame.pixel(5, 0), Some(Color::Black));
    assert_eq!(frame.pixel(5, 95), Some(Color::Black));
    assert_eq!(frame.pixel(5, 96), Some(Color::White));

    // Newer candle: body rows 86..=106, wick rows 54..=127
    assert_eq!(frame.pixel(12, 86), Some(Color::Black));
    assert_eq!(frame.pixel(22, 106), Some(Color::Black));
    assert_eq!(frame.pixel(14, 95), Some(Color::White));
    assert_eq!(frame.pixel(17, 54), Some(Color::Black));
    assert_eq!(frame.pixel(17, 53), Some(Color::White));
}

#[test]
fn test_text_lands_near_its_anchors() {
    let surface = rendered();
    let frame = surface.committed();

    assert!(ink_in(frame, 24..130, 0..10) > 0, "Highest label missing");
    assert!(ink_in(frame, 24..130, 120..128) > 0, "Lowest label missing");
    assert!(ink_in(frame, 180..230, 30..51) > 0, "ticker missing");
    assert!(ink_in(frame, 180..200, 55..65) > 0, "unit missing");

    // Nothing drawn between the last candle and the labels' columns
    assert_eq!(ink_in(frame, 23..24, 0..128), 0);
}

#[test]
fn test_update_commits_five_frames() {
    let surface = rendered();
    assert_eq!(surface.commit_count(), 5);
    assert_eq!(surface.frame(), surface.committed());
}

#[test]
fn test_rerender_is_identical() {
    let first = rendered();
    let second = rendered();
    assert_eq!(first.committed().to_ascii(), second.committed().to_ascii());
}

#[test]
fn test_flat_prices_draw_a_line_at_mid_panel() {
    let mut surface = EpdSurface::default();
    let bars = vec![OhlcBar::new(42.0, 42.0, 42.0, 42.0); 2];
    render_update(&mut surface, &bars, "FLAT", Timespan::Day, &ChartLayout::EPD_2IN9).unwrap();

    let frame = surface.committed();
    assert_eq!(ink_in(frame, 0..11, 64..65), 11);
    assert_eq!(ink_in(frame, 12..23, 64..65), 11);
    assert_eq!(ink_in(frame, 0..23, 20..60), 0);
}

#[cfg(feature = "png-export")]
#[test]
fn test_png_snapshot_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("chart.png");

    let surface = rendered();
    surface.save_png(&path).unwrap();

    let snapshot = image::open(&path).unwrap().to_luma8();
    assert_eq!(snapshot.dimensions(), (296, 128));
    assert_eq!(snapshot.get_pixel(0, 22).0, [0]);
    assert_eq!(snapshot.get_pixel(2, 50).0, [255]);
}
