//! End-to-end chart rendering against a recording surface
//!
//! Covers the full drawing walk: candle placement, label anchoring, the
//! degenerate-range fallback and the five-stage commit sequence.

use epd_ticker::{
    CandleBuilder, ChartError, ChartLayout, Color, DrawOp, FontId, OhlcBar, RecordingSurface,
    Timespan, ValueRange, plan_chart, render_update,
};

const LAYOUT: ChartLayout = ChartLayout::EPD_2IN9;

/// Newest first: bars[0] is the most recent session
fn two_sessions() -> Vec<OhlcBar> {
    vec![
        OhlcBar::new(150.0, 155.0, 148.0, 152.0),
        OhlcBar::new(152.0, 160.0, 151.0, 158.0),
    ]
}

#[test]
fn test_two_bar_chart_geometry() {
    let bars = two_sessions();
    let mut surface = RecordingSurface::new();
    let plan = render_update(&mut surface, &bars, "AAPL", Timespan::Day, &LAYOUT).unwrap();

    let range = ValueRange::from_bars(&bars);
    assert_eq!(range.min_val.value(), 148.0);
    assert_eq!(range.max_val.value(), 160.0);

    let builder = CandleBuilder::new(&range, LAYOUT).unwrap();
    let older_body_len = (builder.height_of(bars[1].open_price)
        - builder.height_of(bars[1].close_price))
    .abs() as i32;

    // Oldest bar on the left
    let rects = surface.rects();
    let vlines = surface.vlines();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0], (0, 22, 11, older_body_len));
    assert_eq!(vlines[0], (5, 0, 96));

    assert_eq!(rects[1], (12, 86, 11, 21));
    assert_eq!(vlines[1], (17, 54, 74));

    assert_eq!(plan.cursor.body_x, 24);
    assert_eq!(plan.cursor.wick_x, 29);
    assert!(!plan.degenerate);
}

#[test]
fn test_traversal_visits_oldest_first() {
    let bars = vec![
        OhlcBar::new(10.0, 12.0, 9.0, 11.0),
        OhlcBar::new(11.0, 13.0, 10.0, 12.0),
        OhlcBar::new(12.0, 14.0, 11.0, 13.0),
    ];
    let plan = plan_chart(&bars, &LAYOUT);

    let order: Vec<usize> = plan.candles.iter().map(|c| c.index).collect();
    assert_eq!(order, vec![2, 1, 0]);

    let body_xs: Vec<i32> = plan.candles.iter().map(|c| c.geometry.body.x).collect();
    assert_eq!(body_xs, vec![0, 12, 24]);

    let wick_xs: Vec<i32> = plan.candles.iter().map(|c| c.geometry.wick.x).collect();
    assert_eq!(wick_xs, vec![5, 17, 29]);
}

#[test]
fn test_labels_follow_the_last_candle() {
    let mut surface = RecordingSurface::new();
    render_update(&mut surface, &two_sessions(), "AAPL", Timespan::Day, &LAYOUT).unwrap();

    let printed = surface.printed();
    assert_eq!(printed.len(), 4);

    assert_eq!((printed[0].x, printed[0].y), (24, 0));
    assert_eq!(printed[0].text, "Highest: $160.00");
    assert_eq!((printed[1].x, printed[1].y), (24, 120));
    assert_eq!(printed[1].text, "Lowest : $148.00");
    assert_eq!(printed[0].font, FontId::Default);
    assert_eq!(printed[0].scale, 1);

    assert_eq!((printed[2].x, printed[2].y), (180, 50));
    assert_eq!(printed[2].text, "AAPL");
    assert_eq!(printed[2].font, FontId::SansBold);
    assert_eq!(printed[2].scale, 2);

    assert_eq!((printed[3].x, printed[3].y), (180, 55));
    assert_eq!(printed[3].text, "day");
    assert_eq!(printed[3].font, FontId::Default);
    assert_eq!(printed[3].scale, 1);
}

#[test]
fn test_flat_prices_draw_flat_candles() {
    let bars = vec![OhlcBar::new(100.0, 100.0, 100.0, 100.0); 3];
    let mut surface = RecordingSurface::new();
    let plan = render_update(&mut surface, &bars, "FLAT", Timespan::Day, &LAYOUT).unwrap();

    assert!(plan.degenerate);
    for (x, y, width, height) in surface.rects() {
        assert_eq!(y, 64);
        assert_eq!(width, 11);
        assert_eq!(height, 0);
        assert!(x % 12 == 0);
    }
    for (_, y, length) in surface.vlines() {
        assert_eq!((y, length), (64, 0));
    }

    let texts: Vec<String> = surface.printed().into_iter().map(|p| p.text).collect();
    assert_eq!(texts[0], "Highest: $100.00");
    assert_eq!(texts[1], "Lowest : $100.00");
    assert_eq!(surface.commit_count(), 5);
}

#[test]
fn test_candles_stay_inside_the_panel() {
    let bars: Vec<OhlcBar> = (0..15)
        .map(|i| {
            let base = 100.0 + f64::from(i) * 1.5;
            OhlcBar::new(base, base + 4.0, base - 3.0, base + 1.0)
        })
        .collect();
    let plan = plan_chart(&bars, &LAYOUT);

    for candle in &plan.candles {
        let body = candle.geometry.body;
        let wick = candle.geometry.wick;
        assert!(body.y >= 0 && body.y + body.height <= LAYOUT.panel_height + 1);
        assert!(wick.y >= 0 && wick.y + wick.length <= LAYOUT.panel_height + 1);
    }
    assert_eq!(plan.cursor.body_x, 15 * 12);
}

#[test]
fn test_commit_stages() {
    let mut surface = RecordingSurface::new();
    render_update(&mut surface, &two_sessions(), "AAPL", Timespan::Week, &LAYOUT).unwrap();

    assert_eq!(surface.commit_count(), 5);
    assert_eq!(surface.stage(1), &[DrawOp::Clear(Color::White)]);
    assert!(
        surface
            .stage(2)
            .iter()
            .all(|op| matches!(op, DrawOp::Rect { .. } | DrawOp::VLine { .. }))
    );
    assert!(surface.stage(3).contains(&DrawOp::Print("Lowest : $148.00".to_string())));
    assert!(surface.stage(4).contains(&DrawOp::Print("AAPL".to_string())));
    assert!(surface.stage(5).contains(&DrawOp::Print("week".to_string())));
}

#[test]
fn test_surface_fault_stops_the_update() {
    let mut surface = RecordingSurface::failing_on_commit(2);
    let err = render_update(&mut surface, &two_sessions(), "AAPL", Timespan::Day, &LAYOUT)
        .unwrap_err();

    assert!(matches!(err, ChartError::Surface { .. }));
    assert_eq!(surface.commit_count(), 1);
    assert!(surface.printed().is_empty());
}
