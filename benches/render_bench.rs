use criterion::{Criterion, black_box, criterion_group, criterion_main};
use epd_ticker::{
    ChartLayout, EpdSurface, OhlcBar, RecordingSurface, Timespan, plan_chart, render_update,
};

fn sample_bars(count: usize) -> Vec<OhlcBar> {
    (0..count)
        .map(|i| {
            let base = 180.0 + (i as f64 * 0.7).sin() * 6.0;
            OhlcBar::new(base, base + 2.5, base - 1.75, base + 0.8)
        })
        .collect()
}

fn bench_plan(c: &mut Criterion) {
    let bars = sample_bars(15);
    let layout = ChartLayout::EPD_2IN9;

    c.bench_function("plan_chart_15", |b| {
        b.iter(|| plan_chart(black_box(&bars), &layout))
    });
}

fn bench_render(c: &mut Criterion) {
    let bars = sample_bars(15);
    let layout = ChartLayout::EPD_2IN9;

    c.bench_function("render_update_recording_15", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            render_update(&mut surface, black_box(&bars), "AAPL", Timespan::Day, &layout).unwrap()
        })
    });

    c.bench_function("render_update_framebuffer_15", |b| {
        b.iter(|| {
            let mut surface = EpdSurface::for_layout(&layout);
            render_update(&mut surface, black_box(&bars), "AAPL", Timespan::Day, &layout).unwrap()
        })
    });
}

criterion_group!(benches, bench_plan, bench_render);
criterion_main!(benches);
