use criterion::{Criterion, criterion_group, criterion_main};
use statchart::api::{ChartPanel, ChartPanelConfig};
use statchart::core::{
    ChartModel, DrawingStyle, HorizontalLayout, IndexRange, PointModel, VerticalScale,
    VerticalScaleAnimator, Viewport, map_points,
};
use statchart::interaction::SliderGesture;
use statchart::render::{Color, NullRenderer};
use std::hint::black_box;

fn generated_series(name: &str, len: i64, seed: i64) -> ChartModel {
    let data = (0..len)
        .map(|i| PointModel::new((i * 37 + seed) % 5_000 + 100, format!("d{i}")))
        .collect();
    ChartModel::new(name, Color::rgb(0.2, 0.5, 0.9), data)
}

fn bench_map_points_10k(c: &mut Criterion) {
    let model = generated_series("bench", 10_000, 7);
    let layout =
        HorizontalLayout::for_visible_range(IndexRange::new(0.0, 10_000.0), 1920.0).expect("layout");
    let scale = VerticalScale::new(0.0, 5_100.0, 0.95);

    c.bench_function("map_points_10k", |b| {
        b.iter(|| {
            let _ = map_points(
                black_box(&model.data),
                black_box(layout),
                black_box(scale),
                black_box(1080.0),
            );
        })
    });
}

fn bench_scale_animation_full_run(c: &mut Criterion) {
    c.bench_function("scale_animation_full_run", |b| {
        b.iter(|| {
            let mut animator = VerticalScaleAnimator::default();
            animator.set_target(black_box(1_000.0));
            animator.set_target(black_box(4_000.0));
            while animator.is_animating() {
                animator.tick();
                let _ = animator.grid_lines(0.95, 1080.0);
            }
        })
    });
}

fn bench_stacked_path_10k(c: &mut Criterion) {
    let model = generated_series("bench", 10_000, 3);
    let layout = HorizontalLayout::for_overview(10_000, 1920.0).expect("layout");
    let points = map_points(
        &model.data,
        layout,
        VerticalScale::new(0.0, 5_100.0, 1.1),
        200.0,
    );
    let viewport = Viewport::new(1920.0, 200.0);

    c.bench_function("stacked_path_10k", |b| {
        b.iter(|| {
            let _ = DrawingStyle::Stacked.create_path(
                black_box(&points),
                black_box(layout.pitch),
                black_box(viewport),
            );
        })
    });
}

fn bench_panel_drag_frame(c: &mut Criterion) {
    let mut panel = ChartPanel::new(
        NullRenderer::default(),
        ChartPanelConfig::default(),
        Viewport::new(1280.0, 720.0),
    )
    .expect("panel init");
    panel
        .set_chart_models(vec![
            generated_series("a", 2_000, 1),
            generated_series("b", 2_000, 911),
        ])
        .expect("models");
    panel.handle_gesture(SliderGesture::Began { x: 60.0 });

    let mut translation_x = 0.0;
    c.bench_function("panel_drag_frame_2k", |b| {
        b.iter(|| {
            translation_x = (translation_x + 3.0) % 600.0;
            let _ = panel.handle_gesture(SliderGesture::Moved {
                translation_x: black_box(translation_x),
            });
            panel.tick();
            panel.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_map_points_10k,
    bench_scale_animation_full_run,
    bench_stacked_path_10k,
    bench_panel_drag_frame
);
criterion_main!(benches);
