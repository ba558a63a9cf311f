use approx::assert_relative_eq;
use statchart::api::{ChartSurface, ChartSurfaceConfig, NightScheme};
use statchart::core::{ChartModel, DrawingStyle, IndexRange, PointModel, Viewport};
use statchart::render::{Color, ElementId, NullRenderer, Renderer, ScenePrimitive};

fn series(name: &str, values: &[i64]) -> ChartModel {
    let data = values
        .iter()
        .enumerate()
        .map(|(index, value)| PointModel::new(*value, format!("d{index}")))
        .collect();
    ChartModel::new(name, Color::rgb(0.9, 0.3, 0.2), data)
}

fn models() -> Vec<ChartModel> {
    vec![
        series("joined", &[10, 50, 20, 80, 30, 90, 5]),
        series("left", &[5, 40, 15, 20, 10, 30, 2]),
    ]
}

fn main_surface() -> ChartSurface {
    let mut surface =
        ChartSurface::new(ChartSurfaceConfig::main(), Viewport::new(400.0, 300.0)).expect("init");
    surface.set_chart_models(models()).expect("models");
    surface.set_range(IndexRange::new(0.0, 3.0));
    surface
}

fn path_color(surface: &ChartSurface, index: usize) -> Option<Color> {
    match surface.scene().get(ElementId::Series(index))? {
        ScenePrimitive::Path(path) => path.stroke_color.or(path.fill_color),
        _ => None,
    }
}

fn run_to_rest(surface: &mut ChartSurface) -> usize {
    let mut ticks = 0;
    while surface.is_animating() {
        surface.tick();
        ticks += 1;
        assert!(ticks <= 1_000, "animation never settles");
    }
    ticks
}

#[test]
fn main_surface_targets_visible_window_maximum() {
    let mut surface = main_surface();
    assert_eq!(surface.current_max(), 50.0);
    assert!(!surface.is_animating());

    surface.set_range(IndexRange::new(2.0, 5.0));
    assert_eq!(surface.target_max(), 80.0);
    assert_eq!(surface.current_max(), 50.0);
    assert!(surface.is_animating());

    let ticks = run_to_rest(&mut surface);
    assert_eq!(ticks, 30);
    assert_eq!(surface.current_max(), 80.0);
}

#[test]
fn overview_surface_targets_overall_maximum() {
    let mut surface =
        ChartSurface::new(ChartSurfaceConfig::overview(), Viewport::new(300.0, 44.0))
            .expect("init");
    surface.set_chart_models(models()).expect("models");
    assert_eq!(surface.current_max(), 90.0);

    let layout = surface.horizontal_layout().expect("layout");
    assert_relative_eq!(layout.pitch, 50.0);
    assert!(
        !surface
            .scene()
            .iter()
            .any(|(id, _)| matches!(id, ElementId::GridLine { .. }))
    );
}

#[test]
fn mapped_points_follow_the_plot_margins() {
    let surface = main_surface();
    let points = surface.mapped_points(0);
    assert_eq!(points.len(), 7);
    assert_relative_eq!(points[0].x, 0.0);
    assert_relative_eq!(points[2].x, 400.0);
    // plot height 220, gap 50 * 0.95
    assert_relative_eq!(
        points[1].y,
        40.0 + 220.0 * (1.0 - 1.0 / 0.95),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        points[0].y,
        40.0 + 220.0 * (1.0 - 10.0 / 47.5),
        epsilon = 1e-9
    );
}

#[test]
fn grid_labels_show_line_values() {
    let surface = main_surface();
    let label = match surface.scene().get(ElementId::GridLabel {
        slot: 0,
        outgoing: false,
    }) {
        Some(ScenePrimitive::Text(text)) => text.text.clone(),
        other => panic!("unexpected grid label slot: {other:?}"),
    };
    assert_eq!(label, "47");
    assert!(surface.scene().contains(ElementId::GridLine {
        slot: 5,
        outgoing: false
    }));
}

#[test]
fn restyle_updates_slots_in_place() {
    let mut surface = main_surface();
    let before = surface.scene().len();
    surface.set_color_scheme(&NightScheme).expect("scheme");

    let stats = surface.scene().stats();
    assert_eq!(stats.created, 0);
    assert_eq!(stats.removed, 0);
    // Series keep their own colors; only grid lines and labels are restyled.
    assert_eq!(stats.updated, before - surface.chart_models().len());
    assert_eq!(surface.scene().background(), surface.palette().background);
}

#[test]
fn outgoing_grid_slots_vanish_after_animation() {
    let mut surface = main_surface();
    surface.set_range(IndexRange::new(2.0, 5.0));
    surface.tick();
    assert!(surface.scene().contains(ElementId::GridLine {
        slot: 0,
        outgoing: true
    }));

    run_to_rest(&mut surface);
    assert!(
        !surface
            .scene()
            .iter()
            .any(|(id, _)| matches!(id, ElementId::GridLine { outgoing: true, .. }))
    );
}

#[test]
fn hiding_series_fades_it_out_and_rescales() {
    let mut surface = main_surface();
    surface.set_range(IndexRange::new(0.0, 7.0));
    run_to_rest(&mut surface);
    assert_eq!(surface.current_max(), 90.0);

    surface.set_series_hidden(0, true).expect("hide");
    assert_eq!(surface.target_max(), 40.0);
    surface.tick();
    let fading = path_color(&surface, 0).expect("series slot");
    assert!(fading.alpha < 1.0 && fading.alpha > 0.0);

    run_to_rest(&mut surface);
    assert_eq!(surface.chart_models()[0].opacity, 0.0);
    assert_eq!(path_color(&surface, 0).map(|color| color.alpha), Some(0.0));
    assert_eq!(surface.current_max(), 40.0);

    surface.set_series_hidden(0, false).expect("show");
    run_to_rest(&mut surface);
    assert_eq!(surface.chart_models()[0].opacity, 1.0);
}

#[test]
fn stacked_style_fills_series() {
    let mut surface = main_surface();
    surface
        .set_config(ChartSurfaceConfig::main().with_drawing_style(DrawingStyle::Stacked))
        .expect("config");
    match surface.scene().get(ElementId::Series(1)) {
        Some(ScenePrimitive::Path(path)) => {
            assert!(path.fill_color.is_some());
            assert!(path.stroke_color.is_none());
            assert!(path.outline.closed);
            assert_eq!(path.outline.first().map(|p| p.y), Some(260.0));
        }
        other => panic!("unexpected series slot: {other:?}"),
    }
}

#[test]
fn removed_series_drop_their_slots() {
    let mut surface = main_surface();
    assert!(surface.scene().contains(ElementId::Series(1)));
    surface
        .set_chart_models(vec![series("joined", &[10, 50, 20, 80])])
        .expect("models");
    assert!(surface.scene().contains(ElementId::Series(0)));
    assert!(!surface.scene().contains(ElementId::Series(1)));
}

#[test]
fn degenerate_inputs_produce_empty_scene() {
    let mut surface =
        ChartSurface::new(ChartSurfaceConfig::main(), Viewport::new(0.0, 300.0)).expect("init");
    surface.set_chart_models(models()).expect("models");
    surface.set_range(IndexRange::new(0.0, 3.0));
    assert!(surface.scene().is_empty());
    assert!(surface.horizontal_layout().is_none());

    let mut overview =
        ChartSurface::new(ChartSurfaceConfig::overview(), Viewport::new(300.0, 44.0))
            .expect("init");
    overview.set_chart_models(Vec::new()).expect("models");
    assert!(overview.scene().is_empty());
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut surface = main_surface();
    let range = surface.range();
    surface.set_range(IndexRange::new(4.0, 4.0));
    assert_eq!(surface.range(), range);

    assert!(surface.set_series_hidden(9, true).is_err());
    assert!(
        surface
            .set_chart_models(vec![series("negative", &[1, -2, 3])])
            .is_err()
    );
    assert!(
        ChartSurface::new(
            ChartSurfaceConfig::main().with_headroom(0.0),
            Viewport::new(400.0, 300.0)
        )
        .is_err()
    );
}

#[test]
fn surface_frame_renders_headless() {
    let surface = main_surface();
    let mut renderer = NullRenderer::default();
    renderer.render(&surface.frame()).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_path_count, 2);
    assert_eq!(renderer.last_line_count, 6);
    assert_eq!(renderer.last_text_count, 6);
}
