use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use statchart::ChartError;
use statchart::api::{
    CHART_PANEL_CONFIG_JSON_SCHEMA_V1, ChartPanel, ChartPanelConfig, ColorScheme, NightScheme,
};
use statchart::core::{ChartModel, DrawingStyle, PointModel, Viewport};
use statchart::interaction::{SliderEvent, SliderGesture};
use statchart::render::{Color, ElementId, HandleSide, NullRenderer, ScenePrimitive};

fn series(name: &str, color: &str, seed: i64) -> ChartModel {
    let data = (0..31)
        .map(|day| PointModel::new((day * 7 + seed) % 53 + 1, format!("Nov {}", day + 1)))
        .collect();
    ChartModel::new(name, Color::from_hex(color).expect("color"), data)
}

fn panel() -> ChartPanel<NullRenderer> {
    let mut panel = ChartPanel::new(
        NullRenderer::default(),
        ChartPanelConfig::default(),
        Viewport::new(400.0, 400.0),
    )
    .expect("panel init");
    panel
        .set_chart_models(vec![
            series("joined", "#3CC23F", 3),
            series("left", "#F34C44", 11),
        ])
        .expect("models");
    panel
}

#[test]
fn regions_split_main_chart_and_overview_strip() {
    let panel = panel();
    let regions = panel.regions();
    assert_eq!(regions.main, Viewport::new(400.0, 340.0));
    assert_eq!(regions.overview, Viewport::new(368.0, 44.0));
    assert_eq!(regions.overview_origin.x, 16.0);
    assert_eq!(regions.overview_origin.y, 356.0);
    assert_eq!(regions.slider_origin.y, 356.0);
    assert_eq!(panel.main().viewport(), regions.main);
}

#[test]
fn initial_selection_drives_main_range() {
    let panel = panel();
    let range = panel.visible_range();
    assert_eq!(range, panel.slider_view().slider().range());
    assert_eq!(range.start, 0.0);
    assert_relative_eq!(range.end, 90.0 / (368.0 / 30.0) + 1.0);
    assert!(panel.main().horizontal_layout().is_some());
}

#[test]
fn slider_drag_moves_main_window() {
    let mut panel = panel();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    panel.add_slider_observer(move |event: SliderEvent| sink.borrow_mut().push(event));

    assert!(panel.handle_gesture(SliderGesture::Began { x: 61.0 }).is_none());
    let committed = panel
        .handle_gesture(SliderGesture::Moved {
            translation_x: 100.0,
        })
        .expect("committed");
    panel.handle_gesture(SliderGesture::Ended);

    assert_eq!(panel.visible_range(), committed);
    assert_relative_eq!(committed.start, 100.0 / (368.0 / 30.0));
    assert_eq!(events.borrow().len(), 3);

    match panel
        .slider_view()
        .scene()
        .get(ElementId::Handle(HandleSide::Left))
    {
        Some(ScenePrimitive::Rect(rect)) => assert_eq!(rect.x, 116.0),
        other => panic!("unexpected handle slot: {other:?}"),
    }
}

#[test]
fn tick_settles_main_scale_after_range_change() {
    let mut panel = panel();
    panel.handle_gesture(SliderGesture::Began { x: 61.0 });
    panel.handle_gesture(SliderGesture::Moved {
        translation_x: 200.0,
    });
    panel.handle_gesture(SliderGesture::Ended);

    let mut frames = 0;
    while panel.tick() {
        frames += 1;
        assert!(frames <= 31);
    }
    assert!(!panel.is_animating());
    assert_eq!(panel.main().current_max(), panel.main().target_max());
}

#[test]
fn render_emits_all_three_layers() {
    let mut panel = panel();
    panel.render().expect("render");
    let frame = panel.frame();
    assert_eq!(frame.layers.len(), 3);

    drop(frame);
    let renderer = panel.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_path_count, 4);
    assert_eq!(renderer.last_rect_count, 4);
    assert_eq!(renderer.last_line_count, 6 + 6);
    assert_eq!(renderer.last_text_count, 6);
}

#[test]
fn toggling_series_reaches_both_charts() {
    let mut panel = panel();
    assert!(panel.toggle_series(1).expect("toggle"));
    assert!(panel.main().chart_models()[1].is_hidden);
    assert!(panel.overview().chart_models()[1].is_hidden);
    assert!(panel.is_animating());

    while panel.tick() {}
    assert_eq!(panel.overview().chart_models()[1].opacity, 0.0);
    assert!(!panel.toggle_series(1).expect("toggle back"));

    let err = panel.toggle_series(5).expect_err("out of range");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn color_scheme_switch_restyles_every_part() {
    let mut panel = panel();
    panel.set_color_scheme(&NightScheme).expect("scheme");
    let night = NightScheme.palette();

    assert_eq!(panel.main().palette(), night);
    assert_eq!(panel.overview().palette(), night);
    assert_eq!(panel.frame().background, night.background);
    match panel
        .slider_view()
        .scene()
        .get(ElementId::Handle(HandleSide::Right))
    {
        Some(ScenePrimitive::Rect(rect)) => assert_eq!(rect.fill_color, night.slider_thumb),
        other => panic!("unexpected handle slot: {other:?}"),
    }
}

#[test]
fn resize_keeps_selection_inside_narrower_track() {
    let mut panel = panel();
    panel.handle_gesture(SliderGesture::Began { x: 61.0 });
    panel.handle_gesture(SliderGesture::Moved {
        translation_x: 250.0,
    });
    panel.handle_gesture(SliderGesture::Ended);

    panel.resize(Viewport::new(300.0, 400.0));
    let slider = panel.slider_view().slider();
    assert!(slider.offset() + slider.width() <= slider.track_width());
    assert_eq!(panel.visible_range(), slider.range());
    assert_eq!(panel.main().viewport().width, 300.0);
}

#[test]
fn config_json_contract_round_trips() {
    let config = ChartPanelConfig::default().with_spacing(8.0);
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {CHART_PANEL_CONFIG_JSON_SCHEMA_V1}"
    )));
    assert_eq!(
        ChartPanelConfig::from_json_compat_str(&json).expect("parse"),
        config
    );

    let bare = ChartPanelConfig::from_json_compat_str(r#"{ "overview_height": 60.0 }"#)
        .expect("bare config");
    assert_eq!(bare.overview_height, 60.0);
    assert_eq!(bare.spacing, 16.0);
}

#[test]
fn invalid_config_is_rejected() {
    let unsupported = r#"{ "schema_version": 9, "config": {} }"#;
    assert!(ChartPanelConfig::from_json_compat_str(unsupported).is_err());

    let swapped = ChartPanelConfig {
        main: ChartPanelConfig::default().overview,
        ..ChartPanelConfig::default()
    };
    let err = ChartPanel::new(NullRenderer::default(), swapped, Viewport::new(400.0, 400.0))
        .expect_err("swapped modes");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn set_config_applies_drawing_style() {
    let mut panel = panel();
    let mut config = panel.config();
    config.main = config.main.with_drawing_style(DrawingStyle::Stacked);
    panel.set_config(config).expect("config");
    match panel.main().scene().get(ElementId::Series(0)) {
        Some(ScenePrimitive::Path(path)) => assert!(path.fill_color.is_some()),
        other => panic!("unexpected series slot: {other:?}"),
    }
}
