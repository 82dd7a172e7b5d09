// File: crates/grafico-core/tests/scenarios.rs
// Purpose: End-to-end chart construction for each chart type against a fixed host size.

use grafico_core::variants::{DrawContext, Overlays, PlotPoint};
use grafico_core::{
    AreaGraph, BBox, BarGraph, Chart, ChartError, ChartVariant, DataInput, Element, HostElement, LineGraph, Markers,
    ParallelCoordinatesGraph, PathCommand, Scene, Shape, StackGraph, Style, Surface, UserOptions,
};

fn host() -> HostElement {
    // RUST_LOG=debug shows the setup trace
    let _ = env_logger::builder().is_test(true).try_init();
    HostElement::sized(300.0, 200.0)
}

fn path_commands(e: &Element) -> &[PathCommand] {
    match &e.shape {
        Shape::Path(cmds) => cmds,
        _ => &[],
    }
}

/// Points of a path: every move/line/curve end point, in order.
fn path_points(e: &Element) -> Vec<(f64, f64)> {
    path_commands(e)
        .iter()
        .filter_map(|c| match *c {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => Some((x, y)),
            PathCommand::CurveTo(_, _, p) => Some(p),
            PathCommand::Close => None,
        })
        .collect()
}

/// The series path drawn in `colour` (line charts stroke with width 5).
fn series_path<'a>(scene: &'a Scene, colour: &str) -> &'a Element {
    scene
        .elements()
        .find(|e| {
            matches!(e.shape, Shape::Path(_))
                && e.style.stroke.as_deref() == Some(colour)
                && e.style.stroke_width == Some(5.0)
        })
        .expect("series path")
}

#[test]
fn single_line_series_spreads_edge_to_edge() {
    let chart = Chart::render(LineGraph, &host(), vec![1.0, 2.0, 3.0, 4.0, 5.0], UserOptions::default())
        .expect("line chart");

    let n = chart.normalised();
    assert_eq!(n.min, 1.0);
    assert_eq!(n.max, 5.0);

    let layout = chart.layout();
    assert_eq!(layout.data_size, 5);
    // one-character labels: 10px gap + 10px
    assert_eq!(layout.insets.left, 20.0);
    let expected_step = (layout.graph_width - 2.0 * layout.plot_padding) / 4.0;
    assert!((layout.step - expected_step).abs() < 1e-9);

    let colour = chart.options().colour_of("one").to_string();
    let points = path_points(series_path(chart.surface(), &colour));
    assert_eq!(points.len(), 5);
    for pair in points.windows(2) {
        assert!((pair[1].0 - pair[0].0 - expected_step).abs() < 1e-9);
        // rising data climbs the surface
        assert!(pair[1].1 < pair[0].1);
    }
    assert_eq!(points[0].0, layout.insets.left + layout.plot_padding);
}

#[test]
fn all_zero_series_has_no_focus_hint() {
    let chart = Chart::render(LineGraph, &host(), vec![0.0, 0.0, 0.0], UserOptions::default()).expect("zero chart");
    let n = chart.normalised();
    assert_eq!(n.start_value, 0.0);
    assert_eq!(n.zero_value, 0.0);

    // the focus hint is the only 2px stroke in label colour
    let label = chart.options().label_colour.clone();
    let hints = chart
        .surface()
        .elements()
        .filter(|e| e.style.stroke.as_deref() == Some(label.as_str()) && e.style.stroke_width == Some(2.0))
        .count();
    assert_eq!(hints, 0);
}

#[test]
fn offset_origin_draws_focus_hint() {
    let chart = Chart::render(LineGraph, &host(), vec![-23.0, 5.0, 40.0], UserOptions::default()).expect("chart");
    assert_ne!(chart.normalised().start_value, 0.0);
    let label = chart.options().label_colour.clone();
    let hint = chart
        .surface()
        .elements()
        .find(|e| e.style.stroke.as_deref() == Some(label.as_str()) && e.style.stroke_width == Some(2.0))
        .expect("focus hint");
    assert_eq!(path_points(hint).len(), 4);
}

#[test]
fn shorter_series_renders_its_own_points() {
    let data: DataInput = [("a", vec![1.0, 2.0, 3.0]), ("b", vec![1.0, 2.0])].into();
    let chart = Chart::render(LineGraph, &host(), data, UserOptions::default()).expect("chart");
    assert_eq!(chart.layout().data_size, 3);
    assert_eq!(chart.layout().series_count, 2);

    let a = chart.options().colour_of("a").to_string();
    let b = chart.options().colour_of("b").to_string();
    assert_ne!(a, b);
    assert_eq!(path_points(series_path(chart.surface(), &a)).len(), 3);
    assert_eq!(path_points(series_path(chart.surface(), &b)).len(), 2);
}

#[test]
fn single_colour_applies_to_every_series() {
    let data: DataInput = [("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])].into();
    let options = UserOptions { colour: Some("#ff0000".into()), ..Default::default() };
    let chart = Chart::render(LineGraph, &host(), data, options).expect("chart");
    assert_eq!(chart.options().colour_of("a"), "#ff0000");
    assert_eq!(chart.options().colour_of("b"), "#ff0000");
}

#[test]
fn missing_or_zero_size_is_a_configuration_error() {
    let err = Chart::render(LineGraph, &HostElement::default(), vec![1.0, 2.0], UserOptions::default());
    assert!(matches!(err, Err(ChartError::Configuration(_))));

    let err = Chart::render(LineGraph, &HostElement::sized(0.0, 0.0), vec![1.0, 2.0], UserOptions::default());
    assert!(matches!(err, Err(ChartError::Configuration(_))));

    // size from options rescues a host without one
    let sized = UserOptions { width: Some(300.0), height: Some(200.0), ..Default::default() };
    assert!(Chart::render(LineGraph, &HostElement::default(), vec![1.0, 2.0], sized).is_ok());
}

#[test]
fn degenerate_data_is_rejected() {
    let err = Chart::render(LineGraph, &host(), vec![1.0], UserOptions::default());
    assert!(matches!(err, Err(ChartError::InvalidInput(_))));
    let err = Chart::render(LineGraph, &host(), vec![1.0, f64::NAN], UserOptions::default());
    assert!(matches!(err, Err(ChartError::InvalidInput(_))));
}

struct Bare;

impl ChartVariant for Bare {
    fn name(&self) -> &'static str {
        "bare"
    }
}

struct NoStep;

impl ChartVariant for NoStep {
    fn name(&self) -> &'static str {
        "nostep"
    }

    fn chart_defaults(&self) -> grafico_core::Result<UserOptions> {
        Ok(UserOptions::default())
    }
}

struct NoPoint;

impl ChartVariant for NoPoint {
    fn name(&self) -> &'static str {
        "nopoint"
    }

    fn chart_defaults(&self) -> grafico_core::Result<UserOptions> {
        Ok(UserOptions::default())
    }

    fn step_size(&self, _layout: &grafico_core::Layout) -> grafico_core::Result<f64> {
        Ok(10.0)
    }
}

#[test]
fn incomplete_variants_fail_at_construction() {
    let hook = |r: grafico_core::Result<()>| match r {
        Err(ChartError::NotImplemented { hook, .. }) => hook,
        other => panic!("expected NotImplemented, got {other:?}"),
    };
    let data = || vec![1.0, 2.0, 3.0];
    assert_eq!(hook(Chart::render(Bare, &host(), data(), UserOptions::default()).map(|_| ())), "chart_defaults");
    assert_eq!(hook(Chart::render(NoStep, &host(), data(), UserOptions::default()).map(|_| ())), "step_size");
    assert_eq!(hook(Chart::render(NoPoint, &host(), data(), UserOptions::default()).map(|_| ())), "draw_point");
}

#[test]
fn stacking_keeps_original_values_for_markers() {
    let data: DataInput = [("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])].into();
    let options = UserOptions { markers: Some(Markers::Value), ..Default::default() };
    let chart = Chart::render(StackGraph, &host(), data, options).expect("stacked chart");

    assert_eq!(chart.original().get("b").unwrap(), &[3.0, 4.0]);
    assert_eq!(chart.plotted().get("b").unwrap(), &[4.0, 6.0]);
    assert_eq!(chart.normalised().max, 6.0);

    let scene = chart.surface();
    let mut marker_texts: Vec<String> = chart
        .overlays()
        .markers
        .ids()
        .iter()
        .filter_map(|&id| match &scene.element(id)?.shape {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect();
    marker_texts.sort();
    assert_eq!(marker_texts, vec!["1", "2", "3", "4"]);

    // top series is painted first so the bottom layer stays on top
    let a = chart.options().colour_of("a").to_string();
    let b = chart.options().colour_of("b").to_string();
    let z = |colour: &str| {
        scene
            .elements()
            .position(|e| matches!(e.shape, Shape::Path(_)) && e.style.fill.as_deref() == Some(colour))
            .expect("filled series")
    };
    assert!(z(&b) < z(&a));
}

#[test]
fn area_closes_onto_baseline() {
    let chart = Chart::render(AreaGraph, &host(), vec![2.0, 4.0, 3.0], UserOptions::default()).expect("area chart");
    let colour = chart.options().colour_of("one").to_string();
    let area = chart
        .surface()
        .elements()
        .find(|e| e.style.fill.as_deref() == Some(colour.as_str()))
        .expect("area path");
    assert_eq!(area.style.fill_opacity, Some(1.5));
    assert_eq!(area.style.stroke_width, Some(0.0));

    let baseline = chart.scale().baseline;
    let points = path_points(area);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0].1, baseline);
    assert_eq!(points[4].1, baseline);
    assert_eq!(points[0].0, points[1].0);
    assert_eq!(path_commands(area).last(), Some(&PathCommand::Close));
}

#[test]
fn bars_rise_from_the_zero_line() {
    let chart = Chart::render(BarGraph::default(), &host(), vec![1.0, 2.0, 3.0], UserOptions::default())
        .expect("bar chart");
    assert_eq!(chart.options().plot_padding, 0.0);
    assert_eq!(chart.normalised().start_value, 0.0);
    let layout = chart.layout();
    assert!((layout.step - layout.graph_width / 3.0).abs() < 1e-9);

    let colour = chart.options().colour_of("one").to_string();
    let bars = chart
        .surface()
        .elements()
        .find(|e| matches!(e.shape, Shape::Path(_)) && e.style.fill.as_deref() == Some(colour.as_str()))
        .expect("bar path");
    let closes = path_commands(bars).iter().filter(|c| **c == PathCommand::Close).count();
    assert_eq!(closes, 3);

    let zero = chart.scale().zero_line();
    let points = path_points(bars);
    assert_eq!(points[0].1, zero);
    assert!(points[1].1 < zero);
}

#[test]
fn parallel_coordinates_scale_each_axis() {
    let data: DataInput = [("a", vec![1.0, 10.0, 100.0]), ("b", vec![3.0, 20.0, 50.0])].into();
    let chart = Chart::render(ParallelCoordinatesGraph::default(), &host(), data, UserOptions::default())
        .expect("parallel chart");
    assert!(!chart.options().grid);

    let axes = chart.variant().axes();
    assert_eq!(axes.len(), 3);
    assert_eq!((axes[2].min, axes[2].max), (50.0, 100.0));

    let scale = chart.scale();
    let top = scale.baseline - scale.plot_height;
    let colour = chart.options().colour_of("a").to_string();
    let a = chart
        .surface()
        .elements()
        .find(|e| e.style.stroke.as_deref() == Some(colour.as_str()) && e.style.stroke_width == Some(2.0))
        .expect("series a");
    let ys: Vec<f64> = path_points(a).into_iter().map(|p| p.1).collect();
    assert_eq!(ys, vec![scale.baseline, scale.baseline, top]);
}

#[test]
fn mean_line_sits_at_the_mean() {
    let options = UserOptions::from_json(r#"{"meanline": true}"#).unwrap();
    let chart = Chart::render(LineGraph, &host(), vec![1.0, 2.0, 3.0, 4.0, 5.0], options).expect("chart");
    let mean = chart
        .surface()
        .elements()
        .find(|e| e.style.stroke.as_deref() == Some("#BBBBBB"))
        .expect("mean line");
    let y = chart.scale().y(3.0);
    assert!(path_points(mean).iter().all(|p| p.1 == y));
}

/// Line chart that outlines its second point with a highlight block.
struct Highlighted;

impl ChartVariant for Highlighted {
    fn name(&self) -> &'static str {
        "highlighted"
    }

    fn chart_defaults(&self) -> grafico_core::Result<UserOptions> {
        LineGraph.chart_defaults()
    }

    fn step_size(&self, layout: &grafico_core::Layout) -> grafico_core::Result<f64> {
        LineGraph.step_size(layout)
    }

    fn draw_point(
        &self,
        ctx: &DrawContext<'_>,
        point: &PlotPoint<'_>,
        surface: &mut dyn Surface,
        overlays: &mut Overlays,
    ) -> grafico_core::Result<()> {
        LineGraph.draw_point(ctx, point, surface, overlays)?;
        if point.index == 1 {
            let bbox = BBox::new(point.at.x - 4.0, point.at.y - 4.0, 8.0, 8.0);
            let block = surface.rect(bbox, 0.0, Style::new().fill("#ffff00").stroke("none"));
            overlays.blocks.push(block);
        }
        Ok(())
    }
}

#[test]
fn highlight_blocks_are_raised_above_markers() {
    let options = UserOptions { markers: Some(Markers::Circle), ..Default::default() };
    let chart = Chart::render(Highlighted, &host(), vec![1.0, 4.0, 2.0], options).expect("chart");

    let blocks = chart.overlays().blocks.ids();
    assert_eq!(blocks.len(), 1);
    assert!(!chart.overlays().markers.ids().is_empty());
    let last = chart.surface().elements().last().expect("elements");
    assert_eq!(last.id, blocks[0]);
}

#[test]
fn leading_baseline_run_is_dropped_when_not_starting_at_zero() {
    let options = UserOptions { start_at_zero: Some(false), ..Default::default() };
    let chart = Chart::render(LineGraph, &host(), vec![0.0, 0.0, 0.0, 5.0, 6.0], options).expect("chart");
    let colour = chart.options().colour_of("one").to_string();
    let points = path_points(series_path(chart.surface(), &colour));
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, chart.scale().x(3));
}

#[test]
fn single_leading_baseline_point_is_kept() {
    let options = UserOptions { start_at_zero: Some(false), ..Default::default() };
    let chart = Chart::render(LineGraph, &host(), vec![0.0, 5.0, 6.0], options).expect("chart");
    let colour = chart.options().colour_of("one").to_string();
    let points = path_points(series_path(chart.surface(), &colour));
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].1, chart.scale().baseline);
}

#[test]
fn curve_amount_smooths_segments() {
    let options = UserOptions { curve_amount: Some(0.5), ..Default::default() };
    let chart = Chart::render(LineGraph, &host(), vec![1.0, 3.0, 2.0], options).expect("chart");
    let colour = chart.options().colour_of("one").to_string();
    let cmds = path_commands(series_path(chart.surface(), &colour));

    assert!(matches!(cmds[0], PathCommand::MoveTo(..)));
    let curves: Vec<_> = cmds[1..]
        .iter()
        .filter_map(|c| match *c {
            PathCommand::CurveTo(c1, c2, to) => Some((c1, c2, to)),
            _ => None,
        })
        .collect();
    assert_eq!(curves.len(), 2);
    let scale = chart.scale();
    let handle = scale.x_step * 0.5;
    let near = |a: (f64, f64), b: (f64, f64)| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9;
    let (c1, c2, to) = curves[0];
    assert!(near(c1, (scale.x(0) + handle, scale.y(1.0))), "{c1:?}");
    assert!(near(c2, (scale.x(1) - handle, scale.y(3.0))), "{c2:?}");
    assert_eq!(to, (scale.x(1), scale.y(3.0)));
}

#[test]
fn overflowing_spread_is_invalid_input() {
    let result = Chart::render(LineGraph, &host(), vec![-1.0e308, 1.0e308], UserOptions::default());
    assert!(matches!(result, Err(ChartError::InvalidInput(_))));
}

#[test]
fn malformed_colour_fails_construction() {
    let options = UserOptions { colour: Some("not-a-colour".to_string()), ..Default::default() };
    let result = Chart::render(LineGraph, &host(), vec![1.0, 2.0], options);
    assert!(matches!(result, Err(ChartError::InvalidInput(_))));
}
