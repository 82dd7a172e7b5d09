// File: crates/grafico-core/tests/interaction.rs
// Purpose: Hover labels routed through the chart, and the deferred watermark draw.

use grafico_core::{
    AreaGraph, Chart, HostElement, LineGraph, MouseEvent, PointerEvent, Shape, UserOptions, Watermark,
};

fn labelled() -> UserOptions {
    UserOptions::from_json(r##"{"datalabels": {"one": "Sales"}, "hover_colour": "#123456"}"##).unwrap()
}

#[test]
fn hover_label_follows_pointer_in_host_coordinates() {
    let host = HostElement::sized(300.0, 200.0).with_offset(100.0, 50.0);
    let mut chart = Chart::render(LineGraph, &host, vec![1.0, 3.0, 2.0], labelled()).expect("chart");
    assert_eq!(chart.hovers().len(), 1);
    let target = chart.hovers()[0].target();
    let colour = chart.options().colour_of("one").to_string();

    assert!(chart.pointer(target, &PointerEvent::Enter(MouseEvent::at_page(250.0, 150.0))));
    assert!(chart.hovers()[0].is_visible());
    let scene = chart.surface();
    assert_eq!(scene.element(target).unwrap().style.stroke.as_deref(), Some("#123456"));

    let (x, y) = scene
        .elements()
        .find_map(|e| match &e.shape {
            Shape::Text { x, y, content } if content == "Sales" => Some((*x, *y)),
            _ => None,
        })
        .expect("label text");
    assert_eq!(x, 150.0);
    assert_eq!(y, 100.0 - 15.0);

    assert!(chart.pointer(target, &PointerEvent::Leave));
    assert!(!chart.hovers()[0].is_visible());
    assert_eq!(chart.surface().element(target).unwrap().style.stroke.as_deref(), Some(colour.as_str()));
}

#[test]
fn hover_labels_stay_on_top_and_inside() {
    let host = HostElement::sized(300.0, 200.0);
    let mut chart = Chart::render(LineGraph, &host, vec![1.0, 3.0, 2.0], labelled()).expect("chart");
    let target = chart.hovers()[0].target();

    // hover elements are painted last
    let ids = chart.overlays().hover.ids().to_vec();
    let total = chart.surface().elements().count();
    for id in &ids {
        assert!(chart.surface().z_index(*id).unwrap() >= total - ids.len());
    }

    for (x, y) in [(0.0, 0.0), (300.0, 200.0), (-40.0, 90.0)] {
        chart.pointer(target, &PointerEvent::Move(MouseEvent::at_page(x, y)));
        chart.pointer(target, &PointerEvent::Enter(MouseEvent::at_page(x, y)));
        let b = chart.overlays().hover.bbox(chart.surface()).expect("hover bbox");
        assert!(b.x >= 0.0 && b.y >= 0.0 && b.right() <= 300.0 && b.bottom() <= 200.0, "{b:?}");
    }
}

#[test]
fn events_on_unlabelled_elements_are_not_handled() {
    let host = HostElement::sized(300.0, 200.0);
    let mut chart = Chart::render(LineGraph, &host, vec![1.0, 3.0, 2.0], UserOptions::default()).expect("chart");
    assert!(chart.hovers().is_empty());
    assert!(!chart.pointer(grafico_core::ElementId(0), &PointerEvent::Leave));
}

fn image_count(chart: &Chart<impl grafico_core::ChartVariant>) -> usize {
    chart.surface().elements().filter(|e| matches!(e.shape, Shape::Image { .. })).count()
}

#[test]
fn unknown_watermark_size_defers_series_exactly_once() {
    let host = HostElement::sized(300.0, 200.0);
    let options = UserOptions { watermark: Some(Watermark::new("logo.png")), ..Default::default() };
    let mut chart = Chart::render(LineGraph, &host, vec![1.0, 2.0, 3.0], options).expect("chart");

    assert!(chart.is_watermark_pending());
    assert!(!chart.is_series_drawn());
    assert_eq!(image_count(&chart), 0);

    chart.watermark_loaded(40.0, 20.0).expect("loaded");
    assert!(chart.is_series_drawn());
    assert_eq!(image_count(&chart), 1);
    let drawn = chart.surface().elements().count();

    chart.watermark_loaded(40.0, 20.0).expect("second load");
    chart.draw_series().expect("repeat draw");
    assert_eq!(chart.surface().elements().count(), drawn);
}

#[test]
fn known_watermark_size_draws_immediately_and_sits_above_areas() {
    let host = HostElement::sized(300.0, 200.0);
    let options = UserOptions {
        watermark: Some(Watermark::new("logo.png").with_size(40.0, 20.0)),
        ..Default::default()
    };
    let chart = Chart::render(AreaGraph, &host, vec![1.0, 2.0, 3.0], options).expect("chart");
    assert!(!chart.is_watermark_pending());
    assert!(chart.is_series_drawn());

    let scene = chart.surface();
    let colour = chart.options().colour_of("one").to_string();
    let position = |pred: &dyn Fn(&grafico_core::Element) -> bool| scene.elements().position(|e| pred(e)).unwrap();
    let image = position(&|e| matches!(e.shape, Shape::Image { .. }));
    let area = position(&|e| e.style.fill.as_deref() == Some(colour.as_str()));
    assert!(image > area);

    let plot = chart.layout().plot_area();
    let placed = scene
        .elements()
        .find_map(|e| match &e.shape {
            Shape::Image { bbox, .. } => Some(*bbox),
            _ => None,
        })
        .unwrap();
    assert_eq!(placed.right(), plot.right() - 2.0);
    assert_eq!(placed.bottom(), plot.bottom() - 2.0);
}
