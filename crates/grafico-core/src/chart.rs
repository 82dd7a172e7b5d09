// File: crates/grafico-core/src/chart.rs
// Summary: Chart construction: setup (data, normalisation, options, layout) and the fixed draw sequence.
// Notes:
// - Construction is synchronous and either produces a fully drawn chart or an error.
// - The only deferred step is the series draw behind a watermark whose size is
//   unknown; `watermark_loaded` completes it. The series draw runs at most once.

use log::{debug, trace};

use crate::axis::ValueAxis;
use crate::error::{ChartError, Result};
use crate::geometry::Coordinate;
use crate::grid::{crisp, horizontal_lines, vertical_lines};
use crate::host::{StyleLookup, SurfaceDescriptor};
use crate::hover::{ColourTarget, HoverLabel, HoverStyle, PointerEvent};
use crate::layout::Layout;
use crate::normaliser::{normalise, NormalisationResult};
use crate::options::{Options, UserOptions};
use crate::scale::PlotScale;
use crate::scene::{Scene, DEFAULT_FONT};
use crate::series::{DataInput, DataSets};
use crate::stats;
use crate::surface::{ElementId, Style, Surface, TextAnchor};
use crate::theme::WATERMARK_OPACITY;
use crate::types::TICK_LENGTH;
use crate::variants::{ChartVariant, DrawContext, Overlays, PlotPoint};
use crate::watermark;

/// A drawn chart of chart type `V` on surface `S`.
pub struct Chart<V: ChartVariant, S: Surface = Scene> {
    variant: V,
    surface: S,
    original: DataSets,
    plotted: DataSets,
    flat: Vec<f64>,
    normalised: NormalisationResult,
    options: Options,
    layout: Layout,
    axis: ValueAxis,
    scale: PlotScale,
    overlays: Overlays,
    hovers: Vec<HoverLabel>,
    host_offset: (f64, f64),
    watermark_image: Option<ElementId>,
    watermark_pending: bool,
    series_drawn: bool,
}

/// Borrow the read-only drawing state out of a chart's fields.
macro_rules! draw_context {
    ($chart:expr) => {
        DrawContext {
            options: &$chart.options,
            layout: &$chart.layout,
            scale: &$chart.scale,
            axis: &$chart.axis,
            normalised: &$chart.normalised,
            plotted: &$chart.plotted,
            original: &$chart.original,
        }
    };
}

/// One series as handed to the per-series draw.
struct SeriesRef<'a> {
    index: usize,
    name: &'a str,
    values: &'a [f64],
    /// Values as given, for markers and labels of stacked charts.
    raw: &'a [f64],
}

impl<V: ChartVariant> Chart<V, Scene> {
    /// Draw `data` into a new in-memory [`Scene`] sized after `host`.
    pub fn render(variant: V, host: &dyn StyleLookup, data: impl Into<DataInput>, options: UserOptions) -> Result<Self> {
        Self::render_on(Scene::default(), variant, host, data, options)
    }
}

impl<V: ChartVariant, S: Surface> Chart<V, S> {
    /// Draw `data` onto `surface`.
    pub fn render_on(
        surface: S,
        variant: V,
        host: &dyn StyleLookup,
        data: impl Into<DataInput>,
        user: UserOptions,
    ) -> Result<Self> {
        let descriptor = SurfaceDescriptor::from_host(host);
        let original = DataSets::from_input(data.into())?;
        let chart_defaults = variant.chart_defaults()?;

        let stacked = user.stacked.or(chart_defaults.stacked).unwrap_or(false);
        let plotted = if stacked { original.stacked() } else { original.clone() };
        let flat = plotted.flatten();
        let normalised = normalise(&flat, variant.normaliser_options())?;
        let data_size = plotted.longest_len();

        let options = Options::resolve(&descriptor, &original, &chart_defaults, &user)?;
        let mut layout = Layout::compute(&options, &flat, data_size, plotted.len())?;
        let step = variant.step_size(&layout)?;
        if !(step.is_finite() && step >= 0.0) {
            return Err(ChartError::invalid(format!("{} chart produced step {step}", variant.name())));
        }
        layout.step = step;

        let axis = ValueAxis::from_normalised(&normalised);
        let scale = PlotScale::new(&normalised, &axis, &layout);
        debug!(
            "{} chart: {} series x {} points, plot {}x{}, step {}, {} value labels",
            variant.name(),
            plotted.len(),
            data_size,
            layout.graph_width,
            layout.graph_height,
            step,
            axis.label_count
        );

        let mut chart = Self {
            variant,
            surface,
            original,
            plotted,
            flat,
            normalised,
            options,
            layout,
            axis,
            scale,
            overlays: Overlays::default(),
            hovers: Vec::new(),
            host_offset: descriptor.offset,
            watermark_image: None,
            watermark_pending: false,
            series_drawn: false,
        };
        chart.setup()?;
        Ok(chart)
    }

    fn setup(&mut self) -> Result<()> {
        self.surface.set_size(self.options.width, self.options.height);
        self.surface.rect(
            self.layout.plot_area(),
            0.0,
            Style::new().fill(self.options.background_colour.clone()).stroke("none"),
        );

        let ctx = draw_context!(self);
        self.variant.setup(&ctx, &mut self.surface)?;

        self.draw()?;
        self.overlays.to_front(&mut self.surface);
        Ok(())
    }

    /// The fixed draw sequence; each step is conditional on its option.
    fn draw(&mut self) -> Result<()> {
        if self.options.grid {
            self.draw_grid();
        }
        if let Some(mark) = self.options.watermark.clone() {
            match mark.size {
                Some(size) => self.place_watermark(&mark.src, size),
                None => {
                    debug!("watermark {} has no known size; series wait for it", mark.src);
                    self.watermark_pending = true;
                }
            }
        }
        if self.options.draw_axis {
            self.draw_axis();
        }
        if self.options.show_vertical_labels {
            self.draw_vertical_labels();
        }
        if self.options.show_horizontal_labels {
            self.draw_horizontal_labels();
        }
        if !self.watermark_pending {
            self.draw_series()?;
        }
        if self.normalised.start_value != 0.0 {
            self.draw_focus_hint();
        }
        if let Some(style) = self.options.meanline.clone() {
            self.draw_mean_line(&style.stroke, style.stroke_width)?;
        }
        Ok(())
    }

    /// Finish a chart whose watermark size was unknown at construction:
    /// place the image, then draw the series. Later calls do nothing.
    pub fn watermark_loaded(&mut self, width: f64, height: f64) -> Result<()> {
        if !self.watermark_pending {
            debug!("watermark_loaded: nothing waiting");
            return Ok(());
        }
        let Some(mark) = self.options.watermark.clone() else {
            return Ok(());
        };
        self.watermark_pending = false;
        self.place_watermark(&mark.src, (width, height));
        self.draw_series()?;
        self.overlays.to_front(&mut self.surface);
        Ok(())
    }

    fn place_watermark(&mut self, src: &str, size: (f64, f64)) {
        let at = watermark::placement(self.layout.plot_area(), size, self.options.watermark_orientation);
        trace!("watermark {src} at {at:?}");
        let id = self.surface.image(src, at, Style::new().opacity(WATERMARK_OPACITY));
        self.watermark_image = Some(id);
    }

    /// Draw every series once. Calling it again, directly or through a
    /// deferred watermark, leaves the surface unchanged.
    pub fn draw_series(&mut self) -> Result<()> {
        if self.series_drawn {
            debug!("series already drawn; ignoring repeated draw");
            return Ok(());
        }
        self.series_drawn = true;

        let ctx = draw_context!(self);
        let mut series: Vec<_> = self.plotted.iter().collect();
        // lower layers of a stack must stay visible above the ones they sit on
        if self.options.stacked {
            series.reverse();
        }
        for (index, name, values) in series {
            let raw = self.original.get(name).unwrap_or(values);
            let s = SeriesRef { index, name, values, raw };
            draw_lines(
                &ctx,
                &self.variant,
                &mut self.surface,
                &mut self.overlays,
                &mut self.hovers,
                self.host_offset,
                &s,
            )?;
        }

        if let Some(image) = self.watermark_image {
            if self.options.is_filled() {
                self.surface.to_front(image);
            }
        }
        Ok(())
    }

    fn draw_grid(&mut self) {
        let left = self.layout.insets.left;
        let top = self.layout.insets.top;
        let path = self.surface.path(Style::new().stroke(self.options.grid_colour.clone()));

        for y in horizontal_lines(top, self.scale.baseline, self.axis.label_count) {
            self.surface.move_to(path, left - 0.5, crisp(y));
            self.surface.line_to(path, left + self.layout.graph_width - 0.5, crisp(y));
        }

        let start = left + self.layout.plot_padding + self.variant.grid_start_offset();
        let xs = vertical_lines(start, self.layout.step, &self.options.labels, self.options.hide_empty_label_grid);
        for x in xs {
            self.surface.move_to(path, x.trunc(), top);
            self.surface.line_to(path, x.trunc(), top + self.layout.graph_height);
        }
    }

    fn draw_axis(&mut self) {
        let left = self.layout.insets.left.trunc() - 0.5;
        let bottom = self.options.height - self.layout.insets.bottom;
        let path = self.surface.path(Style::new().stroke(self.options.label_colour.clone()));

        self.surface.move_to(path, left, self.options.height - self.layout.insets.bottom.trunc() + 0.5);
        self.surface.line_to(
            path,
            (self.layout.graph_width + self.layout.insets.left).trunc() - 0.5,
            self.options.height - self.layout.insets.bottom.trunc() + 0.5,
        );

        self.surface.move_to(path, left, bottom.trunc() + 0.5);
        self.surface.line_to(path, left, self.layout.insets.top.trunc());
    }

    fn draw_vertical_labels(&mut self) {
        let labels = self.axis.formatted(&self.options.vertical_label_unit);
        let step = self.layout.graph_height / self.axis.label_count as f64;
        self.draw_markers(&labels, (0.0, -1.0), step, step, (-8.0, -2.0), TextAnchor::End);
    }

    fn draw_horizontal_labels(&mut self) {
        let labels = self.options.labels.clone();
        let start = self.variant.label_offset(&self.layout);
        let font_offset = -(self.options.font_size + 7.0);
        self.draw_markers(&labels, (1.0, 0.0), self.layout.step, start, (0.0, font_offset), TextAnchor::Middle);
    }

    /// Labels along one axis from the origin in `direction`, `step` apart,
    /// with a tick per label when the axis is drawn.
    fn draw_markers(
        &mut self,
        labels: &[String],
        direction: (f64, f64),
        step: f64,
        start_offset: f64,
        font_offsets: (f64, f64),
        anchor: TextAnchor,
    ) {
        let opts = &self.options;
        let mut x = self.layout.insets.left.trunc() - 0.5 + direction.0 * start_offset;
        let mut y = opts.height - self.layout.insets.bottom + direction.1 * start_offset;
        let ticks = self.surface.path(Style::new().stroke(opts.label_colour.clone()));
        let font = Style::new()
            .font(opts.font_size, DEFAULT_FONT)
            .stroke("none")
            .fill(opts.label_colour.clone())
            .anchor(anchor);

        for label in labels {
            if opts.draw_axis && (!opts.hide_empty_label_grid || !label.is_empty()) {
                self.surface.move_to(ticks, x.trunc(), y.trunc() + 0.5);
                self.surface.line_to(
                    ticks,
                    x.trunc() + direction.1 * TICK_LENGTH,
                    y.trunc() + 0.5 + direction.0 * TICK_LENGTH,
                );
            }
            let text = self.surface.text(x + font_offsets.0, y - 2.0 - font_offsets.1, label, font.clone());
            self.surface.to_front(text);
            x += direction.0 * step;
            y += direction.1 * step;
        }
    }

    /// Two short diagonal strokes at the foot of the value axis: the axis does not start at 0.
    fn draw_focus_hint(&mut self) {
        let length = TICK_LENGTH;
        let x = self.layout.insets.left + length / 2.0 - 1.0;
        let y = self.options.height - self.layout.insets.bottom;
        let path = self
            .surface
            .path(Style::new().stroke(self.options.label_colour.clone()).stroke_width(2.0));
        self.surface.move_to(path, x, y);
        self.surface.line_to(path, x - length, y - length);
        self.surface.move_to(path, x, y - length);
        self.surface.line_to(path, x - length, y - length * 2.0);
    }

    fn draw_mean_line(&mut self, stroke: &str, width: f64) -> Result<()> {
        let y = self.scale.y(stats::mean(&self.flat)?);
        let left = self.layout.insets.left;
        let path = self.surface.path(Style::new().stroke(stroke).stroke_width(width));
        self.surface.move_to(path, left - 1.0, y);
        self.surface.line_to(path, left + self.layout.graph_width, y);
        Ok(())
    }

    /// Route a pointer event the host observed on `target`.
    /// Returns `false` when no hover label is bound to that element.
    pub fn pointer(&mut self, target: ElementId, event: &PointerEvent) -> bool {
        let mut handled = false;
        for hover in self.hovers.iter_mut().filter(|h| h.target() == target) {
            hover.handle(&mut self.surface, event);
            handled = true;
        }
        handled
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn normalised(&self) -> &NormalisationResult {
        &self.normalised
    }

    pub fn axis(&self) -> &ValueAxis {
        &self.axis
    }

    pub fn scale(&self) -> &PlotScale {
        &self.scale
    }

    /// Series as given.
    pub fn original(&self) -> &DataSets {
        &self.original
    }

    /// Series as plotted; cumulative for stacked charts.
    pub fn plotted(&self) -> &DataSets {
        &self.plotted
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn hovers(&self) -> &[HoverLabel] {
        &self.hovers
    }

    pub fn is_series_drawn(&self) -> bool {
        self.series_drawn
    }

    pub fn is_watermark_pending(&self) -> bool {
        self.watermark_pending
    }
}

/// One series: its path, the optional hover label, then the chart type's
/// point hook for every coordinate.
fn draw_lines<V: ChartVariant, S: Surface>(
    ctx: &DrawContext<'_>,
    variant: &V,
    surface: &mut S,
    overlays: &mut Overlays,
    hovers: &mut Vec<HoverLabel>,
    host_offset: (f64, f64),
    series: &SeriesRef<'_>,
) -> Result<()> {
    let opts = ctx.options;
    let colour = opts.colour_of(series.name).to_string();
    let mut coords = variant
        .project(ctx, series.index, series.values)
        .unwrap_or_else(|| ctx.scale.coordinates(series.values));
    let mut values: Vec<Option<f64>> = series.raw.iter().copied().map(Some).collect();
    values.resize(coords.len(), None);

    if !opts.start_at_zero {
        let baseline = ctx.scale.baseline;
        let flat_run = coords.iter().take_while(|c| c.y == baseline).count();
        if flat_run > 1 {
            coords.drain(..flat_run);
            values.drain(..flat_run);
        }
    }
    let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
        trace!("series {} has nothing to draw", series.name);
        return Ok(());
    };

    let filled = opts.is_filled();
    let style = if filled {
        let style = Style::new().stroke(colour.clone()).fill(colour.clone()).stroke_width(0.0);
        if opts.area {
            let opacity = opts.area_opacity.unwrap_or(1.5 / ctx.layout.series_count.max(1) as f64);
            style.fill_opacity(opacity)
        } else {
            style
        }
    } else {
        Style::new().stroke(colour.clone()).stroke_width(opts.stroke_width)
    };
    let path = surface.path(style);

    if filled {
        let baseline = ctx.scale.baseline;
        coords.insert(0, Coordinate::new(first.x, baseline));
        coords.push(Coordinate::new(last.x, baseline));
        values.insert(0, None);
        values.push(None);
    }

    let datalabel = opts.datalabels.get(series.name).map(String::as_str);
    if let Some(label) = datalabel {
        let target = if filled || opts.bar { ColourTarget::Fill } else { ColourTarget::Stroke };
        let style = HoverStyle {
            font_size: opts.font_size,
            box_colour: opts.label_colour.clone(),
            text_colour: opts.hover_text_colour.clone(),
        };
        let hover_colour = opts.hover_colour.as_deref().unwrap_or(colour.as_str());
        let hover = HoverLabel::create(surface, path, label, target, &colour, hover_colour, &style, host_offset);
        for &id in hover.elements().ids() {
            overlays.hover.push(id);
        }
        hovers.push(hover);
    }

    for (index, &at) in coords.iter().enumerate() {
        let point = PlotPoint {
            index,
            path,
            at,
            coords: &coords,
            colour: &colour,
            datalabel,
            value: values[index],
            series_index: series.index,
        };
        variant.draw_point(ctx, &point, surface, overlays)?;
    }
    if filled {
        surface.close_path(path);
    }
    trace!("series {}: {} points", series.name, coords.len());
    Ok(())
}
