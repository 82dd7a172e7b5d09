// File: crates/grafico-core/src/host.rs
// Summary: Host element style lookup and pointer coordinate translation.

/// Computed-style access to the element a chart is drawn into.
pub trait StyleLookup {
    /// CSS computed value of `property` (e.g. `"width"`, `"background-color"`).
    fn computed_style(&self, property: &str) -> Option<String>;

    /// Element offset within the page, used to turn page coordinates into
    /// surface coordinates.
    fn offset(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// Plain host element with fixed computed styles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostElement {
    pub width: Option<String>,
    pub height: Option<String>,
    pub background_color: Option<String>,
    pub offset_left: f64,
    pub offset_top: f64,
}

impl HostElement {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(format!("{width}px")),
            height: Some(format!("{height}px")),
            ..Self::default()
        }
    }

    pub fn with_background(mut self, colour: impl Into<String>) -> Self {
        self.background_color = Some(colour.into());
        self
    }

    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self
    }
}

impl StyleLookup for HostElement {
    fn computed_style(&self, property: &str) -> Option<String> {
        match property {
            "width" => self.width.clone(),
            "height" => self.height.clone(),
            "background-color" | "backgroundColor" => self.background_color.clone(),
            _ => None,
        }
    }

    fn offset(&self) -> (f64, f64) {
        (self.offset_left, self.offset_top)
    }
}

/// What a chart needs to know about its host: size, background and offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceDescriptor {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background: Option<String>,
    pub offset: (f64, f64),
}

impl SurfaceDescriptor {
    pub fn from_host(host: &dyn StyleLookup) -> Self {
        Self {
            width: host.computed_style("width").as_deref().and_then(parse_px),
            height: host.computed_style("height").as_deref().and_then(parse_px),
            background: host.computed_style("background-color"),
            offset: host.offset(),
        }
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }
}

/// Leading integer of a CSS length (`"300px"` -> 300); `None` for `"auto"` etc.
pub fn parse_px(s: &str) -> Option<f64> {
    let s = s.trim();
    let digits_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..digits_end].parse::<i64>().ok().map(|v| v as f64)
}

/// Pointer event fields as delivered by either browser coordinate model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseEvent {
    /// Modern model: coordinates relative to the page.
    pub page: Option<(f64, f64)>,
    /// Legacy model: viewport coordinates, combined with the scroll offset.
    pub client: Option<(f64, f64)>,
    pub scroll: (f64, f64),
}

impl MouseEvent {
    pub fn at_page(x: f64, y: f64) -> Self {
        Self { page: Some((x, y)), ..Self::default() }
    }

    pub fn at_client(x: f64, y: f64, scroll_x: f64, scroll_y: f64) -> Self {
        Self { client: Some((x, y)), scroll: (scroll_x, scroll_y), ..Self::default() }
    }

    /// Page position of the pointer; `(0, 0)` when the event carries none.
    pub fn page_position(&self) -> (f64, f64) {
        let nonzero = |&(x, y): &(f64, f64)| x != 0.0 || y != 0.0;
        if let Some(p) = self.page.filter(nonzero) {
            return p;
        }
        if let Some((x, y)) = self.client.filter(nonzero) {
            return (x + self.scroll.0, y + self.scroll.1);
        }
        (0.0, 0.0)
    }
}
