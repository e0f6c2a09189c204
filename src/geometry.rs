//! Donut chart geometry: responsive breakpoints, sector layout and the
//! external percentage labels drawn around the production status donut.
//!
//! Angles are in degrees and follow the chart convention: zero points along
//! the positive x axis and positive angles turn counter-clockwise on screen.
//! Screen y grows downwards, so a point at angle `a` is
//! `(cx + r*cos(-a), cy + r*sin(-a))`.

use serde::Serialize;

const RADIAN: f64 = std::f64::consts::PI / 180.0;

/// Narrowest viewport that still shows slice labels
pub const MIN_LABEL_VIEWPORT_PX: u32 = 375;
const CONNECTOR_START_RATIO: f64 = 0.7;
const INNER_RADIUS_RATIO: f64 = 0.6;

/// 24-bit color shared by the geometry and the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point at `radius` from `(cx, cy)` along `angle_degrees`
pub fn polar(cx: f64, cy: f64, radius: f64, angle_degrees: f64) -> Point {
    let angle = -angle_degrees * RADIAN;
    Point {
        x: cx + radius * angle.cos(),
        y: cy + radius * angle.sin(),
    }
}

/// Viewport dependent sizing of the donut and its labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportMetrics {
    pub viewport_width_px: u32,
    pub labels_visible: bool,
    pub label_scale: f64,
    pub label_width: f64,
    pub label_height: f64,
    pub font_size: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub chart_height: f64,
}

/// Breakpoint table for a viewport `width_px` wide
pub fn viewport_metrics(width_px: u32) -> ViewportMetrics {
    let label_scale = match width_px {
        w if w < 768 => 0.8,
        w if w < 1280 => 1.1,
        _ => 1.4,
    };
    let compact = width_px < 768;
    let outer_radius = match width_px {
        w if w < 375 => 70.0,
        w if w < 768 => 80.0,
        w if w < 1024 => 90.0,
        _ => 100.0,
    };
    let chart_height = match width_px {
        w if w < 768 => 200.0,
        w if w < 1024 => 220.0,
        w if w < 1280 => 240.0,
        _ => 260.0,
    };

    ViewportMetrics {
        viewport_width_px: width_px,
        labels_visible: width_px >= MIN_LABEL_VIEWPORT_PX,
        label_scale,
        label_width: if compact { 40.0 } else { 50.0 },
        label_height: if compact { 24.0 } else { 30.0 },
        font_size: if compact { 10.0 } else { 12.0 },
        outer_radius,
        inner_radius: outer_radius * INNER_RADIUS_RATIO,
        chart_height,
    }
}

/// Angular extent of one donut sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    /// Share of the summed weights, in `0.0..=1.0`
    pub fraction: f64,
}

/// Sweep and spacing of the donut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSweep {
    pub start_angle: f64,
    pub end_angle: f64,
    pub padding_angle: f64,
}

impl Default for DonutSweep {
    /// Full clockwise turn starting at twelve o'clock, 5° between sectors
    fn default() -> Self {
        DonutSweep {
            start_angle: 90.0,
            end_angle: -270.0,
            padding_angle: 5.0,
        }
    }
}

impl DonutSweep {
    /// Normalize relative `weights` into sectors
    ///
    /// Padding is only inserted after non-zero sectors; a full circle also
    /// pads between the last and first sector. All-zero weights produce
    /// empty sectors at the start angle.
    pub fn layout(&self, weights: &[f64]) -> Vec<Sector> {
        let delta = self.end_angle - self.start_angle;
        let sign = if delta < 0.0 { -1.0 } else { 1.0 };
        let sum: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        let non_zero = weights.iter().filter(|w| **w > 0.0).count() as f64;
        let padding_slots = if delta.abs() >= 360.0 {
            non_zero
        } else {
            (non_zero - 1.0).max(0.0)
        };
        let real_total = (delta.abs() - padding_slots * self.padding_angle).max(0.0);

        let mut sectors: Vec<Sector> = Vec::with_capacity(weights.len());
        for weight in weights {
            let weight = weight.max(0.0);
            let fraction = if sum > 0.0 { weight / sum } else { 0.0 };
            let start = match sectors.last() {
                Some(prev) if weight > 0.0 => prev.end_angle + sign * self.padding_angle,
                Some(prev) => prev.end_angle,
                None => self.start_angle,
            };
            let end = start + sign * fraction * real_total;
            sectors.push(Sector {
                start_angle: start,
                end_angle: end,
                mid_angle: (start + end) / 2.0,
                fraction,
            });
        }
        sectors
    }
}

/// Inputs for one slice label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLabelRequest {
    pub center_x: f64,
    pub center_y: f64,
    pub mid_angle_degrees: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fraction_of_whole: f64,
    pub slice_color: Rgb,
    pub viewport_width_px: u32,
}

/// A positioned percentage pill with its connector line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialLabel {
    pub anchor: Point,
    pub connector_start: Point,
    pub connector_end: Point,
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub font_size: f64,
    pub color: Rgb,
}

/// Format a share of the whole as a whole percentage, rounding half up
pub fn percent_text(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Place the label for one slice, or `None` when the viewport is too narrow
pub fn compute_label(req: &RadialLabelRequest) -> Option<RadialLabel> {
    let metrics = viewport_metrics(req.viewport_width_px);
    if !metrics.labels_visible {
        return None;
    }

    let radius = req.outer_radius * metrics.label_scale;
    let anchor = polar(req.center_x, req.center_y, radius, req.mid_angle_degrees);
    let connector_start = polar(
        req.center_x,
        req.center_y,
        req.outer_radius * CONNECTOR_START_RATIO,
        req.mid_angle_degrees,
    );

    Some(RadialLabel {
        anchor,
        connector_start,
        connector_end: anchor,
        text: percent_text(req.fraction_of_whole),
        width: metrics.label_width,
        height: metrics.label_height,
        corner_radius: metrics.label_height / 2.0,
        font_size: metrics.font_size,
        color: req.slice_color,
    })
}
