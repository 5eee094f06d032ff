//! Comparison chart model and drawing.
//!
//! A [`ComparisonChart`] holds one metric's transformed values for several
//! remapping schemes. Drawing is generic over the plotters backend so the same
//! chart can go to a PNG file or an in-memory SVG.

use std::ops::Range;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use remap_common::Metric;

use crate::error::{RenderError, Result};
use crate::labels::{y_axis_label, LEGEND_TITLE, X_AXIS_LABEL};
use crate::style::{series_color, text_color, ChartStyle};

/// One trace: a legend label and its (iteration, value) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Points whose value survived the metric transform as a finite number.
    /// `log10(0)` and NaN cells are skipped when drawing.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// One metric compared across remapping schemes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    metric: Metric,
    title: String,
    series: Vec<Series>,
}

impl ComparisonChart {
    pub fn new(metric: Metric, title: impl Into<String>) -> Self {
        Self {
            metric,
            title: title.into(),
            series: Vec::new(),
        }
    }

    /// Add a trace from raw metric values, applying the metric's transform.
    ///
    /// `iterations` and `values` are paired index by index; the longer one is
    /// truncated.
    pub fn push_series(&mut self, label: impl Into<String>, iterations: &[u32], values: &[f64]) {
        let scale = self.metric.scale();
        let points = iterations
            .iter()
            .zip(values)
            .map(|(&x, &v)| (f64::from(x), scale.apply(v)))
            .collect();
        self.series.push(Series::new(label, points));
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn y_label(&self) -> &'static str {
        y_axis_label(self.metric)
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn x_range(&self) -> Range<f64> {
        let (min, max) = self.bounds(|(x, _)| x);
        padded(min, max, 0.02)
    }

    pub fn y_range(&self) -> Range<f64> {
        let (min, max) = self.bounds(|(_, y)| y);
        padded(min, max, 0.05)
    }

    fn bounds(&self, pick: impl Fn((f64, f64)) -> f64) -> (f64, f64) {
        self.series
            .iter()
            .flat_map(Series::finite_points)
            .map(pick)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Draw onto an area and present it.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<()> {
        if self.series.is_empty() {
            return Err(RenderError::NoSeries);
        }

        root.fill(&WHITE).map_err(backend_error)?;

        let family = style.font_family.as_str();
        let label_font = (family, style.font_size).into_font().color(&text_color());
        let bold_font = (family, style.font_size)
            .into_font()
            .style(FontStyle::Bold)
            .color(&text_color());

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 50);
        if style.show_title {
            builder.caption(&self.title, (family, style.font_size + 4));
        }
        let mut chart = builder
            .build_cartesian_2d(self.x_range(), self.y_range())
            .map_err(backend_error)?;

        chart
            .configure_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(self.y_label())
            .axis_desc_style(bold_font.clone())
            .label_style(label_font.clone())
            .x_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(backend_error)?;

        for (index, series) in self.series.iter().enumerate() {
            let color = series_color(index);
            let points: Vec<(f64, f64)> = series.finite_points().collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .map_err(backend_error)?
                .label(series.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
                .map_err(backend_error)?;
        }

        // Legend box in the upper right of the plot area with its heading
        // drawn just above the first entry.
        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        let legend_width = self.legend_width(root, &bold_font)?;
        let (_, title_height) = root
            .estimate_text_size(LEGEND_TITLE, &bold_font)
            .map_err(backend_error)?;
        let legend_x = (x_px.end - x_px.start) - legend_width - LEGEND_INSET;
        let legend_y = LEGEND_INSET + title_height as i32 + 4;

        root.draw(&Text::new(
            LEGEND_TITLE,
            (x_px.start + legend_x + 6, y_px.start + LEGEND_INSET),
            bold_font.clone(),
        ))
        .map_err(backend_error)?;

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .label_font(bold_font)
            .position(SeriesLabelPosition::Coordinate(legend_x, legend_y))
            .draw()
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;
        Ok(())
    }
}

impl ComparisonChart {
    /// Widest legend entry or the legend heading, plus the marker swatch.
    fn legend_width<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        font: &TextStyle,
    ) -> Result<i32> {
        let mut widest = 0;
        for text in self.series.iter().map(Series::label).chain([LEGEND_TITLE]) {
            let (width, _) = root.estimate_text_size(text, font).map_err(backend_error)?;
            widest = widest.max(width);
        }
        Ok(widest as i32 + LEGEND_SWATCH)
    }
}

/// Gap between the plot area border and the legend.
const LEGEND_INSET: i32 = 10;

/// Room for the line sample and padding inside the legend box.
const LEGEND_SWATCH: i32 = 50;

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Expand `[min, max]` by `fraction` of its span, falling back to a unit
/// window when there is no finite data or the span is zero.
fn padded(min: f64, max: f64, fraction: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = (max.abs() * fraction).max(0.5);
        return (min - pad)..(max + pad);
    }
    let pad = span * fraction;
    (min - pad)..(max + pad)
}
