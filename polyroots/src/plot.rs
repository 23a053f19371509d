//! A chart of a polynomial with its roots marked.
//!
//! [`Plot`] is a plain data model: the sampled curve, one marker per root, the
//! title and the axis labels. It can be serialized, or rendered as a
//! standalone SVG document via [`Plot::svg`].

use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::error::PlotError;
use crate::polynomial::Polynomial;
use crate::solver::Solution;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Left end of the sampled domain, inclusive.
    pub x_min: f64,

    /// Right end of the sampled domain, inclusive.
    pub x_max: f64,
    pub num_samples: usize,

    /// Width of the rendered image, in pixels.
    pub width: u32,

    /// Height of the rendered image, in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_min: -3.0,
            x_max: 12.0,
            num_samples: 100,
            width: 1000,
            height: 400,
        }
    }
}

/// `num` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut values = (0..num).map(|i| start + i as f64 * step).collect_vec();
            values[num - 1] = end;
            values
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootMarker {
    /// The root. The marker sits on the x-axis.
    pub x: f64,
    pub label: String,

    /// Where the label is placed, in data coordinates.
    pub label_anchor: (f64, f64),
}

impl RootMarker {
    const LABEL_OFFSET: f64 = -1.0;

    fn new(root: f64) -> Self {
        Self {
            x: root,
            label: root.to_string(),
            label_anchor: (root, Self::LABEL_OFFSET),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Points `(x, p(x))` of the curve, in order of increasing `x`.
    pub samples: Vec<(f64, f64)>,
    pub roots: Vec<RootMarker>,
    pub config: PlotConfig,
}

impl Plot {
    /// Sampling is parallelized for at least this many samples.
    const PARALLEL_SAMPLING_THRESHOLD: usize = 1 << 12;

    pub fn new(
        polynomial: &Polynomial,
        roots: &[f64],
        config: PlotConfig,
    ) -> Result<Self, PlotError> {
        if config.num_samples < 2 {
            return Err(PlotError::TooFewSamples(config.num_samples));
        }
        let domain_is_non_empty = config.x_min < config.x_max;
        if !domain_is_non_empty {
            return Err(PlotError::EmptyDomain {
                x_min: config.x_min,
                x_max: config.x_max,
            });
        }

        let xs = linspace(config.x_min, config.x_max, config.num_samples);
        let ys = if xs.len() >= Self::PARALLEL_SAMPLING_THRESHOLD {
            polynomial.par_batch_evaluate(&xs)
        } else {
            polynomial.batch_evaluate(&xs)
        };

        Ok(Self {
            title: polynomial.to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            samples: xs.into_iter().zip(ys).collect(),
            roots: roots.iter().map(|&root| RootMarker::new(root)).collect(),
            config,
        })
    }

    pub fn from_solution(solution: &Solution, config: PlotConfig) -> Result<Self, PlotError> {
        Self::new(&solution.polynomial, &solution.roots, config)
    }

    /// The visible x-range: the sampled domain, widened to include every finite root.
    pub fn x_range(&self) -> (f64, f64) {
        let finite_roots = self.roots.iter().map(|r| r.x).filter(|x| x.is_finite());
        let (min, max) = finite_roots.fold((self.config.x_min, self.config.x_max), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });

        pad(min, max)
    }

    /// The visible y-range: every finite sample, and the x-axis where the roots sit.
    pub fn y_range(&self) -> (f64, f64) {
        let finite_ys = self.samples.iter().map(|&(_, y)| y).filter(|y| y.is_finite());
        let (min, max) = finite_ys.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));

        pad(min, max)
    }

    /// Standalone SVG document of this plot.
    pub fn svg(&self) -> Svg<'_> {
        Svg {
            plot: self,
            x_range: self.x_range(),
            y_range: self.y_range(),
        }
    }
}

/// Widen `[min, max]` by 5% on both sides, or to unit width if it is degenerate.
fn pad(min: f64, max: f64) -> (f64, f64) {
    const MARGIN_RATIO: f64 = 0.05;
    let width = max - min;
    if width > 0.0 && width.is_finite() {
        let margin = width * MARGIN_RATIO;
        (min - margin, max + margin)
    } else {
        (min - 1.0, max + 1.0)
    }
}

/// Renders a [`Plot`] as SVG. Created by [`Plot::svg`].
pub struct Svg<'a> {
    plot: &'a Plot,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Svg<'_> {
    const MARGIN: f64 = 60.0;
    const BACKGROUND_COLOR: &'static str = "#e5e5e5";
    const AXIS_COLOR: &'static str = "blue";
    const CURVE_COLOR: &'static str = "#e24a33";
    const ROOT_COLOR: &'static str = "#348abd";
    const ROOT_RADIUS: f64 = 5.0;

    fn width(&self) -> f64 {
        f64::from(self.plot.config.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.plot.config.height)
    }

    /// Maps data coordinates to pixel coordinates. The y-axis points down in SVG.
    fn to_pixels(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (x_lo, x_hi) = self.x_range;
        let (y_lo, y_hi) = self.y_range;
        let plot_width = self.width() - 2.0 * Self::MARGIN;
        let plot_height = self.height() - 2.0 * Self::MARGIN;

        let px = Self::MARGIN + (x - x_lo) / (x_hi - x_lo) * plot_width;
        let py = Self::MARGIN + (y_hi - y) / (y_hi - y_lo) * plot_height;
        (px, py)
    }

    fn write_axes(&self, f: &mut Formatter) -> std::fmt::Result {
        let (x_lo, x_hi) = self.x_range;
        let (y_lo, y_hi) = self.y_range;

        if (y_lo..=y_hi).contains(&0.0) {
            let (x1, y) = self.to_pixels((x_lo, 0.0));
            let (x2, _) = self.to_pixels((x_hi, 0.0));
            writeln!(
                f,
                r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{}"/>"#,
                Self::AXIS_COLOR
            )?;
        }
        if (x_lo..=x_hi).contains(&0.0) {
            let (x, y1) = self.to_pixels((0.0, y_hi));
            let (_, y2) = self.to_pixels((0.0, y_lo));
            writeln!(
                f,
                r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{}"/>"#,
                Self::AXIS_COLOR
            )?;
        }

        Ok(())
    }

    /// One polyline per maximal run of finite samples.
    fn write_curve(&self, f: &mut Formatter) -> std::fmt::Result {
        let chunks = self
            .plot
            .samples
            .iter()
            .chunk_by(|(x, y)| x.is_finite() && y.is_finite());
        for (is_finite, run) in &chunks {
            if !is_finite {
                continue;
            }
            let points = run
                .map(|&point| self.to_pixels(point))
                .map(|(px, py)| format!("{px:.2},{py:.2}"))
                .join(" ");
            writeln!(
                f,
                r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="2"/>"#,
                Self::CURVE_COLOR
            )?;
        }

        Ok(())
    }

    fn write_roots(&self, f: &mut Formatter) -> std::fmt::Result {
        for marker in self.plot.roots.iter().filter(|r| r.x.is_finite()) {
            let (cx, cy) = self.to_pixels((marker.x, 0.0));
            writeln!(
                f,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{}" fill="{}"/>"#,
                Self::ROOT_RADIUS,
                Self::ROOT_COLOR
            )?;

            let (lx, ly) = self.to_pixels(marker.label_anchor);
            writeln!(
                f,
                r#"<text x="{lx:.2}" y="{ly:.2}" font-size="12">{}</text>"#,
                escape(&marker.label)
            )?;
        }

        Ok(())
    }
}

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (width, height) = (self.width(), self.height());
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            f,
            r#"<rect x="{m}" y="{m}" width="{w}" height="{h}" fill="{}"/>"#,
            Self::BACKGROUND_COLOR,
            m = Self::MARGIN,
            w = width - 2.0 * Self::MARGIN,
            h = height - 2.0 * Self::MARGIN,
        )?;

        self.write_axes(f)?;
        self.write_curve(f)?;
        self.write_roots(f)?;

        let center = width / 2.0;
        let title_baseline = Self::MARGIN / 2.0;
        writeln!(
            f,
            r#"<text x="{center}" y="{title_baseline}" font-size="18" text-anchor="middle">{}</text>"#,
            escape(&self.plot.title)
        )?;
        let x_label_baseline = height - Self::MARGIN / 3.0;
        writeln!(
            f,
            r#"<text x="{center}" y="{x_label_baseline}" font-size="15" text-anchor="middle">{}</text>"#,
            escape(&self.plot.x_label)
        )?;
        let y_label_x = Self::MARGIN / 3.0;
        let middle = height / 2.0;
        writeln!(
            f,
            r#"<text x="{y_label_x}" y="{middle}" font-size="15" text-anchor="middle">{}</text>"#,
            escape(&self.plot.y_label)
        )?;

        writeln!(f, "</svg>")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
