//! Single chart page rendering into RGB pixel buffers

use crate::style::Palette;
use crate::trend::{SummaryStats, Trend};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rategraph_common::{CurrencyCode, RateGraphError, Result};
use rategraph_store::CurrencySeries;

/// Stroke width scale: denser series render thinner lines
const LINE_WEIGHT_SCALE: usize = 100;

/// Roughly how many date ticks a page carries
const TARGET_TICKS: usize = 10;

/// Inverse-density line weight; sparse series get thick lines
pub fn line_weight(point_count: usize) -> u32 {
    (LINE_WEIGHT_SCALE / point_count.max(1)) as u32 + 1
}

/// Date-tick step keeping roughly [`TARGET_TICKS`] labels per page
pub fn tick_interval(point_count: usize) -> usize {
    (point_count / TARGET_TICKS).max(1)
}

/// Renders chart pages as raw RGB buffers, `width * height * 3` bytes each
#[derive(Debug, Clone)]
pub struct PageRenderer {
    palette: Palette,
    width: u32,
    height: u32,
}

impl PageRenderer {
    pub fn new(palette: Palette, width: u32, height: u32) -> Self {
        Self {
            palette,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn blank_buffer(&self) -> Vec<u8> {
        vec![0u8; self.width as usize * self.height as usize * 3]
    }

    /// Render the trend chart for one (base, quote) pair.
    ///
    /// Fails when the series carries no data for the quote at all; rows
    /// missing the quote are simply not plotted.
    pub fn render_pair(
        &self,
        series: &CurrencySeries,
        base: &CurrencyCode,
        quote: &CurrencyCode,
    ) -> Result<Vec<u8>> {
        let points = series.column(quote);
        if points.is_empty() {
            return Err(RateGraphError::render(format!(
                "no `{}` column in the `{}` series",
                quote, base
            )));
        }

        let values: Vec<f64> = points.iter().map(|(_, rate)| *rate).collect();
        let stats = SummaryStats::compute(&values)
            .ok_or_else(|| RateGraphError::render("empty rate column"))?;
        let trend = Trend::classify(values[0], values[values.len() - 1]);
        let line_color = match trend {
            Trend::Up => self.palette.uptrend,
            Trend::Down => self.palette.downtrend,
        };

        // Degenerate ranges (single point, flat series) get padded so the
        // coordinate system stays well-formed
        let mut x_from = points[0].0;
        let mut x_to = points[points.len() - 1].0;
        if x_from == x_to {
            x_from = x_from - Duration::days(1);
            x_to = x_to + Duration::days(1);
        }
        let mut y_pad = (stats.max - stats.min) * 0.05;
        if y_pad == 0.0 {
            y_pad = (stats.max.abs() * 0.05).max(0.01);
        }
        let y_from = stats.min - y_pad;
        let y_to = stats.max + y_pad;

        let mut buffer = self.blank_buffer();
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            root.fill(&self.palette.page)?;

            let caption = format!("{}-{}", base.ticker(), quote.ticker());
            let mut chart = ChartBuilder::on(&root)
                .caption(&caption, ("sans-serif", 28).into_font().color(&self.palette.text))
                .margin(20)
                .x_label_area_size(48)
                .y_label_area_size(64)
                .build_cartesian_2d(x_from..x_to, y_from..y_to)?;

            chart.plotting_area().fill(&self.palette.plot)?;

            let label_count = points.len().div_ceil(tick_interval(points.len()));
            chart
                .configure_mesh()
                .x_desc("date")
                .y_desc("rate")
                .x_labels(label_count)
                .x_label_formatter(&|date: &NaiveDate| date.format("%b-%d").to_string())
                .label_style(("sans-serif", 14).into_font().color(&self.palette.text))
                .axis_style(self.palette.grid.stroke_width(1))
                .light_line_style(&self.palette.grid.mix(0.15))
                .bold_line_style(&self.palette.grid.mix(0.4))
                .draw()?;

            chart.draw_series(LineSeries::new(
                points.iter().copied(),
                line_color.stroke_width(line_weight(points.len())),
            ))?;

            // Summary annotation anchored at (earliest date, maximum value)
            let annotation_style = ("sans-serif", 16).into_font().color(&self.palette.text);
            let [min_line, max_line, avg_line] = stats.annotation_lines();
            chart.plotting_area().draw(
                &(EmptyElement::at((points[0].0, stats.max))
                    + Text::new(min_line, (8, 8), annotation_style.clone())
                    + Text::new(max_line, (8, 26), annotation_style.clone())
                    + Text::new(avg_line, (8, 44), annotation_style)),
            )?;

            root.present()?;
        }

        Ok(buffer)
    }

    /// Render the centered title page: heading, base tickers, "with",
    /// quote tickers, and a small footer line
    pub fn render_title_page(
        &self,
        heading: &str,
        bases: &[CurrencyCode],
        quotes: &[CurrencyCode],
        footer: &str,
    ) -> Result<Vec<u8>> {
        let base_line = bases
            .iter()
            .map(CurrencyCode::ticker)
            .collect::<Vec<_>>()
            .join(" ");
        let quote_line = quotes
            .iter()
            .map(CurrencyCode::ticker)
            .collect::<Vec<_>>()
            .join(" ");

        let mut buffer = self.blank_buffer();
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            root.fill(&self.palette.page)?;

            let (w, h) = (self.width as i32, self.height as i32);
            let centered = |size: u32| {
                ("sans-serif", size)
                    .into_font()
                    .color(&self.palette.text)
                    .pos(Pos::new(HPos::Center, VPos::Center))
            };

            root.draw(&Text::new(heading.to_string(), (w / 2, h / 2), centered(56)))?;
            root.draw(&Text::new(base_line, (w / 2, h * 3 / 5), centered(24)))?;
            root.draw(&Text::new("with".to_string(), (w / 2, h * 13 / 20), centered(18)))?;
            root.draw(&Text::new(quote_line, (w / 2, h * 7 / 10), centered(24)))?;
            root.draw(&Text::new(footer.to_string(), (w / 2, h * 19 / 20), centered(14)))?;

            root.present()?;
        }

        Ok(buffer)
    }
}
