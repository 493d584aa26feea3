use std::error::Error;
use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::heatmap::HeatmapMatrix;
use crate::analysis::overview::{LineStyle, ReferenceLine};
use crate::config::constants::{
    BAR_CHART_SIZE, GRID_PANEL_SIZE, HEATMAP_DARK_TEXT_THRESHOLD, HEATMAP_SIZE, STACKED_CHART_SIZE,
    TREND_CHART_SIZE,
};
use crate::error::DashboardError;
use crate::render::colors::{parse_color, reds_scale, MISSING_CELL};
use crate::utils::logging::{self, OperationCategory, RenderType};

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
const BAR_HALF_WIDTH: f64 = 0.35;

/// One bar; bars sharing a legend entry are drawn as one series.
#[derive(Debug, Clone)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
    pub legend: Option<String>,
}

/// One slice of a stacked bar.
#[derive(Debug, Clone)]
pub struct StackSegment {
    pub bar: usize,
    pub series: String,
    pub value: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct LineSpec {
    pub name: String,
    pub color: RGBColor,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct GridPanel {
    pub title: String,
    pub title_color: RGBColor,
    pub lines: Vec<LineSpec>,
}

/// Axis range padded by a tenth of its span, always including zero for bar charts.
fn padded_bounds<I: IntoIterator<Item = f64>>(values: I, include_zero: bool) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span == 0.0 {
        // All-zero bars sit on the axis
        if include_zero {
            return (0.0, 1.0);
        }
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * 0.1;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    (lo, hi + pad)
}

/// Category label for an integer tick, blank elsewhere.
fn tick_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn draw_line(
    chart: &mut Chart<'_, '_>,
    points: Vec<(f64, f64)>,
    color: RGBColor,
    style: LineStyle,
    width: u32,
    label: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let shape = ShapeStyle {
        color: color.to_rgba(),
        filled: false,
        stroke_width: width,
    };
    let annotation = match style {
        LineStyle::Solid => chart.draw_series(LineSeries::new(points, shape))?,
        LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, shape))?,
        LineStyle::DashDot => chart.draw_series(DashedLineSeries::new(points, 14, 4, shape))?,
        LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, shape))?,
    };
    if let Some(label) = label {
        annotation
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], shape));
    }
    Ok(())
}

fn draw_reference_lines(
    chart: &mut Chart<'_, '_>,
    lines: &[ReferenceLine],
    x_range: (f64, f64),
    labelled: bool,
) -> Result<(), Box<dyn Error>> {
    for line in lines {
        let points = vec![(x_range.0, line.value), (x_range.1, line.value)];
        let label = if labelled { Some(line.label.as_str()) } else { None };
        draw_line(chart, points, parse_color(line.color), line.style, 2, label)?;
    }
    Ok(())
}

fn draw_legend<'a>(chart: &mut Chart<'a, 'a>) -> Result<(), Box<dyn Error>> {
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .label_font((FONT, 14))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}

fn try_bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    bars: &[BarSpec],
    reference_lines: &[ReferenceLine],
    show_legend: bool,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let x_range = (-0.5, bars.len().max(1) as f64 - 0.5);
    let (y_lo, y_hi) = padded_bounds(
        bars.iter().map(|b| b.value).chain(reference_lines.iter().map(|l| l.value)),
        true,
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(x_range.0..x_range.1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&|x| tick_label(&labels, *x))
        .y_desc(y_desc)
        .label_style((FONT, 14))
        .draw()?;

    // Group bars by legend entry, keeping first-appearance order
    let mut groups: Vec<(Option<&str>, Vec<(usize, &BarSpec)>)> = Vec::new();
    for (index, bar) in bars.iter().enumerate() {
        let key = bar.legend.as_deref();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push((index, bar)),
            None => groups.push((key, vec![(index, bar)])),
        }
    }

    for (legend, members) in groups {
        let color = members.first().map(|(_, b)| b.color).unwrap_or(BLACK);
        let annotation = chart.draw_series(members.iter().map(|(index, bar)| {
            let x = *index as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, bar.value)],
                bar.color.filled(),
            )
        }))?;
        if let (Some(legend), true) = (legend, show_legend) {
            annotation
                .label(legend)
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
        }
    }

    draw_reference_lines(&mut chart, reference_lines, x_range, show_legend)?;

    if show_legend {
        draw_legend(&mut chart)?;
    }

    root.present()?;
    Ok(())
}

/// Bar chart with optional horizontal reference lines.
pub fn bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    bars: &[BarSpec],
    reference_lines: &[ReferenceLine],
    show_legend: bool,
) -> Result<(), DashboardError> {
    let _timing = logging::start_timing("bar_chart",
        OperationCategory::Rendering { subcategory: RenderType::BarChart });
    try_bar_chart(path, title, y_desc, bars, reference_lines, show_legend).map_err(DashboardError::from)
}

fn try_stacked_bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    bar_labels: &[String],
    segments: &[StackSegment],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, STACKED_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // Positive slices stack upward from zero, negative ones downward
    let mut rects: Vec<(&StackSegment, f64, f64)> = Vec::with_capacity(segments.len());
    let mut up = vec![0.0; bar_labels.len()];
    let mut down = vec![0.0; bar_labels.len()];
    for segment in segments {
        let bar = segment.bar;
        if bar >= up.len() {
            continue;
        }
        let (base, top) = if segment.value >= 0.0 {
            let base = up[bar];
            up[bar] += segment.value;
            (base, up[bar])
        } else {
            let base = down[bar];
            down[bar] += segment.value;
            (base, down[bar])
        };
        rects.push((segment, base, top));
    }

    let x_range = (-0.5, bar_labels.len().max(1) as f64 - 0.5);
    let (y_lo, y_hi) = padded_bounds(up.iter().chain(down.iter()).copied(), true);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(x_range.0..x_range.1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bar_labels.len().max(1))
        .x_label_formatter(&|x| tick_label(bar_labels, *x))
        .y_desc(y_desc)
        .label_style((FONT, 14))
        .draw()?;

    let mut series_order: Vec<&str> = Vec::new();
    for segment in segments {
        if !series_order.contains(&segment.series.as_str()) {
            series_order.push(&segment.series);
        }
    }

    for series in series_order {
        let members: Vec<&(&StackSegment, f64, f64)> = rects
            .iter()
            .filter(|(segment, _, _)| segment.series == series)
            .collect();
        let color = members.first().map(|(segment, _, _)| segment.color).unwrap_or(BLACK);

        chart
            .draw_series(members.iter().map(|(segment, base, top)| {
                let x = segment.bar as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, *base), (x + BAR_HALF_WIDTH, *top)],
                    segment.color.filled(),
                )
            }))?
            .label(series)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    draw_legend(&mut chart)?;
    root.present()?;
    Ok(())
}

/// Stacked bars, one legend entry per series.
pub fn stacked_bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    bar_labels: &[String],
    segments: &[StackSegment],
) -> Result<(), DashboardError> {
    let _timing = logging::start_timing("stacked_bar_chart",
        OperationCategory::Rendering { subcategory: RenderType::StackedBar });
    try_stacked_bar_chart(path, title, y_desc, bar_labels, segments).map_err(DashboardError::from)
}

fn try_heatmap_chart(path: &Path, title: &str, matrix: &HeatmapMatrix) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let row_labels = matrix.display_labels();
    let column_labels: Vec<String> = matrix.variants.iter().map(|v| v.to_string()).collect();
    let columns = column_labels.len().max(1);
    let rows = row_labels.len().max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 260)
        .set_label_area_size(LabelAreaPosition::Top, 40)
        .build_cartesian_2d(-0.5..columns as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(columns)
        .y_labels(rows)
        .x_label_formatter(&|x| tick_label(&column_labels, *x))
        .y_label_formatter(&|y| tick_label(&row_labels, *y))
        .label_style((FONT, 12))
        .draw()?;

    for (row, values) in matrix.normalized.iter().enumerate() {
        let y = row as f64;
        chart.draw_series(values.iter().enumerate().map(|(column, value)| {
            let x = column as f64;
            let fill = value.map(reds_scale).unwrap_or(MISSING_CELL);
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], fill.filled())
        }))?;

        let processes = &matrix.top_process[row];
        chart.draw_series(values.iter().zip(processes.iter()).enumerate().map(|(column, (value, process))| {
            let text_color = match value {
                Some(v) if *v > HEATMAP_DARK_TEXT_THRESHOLD => WHITE,
                _ => BLACK,
            };
            let style = (FONT, 10)
                .into_font()
                .color(&text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(process.clone(), (column as f64, y), style)
        }))?;
    }

    root.present()?;
    Ok(())
}

/// Annotated heatmap on the Reds scale.
pub fn heatmap_chart(path: &Path, title: &str, matrix: &HeatmapMatrix) -> Result<(), DashboardError> {
    let _timing = logging::start_timing("heatmap_chart",
        OperationCategory::Rendering { subcategory: RenderType::Heatmap });
    try_heatmap_chart(path, title, matrix).map_err(DashboardError::from)
}

fn year_range(lines: &[LineSpec]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (x, _) in lines.iter().flat_map(|l| l.points.iter()) {
        lo = lo.min(*x);
        hi = hi.max(*x);
    }
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

fn try_line_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    lines: &[LineSpec],
    reference_lines: &[ReferenceLine],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, TREND_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = year_range(lines);
    let (y_lo, y_hi) = padded_bounds(
        lines
            .iter()
            .flat_map(|l| l.points.iter().map(|(_, y)| *y))
            .chain(reference_lines.iter().map(|l| l.value)),
        false,
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_range.0..x_range.1, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .label_style((FONT, 14))
        .draw()?;

    for line in lines {
        draw_line(&mut chart, line.points.clone(), line.color, line.style, 2, Some(&line.name))?;
    }
    draw_reference_lines(&mut chart, reference_lines, x_range, true)?;
    draw_legend(&mut chart)?;

    root.present()?;
    Ok(())
}

/// Year-indexed line chart with reference lines.
pub fn line_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    lines: &[LineSpec],
    reference_lines: &[ReferenceLine],
) -> Result<(), DashboardError> {
    let _timing = logging::start_timing("line_chart",
        OperationCategory::Rendering { subcategory: RenderType::LineChart });
    try_line_chart(path, title, y_desc, lines, reference_lines).map_err(DashboardError::from)
}

fn try_line_grid(
    path: &Path,
    panels: &[GridPanel],
    columns: usize,
    y_bounds: (f64, f64),
    reference_lines: &[ReferenceLine],
) -> Result<(), Box<dyn Error>> {
    let columns = columns.max(1);
    let rows = panels.len().div_ceil(columns).max(1);
    let size = (GRID_PANEL_SIZE.0 * columns as u32, GRID_PANEL_SIZE.1 * rows as u32);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((rows, columns));

    let (y_lo, y_hi) = if y_bounds.0 < y_bounds.1 {
        y_bounds
    } else {
        (y_bounds.0 - 1.0, y_bounds.1 + 1.0)
    };

    for (index, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        let x_range = year_range(&panel.lines);
        let caption = (FONT, 16).into_font().color(&panel.title_color);

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, caption)
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 30)
            .build_cartesian_2d(x_range.0..x_range.1, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_labels(5)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .label_style((FONT, 11))
            .draw()?;

        // Scenario legend once, on the first panel
        let first = index == 0;
        for line in &panel.lines {
            let label = if first { Some(line.name.as_str()) } else { None };
            draw_line(&mut chart, line.points.clone(), line.color, line.style, 2, label)?;
        }
        draw_reference_lines(&mut chart, reference_lines, x_range, false)?;
        if first && !panel.lines.is_empty() {
            draw_legend(&mut chart)?;
        }
    }

    root.present()?;
    Ok(())
}

/// Small multiples sharing the exact y range `y_bounds`, `columns` panels per row.
pub fn line_grid(
    path: &Path,
    panels: &[GridPanel],
    columns: usize,
    y_bounds: (f64, f64),
    reference_lines: &[ReferenceLine],
) -> Result<(), DashboardError> {
    let _timing = logging::start_timing("line_grid",
        OperationCategory::Rendering { subcategory: RenderType::LineChart });
    try_line_grid(path, panels, columns, y_bounds, reference_lines).map_err(DashboardError::from)
}
