//! Chart rendering for normalized chart data

mod colors;
mod export;


pub use colors::ChartTheme;
pub use export::{ExportFormat, export_chart};

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisType, Color, ItemStyle, Label, LabelPosition, LineStyle,
        SplitLine, Symbol, TextStyle,
    },
    series::{Bar, Line, Pie, Scatter, Tree, TreeLeaves, TreeNode},
};
use thiserror::Error;

use crate::normalize::{ChartData, ChartKind, ColorValue, Series, TreeData};
use crate::settings::Settings;

/// Chart dimensions (2x for Retina quality)
pub(super) const CHART_WIDTH: u32 = 2400;
pub(super) const CHART_HEIGHT: u32 = 1200;

const POINT_RADIUS: f64 = 6.0;
const LINE_WIDTH: f64 = 2.5;
const AREA_OPACITY: f64 = 0.1;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No data to render")]
    Empty,
    #[error("Failed to save chart: {0}")]
    Save(String),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize chart options: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Title and theme for one rendered chart
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    pub title: Option<String>,
    pub theme: ChartTheme,
}

/// Build a charming chart from normalized data
pub fn build_chart(
    data: &ChartData,
    kind: ChartKind,
    settings: &Settings,
    options: &ChartOptions,
) -> Result<Chart, RenderError> {
    if data.is_empty() {
        return Err(RenderError::Empty);
    }

    let theme = options.theme.colors();
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| default_title(kind).to_string());

    let chart = Chart::new()
        .background_color(Color::Value(theme.background.to_string()))
        .title(
            Title::new()
                .text(title)
                .subtext(series_totals(data, settings))
                .left("center")
                .top("3%")
                .text_style(TextStyle::new().color(theme.title).font_size(36))
                .subtext_style(TextStyle::new().color(theme.axis).font_size(22)),
        );

    let legend_names: Vec<String> = match kind {
        ChartKind::Pie => data.categories.clone(),
        _ => data.series.iter().map(|s| s.name.clone()).collect(),
    };
    let chart = chart.legend(
        Legend::new()
            .show(settings.show_legend)
            .data(legend_names)
            .bottom("3%")
            .item_gap(40)
            .text_style(TextStyle::new().color(theme.title).font_size(24)),
    );

    match kind {
        ChartKind::Pie => Ok(pie_chart(chart, data, settings)),
        ChartKind::Scatter => Ok(scatter_chart(chart, data, settings, theme)),
        ChartKind::Tree => Ok(tree_chart(chart, data, settings, theme)),
        _ => Ok(cartesian_chart(chart, data, kind, settings, theme)),
    }
}

fn default_title(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "Bar Chart",
        ChartKind::Line => "Line Chart",
        ChartKind::Area => "Area Chart",
        ChartKind::Pie => "Pie Chart",
        ChartKind::Scatter => "Scatter Plot",
        ChartKind::Heatmap => "Activity Heatmap",
        ChartKind::Tree => "Tree Chart",
    }
}

/// Subtitle listing each series total in the configured number format
fn series_totals(data: &ChartData, settings: &Settings) -> String {
    data.series
        .iter()
        .map(|s| format!("{}: {}", s.name, settings.format_number(s.total())))
        .collect::<Vec<_>>()
        .join("   ")
}

fn series_color(series: &Series, index: usize, settings: &Settings) -> String {
    series
        .color
        .clone()
        .unwrap_or_else(|| settings.color_at(index).to_string())
}

fn value_axis(theme: &colors::ThemeColors, show_grid: bool) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().color(theme.axis).font_size(24))
        .split_line(
            SplitLine::new()
                .show(show_grid)
                .line_style(LineStyle::new().width(1).color(theme.grid)),
        )
}

fn grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("3%")
        .bottom("9%")
        .top("15%")
        .contain_label(true)
}

fn cartesian_chart(
    chart: Chart,
    data: &ChartData,
    kind: ChartKind,
    settings: &Settings,
    theme: &colors::ThemeColors,
) -> Chart {
    let mut chart = chart
        .grid(grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(data.categories.clone())
                .axis_label(AxisLabel::new().color(theme.axis).font_size(24)),
        )
        .y_axis(value_axis(theme, settings.show_grid));

    for (i, series) in data.series.iter().enumerate() {
        let color = series_color(series, i, settings);
        chart = match kind {
            ChartKind::Line | ChartKind::Area => chart.series(line_series(series, &color, kind)),
            // Heatmap renders as a single-color bar chart
            ChartKind::Heatmap => chart.series(
                Bar::new()
                    .name(series.name.as_str())
                    .data(series.values.clone())
                    .item_style(ItemStyle::new().color(color.as_str()).opacity(0.85)),
            ),
            _ => chart.series(
                Bar::new()
                    .name(series.name.as_str())
                    .data(series.values.clone())
                    .item_style(ItemStyle::new().color(color.as_str()).opacity(0.9)),
            ),
        };
    }
    chart
}

fn line_series(series: &Series, color: &str, kind: ChartKind) -> Line {
    let style = &series.style;
    let stroke = style
        .border_color
        .as_ref()
        .and_then(ColorValue::first)
        .unwrap_or(color);
    let radius = style.point_radius.unwrap_or(POINT_RADIUS);

    let line = Line::new()
        .name(series.name.as_str())
        .data(series.values.clone())
        .symbol(Symbol::Circle)
        .symbol_size(radius * 2.0)
        .line_style(
            LineStyle::new()
                .width(style.border_width.unwrap_or(LINE_WIDTH))
                .color(stroke),
        )
        .item_style(
            ItemStyle::new()
                .color(stroke)
                .border_color(style.point_border_color.as_deref().unwrap_or("#ffffff")),
        );

    if kind == ChartKind::Area || style.fill == Some(true) {
        let fill = style
            .background_color
            .as_ref()
            .and_then(ColorValue::first)
            .map(str::to_string)
            .unwrap_or_else(|| crate::settings::with_alpha(stroke, AREA_OPACITY));
        line.area_style(AreaStyle::new().color(fill.as_str()))
    } else {
        line
    }
}

fn pie_chart(chart: Chart, data: &ChartData, settings: &Settings) -> Chart {
    let Some(series) = data.series.first() else {
        return chart;
    };
    if data.series.len() > 1 {
        tracing::warn!(
            "pie chart shows only the first series; {} more ignored",
            data.series.len() - 1
        );
    }

    let slices: Vec<(f64, &str)> = series
        .values
        .iter()
        .zip(&data.categories)
        .map(|(v, c)| (*v, c.as_str()))
        .collect();

    let colors: Vec<Color> = (0..slices.len())
        .map(|i| Color::from(slice_color(series, i, settings)))
        .collect();

    chart.color(colors).series(
        Pie::new()
            .name(series.name.as_str())
            .radius(vec!["35%", "65%"])
            .center(vec!["50%", "55%"])
            .data(slices),
    )
}

/// Per-slice color: an uploaded color list first, then the palette
fn slice_color<'a>(series: &'a Series, index: usize, settings: &Settings) -> &'a str {
    let uploaded = match &series.style.background_color {
        Some(list @ ColorValue::PerPoint(_)) => list.at(index),
        _ => None,
    };
    uploaded.unwrap_or_else(|| settings.color_at(index))
}

fn scatter_chart(
    chart: Chart,
    data: &ChartData,
    settings: &Settings,
    theme: &colors::ThemeColors,
) -> Chart {
    let mut chart = chart
        .grid(grid())
        .x_axis(value_axis(theme, settings.show_grid))
        .y_axis(value_axis(theme, settings.show_grid));

    for (i, series) in data.series.iter().enumerate() {
        let points: Vec<Vec<f64>> = if series.points.is_empty() {
            // Plain values plot against their position
            series
                .values
                .iter()
                .enumerate()
                .map(|(x, y)| vec![(x + 1) as f64, *y])
                .collect()
        } else {
            series.points.iter().map(|p| p.to_vec()).collect()
        };
        let radius = series.style.point_radius.unwrap_or(POINT_RADIUS);
        let color = series_color(series, i, settings);

        chart = chart.series(
            Scatter::new()
                .name(series.name.as_str())
                .symbol_size(radius * 2.0)
                .data(points)
                .item_style(ItemStyle::new().color(color.as_str()).opacity(0.8)),
        );
    }
    chart
}

/// Left-to-right tree; leaf labels sit right of their nodes
fn tree_chart(
    chart: Chart,
    data: &ChartData,
    settings: &Settings,
    theme: &colors::ThemeColors,
) -> Chart {
    let Some(root) = &data.tree else {
        return chart;
    };
    let color = match data.series.first() {
        Some(series) => series_color(series, 0, settings),
        None => settings.color_at(0).to_string(),
    };
    let label = |position: LabelPosition| {
        Label::new()
            .position(position)
            .color(theme.title)
            .font_size(22)
    };

    chart.series(
        Tree::new()
            .name(root.name.as_str())
            .top("15%")
            .left("10%")
            .bottom("12%")
            .right("15%")
            .symbol(Symbol::Circle)
            .symbol_size(POINT_RADIUS * 2.0)
            .item_style(ItemStyle::new().color(color.as_str()).border_color(color.as_str()))
            .label(label(LabelPosition::Left))
            .leaves(TreeLeaves::new().label(label(LabelPosition::Right)))
            .expand_and_collapse(false)
            .data(vec![tree_node(root)]),
    )
}

fn tree_node(node: &TreeData) -> TreeNode {
    TreeNode {
        name: node.name.clone(),
        value: node.value,
        collapsed: None,
        children: if node.children.is_empty() {
            None
        } else {
            Some(node.children.iter().map(tree_node).collect())
        },
    }
}
