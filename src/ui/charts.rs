use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, Text};

use crate::color::ColorMap;
use crate::dashboard::{ChartRow, ChartSeries};
use crate::data::summary::Scorecards;
use crate::state::AppState;

const SOURCE_URL: &str = "https://sifted.eu/leaderboards/germany-2024";
const CHART_ROW_HEIGHT: f32 = 26.0;

// ---------------------------------------------------------------------------
// Dashboard page (central panel)
// ---------------------------------------------------------------------------

/// Render title, scorecards and both chart rows.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the ranking  (File → Open…)");
        });
        return;
    };

    ui.heading("Top 50 Fastest Growing Startups in Germany 2024");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Source:");
        ui.hyperlink_to("Sifted 50: Germany", SOURCE_URL);
    });
    ui.add_space(8.0);

    scorecards(ui, &view.scorecards);
    ui.separator();

    for row in &view.rows {
        chart_row(ui, row, state.colors_for(row.group_by));
        ui.add_space(12.0);
    }
}

fn scorecards(ui: &mut Ui, cards: &Scorecards) {
    let entries = scorecard_entries(cards);
    ui.columns(entries.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(entries) {
            col.label(RichText::new(label).small());
            col.heading(value);
        }
    });
}

/// (label, formatted value) for each headline figure.
fn scorecard_entries(cards: &Scorecards) -> [(&'static str, String); 4] {
    [
        ("Total Startups", cards.total_startups.to_string()),
        ("Total Employees", format!("{:.0}", cards.total_employees)),
        ("Total Funding (€M)", format_number(cards.total_funding)),
        (
            "Median Revenue Grow (2-yr CAGR %)",
            cards
                .median_revenue_growth
                .map(format_number)
                .unwrap_or_else(|| "–".to_string()),
        ),
    ]
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn chart_row(ui: &mut Ui, row: &ChartRow, colors: Option<&ColorMap>) {
    ui.strong(row.group_by);
    ui.columns(row.charts.len(), |cols: &mut [Ui]| {
        for (i, (col, chart)) in cols.iter_mut().zip(&row.charts).enumerate() {
            // Category names only on the first chart of a row; the rest share its order.
            bar_chart(col, &format!("{}_{i}", row.group_by), chart, colors, i == 0);
        }
    });
}

// ---------------------------------------------------------------------------
// One horizontal bar chart
// ---------------------------------------------------------------------------

/// Vertical position of the `i`-th bar; the first group sits on top.
fn bar_position(i: usize) -> f64 {
    -(i as f64)
}

/// Category label for an axis mark, if it lands on a bar.
fn label_at(labels: &[String], position: f64) -> Option<&str> {
    let idx = -position;
    if idx < 0.0 || (idx - idx.round()).abs() > 1e-6 {
        return None;
    }
    labels.get(idx.round() as usize).map(String::as_str)
}

fn bar_chart(ui: &mut Ui, id: &str, series: &ChartSeries, colors: Option<&ColorMap>, show_labels: bool) {
    if !series.spec.title.is_empty() {
        ui.label(RichText::new(series.spec.title).strong());
    }
    if series.bars.is_empty() {
        ui.label(RichText::new("No matching startups").weak());
        return;
    }

    let axis_labels: Vec<String> = series.bars.iter().map(|b| b.group.to_string()).collect();
    let bars: Vec<Bar> = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let fill = colors
                .map(|c| c.color_for(&g.group))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(bar_position(i), g.value.as_f64())
                .name(g.group.to_string())
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let max = series
        .bars
        .iter()
        .map(|g| g.value.as_f64())
        .fold(0.0_f64, f64::max);
    let height = CHART_ROW_HEIGHT * series.bars.len() as f32 + 20.0;

    Plot::new(id)
        .height(height)
        .show_x(false)
        .show_y(false)
        .show_grid(false)
        .show_axes([false, show_labels])
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(0.0)
        // Room for the value labels right of the longest bar.
        .include_x(max * 1.25)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            label_at(&axis_labels, mark.value).unwrap_or_default().to_string()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (i, g) in series.bars.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(g.value.as_f64(), bar_position(i)),
                        format!(" {}", g.value),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}
