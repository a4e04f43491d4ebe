//! ratatui implementation of the display seam.
//!
//! `TuiView` is a plain state holder mutated through the `DashboardView`
//! setters; `draw` renders that state each frame. The status pie arrives as a
//! declarative pie config and is drawn as a color-keyed proportional
//! breakdown, since a character grid has no pie slices. Bar labels cannot be
//! rotated 45 degrees either; they are truncated to the bar width instead.

use std::collections::HashMap;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color,Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::charts::ChartConfig;
use crate::model::{RiskTier, SortKey};
use crate::view::{ChartHandle, ChartSlot, DashboardView, Panel, SummaryTiles, TableRow};

#[derive(Default)]
pub struct TuiView {
    pub loading: bool,
    pub tiles: Option<SummaryTiles>,
    pub rows: Vec<TableRow>,
    pub panel_errors: HashMap<Panel, String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// Armed by the event loop when the user accepts the modal, consumed by
    /// the controller's `confirm` call.
    confirm_armed: bool,
    pub confirm_prompt: Option<String>,
    pub search_mode: bool,
    pub search_query: String,
    pub sort_key: Option<SortKey>,
    status_chart: ChartHandle<ChartConfig>,
    risk_chart: ChartHandle<ChartConfig>,
}

impl TuiView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_confirm(&mut self) {
        self.confirm_armed = true;
    }
}

impl DashboardView for TuiView {
    fn set_loading(&mut self, active: bool) {
        self.loading = active;
    }

    fn set_summary(&mut self, tiles: SummaryTiles) {
        self.tiles = Some(tiles);
    }

    fn set_table_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
    }

    fn set_chart(&mut self, slot: ChartSlot, config: ChartConfig) {
        match slot {
            ChartSlot::Status => self.status_chart.replace(config),
            ChartSlot::OutletRisk => self.risk_chart.replace(config),
        }
    }

    fn set_panel_error(&mut self, panel: Panel, message: &str) {
        self.panel_errors.insert(panel, message.to_string());
    }

    fn clear_panel_error(&mut self, panel: Panel) {
        self.panel_errors.remove(&panel);
    }

    fn confirm(&mut self, _message: &str) -> bool {
        // The modal already ran in the event loop; by the time the controller
        // asks, the decision is recorded here.
        std::mem::take(&mut self.confirm_armed)
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.error = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.notice = None;
    }
}

pub fn draw(f: &mut Frame, view: &TuiView) {
    let outer = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(12),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(f.area());

    draw_tiles(f, outer[0], view);

    let charts = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[1]);
    draw_status_chart(f, charts[0], view);
    draw_risk_chart(f, charts[1], view);

    draw_table(f, outer[2], view);
    draw_status_line(f, outer[3], view);

    if let Some(prompt) = &view.confirm_prompt {
        draw_confirm_modal(f, prompt);
    }
}

fn draw_tiles(f: &mut Frame, area: Rect, view: &TuiView) {
    let cols = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ])
    .split(area);

    let empty = "-".to_string();
    let (tx, outlets, risky, pct, updated) = match &view.tiles {
        Some(t) => (
            &t.total_transactions,
            &t.total_outlets,
            &t.at_risk_transactions,
            &t.at_risk_percent,
            &t.last_updated,
        ),
        None => (&empty, &empty, &empty, &empty, &empty),
    };

    let titles = [
        ("Transactions", tx, Color::White),
        ("Outlets", outlets, Color::White),
        ("At-risk", risky, Color::Red),
        ("% at-risk", pct, Color::Red),
        ("Updated", updated, Color::Gray),
    ];
    let error = view.panel_errors.get(&Panel::Summary);
    for (i, (title, value, color)) in titles.iter().enumerate() {
        let block = panel_block(title, error.is_some());
        let text = Paragraph::new(Line::from(Span::styled(
            value.as_str(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(text, cols[i]);
    }
}

fn draw_status_chart(f: &mut Frame, area: Rect, view: &TuiView) {
    let block = panel_block(
        "Status distribution",
        view.panel_errors.contains_key(&Panel::StatusChart),
    );
    let mut lines = Vec::new();
    if let Some(cfg) = view.status_chart.mounted() {
        if let Some(dataset) = cfg.data.datasets.first() {
            let total: f64 = dataset.values.iter().sum();
            for (i, label) in cfg.data.labels.iter().enumerate() {
                let value = dataset.values.get(i).copied().unwrap_or(0.0);
                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                let color = dataset
                    .colors
                    .get(i)
                    .map(|c| color_from_hex(c))
                    .unwrap_or(Color::Gray);
                lines.push(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(color)),
                    Span::raw(format!("{label:<14}")),
                    Span::styled(
                        format!("{:>8}  {:>5.1}%", value as u64, share),
                        Style::default().fg(Color::Gray),
                    ),
                ]));
            }
        }
    } else {
        lines.push(Line::from("no data"));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_risk_chart(f: &mut Frame, area: Rect, view: &TuiView) {
    let block = panel_block(
        "Top outlets by % at-risk",
        view.panel_errors.contains_key(&Panel::OutletRiskChart),
    );
    match view.risk_chart.mounted() {
        Some(cfg) => {
            let bar_width: u16 = 8;
            let labels: Vec<String> = cfg
                .data
                .labels
                .iter()
                .map(|l| truncate_label(l, bar_width as usize))
                .collect();
            let values: Vec<u64> = cfg
                .data
                .datasets
                .first()
                .map(|d| {
                    let cap = cfg.options.y_max.unwrap_or(100.0);
                    d.values.iter().map(|v| v.min(cap).max(0.0) as u64).collect()
                })
                .unwrap_or_default();
            let data: Vec<(&str, u64)> = labels
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied())
                .collect();
            let chart = BarChart::default()
                .block(block)
                .data(data.as_slice())
                .bar_width(bar_width)
                .bar_gap(1)
                .max(cfg.options.y_max.unwrap_or(100.0) as u64)
                .bar_style(Style::default().fg(Color::Red))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
            f.render_widget(chart, area);
        }
        None => {
            f.render_widget(Paragraph::new("no data").block(block), area);
        }
    }
}

fn draw_table(f: &mut Frame, area: Rect, view: &TuiView) {
    let mut title = format!("Outlets ({})", view.rows.len());
    if !view.search_query.is_empty() || view.search_mode {
        title.push_str(&format!("  /{}", view.search_query));
    }
    if let Some(key) = view.sort_key {
        title.push_str(&format!("  sorted by {} desc", key.label()));
    }
    let block = panel_block(&title, view.panel_errors.contains_key(&Panel::Outlets));

    let header = Row::new(["#", "Outlet", "Transactions", "Loan total", "% at-risk", "Status"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = view.rows.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.index.to_string()),
            Cell::from(Span::styled(
                r.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Cell::from(r.transactions.clone()),
            Cell::from(r.loan_total.clone()),
            Cell::from(Span::styled(
                r.risk_percent.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Cell::from(Span::styled(
                r.tier.label(),
                Style::default()
                    .fg(Color::Black)
                    .bg(tier_color(r.tier))
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .style(Style::default().fg(tier_color(r.tier)))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, view: &TuiView) {
    let line = if view.loading {
        Line::from(Span::styled(
            " loading...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(err) = &view.error {
        Line::from(Span::styled(
            format!(" error: {}", err),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(panel_err) = view
        .panel_errors
        .iter()
        .next()
        .map(|(panel, msg)| format!(" {}: {}", panel.as_str(), msg))
    {
        Line::from(Span::styled(panel_err, Style::default().fg(Color::Red)))
    } else if let Some(notice) = &view.notice {
        Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(Color::Green),
        ))
    } else if view.search_mode {
        Line::from(" typing filters the table, Esc/Enter to leave search")
    } else {
        Line::from(" r reload | a analyze | s sort | / search | q quit")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_confirm_modal(f: &mut Frame, prompt: &str) {
    let area = centered_rect(44, 5, f.area());
    f.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "y = run, any other key = cancel",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .title("Confirm")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(body, area);
}

fn panel_block(title: &str, errored: bool) -> Block<'static> {
    let block = Block::bordered().title(title.to_string());
    if errored {
        block
            .title_bottom(Line::from(" fetch failed "))
            .style(Style::default().fg(Color::Red))
    } else {
        block
    }
}

fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::Safe => Color::Green,
        RiskTier::Attention => Color::Yellow,
        RiskTier::AtRisk => Color::Red,
    }
}

fn color_from_hex(hex: &str) -> Color {
    match hex {
        "#10b981" => Color::Green,
        "#3b82f6" => Color::Blue,
        "#ef4444" => Color::Red,
        _ => Color::Gray,
    }
}

fn truncate_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        label.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_status_chart;
    use crate::model::ChartSeries;

    #[test]
    fn test_confirm_consumes_arming() {
        let mut view = TuiView::new();
        assert!(!view.confirm("?"));
        view.arm_confirm();
        assert!(view.confirm("?"));
        assert!(!view.confirm("?"));
    }

    #[test]
    fn test_chart_slots_are_independent() {
        let mut view = TuiView::new();
        let series = ChartSeries {
            labels: vec!["active".into()],
            values: vec![1.0],
        };
        view.set_chart(ChartSlot::Status, build_status_chart(&series));
        assert!(view.status_chart.mounted().is_some());
        assert!(view.risk_chart.mounted().is_none());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("SHORT", 8), "SHORT");
        assert_eq!(truncate_label("VERYLONGNAME", 8), "VERYLON…");
    }
}
