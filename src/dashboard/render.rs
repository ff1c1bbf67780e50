// src/dashboard/render.rs

//! `ratatui` drawing of a [`DashboardView`].
//!
//! Layout of the full dashboard:
//!
//! ```text
//! +-------------------------- header ---------------------------+
//! | running jobs               (2/3)  | GPU availability  (1/3) |
//! | running summary                   |                         |
//! | pending jobs                      |                         |
//! +-------------------------- footer ---------------------------+
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};

use crate::dashboard::{BAR_WIDTH, DashboardView, JobRow};
use crate::slurm::JobState;

const SUMMARY_HEIGHT: u16 = 12;

fn header_style() -> Style {
    Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn titled(title: String) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
}

/// Draw the full dashboard into the whole frame.
pub fn draw_dashboard(frame: &mut Frame, view: &DashboardView) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(frame.area());

    frame.render_widget(header(view), rows[0]);

    let columns = Layout::horizontal([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);
    let left = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(SUMMARY_HEIGHT),
        Constraint::Fill(1),
    ])
    .split(columns[0]);

    frame.render_widget(
        job_table(
            &view.running,
            format!("Running Jobs ({})", view.running_total),
            JobState::Running,
        ),
        left[0],
    );
    frame.render_widget(summary_table(view), left[1]);
    frame.render_widget(
        job_table(
            &view.pending,
            format!("Pending Jobs ({})", view.pending_total),
            JobState::Pending,
        ),
        left[2],
    );
    frame.render_widget(gpu_table(view), columns[1]);

    frame.render_widget(footer(view), rows[2]);
}

/// Draw the single-table compact view.
pub fn draw_compact(frame: &mut Frame, view: &DashboardView) {
    let area = frame.area();
    let widths = [
        Constraint::Length(10),
        Constraint::Length(30),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Min(10),
    ];

    let mut rows: Vec<Row> = view
        .all_jobs
        .iter()
        .map(|job| {
            let state_color = if job.state.is_running() {
                Color::Green
            } else {
                Color::Yellow
            };
            let reason = if job.state.is_pending() {
                job.reason.clone()
            } else {
                String::new()
            };
            Row::new(vec![
                Cell::from(job.id.clone()).style(Style::new().fg(Color::Yellow)),
                Cell::from(job.name.clone()),
                Cell::from(job.partition.clone()).style(Style::new().fg(Color::Green)),
                Cell::from(job.state.to_string()).style(Style::new().fg(state_color)),
                Cell::from(job.gpus.clone()).style(Style::new().fg(Color::Magenta)),
                Cell::from(job.elapsed.clone()).style(Style::new().fg(Color::Cyan)),
                Cell::from(reason).style(Style::new().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    if rows.is_empty() {
        rows.push(placeholder_row("No jobs found", widths.len()));
    }

    let mut title = format!("SLURM Jobs ({})", view.timestamp);
    if view.stale {
        title.push_str(" [stale]");
    }

    let table = Table::new(rows, widths)
        .header(
            Row::new(["ID", "Name", "Partition", "State", "GPUs", "Time", "Reason"])
                .style(header_style()),
        )
        .block(titled(title));
    frame.render_widget(table, area);
}

/// Rows needed to show the compact view without scrolling.
pub fn compact_height(view: &DashboardView) -> u16 {
    let body = u16::try_from(view.all_jobs.len().max(1)).unwrap_or(u16::MAX);
    // Borders plus header row.
    body.saturating_add(3)
}

fn header(view: &DashboardView) -> Paragraph<'static> {
    let gpus = view
        .gpus_in_use
        .map(|g| g.to_string())
        .unwrap_or_else(|| "n/a".to_string());

    let mut spans = vec![
        Span::styled(
            "  SLURM Job Monitor",
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  |  User: {}", view.user_label),
            Style::new().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  |  GPUs in use: {gpus}"),
            Style::new().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  |  {}", view.timestamp),
            Style::new().add_modifier(Modifier::DIM),
        ),
    ];
    if view.stale {
        spans.push(Span::styled(
            "  |  query failed, showing last data",
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Color::Blue)),
    )
}

fn footer(view: &DashboardView) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::raw("  Press Ctrl+C to exit"),
        Span::raw(format!("  |  Refresh: {}s", view.refresh_secs)),
    ]))
    .style(Style::new().add_modifier(Modifier::DIM))
    .block(Block::bordered().border_type(BorderType::Rounded))
}

fn job_table(jobs: &[JobRow], title: String, kind: JobState) -> Table<'static> {
    let with_reason = kind.is_pending();

    let mut widths = vec![
        Constraint::Length(10),
        Constraint::Length(25),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let mut headers = vec!["ID", "Name", "User", "Partition", "GPUs", "Time", "Limit"];
    if with_reason {
        widths.push(Constraint::Min(20));
        headers.push("Reason");
    }

    let mut rows: Vec<Row> = jobs
        .iter()
        .map(|job| {
            let mut cells = vec![
                Cell::from(job.id.clone()).style(Style::new().fg(Color::Yellow)),
                Cell::from(job.name.clone()),
                Cell::from(job.user.clone()).style(Style::new().fg(Color::Blue)),
                Cell::from(job.partition.clone()).style(Style::new().fg(Color::Green)),
                Cell::from(job.gpus.clone()).style(Style::new().fg(Color::Magenta)),
                Cell::from(job.elapsed.clone()).style(Style::new().fg(Color::Cyan)),
                Cell::from(job.time_limit.clone()).style(Style::new().add_modifier(Modifier::DIM)),
            ];
            if with_reason {
                cells.push(Cell::from(job.reason.clone()).style(Style::new().fg(Color::Red)));
            }
            Row::new(cells)
        })
        .collect();

    if rows.is_empty() {
        let text = if with_reason {
            "No pending jobs"
        } else {
            "No running jobs"
        };
        rows.push(placeholder_row(text, headers.len()));
    }

    Table::new(rows, widths)
        .header(Row::new(headers).style(header_style()))
        .block(titled(title))
}

fn summary_table(view: &DashboardView) -> Table<'static> {
    let mut rows: Vec<Row> = view
        .summary
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.partition.clone()).style(Style::new().fg(Color::Green)),
                Cell::from(p.jobs.to_string()).style(Style::new().fg(Color::Yellow)),
                Cell::from(p.gpus.to_string()).style(Style::new().fg(Color::Magenta)),
            ])
        })
        .collect();

    if rows.is_empty() {
        rows.push(Row::new(["-", "0", "0"]));
    } else {
        let (jobs, gpus) = view.summary_totals();
        rows.push(
            Row::new(vec!["Total".to_string(), jobs.to_string(), gpus.to_string()])
                .style(Style::new().add_modifier(Modifier::BOLD))
                .top_margin(1),
        );
    }

    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(["Partition", "Jobs", "GPUs"]).style(header_style()))
    .block(titled("Running Summary".to_string()))
}

fn gpu_table(view: &DashboardView) -> Table<'static> {
    let rows: Vec<Row> = view
        .gpu_rows
        .iter()
        .map(|p| {
            let avail_color = if p.idle > 0 { Color::Green } else { Color::Red };
            let used = p.used_cells.min(BAR_WIDTH);
            let bar = Line::from(vec![
                Span::styled("█".repeat(BAR_WIDTH - used), Style::new().fg(Color::Green)),
                Span::styled("█".repeat(used), Style::new().fg(Color::Red)),
                Span::raw(format!(" {:.0}%", p.usage_percent)),
            ]);
            Row::new(vec![
                Cell::from(p.partition.clone()).style(Style::new().fg(Color::Green)),
                Cell::from(p.idle.to_string()).style(Style::new().fg(avail_color)),
                Cell::from(p.total.to_string()).style(Style::new().add_modifier(Modifier::DIM)),
                Cell::from(bar),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(20),
        ],
    )
    .header(Row::new(["Partition", "Available", "Total", "Usage"]).style(header_style()))
    .block(titled("GPU Availability".to_string()))
}

fn placeholder_row(text: &'static str, columns: usize) -> Row<'static> {
    let mut cells = vec!["-", text];
    cells.resize(columns, "-");
    Row::new(cells)
}
