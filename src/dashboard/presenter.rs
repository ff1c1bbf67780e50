// src/dashboard/presenter.rs

//! Terminal ownership for the dashboard.
//!
//! The poll loop hands each fresh [`DashboardView`] to a `Presenter`.
//! `TerminalPresenter` is the production implementation; tests either wrap a
//! `ratatui::backend::TestBackend` in it or provide a presenter that just
//! records views.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::dashboard::DashboardView;
use crate::dashboard::render::{compact_height, draw_compact, draw_dashboard};

/// Which layout to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Dashboard,
    Compact,
}

/// Something that can show a dashboard frame.
pub trait Presenter: Send {
    fn present(&mut self, view: &DashboardView) -> Result<()>;

    /// Restore the terminal. Called once when the monitor stops.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Draws into a `ratatui` terminal.
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    mode: ViewMode,
    /// Whether we switched stdout to the alternate screen and must switch back.
    alternate_screen: bool,
}

impl TerminalPresenter<CrosstermBackend<Stdout>> {
    /// Full-screen presenter for the live monitor.
    pub fn live(mode: ViewMode) -> Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).context("entering alternate screen")?;

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("initialising terminal")?;
        Ok(Self {
            terminal,
            mode,
            alternate_screen: true,
        })
    }

    /// Inline presenter for a one-shot print sized to `view`.
    pub fn inline(mode: ViewMode, view: &DashboardView) -> Result<Self> {
        let (_cols, rows) = crossterm::terminal::size().unwrap_or((120, 40));
        let height = match mode {
            ViewMode::Compact => compact_height(view).min(rows.max(1)),
            ViewMode::Dashboard => rows.max(1),
        };

        let terminal = Terminal::with_options(
            CrosstermBackend::new(io::stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )
        .context("initialising inline terminal")?;
        Ok(Self {
            terminal,
            mode,
            alternate_screen: false,
        })
    }
}

impl<B: Backend> TerminalPresenter<B> {
    /// Wrap an existing terminal (used with `TestBackend` in tests).
    pub fn with_terminal(terminal: Terminal<B>, mode: ViewMode) -> Self {
        Self {
            terminal,
            mode,
            alternate_screen: false,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend + Send> Presenter for TerminalPresenter<B> {
    fn present(&mut self, view: &DashboardView) -> Result<()> {
        let mode = self.mode;
        self.terminal
            .draw(|frame| match mode {
                ViewMode::Dashboard => draw_dashboard(frame, view),
                ViewMode::Compact => draw_compact(frame, view),
            })
            .context("drawing dashboard")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.alternate_screen {
            self.alternate_screen = false;
            execute!(io::stdout(), LeaveAlternateScreen, Show)
                .context("leaving alternate screen")?;
        }
        self.terminal.show_cursor().context("restoring cursor")?;
        Ok(())
    }
}

impl<B: Backend> Drop for TerminalPresenter<B> {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        }
    }
}
