//! Terminal demo of the smooth table (impure shell)
//!
//! One terminal line is one pixel of the table's vertical axis, so a row of
//! `cell_height` lines can be scrolled line by line and show partially at
//! the viewport edges.

mod label_cell;

pub use label_cell::LabelCell;

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::ScrollContext;
use crate::table::{Allocation, SmoothTable, TableError};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

/// Errors that can occur while running the demo
#[derive(Debug, Error)]
pub enum DemoError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Table could not be built
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// Demo application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    table: SmoothTable<LabelCell>,
    key_bindings: KeyBindings,
    scroll_step: u64,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode on the alternate screen and build the
    /// demo table.
    pub fn new(config: &ResolvedConfig) -> Result<Self, DemoError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(terminal, config)
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), DemoError> {
        const TICK: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the demo table on `terminal` and lay it out for the current
    /// terminal size.
    ///
    /// # Errors
    /// Fails if the grid is empty or the terminal size cannot be read.
    pub fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig) -> Result<Self, DemoError> {
        let mut table = SmoothTable::new(config.rows, config.columns, LabelCell::default)?;
        let count = config.count;
        table.connect_fill_in(move |cell: &mut LabelCell, index| cell.set_label(index, count));
        table.set_count(count);
        table.realize();
        table.map();

        let mut app = Self {
            terminal,
            table,
            key_bindings: KeyBindings::default(),
            scroll_step: config.scroll_step.max(1),
        };
        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height);
        info!(
            rows = config.rows,
            columns = config.columns,
            count,
            "Demo table ready"
        );
        Ok(app)
    }

    /// The demo table.
    pub fn table(&self) -> &SmoothTable<LabelCell> {
        &self.table
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn scroll_context(&self) -> ScrollContext {
        let values = self.table.adjustment().values();
        ScrollContext {
            value: values.value,
            step: self.scroll_step,
            page: values.page_size.max(1),
            max_value: values.max_value(),
        }
    }

    /// Handle a key press. Returns `true` if the demo should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        match action.scroll_target(self.scroll_context()) {
            Some(target) => {
                let applied = self.table.scroll_to(target);
                debug!(?action, applied, "Scrolled");
                false
            }
            None => true,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let ctx = self.scroll_context();
        let target = match mouse.kind {
            MouseEventKind::ScrollDown => ctx.value.saturating_add(ctx.step),
            MouseEventKind::ScrollUp => ctx.value.saturating_sub(ctx.step),
            _ => return,
        };
        self.table.scroll_to(target);
    }

    /// Give the table everything above the status line.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let area = table_area(Rect::new(0, 0, width, height));
        debug!(width = area.width, height = area.height, "Resizing table");
        self.table.size_allocate(Allocation::sized(
            u32::from(area.width),
            u32::from(area.height),
        ));
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), DemoError> {
        if let Some(fault) = self.table.take_fault() {
            warn!(%fault, "Last scroll left part of the viewport empty");
        }
        let table = &self.table;
        self.terminal.draw(|frame| render(frame, table))?;
        Ok(())
    }
}

/// Area the table occupies inside `area`: everything but the last line.
fn table_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}

fn render(frame: &mut Frame, table: &SmoothTable<LabelCell>) {
    let area = frame.area();
    let table_rect = table_area(area);
    render_table(table, table_rect, frame.buffer_mut());

    let values = table.adjustment().values();
    let status = format!("offset {}/{}", values.value, values.max_value());
    if area.height > table_rect.height {
        frame.buffer_mut().set_stringn(
            area.x,
            area.bottom() - 1,
            status,
            usize::from(area.width),
            Style::default().add_modifier(Modifier::REVERSED),
        );
    }
}

/// Viewport line for canvas line `y`, if it falls inside `area`.
fn viewport_line(area: Rect, y: i64) -> Option<u16> {
    let y = u16::try_from(y).ok()?;
    (y < area.height).then(|| area.y + y)
}

/// Draw every placed cell: a rule on its top line and its label centered on
/// its middle line. Cells are shifted up by the canvas offset and clipped to
/// `area`.
pub fn render_table(table: &SmoothTable<LabelCell>, area: Rect, buf: &mut Buffer) {
    let Some(canvas) = table.canvas() else {
        return;
    };
    let rule_style = Style::default().add_modifier(Modifier::DIM);

    for cell in table.cells() {
        let Some(rect) = cell.rect() else {
            continue;
        };
        if rect.bottom() <= canvas.offset()
            || rect.y >= canvas.offset() + u64::from(area.height)
        {
            continue;
        }
        let Ok(left) = u16::try_from(rect.x) else {
            continue;
        };
        if left >= area.width {
            continue;
        }
        let width = u16::try_from(rect.width)
            .unwrap_or(u16::MAX)
            .min(area.width - left);
        let x = area.x + left;
        let top = canvas.viewport_y(&rect);

        if rect.height >= 2 {
            if let Some(y) = viewport_line(area, top) {
                buf.set_string(x, y, "─".repeat(usize::from(width)), rule_style);
            }
        }

        let middle = top + i64::from(rect.height / 2);
        if let Some(y) = viewport_line(area, middle) {
            let label = cell.text();
            let pad = usize::from(width).saturating_sub(label.width()) / 2;
            // pad < width, so this stays inside the cell
            let start = x + pad as u16;
            buf.set_stringn(start, y, label, usize::from(width) - pad, Style::default());
        }
    }
}

/// Run the demo until the user quits, restoring the terminal afterwards.
pub fn run(config: &ResolvedConfig) -> Result<(), DemoError> {
    let result = TuiApp::new(config).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), DemoError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
