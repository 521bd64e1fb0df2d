use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::engine::TaskWarrior;
use crate::model::Config;
use crate::ops::Session;
use crate::ops::batch::{BatchError, BatchPlan};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Editing the filter/report string
    Prompt,
    /// Waiting for y/n on `pending_plan`
    Confirm,
}

/// Blocking engine work queued by input handling. The event loop repaints
/// (showing `busy_label`) before running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Work {
    Refresh,
    SetFilter(String),
    Batch(BatchPlan),
}

impl Work {
    pub fn busy_label(&self) -> String {
        match self {
            Work::Refresh => "Refreshing\u{2026}".to_string(),
            Work::SetFilter(f) if f.trim().is_empty() => "Loading all tasks\u{2026}".to_string(),
            Work::SetFilter(f) => format!("Loading {}\u{2026}", f.trim()),
            Work::Batch(plan) => {
                let mut label = plan.describe();
                if let Some(first) = label.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                format!("{}\u{2026}", label)
            }
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the sorted visible rows
    pub cursor: usize,
    /// First visible row, maintained by the task table renderer
    pub scroll_offset: usize,
    pub show_help: bool,
    pub relative_dates: bool,
    pub confirm_before_schedule: bool,
    /// Prompt mode: text being typed and cursor byte offset
    pub prompt_buffer: String,
    pub prompt_cursor: usize,
    /// Confirm mode: the batch awaiting y/n
    pub pending_plan: Option<BatchPlan>,
    pub pending_work: Option<Work>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session, config: &Config) -> Self {
        App {
            session,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            relative_dates: config.ui.relative_dates,
            confirm_before_schedule: config.confirm_before_schedule,
            prompt_buffer: String::new(),
            prompt_cursor: 0,
            pending_plan: None,
            pending_work: None,
            status_message: None,
            status_is_error: false,
        }
    }

    /// UUID of the task under the cursor, if any
    pub fn cursor_uuid(&self) -> Option<String> {
        self.session
            .visible()
            .get(self.cursor)
            .map(|t| t.uuid.clone())
    }

    pub fn row_count(&self) -> usize {
        self.session.tasks().len()
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.row_count();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Start a batch from a planning result: report precondition errors,
    /// ask for confirmation when configured, otherwise queue it.
    pub fn begin_batch(&mut self, plan: Result<BatchPlan, BatchError>) {
        match plan {
            Err(e) => self.set_error(capitalize(&e.to_string())),
            Ok(plan) if self.confirm_before_schedule => {
                self.pending_plan = Some(plan);
                self.mode = Mode::Confirm;
            }
            Ok(plan) => self.pending_work = Some(Work::Batch(plan)),
        }
    }

    /// Label for the status row while work is queued
    pub fn busy_label(&self) -> Option<String> {
        self.pending_work.as_ref().map(Work::busy_label)
    }

    /// Run queued engine work, if any. Returns true when something ran.
    pub fn perform_pending(&mut self) -> bool {
        let Some(work) = self.pending_work.take() else {
            return false;
        };
        match work {
            Work::Refresh => match self.session.reload() {
                Ok(n) => self.set_message(format!("Loaded {} task{}", n, plural(n))),
                Err(e) => self.set_error(e.diagnostics()),
            },
            Work::SetFilter(filter) => {
                self.cursor = 0;
                self.scroll_offset = 0;
                match self.session.set_filter(Some(filter)) {
                    Ok(n) => self.set_message(format!("Loaded {} task{}", n, plural(n))),
                    Err(e) => self.set_error(e.diagnostics()),
                }
            }
            Work::Batch(plan) => {
                let outcome = self.session.apply(&plan);
                if outcome.report.is_success() && outcome.refresh.is_ok() {
                    self.set_message(outcome.message());
                } else {
                    self.set_error(outcome.message());
                }
            }
        }
        self.clamp_cursor();
        true
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let engine = TaskWarrior::from_config(&config.engine);
    let session = Session::new(Box::new(engine), config);
    let mut app = App::new(session, config);
    app.pending_work = Some(Work::Refresh);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Queued work runs after the frame above showed its busy label
        if app.perform_pending() {
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
