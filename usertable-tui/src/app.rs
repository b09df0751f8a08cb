//! Event loop: terminal events in, session mutations out, redraw on change.

use chrono::Utc;
use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info, warn};
use usertable_core::{RecordStore, TableConfig, TableSession};
use usertable_term::Terminal;

use crate::error::AppError;
use crate::input::{Action, convert_event};
use crate::settings::SettingsProvider;
use crate::view;

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: TableSession,
    store: RecordStore,
    settings: SettingsProvider,
    config: TableConfig,
    /// One-line message shown in the status row until the next action.
    notice: Option<String>,
}

impl App {
    pub fn new(
        session: TableSession,
        store: RecordStore,
        settings: SettingsProvider,
        config: TableConfig,
    ) -> Self {
        Self {
            session,
            store,
            settings,
            config,
            notice: None,
        }
    }

    /// Run until the user quits or the terminal fails.
    pub async fn run(mut self, mut terminal: Terminal) -> Result<(), AppError> {
        let mut events = EventStream::new();
        self.draw(&mut terminal)?;

        while let Some(event) = events.next().await {
            let Some(action) = convert_event(event?) else {
                continue;
            };
            if self.handle(action).await == Flow::Quit {
                info!("Quit requested");
                break;
            }
            if self.session.take_dirty() {
                self.draw(&mut terminal)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let session = &mut self.session;
        let notice = self.notice.as_deref();
        terminal.draw(|buf| view::paint(buf, session, Utc::now(), notice))?;
        // Painting only refreshes layout and memos.
        session.take_dirty();
        Ok(())
    }

    async fn handle(&mut self, action: Action) -> Flow {
        debug!("Action: {:?}", action);
        if self.notice.take().is_some() {
            self.session.mark_dirty();
        }
        let session = &mut self.session;

        match action {
            Action::Quit => return Flow::Quit,
            Action::ScrollRows(rows) => {
                session.scroll_rows(rows);
            }
            Action::ScrollPages(pages) => {
                session.scroll_pages(pages);
            }
            Action::Wheel(notches) => {
                session.scroll_notches(notches);
            }
            Action::ScrollHome => {
                session.scroll_to(0);
            }
            Action::ScrollEnd => {
                session.scroll_to_end();
            }
            Action::Pan(columns) => {
                session.scroll_x_by(columns);
            }
            Action::FocusColumn(delta) => session.focus_by(delta),
            Action::MoveColumn(delta) => {
                session.move_focused(delta);
            }
            Action::ToggleSort => {
                session.toggle_sort_focused();
            }
            Action::ClearSort => {
                session.clear_sort();
            }
            Action::ToggleRenderMode => {
                let mode = session.toggle_render_mode();
                self.config.render_mode = mode;
                if let Err(e) = self.settings.save_table_config(&self.config).await {
                    warn!("Failed to save table config: {}", e);
                }
            }
            Action::Regenerate => self.regenerate().await,
            Action::CancelDrag => {
                session.cancel_drag();
            }
            Action::PointerDown(at) => {
                session.pointer_down(at);
            }
            Action::PointerDrag(at) => {
                session.pointer_move(at);
            }
            Action::PointerUp(at) => {
                session.pointer_up(at);
            }
            Action::Redraw => session.mark_dirty(),
        }
        Flow::Continue
    }

    /// Replace the dataset with freshly generated records.
    ///
    /// On failure the current records stay and the error is shown.
    async fn regenerate(&mut self) {
        match self.store.regenerate(self.config.row_count).await {
            Ok(records) => {
                self.notice = Some(format!("regenerated {} users", records.len()));
                self.session.replace_records(records);
            }
            Err(e) => {
                warn!("Failed to regenerate records: {}", e);
                self.notice = Some(format!("regenerate failed: {}", e));
                self.session.mark_dirty();
            }
        }
    }
}
