//! Crossterm event conversion into table actions.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use log::trace;
use usertable_core::Point;

/// Columns scrolled per horizontal step.
const PAN_STEP: i32 = 4;

/// Something the user asked the table to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Scroll by rows; positive moves down.
    ScrollRows(i64),
    ScrollPages(i64),
    /// Mouse wheel notches; positive moves down.
    Wheel(i64),
    ScrollHome,
    ScrollEnd,
    Pan(i32),
    FocusColumn(isize),
    MoveColumn(isize),
    ToggleSort,
    ClearSort,
    ToggleRenderMode,
    Regenerate,
    CancelDrag,
    PointerDown(Point),
    PointerDrag(Point),
    PointerUp(Point),
    /// Nothing changed in the table but the screen must be repainted.
    Redraw,
}

fn convert_key_event(event: KeyEvent) -> Option<Action> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match event.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollRows(-1),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollRows(1),
        KeyCode::PageUp => Action::ScrollPages(-1),
        KeyCode::PageDown => Action::ScrollPages(1),
        KeyCode::Home => Action::ScrollHome,
        KeyCode::End => Action::ScrollEnd,
        KeyCode::Left => Action::Pan(-PAN_STEP),
        KeyCode::Right => Action::Pan(PAN_STEP),
        KeyCode::Tab => Action::FocusColumn(1),
        KeyCode::BackTab => Action::FocusColumn(-1),
        KeyCode::Char('s') | KeyCode::Enter => Action::ToggleSort,
        KeyCode::Char('<') => Action::MoveColumn(-1),
        KeyCode::Char('>') => Action::MoveColumn(1),
        KeyCode::Char('x') => Action::ClearSort,
        KeyCode::Char('v') => Action::ToggleRenderMode,
        KeyCode::Char('r') => Action::Regenerate,
        KeyCode::Esc => Action::CancelDrag,
        _ => return None,
    };
    Some(action)
}

fn convert_mouse_event(event: MouseEvent) -> Option<Action> {
    let position = Point::new(event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::PointerDown(position)),
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::PointerDrag(position)),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::PointerUp(position)),
        MouseEventKind::ScrollUp => Some(Action::Wheel(-1)),
        MouseEventKind::ScrollDown => Some(Action::Wheel(1)),
        MouseEventKind::ScrollLeft => Some(Action::Pan(-PAN_STEP)),
        MouseEventKind::ScrollRight => Some(Action::Pan(PAN_STEP)),
        _ => None,
    }
}

/// Convert a crossterm event into an action.
pub fn convert_event(event: CrosstermEvent) -> Option<Action> {
    match event {
        CrosstermEvent::Key(key_event) => {
            trace!(
                "Key event: code={:?}, modifiers={:?}, kind={:?}",
                key_event.code, key_event.modifiers, key_event.kind
            );

            // Only handle key press events, not release or repeat
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            convert_key_event(key_event)
        }
        CrosstermEvent::Mouse(mouse_event) => {
            trace!("Mouse event: {:?}", mouse_event.kind);
            convert_mouse_event(mouse_event)
        }
        CrosstermEvent::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}
