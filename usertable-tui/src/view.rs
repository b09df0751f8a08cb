//! Paints the table session into the terminal buffer.
//!
//! ```text
//! row 0       title
//! row 1       status line
//! row 2       header (sticky)
//! rows 3..    body
//! last row    key help
//! ```

use chrono::{DateTime, Utc};
use usertable_core::header::{GRIP, HANDLE_WIDTH, SEPARATOR_WIDTH};
use usertable_core::{ColumnKey, HeaderCell, Rect, RenderedRow, TableSession};
use usertable_term::text::{fit, skip_columns};
use usertable_term::{Buffer, Rgb, Style, TextAlign};

const TITLE_ROW: u16 = 0;
const STATUS_ROW: u16 = 1;
const HEADER_ROW: u16 = 2;
const BODY_TOP: u16 = 3;
/// Rows not available to the body: title, status, header and help.
const CHROME_ROWS: u16 = 4;

const BACKGROUND: Rgb = Rgb::new(22, 24, 29);
const SURFACE: Rgb = Rgb::new(30, 33, 40);
const STRIPE: Rgb = Rgb::new(36, 40, 48);
const TEXT: Rgb = Rgb::new(220, 223, 228);
const MUTED: Rgb = Rgb::new(128, 134, 146);
const ACCENT: Rgb = Rgb::new(97, 175, 239);
const DRAGGING: Rgb = Rgb::new(198, 120, 221);
const DROP_TARGET: Rgb = Rgb::new(152, 195, 121);

const HELP: &str = "q quit  ↑↓ PgUp PgDn scroll  ←→ pan  Tab focus  s sort  < > move  x unsort  v mode  r regenerate  Esc cancel drag";

/// Paint one frame of `session` at instant `now`.
///
/// Also tells the session where the header and body ended up, so pointer
/// events hit-test against what is on screen.
pub fn paint(buf: &mut Buffer, session: &mut TableSession, now: DateTime<Utc>, notice: Option<&str>) {
    let width = buf.width();
    let height = buf.height();

    let header_area = if height > HEADER_ROW {
        Rect::new(0, HEADER_ROW, width, 1)
    } else {
        Rect::new(0, HEADER_ROW, width, 0)
    };
    let body_height = height.saturating_sub(CHROME_ROWS);
    session.set_layout(header_area, body_height);

    let background = Style::new().fg(TEXT).bg(BACKGROUND);
    for y in 0..height {
        buf.fill(0, y, width, background);
    }

    paint_title(buf, session);
    paint_status(buf, session, notice);
    paint_header(buf, session);
    paint_body(buf, session, now, body_height);

    if height >= CHROME_ROWS {
        buf.set_str(0, height - 1, HELP, width, Style::new().fg(MUTED).bg(SURFACE));
    }
}

fn paint_title(buf: &mut Buffer, session: &TableSession) {
    let style = Style::new().fg(ACCENT).bg(BACKGROUND).bold();
    let title = format!(" Users   Loaded users: {}", session.len());
    buf.set_str(0, TITLE_ROW, &title, buf.width(), style);
}

fn paint_status(buf: &mut Buffer, session: &TableSession, notice: Option<&str>) {
    let sort = match session.sort() {
        Some(sort) => format!("{} {}", sort.key.label(), sort.direction.glyph()),
        None => "none".to_string(),
    };
    let mut status = format!(
        " sort: {}  mode: {}  rows: {}",
        sort,
        session.render_mode().label(),
        session.len()
    );
    if let Some(dragged) = session.header().drag().dragged() {
        let target = session
            .drop_preview()
            .map_or_else(|| "-".to_string(), |key| key.label().to_string());
        status.push_str(&format!("  dragging: {} → {}", dragged.label(), target));
    }
    if let Some(notice) = notice {
        status.push_str("  ");
        status.push_str(notice);
    }
    buf.set_str(
        0,
        STATUS_ROW,
        &status,
        buf.width(),
        Style::new().fg(MUTED).bg(BACKGROUND),
    );
}

fn paint_header(buf: &mut Buffer, session: &TableSession) {
    let focused = session.focused_column();
    let dragged = session.header().drag().dragged();
    let target = session.drop_preview();

    for cell in session.header_cells() {
        let mut style = Style::new().fg(TEXT).bg(SURFACE).bold();
        if Some(cell.key) == focused {
            style = style.fg(ACCENT);
        }
        if Some(cell.key) == target && dragged.is_some() {
            style = style.bg(DROP_TARGET).fg(BACKGROUND).underline();
        }
        if Some(cell.key) == dragged {
            style = style.bg(DRAGGING).fg(BACKGROUND);
        }

        let text = skip_columns(&header_text(&cell), usize::from(cell.clip_left));
        buf.set_str(cell.area.x, cell.area.y, &text, cell.area.width, style);
    }
}

/// Grip, label with indicator, and separator at the full column width.
fn header_text(cell: &HeaderCell) -> String {
    let label_width = cell
        .key
        .width()
        .saturating_sub(HANDLE_WIDTH + SEPARATOR_WIDTH);
    format!(
        "{} {}│",
        GRIP,
        fit(&cell.title(), usize::from(label_width), TextAlign::Left)
    )
}

fn paint_body(buf: &mut Buffer, session: &mut TableSession, now: DateTime<Utc>, body_height: u16) {
    if body_height == 0 {
        return;
    }
    if session.is_empty() {
        let message = "No users";
        let x = buf.width().saturating_sub(message.len() as u16) / 2;
        buf.set_str(
            x,
            BODY_TOP + body_height / 2,
            message,
            buf.width(),
            Style::new().fg(MUTED).bg(BACKGROUND),
        );
        return;
    }

    let body = session.body(now);
    let row_height = i64::from(session.viewport().row_height);
    let columns = session.columns().keys();
    let scroll_x = session.scroll_x();
    let scroll_top = session.scroll_top();

    for row in &body.rows {
        let offset = row.offset(scroll_top);
        // Full mode materializes rows outside the viewport; clip them here.
        if offset + row_height <= 0 || offset >= i64::from(body_height) {
            continue;
        }
        let bg = if row.index % 2 == 0 { BACKGROUND } else { STRIPE };
        let style = Style::new().fg(TEXT).bg(bg);

        for line in 0..row_height {
            let y = offset + line;
            if (0..i64::from(body_height)).contains(&y) {
                let y = BODY_TOP + y as u16;
                buf.fill(0, y, buf.width(), style);
                if line == 0 {
                    paint_row(buf, y, row, columns, scroll_x, style);
                }
            }
        }
    }
}

fn paint_row(
    buf: &mut Buffer,
    y: u16,
    row: &RenderedRow,
    columns: &[ColumnKey],
    scroll_x: u16,
    style: Style,
) {
    let view_end = u32::from(scroll_x) + u32::from(buf.width());
    let mut start = 0u32;

    for (key, value) in columns.iter().zip(&row.cells) {
        let cell_start = start;
        start += u32::from(key.width());
        if start <= u32::from(scroll_x) {
            continue;
        }
        if cell_start >= view_end {
            break;
        }

        let align = match key {
            ColumnKey::Age | ColumnKey::Dsr => TextAlign::Right,
            _ => TextAlign::Left,
        };
        let inner = usize::from(key.width().saturating_sub(SEPARATOR_WIDTH + 1));
        let text = format!(" {} ", fit(value, inner, align));

        let clip = u32::from(scroll_x).saturating_sub(cell_start);
        let x = (cell_start + clip - u32::from(scroll_x)) as u16;
        let text = skip_columns(&text, clip as usize);
        buf.set_str(x, y, &text, buf.width() - x, style);
    }
}
