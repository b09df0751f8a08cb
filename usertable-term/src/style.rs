//! Colors and text attributes.

use crate::buffer::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
    pub dim: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            underline: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// Foreground, background and attributes applied to written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            text: TextStyle::new(),
        }
    }

    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.text = self.text.bold();
        self
    }

    pub const fn dim(mut self) -> Self {
        self.text = self.text.dim();
        self
    }

    pub const fn underline(mut self) -> Self {
        self.text = self.text.underline();
        self
    }

    /// A cell showing `ch` in this style.
    pub fn cell(&self, ch: char) -> Cell {
        Cell::new(ch)
            .with_fg(self.fg)
            .with_bg(self.bg)
            .with_style(self.text)
    }
}
