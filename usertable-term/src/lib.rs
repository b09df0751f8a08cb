pub mod buffer;
pub mod style;
pub mod terminal;
pub mod text;

pub use buffer::{Buffer, Cell};
pub use style::{Rgb, Style, TextAlign, TextStyle};
pub use terminal::Terminal;
