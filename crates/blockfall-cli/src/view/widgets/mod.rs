use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, key_binding_display::*};

mod board_display;
mod cell_display;
mod key_binding_display;

pub mod style {
    use blockfall_engine::Rgb;
    use ratatui::style::{Color, Style};

    const GRAY: Color = Color::Rgb(127, 127, 127);
    const BLACK: Color = Color::Rgb(0, 0, 0);

    pub const EMPTY_DOT: Style = Style::new().fg(GRAY).bg(BLACK);

    pub const fn color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    pub const fn cell(rgb: Rgb) -> Style {
        Style::new().fg(color(rgb)).bg(BLACK)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
