//! Color palette and status colors.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub header_bg: Color,
    pub drag_indicator: Color,
    pub selection_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            text: Color::White,
            text_dim: Color::DarkGray,
            header_bg: Color::Rgb(26, 26, 26),
            drag_indicator: Color::Magenta,
            selection_bg: Color::Rgb(42, 42, 42),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn status_color(situacao: &str, theme: &Theme) -> Color {
    match situacao.trim() {
        "Em andamento" => theme.primary,
        "Finalizada" => theme.success,
        "Aprovada" => theme.info,
        "Cancelada" => theme.error,
        _ => theme.text_dim,
    }
}
