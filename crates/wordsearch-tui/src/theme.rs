use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Puzzle letter color
    pub letter: Color,
    /// Background of cells belonging to a found word
    pub found_bg: Color,
    /// Background of the hint marker cell
    pub hint_bg: Color,
    /// Background of the live drag path
    pub drag_bg: Color,
    /// Letter color on highlighted cells
    pub overlay_fg: Color,
    /// Error message color
    pub error: Color,
    /// Success/completion color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            letter: Color::Rgb { r: 230, g: 230, b: 240 },
            found_bg: Color::Rgb { r: 58, g: 92, b: 58 },
            hint_bg: Color::Rgb { r: 170, g: 140, b: 20 },
            drag_bg: Color::Rgb { r: 60, g: 90, b: 140 },
            overlay_fg: Color::Rgb { r: 250, g: 250, b: 250 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 249, b: 250 },
            fg: Color::Rgb { r: 33, g: 37, b: 41 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            letter: Color::Rgb { r: 33, g: 37, b: 41 },
            found_bg: Color::Rgb { r: 200, g: 230, b: 201 },
            hint_bg: Color::Rgb { r: 255, g: 215, b: 0 },
            drag_bg: Color::Rgb { r: 204, g: 229, b: 255 },
            overlay_fg: Color::Rgb { r: 20, g: 20, b: 20 },
            error: Color::Rgb { r: 220, g: 53, b: 69 },
            success: Color::Rgb { r: 40, g: 167, b: 69 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            letter: Color::White,
            found_bg: Color::DarkGreen,
            hint_bg: Color::DarkYellow,
            drag_bg: Color::Blue,
            overlay_fg: Color::White,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// Look up a theme by its config name; unknown names get the default
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}
