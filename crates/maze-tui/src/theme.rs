use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Open maze cell
    pub open: Color,
    /// Wall cell
    pub wall: Color,
    /// Start cell marker
    pub start: Color,
    /// Goal cell marker
    pub goal: Color,
    /// Player marker
    pub player: Color,
    /// Cells the player has visited
    pub trail: Color,
    /// Solver exploration overlay
    pub explored: Color,
    /// Solver final path overlay
    pub path: Color,
    /// Hint overlay
    pub hint: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Error/report message color
    pub error: Color,
    /// Win/score message color
    pub success: Color,
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
            open: Color::Rgb { r: 38, g: 42, b: 54 },
            wall: Color::Rgb { r: 100, g: 106, b: 128 },
            start: Color::Rgb { r: 34, g: 160, b: 80 },
            goal: Color::Rgb { r: 210, g: 60, b: 60 },
            player: Color::Rgb { r: 56, g: 189, b: 248 },
            trail: Color::Rgb { r: 110, g: 190, b: 110 },
            explored: Color::Rgb { r: 120, g: 170, b: 230 },
            path: Color::Rgb { r: 255, g: 209, b: 102 },
            hint: Color::Rgb { r: 255, g: 179, b: 71 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            open: Color::Rgb { r: 235, g: 237, b: 244 },
            wall: Color::Rgb { r: 60, g: 64, b: 80 },
            start: Color::Rgb { r: 40, g: 160, b: 60 },
            goal: Color::Rgb { r: 200, g: 50, b: 50 },
            player: Color::Rgb { r: 20, g: 130, b: 200 },
            trail: Color::Rgb { r: 144, g: 238, b: 144 },
            explored: Color::Rgb { r: 160, g: 210, b: 255 },
            path: Color::Rgb { r: 245, g: 190, b: 70 },
            hint: Color::Rgb { r: 240, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            open: Color::Black,
            wall: Color::White,
            start: Color::Green,
            goal: Color::Red,
            player: Color::Cyan,
            trail: Color::DarkGreen,
            explored: Color::Blue,
            path: Color::Yellow,
            hint: Color::Magenta,
            info: Color::Grey,
            key: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }
}
