use clap::ValueEnum;
use crossterm::style::Color;
use maze_core::CellState;

/// Theme selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

/// Color theme for the renderer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Wall cell background
    pub wall: Color,
    /// Open cell background
    pub open: Color,
    /// Start marker color
    pub start: Color,
    /// End marker color
    pub end: Color,
    /// Solution path color
    pub path: Color,
    /// Dead-end mark color
    pub dead_end: Color,
    /// Summary text color
    pub info: Color,
    /// Success message color
    pub success: Color,
    /// Failure message color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            wall: Color::Rgb { r: 70, g: 75, b: 90 },
            open: Color::Rgb { r: 20, g: 22, b: 30 },
            start: Color::Rgb { r: 90, g: 255, b: 130 },
            end: Color::Rgb { r: 255, g: 210, b: 100 },
            path: Color::Rgb { r: 80, g: 180, b: 255 },
            dead_end: Color::Rgb { r: 140, g: 150, b: 180 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
        }
    }

    pub fn light() -> Self {
        Self {
            wall: Color::Rgb { r: 60, g: 60, b: 80 },
            open: Color::Rgb { r: 248, g: 248, b: 252 },
            start: Color::Rgb { r: 40, g: 160, b: 60 },
            end: Color::Rgb { r: 200, g: 120, b: 20 },
            path: Color::Rgb { r: 30, g: 100, b: 200 },
            dead_end: Color::Rgb { r: 130, g: 130, b: 150 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            wall: Color::White,
            open: Color::Black,
            start: Color::Green,
            end: Color::Yellow,
            path: Color::Cyan,
            dead_end: Color::Rgb { r: 150, g: 150, b: 150 },
            info: Color::Grey,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Foreground and background for a cell
    pub fn cell_colors(&self, state: CellState) -> (Color, Color) {
        match state {
            CellState::Wall => (self.wall, self.wall),
            CellState::Open | CellState::Visited => (self.open, self.open),
            CellState::Start => (self.start, self.open),
            CellState::End => (self.end, self.open),
            CellState::OnPath => (self.path, self.open),
            CellState::DeadEnd => (self.dead_end, self.open),
        }
    }
}
