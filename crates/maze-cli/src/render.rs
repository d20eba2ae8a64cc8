use crate::history::{HistorySummary, RunRecord};
use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use maze_core::{CellState, GenerationStats, Grid, SolveReport};
use std::io::{self, Write};

/// Writes mazes and summaries, colored unless `theme` is `None`
pub struct Renderer<'a, W: Write> {
    out: &'a mut W,
    theme: Option<&'a Theme>,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(out: &'a mut W, theme: Option<&'a Theme>) -> Self {
        Self { out, theme }
    }

    pub fn grid(&mut self, grid: &Grid) -> io::Result<()> {
        let Some(theme) = self.theme else {
            write!(self.out, "{}", grid)?;
            return self.out.flush();
        };

        for row in grid.rows() {
            for &state in row {
                let (fg, bg) = theme.cell_colors(state);
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(cell_text(state))
                )?;
            }
            queue!(self.out, ResetColor, Print("\n"))?;
        }
        self.out.flush()
    }

    pub fn generation(&mut self, seed: u64, stats: &GenerationStats) -> io::Result<()> {
        let text = format!(
            "{}x{} maze, seed {}, {} carve steps, {} backtracks",
            stats.width, stats.height, seed, stats.carve.carve_steps, stats.carve.backtracks
        );
        self.line(text, Tone::Info)?;
        if stats.bridged_cells > 0 {
            self.line(
                format!("Opened {} wall cells to reach the corners", stats.bridged_cells),
                Tone::Info,
            )?;
        }
        Ok(())
    }

    pub fn report(&mut self, report: &SolveReport) -> io::Result<()> {
        if report.is_solved() {
            self.line(
                format!(
                    "Solved: path of {} cells, {} explored, {} dead ends",
                    report.path_len(),
                    report.explored,
                    report.dead_ends
                ),
                Tone::Success,
            )
        } else {
            self.line(
                format!(
                    "No path from start to end ({} cells explored)",
                    report.explored
                ),
                Tone::Error,
            )
        }
    }

    pub fn history(&mut self, summary: &HistorySummary, recent: &[RunRecord]) -> io::Result<()> {
        self.line(
            format!(
                "{} runs: {} generated, {} solved, {} unsolved",
                summary.total_runs, summary.generated, summary.solved, summary.unsolved
            ),
            Tone::Info,
        )?;
        if let Some(avg) = summary.avg_path_len {
            self.line(format!("Average path length: {:.1}", avg), Tone::Info)?;
        }
        if let Some((width, height)) = summary.largest {
            self.line(format!("Largest maze: {}x{}", width, height), Tone::Info)?;
        }

        for record in recent {
            let outcome = match (record.solved, record.path_len) {
                (Some(true), Some(len)) => format!("solved in {} cells", len),
                (Some(false), _) => "unsolved".to_string(),
                _ => "not solved".to_string(),
            };
            let seed = record
                .seed
                .map(|s| format!("seed {}", s))
                .unwrap_or_else(|| "from file".to_string());
            let tone = if record.solved == Some(false) {
                Tone::Error
            } else {
                Tone::Info
            };
            self.line(
                format!(
                    "#{:<4} {:<8} {}x{} {} {}",
                    record.id,
                    record.kind.label(),
                    record.width,
                    record.height,
                    seed,
                    outcome
                ),
                tone,
            )?;
        }
        Ok(())
    }

    pub fn line(&mut self, text: impl AsRef<str>, tone: Tone) -> io::Result<()> {
        match self.theme {
            Some(theme) => queue!(
                self.out,
                SetForegroundColor(tone.color(theme)),
                Print(text.as_ref()),
                ResetColor,
                Print("\n")
            )?,
            None => writeln!(self.out, "{}", text.as_ref())?,
        }
        self.out.flush()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Tone {
    Info,
    Success,
    Error,
}

impl Tone {
    fn color(self, theme: &Theme) -> Color {
        match self {
            Tone::Info => theme.info,
            Tone::Success => theme.success,
            Tone::Error => theme.error,
        }
    }
}

/// Two columns per cell so the maze keeps its proportions
fn cell_text(state: CellState) -> &'static str {
    match state {
        CellState::Wall | CellState::Open | CellState::Visited => "  ",
        CellState::Start => "S ",
        CellState::End => "E ",
        CellState::OnPath => "<>",
        CellState::DeadEnd => "..",
    }
}
