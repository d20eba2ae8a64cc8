use crate::history::{HistoryManager, RunKind};
use crate::render::{Renderer, Tone};
use crate::theme::Theme;
use crate::{Command, GenerateArgs};
use anyhow::{bail, Context, Result};
use maze_core::{
    text, verify_solution, GeneratorConfig, Generator, Grid, SimpleRng, SolveReport, Solver,
};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A maze had no path from start to end
    Unsolved,
}

impl Outcome {
    fn of(report: Option<&SolveReport>) -> Self {
        match report {
            Some(report) if !report.is_solved() => Outcome::Unsolved,
            _ => Outcome::Done,
        }
    }
}

/// Runs commands against an output stream and the run history
pub struct App<W: Write> {
    out: W,
    theme: Option<Theme>,
    json: bool,
    history: HistoryManager,
}

impl<W: Write> App<W> {
    pub fn new(out: W, theme: Option<Theme>, json: bool, history: HistoryManager) -> Self {
        Self {
            out,
            theme,
            json,
            history,
        }
    }

    pub fn run(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Generate(args) => self.generate(args),
            Command::Solve { file, output } => self.solve(&file, output.as_deref()),
            Command::Check { file } => self.check(&file),
            Command::Show { file } => self.show(&file),
            Command::History { clear, limit } => self.show_history(clear, limit),
        }
    }

    fn renderer(&mut self) -> Renderer<'_, W> {
        Renderer::new(&mut self.out, self.theme.as_ref())
    }

    fn generate(&mut self, args: GenerateArgs) -> Result<Outcome> {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!(
            "generating {}x{} maze with seed {}",
            args.width,
            args.height,
            seed
        );

        let config = if args.winding {
            GeneratorConfig::winding()
        } else {
            GeneratorConfig::classic()
        };
        let mut generator = Generator::with_source(config, SimpleRng::with_seed(seed));
        let (mut grid, stats) = generator
            .generate_with_stats(args.width, args.height)
            .with_context(|| format!("cannot generate a {}x{} maze", args.width, args.height))?;

        let report = if args.solve {
            Some(Solver::new().solve(&mut grid)?)
        } else {
            None
        };
        if let Some(path) = &args.output {
            write_maze(path, &grid)?;
        }
        self.record(RunKind::Generate, &grid, Some(seed), report.as_ref());

        if self.json {
            self.print_json(&json!({
                "seed": seed,
                "stats": stats,
                "report": report,
                "maze": text::to_text(&grid),
            }))?;
        } else {
            let mut renderer = self.renderer();
            renderer.grid(&grid)?;
            renderer.generation(seed, &stats)?;
            if let Some(report) = &report {
                renderer.report(report)?;
            }
        }
        Ok(Outcome::of(report.as_ref()))
    }

    fn solve(&mut self, file: &Path, output: Option<&Path>) -> Result<Outcome> {
        let mut grid = read_maze(file)?;
        let report = Solver::new()
            .solve(&mut grid)
            .with_context(|| format!("cannot solve {}", file.display()))?;
        log::info!(
            "{} explored {} cells, solved: {}",
            file.display(),
            report.explored,
            report.is_solved()
        );

        if let Some(path) = output {
            write_maze(path, &grid)?;
        }
        self.record(RunKind::Solve, &grid, None, Some(&report));

        if self.json {
            self.print_json(&json!({
                "report": report,
                "maze": text::to_text(&grid),
            }))?;
        } else {
            let mut renderer = self.renderer();
            renderer.grid(&grid)?;
            renderer.report(&report)?;
        }
        Ok(Outcome::of(Some(&report)))
    }

    fn check(&mut self, file: &Path) -> Result<Outcome> {
        let grid = read_maze(file)?;
        let path = verify_solution(&grid)
            .with_context(|| format!("{} has no valid solution drawn", file.display()))?;

        if self.json {
            self.print_json(&json!({ "valid": true, "path": path }))?;
        } else {
            self.renderer()
                .line(format!("Valid solution of {} cells", path.len()), Tone::Success)?;
        }
        Ok(Outcome::Done)
    }

    fn show(&mut self, file: &Path) -> Result<Outcome> {
        let grid = read_maze(file)?;
        if self.json {
            self.print_json(&grid)?;
        } else {
            let mut renderer = self.renderer();
            renderer.grid(&grid)?;
            renderer.line(
                format!(
                    "{}x{}, {} open cells",
                    grid.width(),
                    grid.height(),
                    grid.passable_count()
                ),
                Tone::Info,
            )?;
        }
        Ok(Outcome::Done)
    }

    fn show_history(&mut self, clear: bool, limit: usize) -> Result<Outcome> {
        if clear {
            self.history.clear();
            self.history.save().with_context(|| {
                format!("cannot write history {}", self.history.path().display())
            })?;
            self.renderer().line("History cleared", Tone::Info)?;
            return Ok(Outcome::Done);
        }

        let summary = self.history.summary();
        if self.json {
            let recent = self.history.recent(limit).to_vec();
            self.print_json(&json!({ "summary": summary, "recent": recent }))?;
        } else if summary.total_runs == 0 {
            self.renderer().line("No runs recorded yet", Tone::Info)?;
        } else {
            let recent = self.history.recent(limit).to_vec();
            self.renderer().history(&summary, &recent)?;
        }
        Ok(Outcome::Done)
    }

    /// Append a run to the history; failures are logged, never fatal
    fn record(&mut self, kind: RunKind, grid: &Grid, seed: Option<u64>, report: Option<&SolveReport>) {
        self.history.record(kind, grid, seed, report);
        if let Err(err) = self.history.save() {
            log::warn!(
                "cannot save history to {}: {}",
                self.history.path().display(),
                err
            );
        }
    }

    fn print_json<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn read_maze(path: &Path) -> Result<Grid> {
    let source =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let grid = text::parse(&source).with_context(|| format!("invalid maze {}", path.display()))?;
    if grid.start().is_none() || grid.end().is_none() {
        bail!("{} needs both an S and an E cell", path.display());
    }
    Ok(grid)
}

fn write_maze(path: &Path, grid: &Grid) -> Result<()> {
    fs::write(path, text::to_text(grid)).with_context(|| format!("cannot write {}", path.display()))
}
