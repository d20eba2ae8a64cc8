use maze_core::{Grid, SolveReport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Records kept on disk, most recent first
pub const MAX_RECORDS: usize = 500;

/// What a run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunKind {
    Generate,
    Solve,
}

impl RunKind {
    pub fn label(self) -> &'static str {
        match self {
            RunKind::Generate => "generate",
            RunKind::Solve => "solve",
        }
    }
}

/// Record of a single command run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: u64,
    pub kind: RunKind,
    pub width: usize,
    pub height: usize,
    /// Generator seed, `None` for mazes loaded from a file
    pub seed: Option<u64>,
    /// `None` when the maze was not solved in this run
    pub solved: Option<bool>,
    pub path_len: Option<usize>,
    pub explored: Option<usize>,
    /// Unix timestamp of the run
    pub timestamp: u64,
}

/// Aggregate figures over the whole history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_runs: usize,
    pub generated: usize,
    pub solved: usize,
    pub unsolved: usize,
    pub avg_path_len: Option<f64>,
    /// Largest maze by area as `(width, height)`
    pub largest: Option<(usize, usize)>,
}

/// Persistent run history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryManager {
    /// All run records (most recent first)
    pub records: Vec<RunRecord>,
    next_id: u64,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::at(Self::save_path())
    }
}

impl HistoryManager {
    /// Empty history that saves to `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            path: path.into(),
        }
    }

    /// Get the save file path
    pub fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maze_history.json")
    }

    /// Load history from the default location
    pub fn load() -> Self {
        Self::load_from(Self::save_path())
    }

    /// Load history from `path`; a missing or unreadable file gives an empty history
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::at(path),
            Err(err) => {
                log::warn!("cannot read history {}: {}", path.display(), err);
                return Self::at(path);
            }
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(mut history) => {
                history.path = path;
                history
            }
            Err(err) => {
                log::warn!("ignoring corrupt history {}: {}", path.display(), err);
                Self::at(path)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save history to its file
    pub fn save(&self) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, json)
    }

    /// Record a run
    pub fn record(
        &mut self,
        kind: RunKind,
        grid: &Grid,
        seed: Option<u64>,
        report: Option<&SolveReport>,
    ) -> &RunRecord {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let record = RunRecord {
            id: self.next_id,
            kind,
            width: grid.width(),
            height: grid.height(),
            seed,
            solved: report.map(SolveReport::is_solved),
            path_len: report.filter(|r| r.is_solved()).map(SolveReport::path_len),
            explored: report.map(|r| r.explored),
            timestamp,
        };
        self.next_id += 1;

        self.records.insert(0, record);
        self.records.truncate(MAX_RECORDS);
        &self.records[0]
    }

    /// The `limit` most recent records
    pub fn recent(&self, limit: usize) -> &[RunRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary {
            total_runs: self.records.len(),
            ..Default::default()
        };
        let mut path_total = 0;

        for record in &self.records {
            if record.kind == RunKind::Generate {
                summary.generated += 1;
            }
            match record.solved {
                Some(true) => {
                    summary.solved += 1;
                    path_total += record.path_len.unwrap_or(0);
                }
                Some(false) => summary.unsolved += 1,
                None => {}
            }
            let area = record.width * record.height;
            let larger = match summary.largest {
                Some((w, h)) => area > w * h,
                None => true,
            };
            if larger {
                summary.largest = Some((record.width, record.height));
            }
        }

        if summary.solved > 0 {
            summary.avg_path_len = Some(path_total as f64 / summary.solved as f64);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{text, Generator, Solver};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("maze-cli-test-{}", std::process::id()))
            .join(name)
    }

    fn solved_report(source: &str) -> (Grid, SolveReport) {
        let mut grid = text::parse(source).unwrap();
        let report = Solver::new().solve(&mut grid).unwrap();
        (grid, report)
    }

    #[test]
    fn test_record_and_summary() {
        let mut history = HistoryManager::at(temp_path("unused.json"));
        let grid = Generator::with_seed(1).generate(9, 9).unwrap();
        history.record(RunKind::Generate, &grid, Some(1), None);

        let (solved, report) = solved_report("5\n1\nS   E\n");
        let record = history.record(RunKind::Solve, &solved, None, Some(&report));
        assert_eq!(record.id, 2);
        assert_eq!(record.path_len, Some(5));

        let (blocked, report) = solved_report("3\n1\nS%E\n");
        history.record(RunKind::Solve, &blocked, None, Some(&report));

        let summary = history.summary();
        assert_eq!(summary.total_runs, 3);
        assert_eq!(summary.generated, 1);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.unsolved, 1);
        assert_eq!(summary.avg_path_len, Some(5.0));
        assert_eq!(summary.largest, Some((9, 9)));

        assert_eq!(history.recent(2).len(), 2);
        assert_eq!(history.recent(2)[0].kind, RunKind::Solve);
        assert_eq!(history.recent(10).len(), 3);
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = HistoryManager::at(temp_path("cap.json"));
        let grid = text::parse("2\n1\nSE\n").unwrap();
        for seed in 0..(MAX_RECORDS as u64 + 10) {
            history.record(RunKind::Generate, &grid, Some(seed), None);
        }
        assert_eq!(history.records.len(), MAX_RECORDS);
        assert_eq!(history.records[0].seed, Some(MAX_RECORDS as u64 + 9));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("history.json");
        let _ = fs::remove_file(&path);

        let mut history = HistoryManager::load_from(&path);
        assert!(history.records.is_empty());
        let (grid, report) = solved_report("4\n2\nS %%\n%  E\n");
        history.record(RunKind::Solve, &grid, None, Some(&report));
        history.save().unwrap();

        let loaded = HistoryManager::load_from(&path);
        assert_eq!(loaded.records, history.records);
        assert_eq!(loaded.path(), path.as_path());

        let mut loaded = loaded;
        assert_eq!(loaded.record(RunKind::Solve, &grid, None, None).id, 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_gives_empty_history() {
        let path = temp_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let history = HistoryManager::load_from(&path);
        assert!(history.records.is_empty());
        let _ = fs::remove_file(&path);
    }
}
