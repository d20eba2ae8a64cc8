use crate::{CellState, Direction, Grid, MazeError, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Configuration for maze generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Order in which carve directions are listed before the random pick
    pub directions: [Direction; 4],
    /// After a turn, only try to continue in the new direction
    pub anti_zigzag: bool,
    /// Open the wall cells joining an isolated forced corner to the carved region
    pub bridge_corners: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GeneratorConfig {
    /// Long corridors: the anti-zigzag heuristic is on
    pub fn classic() -> Self {
        Self {
            directions: [
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Left,
            ],
            anti_zigzag: true,
            bridge_corners: true,
        }
    }

    /// Plain randomized backtracking, every step considers all four directions
    pub fn winding() -> Self {
        Self {
            anti_zigzag: false,
            ..Self::classic()
        }
    }
}

/// Source of the generator's random choices
pub trait RandomSource {
    /// A value in `0..bound`. `bound` is never zero.
    fn next_usize(&mut self, bound: usize) -> usize;
}

/// Outcome of the carve phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveStats {
    /// Randomly chosen cell the carve started from
    pub seed: Position,
    /// Forward moves; the carved region holds `carve_steps + 1` cells
    pub carve_steps: usize,
    /// Frames popped without a valid target
    pub backtracks: usize,
}

/// Summary of a full generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub width: usize,
    pub height: usize,
    pub carve: CarveStats,
    /// Wall cells opened to connect the forced corners
    pub bridged_cells: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Position,
    /// Move that produced this frame, `None` for the seed
    dir: Option<Direction>,
}

/// Perfect-maze generator
pub struct Generator<R: RandomSource = SimpleRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(GeneratorConfig::default(), SimpleRng::with_seed(seed))
    }
}

impl<R: RandomSource> Generator<R> {
    /// Create a generator drawing its choices from `rng`
    pub fn with_source(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a maze with `Start` at the top-left and `End` at the bottom-right
    pub fn generate(&mut self, width: usize, height: usize) -> Result<Grid, MazeError> {
        self.generate_with_stats(width, height).map(|(grid, _)| grid)
    }

    /// Generate a maze and report what the carve did
    pub fn generate_with_stats(
        &mut self,
        width: usize,
        height: usize,
    ) -> Result<(Grid, GenerationStats), MazeError> {
        // Start and end corners must be distinct cells
        if width.saturating_mul(height) < 2 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let (mut grid, carve) = self.carve(width, height)?;

        let start = Position::new(0, 0);
        let end = Position::new(height - 1, width - 1);
        let mut bridged_cells = 0;
        for corner in [start, end] {
            if grid.get(corner).is_wall() {
                grid.set_unchecked(corner, CellState::Open);
                if self.config.bridge_corners {
                    bridged_cells += bridge_to_open(&mut grid, corner);
                }
            }
        }
        grid.set_start(start)?;
        grid.set_end(end)?;

        let stats = GenerationStats {
            width,
            height,
            carve,
            bridged_cells,
        };
        log::debug!(
            "generated {}x{} maze: seed {}, {} carve steps, {} backtracks, {} bridged",
            width,
            height,
            carve.seed,
            carve.carve_steps,
            carve.backtracks,
            bridged_cells
        );
        Ok((grid, stats))
    }

    /// Carve a perfect maze into an all-wall grid.
    ///
    /// The returned grid holds only `Wall` and `Open` cells and has no
    /// start/end markers. Its open cells form a spanning tree.
    pub fn carve(&mut self, width: usize, height: usize) -> Result<(Grid, CarveStats), MazeError> {
        let mut grid = Grid::new(width, height)?;

        let seed_idx = self.rng.next_usize(grid.area());
        let seed = Position::new(seed_idx / width, seed_idx % width);
        grid.set_unchecked(seed, CellState::Visited);

        let mut stats = CarveStats {
            seed,
            carve_steps: 0,
            backtracks: 0,
        };
        let mut stack = vec![Frame { pos: seed, dir: None }];

        while let Some(&top) = stack.last() {
            let below = stack.len().checked_sub(2).map(|i| stack[i]);
            let targets = self.carve_targets(&grid, top, below, stack.len());

            if targets.is_empty() {
                stack.pop();
                stats.backtracks += 1;
                log::trace!("carve backtrack at {}", top.pos);
                continue;
            }

            let dir = targets[self.rng.next_usize(targets.len())];
            if let Some(next) = grid.neighbor(top.pos, dir) {
                grid.set_unchecked(next, CellState::Visited);
                stack.push(Frame {
                    pos: next,
                    dir: Some(dir),
                });
                stats.carve_steps += 1;
            }
        }

        grid.clear_overlays();
        Ok((grid, stats))
    }

    /// Directions from `top` that lead to a carvable cell
    fn carve_targets(
        &self,
        grid: &Grid,
        top: Frame,
        below: Option<Frame>,
        depth: usize,
    ) -> Vec<Direction> {
        // Once the walk has turned, keep going the way it turned
        let committed = match (top.dir, below) {
            (Some(dir), Some(below))
                if self.config.anti_zigzag && depth > 2 && below.dir != Some(dir) =>
            {
                Some(dir)
            }
            _ => None,
        };

        let candidates: Vec<Direction> = match committed {
            Some(dir) => vec![dir],
            None => self.config.directions.to_vec(),
        };

        candidates
            .into_iter()
            .filter(|&dir| {
                grid.neighbor(top.pos, dir)
                    .is_some_and(|next| is_carvable(grid, next))
            })
            .collect()
    }
}

/// Unvisited, with exactly one visited neighbour: carving it cannot close a loop
fn is_carvable(grid: &Grid, pos: Position) -> bool {
    if grid.get(pos) != CellState::Wall {
        return false;
    }
    let visited = grid
        .neighbors(pos)
        .filter(|&n| grid.get(n) == CellState::Visited)
        .count();
    visited == 1
}

/// Open the shortest run of wall cells linking `corner` to another open cell.
/// Returns the number of cells opened.
fn bridge_to_open(grid: &mut Grid, corner: Position) -> usize {
    let mut parent: Vec<Option<Position>> = vec![None; grid.area()];
    let mut seen = vec![false; grid.area()];
    let width = grid.width();
    let idx = move |pos: Position| pos.row * width + pos.col;

    let mut queue = VecDeque::new();
    seen[idx(corner)] = true;
    queue.push_back(corner);

    let mut reached = None;
    while let Some(pos) = queue.pop_front() {
        if pos != corner && !grid.get(pos).is_wall() {
            reached = Some(pos);
            break;
        }
        for next in grid.neighbors(pos) {
            if !seen[idx(next)] {
                seen[idx(next)] = true;
                parent[idx(next)] = Some(pos);
                queue.push_back(next);
            }
        }
    }

    let mut opened = 0;
    let mut cursor = reached.and_then(|pos| parent[idx(pos)]);
    while let Some(pos) = cursor {
        if pos == corner {
            break;
        }
        grid.set_unchecked(pos, CellState::Open);
        opened += 1;
        cursor = parent[idx(pos)];
    }

    if opened > 0 {
        log::debug!("bridged corner {} with {} wall cells", corner, opened);
    }
    opened
}

/// Seedable PCG-style PRNG, seeded from the OS when no seed is given
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleRng {
    pub fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if let Err(err) = getrandom::getrandom(&mut seed_bytes) {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            log::warn!("getrandom failed ({}), seeding from counter {}", err, counter);
            seed_bytes = counter.to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }
}

impl RandomSource for SimpleRng {
    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of choices
    struct Scripted {
        choices: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        fn new(choices: Vec<usize>) -> Self {
            Self { choices, next: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_usize(&mut self, bound: usize) -> usize {
            let value = self.choices[self.next % self.choices.len()];
            self.next += 1;
            value % bound
        }
    }

    #[test]
    fn test_generate_places_corner_markers() {
        let mut generator = Generator::with_seed(42);
        let grid = generator.generate(12, 8).unwrap();

        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.end(), Some(Position::new(7, 11)));
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.count(CellState::End), 1);
        assert_eq!(grid.count(CellState::Visited), 0);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = Generator::with_seed(7).generate(20, 20).unwrap();
        let b = Generator::with_seed(7).generate(20, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_choices_are_reproducible() {
        let script = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9];
        let mut first = Generator::with_source(GeneratorConfig::classic(), Scripted::new(script.clone()));
        let mut second = Generator::with_source(GeneratorConfig::classic(), Scripted::new(script));
        assert_eq!(first.generate(9, 7).unwrap(), second.generate(9, 7).unwrap());
    }

    #[test]
    fn test_single_row_carves_straight_corridor() {
        let mut generator = Generator::with_source(GeneratorConfig::classic(), Scripted::new(vec![0]));
        let (grid, stats) = generator.generate_with_stats(3, 1).unwrap();

        assert_eq!(grid.to_string(), "S E\n");
        assert_eq!(stats.carve.seed, Position::new(0, 0));
        assert_eq!(stats.carve.carve_steps, 2);
        assert_eq!(stats.bridged_cells, 0);
    }

    #[test]
    fn test_carve_leaves_only_walls_and_open_cells() {
        let mut generator = Generator::with_seed(99);
        let (grid, stats) = generator.carve(15, 10).unwrap();

        assert_eq!(grid.count(CellState::Open), stats.carve_steps + 1);
        assert_eq!(
            grid.count(CellState::Open) + grid.count(CellState::Wall),
            grid.area()
        );
        assert_eq!(grid.start(), None);
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let mut generator = Generator::with_seed(1);
        assert!(matches!(
            generator.generate(0, 4),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generator.generate(1, 1),
            Err(MazeError::InvalidDimensions { width: 1, height: 1 })
        ));
        assert!(generator.generate(2, 1).is_ok());
    }

    #[test]
    fn test_bridge_opens_wall_run() {
        // Corner boxed in by walls, open cell two steps away
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set_unchecked(Position::new(0, 2), CellState::Open);
        grid.set_unchecked(Position::new(0, 0), CellState::Open);

        assert_eq!(bridge_to_open(&mut grid, Position::new(0, 0)), 1);
        assert_eq!(grid.count(CellState::Open), 3);
    }

    #[test]
    fn test_bridge_skips_connected_corner() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_unchecked(Position::new(0, 0), CellState::Open);
        grid.set_unchecked(Position::new(0, 1), CellState::Open);

        assert_eq!(bridge_to_open(&mut grid, Position::new(0, 0)), 0);
        assert_eq!(grid.count(CellState::Open), 2);
    }

    fn frame(row: usize, col: usize, dir: Direction) -> Frame {
        Frame {
            pos: Position::new(row, col),
            dir: Some(dir),
        }
    }

    #[test]
    fn test_turn_commits_to_new_direction() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (row, col) in [(0, 0), (0, 1), (1, 1)] {
            grid.set_unchecked(Position::new(row, col), CellState::Visited);
        }
        let below = frame(0, 1, Direction::Right);
        let top = frame(1, 1, Direction::Down);

        let classic = Generator::with_source(GeneratorConfig::classic(), Scripted::new(vec![0]));
        assert_eq!(
            classic.carve_targets(&grid, top, Some(below), 3),
            vec![Direction::Down]
        );

        // no turn, or too shallow: every carvable direction is offered
        let straight = frame(0, 1, Direction::Down);
        assert_eq!(
            classic.carve_targets(&grid, top, Some(straight), 3),
            vec![Direction::Right, Direction::Down]
        );
        assert_eq!(
            classic.carve_targets(&grid, top, Some(below), 2),
            vec![Direction::Right, Direction::Down]
        );

        let winding = Generator::with_source(GeneratorConfig::winding(), Scripted::new(vec![0]));
        assert_eq!(
            winding.carve_targets(&grid, top, Some(below), 3),
            vec![Direction::Right, Direction::Down]
        );
    }

    #[test]
    fn test_turn_into_blocked_cell_backtracks() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (row, col) in [(0, 0), (0, 1), (1, 1), (2, 1)] {
            grid.set_unchecked(Position::new(row, col), CellState::Visited);
        }
        let generator = Generator::with_source(GeneratorConfig::classic(), Scripted::new(vec![0]));

        // Right is still carvable but the walk must keep going down
        let targets = generator.carve_targets(
            &grid,
            frame(1, 1, Direction::Down),
            Some(frame(0, 1, Direction::Right)),
            3,
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn test_anti_zigzag_changes_the_carve() {
        // seed (0,0), Right, then Down: a turn at depth 3
        let script = vec![0, 0, 1, 0];

        let mut classic =
            Generator::with_source(GeneratorConfig::classic(), Scripted::new(script.clone()));
        let (grid, stats) = classic.carve(3, 3).unwrap();
        assert_eq!(grid.to_string(), "   \n% %\n   \n");
        assert_eq!(stats.carve_steps, 6);
        assert_eq!(stats.backtracks, 7);

        let mut winding = Generator::with_source(GeneratorConfig::winding(), Scripted::new(script));
        let (other, _) = winding.carve(3, 3).unwrap();
        assert_eq!(other.cell_at(Position::new(1, 2)), Ok(CellState::Open));
        assert_ne!(other, grid);
    }

    #[test]
    fn test_winding_preset_disables_heuristic() {
        assert!(GeneratorConfig::classic().anti_zigzag);
        assert!(!GeneratorConfig::winding().anti_zigzag);
        assert_eq!(GeneratorConfig::default(), GeneratorConfig::classic());
    }

    #[test]
    fn test_rng_bounds() {
        let mut rng = SimpleRng::with_seed(5);
        for bound in 1..50 {
            assert!(rng.next_usize(bound) < bound);
        }
    }
}
