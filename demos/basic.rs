//! Basic example of using the maze engine

use maze_core::{text, verify_path, Explorer, Generator, Solver};

fn main() {
    // Generate a maze
    println!("Generating a 21x11 maze...\n");
    let mut generator = Generator::with_seed(2024);
    let (mut maze, stats) = generator
        .generate_with_stats(21, 11)
        .expect("21x11 is a valid size");

    println!("Generated maze:");
    println!("{}", maze);

    // Show some stats
    println!("Carve steps: {}", stats.carve.carve_steps);
    println!("Backtracks: {}", stats.carve.backtracks);
    println!("Open cells: {}\n", maze.passable_count());

    // Walk a few steps by hand
    if let Ok(mut explorer) = Explorer::at_start(&maze) {
        for dir in [maze_core::Direction::Right, maze_core::Direction::Down] {
            println!("Step {} -> {:?}", dir.arrow(), explorer.step(dir));
        }
        println!();
    }

    // Solve it
    println!("Solving...\n");
    let solver = Solver::new();
    match solver.solve(&mut maze) {
        Ok(report) => match report.path.as_deref() {
            Some(path) => {
                println!("Solution ({} cells, {} dead ends):", path.len(), report.dead_ends);
                println!("{}", maze);
                println!("Valid: {}", verify_path(&maze, path).is_ok());
            }
            None => println!("No solution found (this shouldn't happen for a generated maze!)"),
        },
        Err(err) => println!("Cannot solve: {}", err),
    }

    // Parse a maze from text
    println!("\n--- Parsing a maze from text ---\n");
    let source = "7\n5\nS %   %\n% % % %\n%   %  \n%%% % %\n%     E\n";
    if let Ok(mut parsed) = text::parse(source) {
        println!("Parsed maze:");
        println!("{}", parsed);
        if let Ok(report) = solver.solve(&mut parsed) {
            println!("Solved: {}", report.is_solved());
            println!("{}", parsed);
        }
    }
}
