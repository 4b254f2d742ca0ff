//! Generate and solve a puzzle from the command line.

use sudoku_engine::{Difficulty, Generator, GeneratorConfig, RemovalPolicy, Solver};

fn main() {
    let mut generator = Generator::with_config(GeneratorConfig {
        policy: RemovalPolicy::Unique,
        max_attempts: 50,
    });

    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        println!("=== {difficulty} ===");
        match generator.generate(difficulty) {
            Ok(board) => {
                println!("{board}");
                println!("givens: {}", board.given_count());
                println!("line:   {}", board.to_line());

                let solver = Solver::new();
                println!("unique: {}", solver.count_solutions(&board, 2) == 1);
                if let Some(solution) = solver.solve(&board) {
                    println!("\nsolution:\n{solution}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }
}
