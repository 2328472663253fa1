extern crate board_search;

use board_search::board::{Board, Symbol};
use board_search::boards::reversi::ReversiBoard;
use board_search::boards::tic_tac_toe::TicTacToeBoard;
use board_search::config::EngineConfig;
use board_search::mcts::MonteCarloSearch;
use board_search::random::StandardRandomGenerator;
use board_search::selector::{GameBoard, Strategy, StrategySelector};
use tracing_subscriber::EnvFilter;

const QUICK_CONFIG: &str = r#"
[alpha_beta]
depth = 3

[mcts]
simulations = 300
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Settings file from the first argument, otherwise a quick built-in setup
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::from_toml_str(QUICK_CONFIG).unwrap(),
    };
    let selector = StrategySelector::new(&config).unwrap();
    let mut rng = StandardRandomGenerator::default();

    // Tic-tac-toe, exhaustive search on both sides
    let mut board = TicTacToeBoard::default();
    let mut side = Symbol::X;
    while board.outcome().is_none() {
        let pos = selector
            .best_move(
                GameBoard::TicTacToe(&mut board),
                side,
                Strategy::Exhaustive,
                &mut rng,
            )
            .unwrap()
            .unwrap();
        board.do_move(pos, side);
        side = side.opponent();
    }
    println!("{board}");
    println!("Tic-tac-toe result: {:?}\n", board.outcome());

    // Print the chances MCTS sees from the Reversi opening
    let mut board = ReversiBoard::default();
    let mcts = MonteCarloSearch::new(config.mcts.clone());
    let result = mcts.search(&mut board, Symbol::X, &mut rng, &Default::default());
    for node in &result.children {
        println!(
            "Move: {:?} = {:.2?}% over {} visits",
            node.mv,
            node.win_rate() * 100.0,
            node.visits
        );
    }
    println!("MCTS opening move: {:?}\n", result.best_move);

    // Reversi, alpha-beta (X) against MCTS (O)
    let mut side = Symbol::X;
    while !board.is_game_over() {
        let strategy = match side {
            Symbol::X => Strategy::AlphaBeta,
            Symbol::O => Strategy::MonteCarlo,
        };
        let choice = selector
            .best_move(GameBoard::Reversi(&mut board), side, strategy, &mut rng)
            .unwrap();
        match choice {
            Some(pos) => {
                board.do_move(pos, side);
            }
            None => println!("{side} has no move, passing"),
        }
        side = side.opponent();
    }
    println!("{board}");
    println!(
        "Reversi result: {:?} (X {} - O {})",
        board.outcome(),
        board.count(Symbol::X),
        board.count(Symbol::O)
    );
}
