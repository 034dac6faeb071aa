use clap::Parser;
use minesweeper_engine::{
    Action, CellView, GameConfig, GameError, GameSession, Phase, Position, SessionView,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minesweeper", about = "Play Minesweeper in the terminal")]
struct Args {
    /// beginner, intermediate, expert or classic
    #[arg(long, value_parser = parse_preset, conflicts_with_all = ["rows", "cols", "mines"])]
    preset: Option<GameConfig>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    #[arg(long)]
    mines: Option<usize>,
}

impl Args {
    fn config(&self) -> GameConfig {
        let base = self.preset.unwrap_or_default();
        GameConfig::new(
            self.rows.unwrap_or(base.rows),
            self.cols.unwrap_or(base.cols),
            self.mines.unwrap_or(base.mines),
        )
    }
}

fn parse_preset(name: &str) -> Result<GameConfig, String> {
    GameConfig::preset(name).ok_or_else(|| format!("unknown preset '{name}'"))
}

enum Input {
    Act(Position, Action),
    Restart,
    GiveUp,
    Quit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run_game(args.config()) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(config: GameConfig) -> Result<(), GameError> {
    let mut game = GameSession::new(config)?;

    loop {
        print_board(&game);

        let Some(input) = get_user_input(game.phase()) else {
            continue;
        };
        match input {
            Input::Act(pos, action) => match game.perform_action(pos, action) {
                Ok(_) => {}
                Err(GameError::OutOfBounds(_)) => println!("Position out of bounds"),
                Err(e) => return Err(e),
            },
            Input::Restart => game.restart()?,
            Input::GiveUp => {
                game.forfeit();
            }
            Input::Quit => return Ok(()),
        }
    }
}

fn print_board(game: &GameSession) {
    let SessionView {
        phase,
        remaining_flags,
        cols,
        ..
    } = game.session_view();

    // Column numbers
    print!("   ");
    for col in 0..cols {
        print!("{:>3}", col);
    }

    let mut current_row = None;
    for (pos, view) in game.cell_views() {
        if current_row != Some(pos.row) {
            current_row = Some(pos.row);
            print!("\n{:>3}", pos.row);
        }
        print!("{:>3}", glyph(&view));
    }
    println!();

    match phase {
        Phase::Playing => println!("Flags: {}", remaining_flags),
        Phase::Won => println!("You Win!"),
        Phase::Lost => println!("You're Dead!"),
    }
}

fn glyph(view: &CellView) -> String {
    match view {
        CellView { flagged: true, .. } => "⚑".to_string(),
        CellView { revealed: false, .. } => "□".to_string(),
        CellView {
            has_mine: Some(true),
            ..
        } => "*".to_string(),
        CellView {
            adjacent_mines: Some(0),
            ..
        } => ".".to_string(),
        CellView {
            adjacent_mines: Some(n),
            ..
        } => n.to_string(),
        CellView { .. } => "?".to_string(),
    }
}

fn get_user_input(phase: Phase) -> Option<Input> {
    if phase.is_finished() {
        print!("Enter command (n = new game, q = quit): ");
    } else {
        print!("Enter command (r row col | f row col | g = give up | n | q): ");
    }
    io::stdout().flush().ok();

    let mut input = String::new();
    // EOF ends the session like 'q'
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return Some(Input::Quit),
        Ok(_) => {}
    }

    let mut parts = input.split_whitespace();
    let command = parts.next()?.chars().next()?;

    let action = match command {
        'n' => return Some(Input::Restart),
        'q' => return Some(Input::Quit),
        'g' => return Some(Input::GiveUp),
        'r' => Action::Reveal,
        'f' => Action::Flag,
        _ => {
            println!("Invalid command. Use 'r' to reveal or 'f' to flag");
            return None;
        }
    };

    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    Some(Input::Act(Position::new(row, col), action))
}
