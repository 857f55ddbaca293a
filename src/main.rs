#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_engine::{
    init_logging, parse_coord, render_snapshot, Command, EngineConfig, GameEngine, Mode,
    Orientation, Session, Update, HELP,
};
#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Play battleship in the terminal", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Skip the mode prompt.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Delay before each automated move, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum ModeArg {
    Human,
    Ai,
}

#[cfg(feature = "std")]
impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => Mode::VsHuman,
            ModeArg::Ai => Mode::VsAutomated,
        }
    }
}

#[cfg(feature = "std")]
enum Input {
    Command(Command),
    Help,
    Quit,
}

#[cfg(feature = "std")]
fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let need = |what: &str| arg.ok_or_else(|| format!("'{}' needs {}", verb, what));
    let input = match verb.to_ascii_lowercase().as_str() {
        "mode" => match need("human or ai")? {
            "human" | "pvp" => Input::Command(Command::SelectMode(Mode::VsHuman)),
            "ai" | "cpu" => Input::Command(Command::SelectMode(Mode::VsAutomated)),
            other => return Err(format!("unknown mode '{}'", other)),
        },
        "select" | "ship" => Input::Command(Command::SelectShip(need("a ship name")?.to_string())),
        "rotate" | "r" => Input::Command(Command::Rotate),
        "horizontal" | "h" => Input::Command(Command::SetOrientation(Orientation::Horizontal)),
        "vertical" | "v" => Input::Command(Command::SetOrientation(Orientation::Vertical)),
        "place" | "p" => {
            let (row, col) = parse_coord(need("a cell")?)?;
            Input::Command(Command::PlaceShip { row, col })
        }
        "auto" => Input::Command(Command::AutoPlace),
        "ready" => Input::Command(Command::Ready),
        "fire" | "f" | "attack" => {
            let (row, col) = parse_coord(need("a cell")?)?;
            Input::Command(Command::Attack { row, col })
        }
        "new" => Input::Command(Command::NewGame),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(input))
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(ms) = cli.delay_ms {
        config = config.with_ai_delay(Duration::from_millis(ms));
    }
    let engine = match cli.seed {
        Some(seed) => {
            println!("Using fixed seed: {} (game will be reproducible)", seed);
            GameEngine::with_seed(config, seed)
        }
        None => GameEngine::new(config),
    }
    .map_err(|e| anyhow::anyhow!(e))?;

    let (session, mut updates, task) = Session::spawn(engine);
    if let Some(mode) = cli.mode {
        if let Err(e) = session.send(Command::SelectMode(mode.into())).await? {
            eprintln!("{}", e);
        }
    }
    print!("{}", render_snapshot(&session.snapshot().await?));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => println!("{}", HELP),
                    Ok(Some(Input::Command(cmd))) => match session.send(cmd).await? {
                        Ok(reply) => print!("{}", render_snapshot(&reply.snapshot)),
                        Err(e) => println!("{}", e),
                    },
                    Err(msg) => println!("{}", msg),
                }
            }
            Some(update) = updates.recv() => match update {
                Update::AutomatedMove { report, snapshot } => {
                    println!(
                        "Enemy fires at {}: {}",
                        battleship_engine::coord_to_string(report.row, report.col),
                        report.outcome
                    );
                    print!("{}", render_snapshot(&snapshot));
                }
                Update::Failed(e) => eprintln!("automated move failed: {}", e),
            },
        }
    }

    drop(session);
    let _ = task.await;
    Ok(())
}
