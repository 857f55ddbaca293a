//! Plays one vs-automated game end to end with a random player 1 and prints
//! a JSON summary.

use battleship_engine::{
    choose_attack, init_logging, AttackOutcome, EngineConfig, EngineError, GameEngine, Mode,
    Phase, PlayerId,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <engine-seed> <player-seed>", args[0]);
        std::process::exit(1);
    }
    let engine_seed: u64 = args[1].parse()?;
    let player_seed: u64 = args[2].parse()?;

    let err = |e: EngineError| anyhow::anyhow!("{}", e);
    let mut engine = GameEngine::with_seed(EngineConfig::default(), engine_seed).map_err(err)?;
    let mut rng = SmallRng::seed_from_u64(player_seed);

    engine.select_mode(Mode::VsAutomated).map_err(err)?;
    engine.auto_place().map_err(err)?;
    engine.ready().map_err(err)?;

    let mut shots = [0usize; 2];
    let mut hits = [0usize; 2];
    while engine.phase() == Phase::Battle {
        let report = if engine.current_player() == PlayerId::One {
            let attacked = engine.state().player(PlayerId::Two).board().attacked();
            let (r, c) = choose_attack(&attacked, &mut rng)
                .ok_or_else(|| anyhow::anyhow!("player 1 ran out of cells"))?;
            engine.attack(r, c).map_err(err)?
        } else {
            engine
                .play_pending()
                .map_err(err)?
                .ok_or_else(|| anyhow::anyhow!("automated side had no move armed"))?
        };
        let idx = report.attacker.index();
        shots[idx] += 1;
        if !matches!(report.outcome, AttackOutcome::Miss) {
            hits[idx] += 1;
        }
    }

    let winner = engine.winner().map(|w| format!("player{}", w.number()));
    let result = json!({
        "player1": {"shots": shots[0], "hits": hits[0]},
        "player2": {"shots": shots[1], "hits": hits[1]},
        "winner": winner,
        "message": engine.message(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
