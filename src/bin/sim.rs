use anyhow::Context;
use battleships::{
    init_logging, Command, GameConfig, Match, Phase, PlayerType, RandomDecider, SharedMatch,
};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};

/// Play random-vs-random matches concurrently and report the winners.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of matches to run in parallel.
    #[arg(long, default_value_t = 4)]
    matches: u64,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Width and height of each grid.
    #[arg(long, default_value_t = battleships::DEFAULT_MAP_SIZE)]
    size: usize,
    /// Abort a match that is still running after this many rounds.
    #[arg(long, default_value_t = 500)]
    max_rounds: u32,
}

#[derive(Debug)]
struct Outcome {
    id: u64,
    winner: Option<PlayerType>,
    rounds: u32,
}

async fn run_match(id: u64, seed: u64, config: GameConfig, max_rounds: u32) -> anyhow::Result<Outcome> {
    let game = Match::with_config(format!("bot-{}a", id), format!("bot-{}b", id), &config)?;
    let handle = SharedMatch::new(game);
    let mut rngs = [
        SmallRng::seed_from_u64(seed),
        SmallRng::seed_from_u64(seed.wrapping_add(1)),
    ];
    let mut deciders = [RandomDecider::new(), RandomDecider::new()];

    for player in PlayerType::BOTH {
        let i = player as usize;
        let mut attempts = 0;
        while !handle.lock().await.own_grid(player).is_ready() {
            let (command, _) = handle
                .play_turn(player, &mut deciders[i], &mut rngs[i])
                .await?;
            if command == Command::DoNothing {
                // the random layout painted itself into a corner
                attempts += 1;
                anyhow::ensure!(attempts < 10, "match {} could not place {:?}'s fleet", id, player);
                handle.clean_map_before_place(player).await?;
            }
        }
    }
    handle.set_phase(Phase::Shooting).await?;

    let mut rounds = 1;
    'rounds: while rounds <= max_rounds {
        for player in PlayerType::BOTH {
            let i = player as usize;
            handle
                .play_turn(player, &mut deciders[i], &mut rngs[i])
                .await
                .with_context(|| format!("match {} round {}", id, rounds))?;
            if handle.winner().await.is_some() {
                handle.set_phase(Phase::Finished).await?;
                break 'rounds;
            }
        }
        rounds = handle.next_round().await;
    }

    Ok(Outcome {
        id,
        winner: handle.winner().await,
        rounds,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let base_seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("running {} matches with seed {}", cli.matches, base_seed);

    let config = GameConfig::square(cli.size);
    let mut tasks = Vec::new();
    for id in 0..cli.matches {
        let seed = base_seed.wrapping_add(id * 2);
        tasks.push(tokio::spawn(run_match(id, seed, config.clone(), cli.max_rounds)));
    }

    for task in tasks {
        let outcome = task.await??;
        match outcome.winner {
            Some(winner) => println!(
                "match {}: player {:?} won after {} rounds",
                outcome.id, winner, outcome.rounds
            ),
            None => println!("match {}: no winner after {} rounds", outcome.id, outcome.rounds),
        }
    }
    Ok(())
}
