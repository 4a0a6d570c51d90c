//! MinAtar entry point
//!
//! Plays episodes with a uniform-random policy over the game's minimal
//! action set and reports per-episode returns.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use minatar::{EnvConfig, Environment, Game, GameKind};

/// Mixed into the environment seed so the policy draws from its own stream
const POLICY_SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Command-line arguments for a random-policy run.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Game to play (asterix or breakout). Overrides the config file.
    #[arg(short, long)]
    game: Option<GameKind>,
    /// Number of episodes to play.
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    episodes: u32,
    /// Environment seed. A random seed is drawn and logged when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Probability of repeating the previous action.
    #[arg(long, value_name = "PROB")]
    sticky_action_prob: Option<f64>,
    /// Disable difficulty ramping (Asterix).
    #[arg(long)]
    no_ramping: bool,
    /// Cut an episode off after this many steps.
    #[arg(
        long,
        value_name = "STEPS",
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_steps: u64,
    /// JSON file with an environment config.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct EpisodeReport {
    episode: u32,
    reward: u64,
    steps: u64,
    /// False when the step limit cut the episode off
    terminal: bool,
    difficulty_ramp: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    game: GameKind,
    seed: u64,
    sticky_action_prob: f64,
    difficulty_ramping: bool,
    episodes: Vec<EpisodeReport>,
    mean_reward: f64,
}

fn load_config(args: &CliArgs) -> minatar::Result<EnvConfig> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EnvConfig::default(),
    };
    if let Some(game) = args.game {
        config.game = game;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(prob) = args.sticky_action_prob {
        config.sticky_action_prob = prob;
    }
    if args.no_ramping {
        config.difficulty_ramping = false;
    }
    config.validate()?;
    Ok(config)
}

fn run_episode(
    env: &mut Environment,
    policy: &mut Pcg32,
    episode: u32,
    max_steps: u64,
) -> EpisodeReport {
    env.reset();
    let actions = env.minimal_action_set();
    let mut reward = 0u64;
    let mut steps = 0u64;
    let mut terminal = false;

    while steps < max_steps && !terminal {
        let action = actions[policy.random_range(0..actions.len())];
        let (r, t) = env.act(i64::from(action));
        reward += u64::from(r);
        terminal = t;
        steps += 1;
    }

    log::debug!("episode {episode}: reward={reward} steps={steps} terminal={terminal}");
    EpisodeReport {
        episode,
        reward,
        steps,
        terminal,
        difficulty_ramp: env.difficulty_ramp(),
    }
}

fn run(args: &CliArgs) -> minatar::Result<()> {
    let config = load_config(args)?;
    let mut env = Environment::new(&config)?;
    let mut policy = Pcg32::seed_from_u64(env.seed() ^ POLICY_SEED_MIX);

    let episodes: Vec<EpisodeReport> = (1..=args.episodes)
        .map(|i| run_episode(&mut env, &mut policy, i, args.max_steps))
        .collect();
    let total: u64 = episodes.iter().map(|e| e.reward).sum();
    let report = RunReport {
        game: env.kind(),
        seed: env.seed(),
        sticky_action_prob: env.sticky_action_prob(),
        difficulty_ramping: env.difficulty_ramping(),
        mean_reward: total as f64 / episodes.len() as f64,
        episodes,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} (seed {}, sticky {}, ramping {})",
            report.game, report.seed, report.sticky_action_prob, report.difficulty_ramping
        );
        for e in &report.episodes {
            let ramp = e
                .difficulty_ramp
                .map_or_else(|| "-".to_string(), |r| r.to_string());
            println!(
                "  episode {:>3}: reward {:>4}  steps {:>6}  ramp {:>3}{}",
                e.episode,
                e.reward,
                e.steps,
                ramp,
                if e.terminal { "" } else { "  (step limit)" }
            );
        }
        println!("mean reward: {:.2}", report.mean_reward);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    log::info!("MinAtar starting...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
