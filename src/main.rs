use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use snake_autopilot::render::{Renderer, TextRenderer};
use snake_autopilot::{logger, Config, GameSession, SafetyMode, TickOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_autopilot")]
#[command(version, about = "Self-playing Snake: A* to food, flood-fill safety, tail-chase fallback")]
struct Cli {
    /// Configuration file (defaults to ./config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick limit per episode
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of episodes to play
    #[arg(long)]
    episodes: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board every tick
    #[arg(long)]
    render: bool,

    /// Safety check applied before following a path to food
    #[arg(long)]
    safety: Option<SafetyArg>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SafetyArg {
    /// Check reachable area before taking the food path
    FloodFill,
    /// Take any path to food
    Direct,
}

impl From<SafetyArg> for SafetyMode {
    fn from(arg: SafetyArg) -> Self {
        match arg {
            SafetyArg::FloodFill => SafetyMode::FloodFill,
            SafetyArg::Direct => SafetyMode::Direct,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(LevelFilter::Info);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load(),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    match logger::parse_level(&config.logging.level) {
        Some(level) => logger::init(level),
        None => warn!("Unknown log level '{}', keeping info", config.logging.level),
    }

    run(&config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ticks) = cli.ticks {
        config.session.max_ticks = ticks;
    }
    if let Some(episodes) = cli.episodes {
        config.session.episodes = episodes;
    }
    if cli.seed.is_some() {
        config.session.seed = cli.seed;
    }
    if cli.render {
        config.render.enabled = true;
    }
    if let Some(safety) = cli.safety {
        config.navigation.safety_mode = safety.into();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
}

fn run(config: &Config) -> Result<()> {
    info!(
        "Grid {}x{}, safety {:?}, {} episode(s) of up to {} ticks",
        config.grid.cols,
        config.grid.rows,
        config.navigation.safety_mode,
        config.session.episodes,
        config.session.max_ticks
    );

    let mut session = GameSession::new(config);
    let mut renderer = TextRenderer::printing();
    let mut scores = Vec::with_capacity(config.session.episodes as usize);

    while scores.len() < config.session.episodes as usize {
        let episode = session.episode();
        let outcome = session.tick()?;

        if config.render.enabled && session.total_ticks() % config.render.every == 0 {
            renderer.draw(&session.frame());
        }

        match outcome {
            TickOutcome::Collided { score, .. } | TickOutcome::BoardFull { score } => {
                println!("Episode {}: score {}", episode, score);
                scores.push(score);
            }
            TickOutcome::Moved | TickOutcome::Ate { .. } => {
                if session.episode_ticks() >= config.session.max_ticks {
                    let score = session.score();
                    println!("Episode {}: score {} (tick limit reached)", episode, score);
                    scores.push(score);
                    session.start_game();
                }
            }
        }
    }

    let best = scores.iter().copied().max().unwrap_or(0);
    let mean = scores.iter().sum::<usize>() as f64 / scores.len().max(1) as f64;
    println!("\n=== Summary ===");
    println!("Episodes: {}", scores.len());
    println!("Best score: {}", best);
    println!("Mean score: {:.2}", mean);
    println!("{}", session.log().summary());
    if log::max_level() >= LevelFilter::Debug {
        session.log().print();
    }

    if config.logging.enable_action_log {
        session
            .log()
            .save_to_file(&config.logging.action_log_path)
            .map_err(|e| anyhow::anyhow!("saving {}: {}", config.logging.action_log_path, e))?;
        info!("Session log written to {}", config.logging.action_log_path);
    }

    Ok(())
}
