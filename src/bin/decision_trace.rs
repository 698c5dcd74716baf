//! Decision trace
//!
//! Feeds one duel situation to the AI and prints what it would do, with
//! the full decision trace. Useful when tuning `data/ai_config.toml`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use duel_ai::{
    ActionKind, ActionTable, AiConfig, CombatRules, CombatantSnapshot, DebugInfo, DecisionController,
    Difficulty, FuzzyEngine,
};
use serde::Serialize;

/// Duel AI decision trace
#[derive(Parser, Debug)]
#[command(name = "decision_trace")]
#[command(about = "Show the action the duel AI picks for a given situation")]
struct Args {
    /// AI character name (selects the special move cost)
    #[arg(long, default_value = "warrior")]
    ai_name: String,

    #[arg(long, default_value_t = 100)]
    ai_hp: u32,

    #[arg(long, default_value_t = 100)]
    ai_max_hp: u32,

    #[arg(long, default_value_t = 100)]
    ai_stamina: u32,

    #[arg(long, default_value_t = 100)]
    ai_max_stamina: u32,

    /// Turns until the AI's special is ready
    #[arg(long, default_value_t = 0)]
    ai_cooldown: u32,

    /// Opponent character name
    #[arg(long, default_value = "warrior")]
    opponent_name: String,

    #[arg(long, default_value_t = 100)]
    opponent_hp: u32,

    #[arg(long, default_value_t = 100)]
    opponent_max_hp: u32,

    #[arg(long, default_value_t = 100)]
    opponent_stamina: u32,

    #[arg(long, default_value_t = 100)]
    opponent_max_stamina: u32,

    /// Opponent's recent moves, oldest first (e.g. "punch,kick,guard")
    #[arg(long, default_value = "")]
    history: String,

    /// Difficulty preset: lenient, neutral or aggressive
    #[arg(long)]
    difficulty: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent decisions to sample
    #[arg(long, default_value_t = 1)]
    samples: u32,

    /// Path to an AI config TOML (defaults to built-in values)
    #[arg(long)]
    config: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct ProbeResult {
    seed: u64,
    samples: u32,
    chosen: ActionKind,
    /// How often each action came up across the samples
    frequencies: ActionTable<u32>,
    diagnostics: DebugInfo,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Probe failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> duel_ai::Result<()> {
    let mut config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    if let Some(label) = &args.difficulty {
        config.controller.difficulty = label.parse::<Difficulty>()?;
    }

    let history = args
        .history
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::parse::<ActionKind>)
        .collect::<duel_ai::Result<Vec<_>>>()?;

    let ai = CombatantSnapshot::new(&args.ai_name, args.ai_max_hp, args.ai_max_stamina)
        .with_hp(args.ai_hp)
        .with_stamina(args.ai_stamina)
        .with_cooldown(args.ai_cooldown);
    let opponent = CombatantSnapshot::new(&args.opponent_name, args.opponent_max_hp, args.opponent_max_stamina)
        .with_hp(args.opponent_hp)
        .with_stamina(args.opponent_stamina);

    let seed = args.seed.or(config.controller.seed).unwrap_or_else(rand::random);
    let engine = Arc::new(FuzzyEngine::standard(config.fuzzy.defuzzification)?);
    let rules: Arc<dyn CombatRules> = Arc::new(config.combat.clone());

    let samples = args.samples.max(1);
    let mut frequencies = ActionTable::splat(0u32);
    let mut last = None;

    // Fresh controller per sample so every draw sees the same situation
    for i in 0..samples {
        let mut controller = DecisionController::with_seed(
            Arc::clone(&engine),
            Arc::clone(&rules),
            config.clone(),
            seed.wrapping_add(u64::from(i)),
        );
        for &action in &history {
            controller.record_opponent_action(action);
        }
        let chosen = controller.select_action(&ai, &opponent);
        frequencies[chosen] += 1;
        last = Some((chosen, controller.diagnostics()));
    }

    let Some((chosen, diagnostics)) = last else {
        return Ok(());
    };
    let result = ProbeResult {
        seed,
        samples,
        chosen,
        frequencies,
        diagnostics,
    };

    if args.format == "json" {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => tracing::error!(error = %err, "Failed to serialize trace result"),
        }
    } else {
        print_text(&result);
    }
    Ok(())
}

fn print_text(result: &ProbeResult) {
    let info = &result.diagnostics;
    println!("Mode:       {} ({})", info.mode, info.mode_description);
    println!("Difficulty: {}", info.difficulty);
    println!("Threat:     {:.2}", info.threat);
    println!(
        "Pattern:    {:.2} -> {}",
        info.pattern.pattern_strength,
        info.pattern
            .predicted_next
            .map_or_else(|| "none".to_string(), |action| action.to_string())
    );
    println!();
    println!("{:<14} {:>6} {:>6} {:>6}", "action", "raw", "final", "picked");
    if let Some(record) = &info.last_decision {
        for action in ActionKind::ALL {
            println!(
                "{:<14} {:>6.3} {:>6.3} {:>6}",
                action.label(),
                record.raw_scores[action],
                record.final_distribution[action],
                result.frequencies[action]
            );
        }
    }
    println!();
    println!("Chosen: {} (seed {}, {} samples)", result.chosen, result.seed, result.samples);
}
