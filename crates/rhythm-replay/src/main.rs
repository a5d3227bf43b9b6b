// rhythm-replay — replays a recorded handwriting practice session through
// the scoring engine and reports per-stroke judgements and the reward.

mod report;
mod session;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use rhythm_rule::{EngineConfig, RhythmEngine};

use report::ReplayReport;
use session::SessionFile;

#[derive(Parser, Debug)]
#[command(
    name = "rhythm-replay",
    about = "Replay a recorded stroke practice session through the scoring engine"
)]
struct Args {
    /// Path to a session JSON file ({"points": [...], "attempts": [...]}).
    session: PathBuf,

    /// Path to an engine config JSON file. Defaults are used when missing.
    #[arg(long, env = "RHYTHM_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// Pen-lift gap in milliseconds, overriding the config.
    #[arg(long)]
    gap_ms: Option<f64>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::default(),
    };
    if let Some(gap) = args.gap_ms {
        if !(gap > 0.0) {
            bail!("--gap-ms must be positive, got {gap}");
        }
    }

    let session = SessionFile::load_from(&args.session)?;
    info!(
        "loaded {} samples and {} attempts from {}",
        session.points.len(),
        session.attempts.len(),
        args.session.display()
    );

    let report = replay(config, &session, args.gap_ms);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Run every attempt against the engine in order.
fn replay(config: EngineConfig, session: &SessionFile, gap_ms: Option<f64>) -> ReplayReport {
    let mut engine = RhythmEngine::new(config);
    let beats = engine.parse_stroke_data(&session.points, gap_ms);
    info!("{beats} beats to judge");

    let mut hits = Vec::with_capacity(session.attempts.len());
    for attempt in &session.attempts {
        if engine.is_exhausted() {
            log::warn!(
                "attempt at {} ms has no beat left; ignoring the rest",
                attempt.input_time
            );
            break;
        }
        let pressure = attempt.resolve_pressure(engine.active_segment());
        let beat = engine.active_segment_index();
        let result = engine.judge(attempt.input_time, attempt.position(), pressure);
        hits.push(report::ReplayHit { beat, result });
    }

    let unplayed = engine.remaining_beats();
    if unplayed > 0 {
        info!("{unplayed} beats were never attempted");
    }

    ReplayReport {
        hits,
        summary: engine.summary(),
    }
}
