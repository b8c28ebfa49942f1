mod logic;
mod play;
mod slot;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use geocoin_game::{GeocacheSession, MemorySlot, SnapshotSlot, WorldConfig};
use logic::{LogicTester, ScenarioResult, get_scenario, list_scenarios, scenario_keys};
use play::{ConsolePresenter, parse_script, run_script};
use slot::FileSlot;
use util::{parse_seeds, split_csv};

/// Trail positions echoed after a play-through.
const TRAIL_TAIL: usize = 5;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Seeded scenario sweeps over the game logic
    Logic,
    /// Play a scripted session and print what the player sees
    Play,
}

#[derive(Debug, Parser)]
#[command(name = "geocoin-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the Geocoin game logic")]
struct Args {
    /// Test mode: logic sweeps or a scripted play-through
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// World settings as JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file for play mode; an in-memory slot is used when omitted
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Play-mode script, e.g. `n,n,collect,e,deposit,save`
    #[arg(long, default_value = "")]
    commands: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let config = load_config(args.config.as_deref())?;
    match args.mode {
        TestMode::Logic => {
            let start_time = Instant::now();
            let scenarios = expand_scenarios(&args.scenarios);
            let seeds = parse_seeds(&args.seeds)?;
            let results = run_logic_scenarios(&args, config, &scenarios, &seeds);
            write_reports(&args, &results, start_time)?;
            if results.iter().any(|r| !r.passed) {
                std::process::exit(1);
            }
        }
        TestMode::Play => run_play(&args, config)?,
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎮 Geocoin Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    WorldConfig::from_json(&text).with_context(|| format!("invalid world config {}", path.display()))
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.contains(&"all".to_string()) {
        scenarios.retain(|s| s != "all");
        scenarios.extend(scenario_keys().into_iter().map(str::to_string));
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    config: WorldConfig,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(config, args.verbose);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

fn run_play(args: &Args, config: WorldConfig) -> Result<()> {
    let commands = parse_script(&args.commands)?;
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match &args.save_file {
        Some(path) => {
            let slot = FileSlot::new(path);
            log::info!("playing with save file {}", slot.path().display());
            play_with(config, slot, &commands, &mut output_target)?;
        }
        None => play_with(config, MemorySlot::default(), &commands, &mut output_target)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn play_with<S: SnapshotSlot>(
    config: WorldConfig,
    slot: S,
    commands: &[play::Command],
    out: &mut impl Write,
) -> Result<()> {
    let mut session = GeocacheSession::start(config, slot).context("session failed to start")?;
    let mut presenter = ConsolePresenter::default();
    run_script(&mut session, commands, &mut presenter);

    for line in presenter.lines() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(out, "Final position: {} (cell {})", session.player(), session.player_cell())?;
    writeln!(out, "Final points: {}", session.points())?;
    let history = session.history();
    writeln!(out, "Trail: {} steps", history.len().saturating_sub(1))?;
    for point in &history[history.len().saturating_sub(TRAIL_TAIL)..] {
        writeln!(out, "  {point}")?;
    }
    Ok(())
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Geocoin Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            config: None,
            save_file: None,
            commands: String::new(),
        }
    }

    #[test]
    fn expand_all_includes_every_scenario_once() {
        let scenarios = expand_scenarios("all");
        assert_eq!(scenarios.len(), scenario_keys().len());
        assert!(scenarios.contains(&"economy".to_string()));
    }

    #[test]
    fn default_config_when_no_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.max_coins_per_cache, WorldConfig::default().max_coins_per_cache);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/world.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn logic_run_passes_smoke() {
        let args = base_args();
        let results = run_logic_scenarios(
            &args,
            WorldConfig::default(),
            &["smoke".to_string(), "nope".to_string()],
            &[1, 2],
        );
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn play_writes_summary() {
        let mut buf = Vec::new();
        let commands = parse_script("n,e,collect").unwrap();
        play_with(WorldConfig::default(), MemorySlot::default(), &commands, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Final position"));
        assert!(text.contains("cell 1:1"));
        assert!(text.contains("Final points: "));
        assert!(text.contains("Trail: 2 steps"));
    }

    #[test]
    fn play_trail_is_cleared_by_reset() {
        let mut buf = Vec::new();
        let commands = parse_script("n,n,n,reset").unwrap();
        play_with(WorldConfig::default(), MemorySlot::default(), &commands, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Trail: 0 steps"), "{text}");
    }
}
