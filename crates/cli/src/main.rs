use anyhow::Context;
use scalatro_autoplay::{
    autoplay, run_status_label, write_json, write_text, AutoplayConfig, AutoplayResult, RunStatus,
    TargetConfig,
};
use scalatro_core::GameConfig;
use scalatro_data::load_game_config;
use std::path::{Path, PathBuf};

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    seed: u64,
    runs: u32,
    config: Option<PathBuf>,
    difficulty: Option<f64>,
    endless: bool,
    target_round: Option<u32>,
    max_steps: Option<u32>,
    trace: bool,
    json: bool,
    out: Option<PathBuf>,
    help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_RUN_SEED,
            runs: 1,
            config: None,
            difficulty: None,
            endless: false,
            target_round: None,
            max_steps: None,
            trace: false,
            json: false,
            out: None,
            help: false,
        }
    }
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut value = || take_value(args, &mut idx, flag);
        match flag {
            "--seed" | "-s" => {
                options.seed = value()?.parse().context("--seed expects an integer")?;
            }
            "--runs" | "-n" => {
                options.runs = value()?.parse().context("--runs expects an integer")?;
            }
            "--config" | "-c" => options.config = Some(PathBuf::from(value()?)),
            "--difficulty" | "-d" => options.difficulty = Some(parse_difficulty(value()?)?),
            "--target-round" => {
                options.target_round =
                    Some(value()?.parse().context("--target-round expects an integer")?);
            }
            "--max-steps" => {
                options.max_steps =
                    Some(value()?.parse().context("--max-steps expects an integer")?);
            }
            "--out" | "-o" => options.out = Some(PathBuf::from(value()?)),
            "--endless" => options.endless = true,
            "--trace" => options.trace = true,
            "--json" => options.json = true,
            "--help" | "-h" => options.help = true,
            other => anyhow::bail!("unknown argument {other}"),
        }
        idx += 1;
    }
    if options.runs == 0 {
        anyhow::bail!("--runs must be at least 1");
    }
    Ok(options)
}

fn parse_difficulty(raw: &str) -> anyhow::Result<f64> {
    match raw {
        "easy" => Ok(0.7),
        "normal" => Ok(1.0),
        "hard" => Ok(1.5),
        _ => raw
            .parse()
            .with_context(|| format!("--difficulty expects easy, normal, hard or a number, got {raw}")),
    }
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .with_context(|| format!("{flag} expects a value"))
}

fn print_help() {
    println!("scalatro-cli: headless seeded autoplay runner");
    println!();
    println!("usage: scalatro-cli [options]");
    println!("  -s, --seed <n>          first seed (default {DEFAULT_RUN_SEED})");
    println!("  -n, --runs <n>          number of games, seeds counting up from --seed");
    println!("  -c, --config <path>     game config file or directory (default ./{DEFAULT_ASSETS_DIR})");
    println!("  -d, --difficulty <x>    easy (0.7), normal (1.0), hard (1.5) or any factor");
    println!("      --endless           keep generating benchmarks past the ladder");
    println!("      --target-round <n>  stop a game once it reaches round n");
    println!("      --max-steps <n>     cap actions per game");
    println!("      --trace             print every step of each game");
    println!("      --json              print results as JSON");
    println!("  -o, --out <path>        write the last result (.txt for a text report, JSON otherwise)");
    println!();
    println!("RUST_LOG controls diagnostic output, e.g. RUST_LOG=scalatro_core=debug");
}

fn load_config(options: &CliOptions) -> anyhow::Result<GameConfig> {
    let mut config = match options.config.as_deref() {
        Some(path) => load_game_config(path)?,
        None => {
            let default = Path::new(DEFAULT_ASSETS_DIR);
            if default.join(scalatro_data::DEFAULT_CONFIG_FILE).exists() {
                load_game_config(default)?
            } else {
                log::debug!("no {DEFAULT_ASSETS_DIR} directory, using built-in rules");
                GameConfig::default()
            }
        }
    };
    if options.endless {
        config.endless = true;
    }
    Ok(config)
}

#[derive(Debug, Default)]
struct Tally {
    victories: u32,
    defeats: u32,
    other: u32,
    rounds: u64,
    beaten: u64,
}

impl Tally {
    fn record(&mut self, result: &AutoplayResult) {
        match result.status {
            RunStatus::Victory => self.victories += 1,
            RunStatus::Defeat => self.defeats += 1,
            _ => self.other += 1,
        }
        self.rounds += u64::from(result.final_metrics.round);
        self.beaten += u64::from(result.final_metrics.benchmarks_beaten);
    }

    fn summary(&self, runs: u32) -> String {
        let runs_f = f64::from(runs.max(1));
        format!(
            "runs={runs} victories={} defeats={} unfinished={} win_rate={:.1}% avg_round={:.1} avg_beaten={:.1}",
            self.victories,
            self.defeats,
            self.other,
            100.0 * f64::from(self.victories) / runs_f,
            self.rounds as f64 / runs_f,
            self.beaten as f64 / runs_f
        )
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let game = load_config(options)?;
    let targets = TargetConfig {
        target_round: options.target_round,
        ..TargetConfig::default()
    };
    let mut tally = Tally::default();
    let mut results = Vec::new();
    let mut last = None;

    for offset in 0..options.runs {
        let mut config = AutoplayConfig {
            seed: options.seed.wrapping_add(u64::from(offset)),
            difficulty: options.difficulty,
            record_steps: options.trace,
            ..AutoplayConfig::default()
        };
        if let Some(max_steps) = options.max_steps {
            config.max_steps = max_steps;
        }
        let result = autoplay(game.clone(), &config, targets)
            .with_context(|| format!("autoplay seed {}", config.seed))?;
        tally.record(&result);

        if options.json {
            results.push(result.clone());
        } else if options.trace {
            println!("{}", result.to_text_report());
            println!();
        } else {
            println!(
                "seed {:>20} | {:<13} | round {:>3} | share {:>3} | money {:>5} | beaten {:>2} | jokers {}",
                result.seed,
                run_status_label(result.status),
                result.final_metrics.round,
                result.final_metrics.market_share,
                result.final_metrics.money,
                result.final_metrics.benchmarks_beaten,
                result.summary.jokers_bought
            );
        }
        last = Some(result);
    }

    if options.json {
        let body = serde_json::to_string_pretty(&results).context("serialize results")?;
        println!("{body}");
    } else if options.runs > 1 {
        println!("{}", tally.summary(options.runs));
    }
    if let (Some(path), Some(result)) = (options.out.as_deref(), last.as_ref()) {
        let written = if path.extension().is_some_and(|ext| ext == "txt") {
            write_text(path, result)
        } else {
            write_json(path, result)
        };
        written.with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err:#}");
            eprintln!("try --help");
            std::process::exit(2);
        }
    };
    if options.help {
        print_help();
        return;
    }
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
