//! bondsignal CLI
//!
//! Usage:
//!   bondsignal crisis --text "your text here"                  # Single classification
//!   bondsignal crisis --interactive                            # Classify stdin line by line
//!   bondsignal pursue-withdraw --fixture data.json --couple c1 # Pattern detection
//!   bondsignal --json crisis --text "..."                      # JSON output

use std::io::{self, BufRead, Write};
use std::process;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use bondsignal::core::{CrisisClassifier, DetectorConfig, InMemoryDataSource, PursueWithdrawDetector};
use bondsignal::types::{CrisisDetectionResult, PursueWithdrawResult};
use bondsignal::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "bondsignal",
    version = VERSION,
    about = "Behavioral and textual risk detection for couples coaching",
    long_about = "bondsignal turns raw client data into severity-classified risk signals.\n\n\
                  Commands:\n  \
                  crisis           Classify free text into a crisis level (0-3)\n  \
                  pursue-withdraw  Detect pursue-withdraw cycles from engagement data\n\n\
                  Crisis levels:\n  \
                  0 NONE       - No crisis language\n  \
                  1 ELEVATED   - Conflict or flooding\n  \
                  2 ACUTE      - Affair, separation or betrayal\n  \
                  3 EMERGENCY  - Safety risk, share crisis resources"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show score breakdown
    #[arg(long, global = true)]
    verbose: bool,

    /// Detector config (JSON); defaults apply to missing fields
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify text for crisis indicators
    Crisis {
        /// Text to classify
        #[arg(short, long)]
        text: Option<String>,

        /// Read lines from stdin and classify each
        #[arg(short, long)]
        interactive: bool,
    },

    /// Detect a pursue-withdraw pattern for one couple
    PursueWithdraw {
        /// Fixture file with relationships and activity
        #[arg(short, long)]
        fixture: String,

        /// Couple (relationship) id
        #[arg(short, long)]
        couple: String,

        /// Analysis window in days (clamped to 7..=365)
        #[arg(short, long)]
        window_days: Option<u32>,

        /// Window end date, YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Crisis { text: Some(text), interactive: false } => run_crisis_single(text, args),
        Command::Crisis { .. } => run_crisis_interactive(args),
        Command::PursueWithdraw { fixture, couple, window_days, as_of } => {
            run_pursue_withdraw(fixture, couple, *window_days, *as_of, args).await
        }
    }
}

/// Classify one passage
fn run_crisis_single(text: &str, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = CrisisClassifier::new();
    let result = classifier.classify(text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if args.verbose {
        print_verbose_crisis(&classifier, text, &result);
    } else {
        print_crisis(&result, args.no_color);
    }
    Ok(())
}

/// Classify stdin line by line
fn run_crisis_interactive(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = CrisisClassifier::new();

    print_header("Crisis Classifier");
    println!("Type text and press Enter to classify. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut classified = 0usize;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Classified: {}", classified);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let result = classifier.classify(line);
        classified += 1;

        if args.json {
            println!("{}", serde_json::to_string(&result)?);
        } else if args.verbose {
            print_verbose_crisis(&classifier, line, &result);
        } else {
            print_crisis(&result, args.no_color);
        }
    }
    Ok(())
}

/// Run pursue-withdraw detection against a fixture file
async fn run_pursue_withdraw(
    fixture: &str,
    couple: &str,
    window_days: Option<u32>,
    as_of: Option<NaiveDate>,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    };
    let window = window_days.unwrap_or(config.window_days);
    let detector = PursueWithdrawDetector::try_new(config)?;
    let source = InMemoryDataSource::from_json_file(fixture)?;
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let result = detector.detect_at(&source, couple, window, as_of).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if args.verbose {
        print_verbose_pattern(&result);
    } else if args.no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }

    if let Some(signal) = result.to_risk_signal() {
        if !args.json {
            println!("{} [{:?}] {}", "ALERT".red().bold(), signal.severity, signal.title);
        }
    }
    Ok(())
}

fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  bondsignal v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

fn print_crisis(result: &CrisisDetectionResult, no_color: bool) {
    if no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }
}

/// Crisis result plus per-category breakdown
fn print_verbose_crisis(classifier: &CrisisClassifier, text: &str, result: &CrisisDetectionResult) {
    let paint = |s: String| result.level.paint(&s);

    println!("{}", paint("┌──────────────────────────────────────┐".to_string()));
    println!(
        "{}",
        paint(format!(
            "│ level = {} ({})  confidence {:.0}%",
            result.level.as_u8(),
            result.level,
            result.confidence * 100.0
        ))
    );
    println!("{}", paint("├──────────────────────────────────────┤".to_string()));
    println!("{}", paint("│ Categories:".to_string()));
    for score in classifier.score(text) {
        println!(
            "{}",
            paint(format!(
                "│   {:<20} score={:<2} matches={} (base {})",
                score.crisis_type.code(),
                score.score,
                score.match_count,
                score.base_level
            ))
        );
    }
    println!("{}", paint("├──────────────────────────────────────┤".to_string()));
    println!("{}", paint(format!("│ Safety risk: {}", result.safety_risk)));
    for resource in &result.safety_resources {
        println!("{}", paint(format!("│   {} - {}", resource.name, resource.contact)));
    }
    println!("{}", paint("└──────────────────────────────────────┘".to_string()));
}

/// Pattern result with profiles and clinical notes
fn print_verbose_pattern(result: &PursueWithdrawResult) {
    let paint = |s: String| result.intensity.paint(&s);
    let meta = &result.metadata;

    println!("{}", paint("┌──────────────────────────────────────┐".to_string()));
    println!(
        "{}",
        paint(format!("│ {} | intensity={} | trend={}", result.pattern_type, result.intensity, result.trend))
    );
    println!(
        "{}",
        paint(format!("│ r = {:.3} | disparity = {:.2}", result.correlation, result.engagement_disparity))
    );
    println!("{}", paint("├──────────────────────────────────────┤".to_string()));
    for profile in [&result.pursuer, &result.withdrawer].into_iter().flatten() {
        println!(
            "{}",
            paint(format!(
                "│ {} ({:?}): score={:.1} var={:.1} logs/day={:.2}",
                profile.label, profile.role, profile.engagement_score, profile.engagement_variance, profile.log_frequency
            ))
        );
    }
    println!(
        "{}",
        paint(format!(
            "│ Window: {} .. {} ({} days, {})",
            meta.window_start, meta.window_end, meta.window_days, meta.alignment
        ))
    );
    println!(
        "{}",
        paint(format!(
            "│ Data points: A={} B={} quality={:?}",
            meta.partner_a_data_points, meta.partner_b_data_points, meta.data_quality
        ))
    );
    println!("{}", paint("├──────────────────────────────────────┤".to_string()));
    println!("{}", paint(format!("│ {}", result.clinical_notes.pattern_description)));
    for implication in &result.clinical_notes.clinical_implications {
        println!("{}", paint(format!("│   - {}", implication)));
    }
    println!("{}", paint(format!("│ Reason: {}", result.reason.code())));
    println!("{}", paint("└──────────────────────────────────────┘".to_string()));
}
