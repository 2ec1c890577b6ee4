use clap::{Parser, Subcommand};
use colored::Colorize;
use graphex::{Config, Regex, render_svg, write_dot};
use log::{LevelFilter, debug};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "graphex")]
#[command(about = "Graphex - a tiny state-graph pattern matcher")]
#[command(version)]
struct Cli {
    /// Abort a search after this many transitions per anchored attempt
    #[arg(long, global = true, value_name = "N")]
    step_limit: Option<usize>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every match of a pattern, scanning left to right
    Find {
        /// The pattern
        pattern: String,
        /// The input string (omit when using --file)
        input: Option<String>,
        /// Read the input from a file instead
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,
    },
    /// Show the first match and where it was found
    Test {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
        /// Also print the compiled graph's size
        #[arg(long)]
        stats: bool,
    },
    /// Check if the pattern matches anywhere; exit status 1 if not
    Match {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
    },
    /// Export the compiled automaton as a Graphviz DOT file
    Dot {
        /// The pattern
        pattern: String,
        /// Where to write the DOT source
        #[arg(short, long, default_value = "regex.dot")]
        output: PathBuf,
        /// Also render an SVG with the external `dot` tool
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::new();
    if let Some(limit) = cli.step_limit {
        config = config.step_limit(limit);
    }

    match cli.command {
        Commands::Find {
            pattern,
            input,
            file,
        } => cmd_find(&pattern, input, file.as_deref(), config),
        Commands::Test {
            pattern,
            input,
            stats,
        } => cmd_test(&pattern, &input, stats, config),
        Commands::Match { pattern, input } => cmd_match(&pattern, &input, config),
        Commands::Dot {
            pattern,
            output,
            svg,
        } => cmd_dot(&pattern, &output, svg.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn fail(error: impl Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    std::process::exit(1);
}

fn compile(pattern: &str, config: Config) -> Regex {
    Regex::with_config(pattern, config).unwrap_or_else(|e| fail(e))
}

fn cmd_find(pattern: &str, input: Option<String>, file: Option<&Path>, config: Config) {
    let regex = compile(pattern, config);
    let input = match (input, file) {
        (Some(input), _) => input,
        (None, Some(path)) => {
            debug!("reading input from {}", path.display());
            fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("cannot read {}: {}", path.display(), e)))
        }
        (None, None) => fail("provide an input string or --file"),
    };

    let matches = regex.find_all(&input).unwrap_or_else(|e| fail(e));

    if matches.is_empty() {
        println!("{}", "No matches found".red());
        return;
    }

    println!(
        "{} {}",
        "Found".bold(),
        format!("{} match(es)", matches.len()).green()
    );
    println!();
    for (i, m) in matches.iter().enumerate() {
        println!(
            "  [{}] {}..{} = {}",
            i + 1,
            m.start(),
            m.end(),
            m.as_str().green()
        );
    }
}

fn cmd_test(pattern: &str, input: &str, stats: bool, config: Config) {
    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let regex = compile(pattern, config);

    if stats {
        let graph = regex.graph();
        println!("{}", "Graph:".bold());
        println!("  States:      {}", graph.state_count());
        println!("  Transitions: {}", graph.transition_count());
        println!("  Start:       s{}", regex.start());
        println!("  Accepting:   s{}", regex.accepting());
        println!();
    }

    match regex.find(input) {
        Ok(Some(m)) => {
            println!("{}", "✓ Match found!".green().bold());
            println!("  Position:  {}..{}", m.start(), m.end());
            println!("  Match:     {}", m.as_str().green());
            println!("  Remainder: {}", m.remainder().yellow());
        }
        Ok(None) => println!("{}", "✗ No match".red()),
        Err(e) => fail(e),
    }
}

fn cmd_match(pattern: &str, input: &str, config: Config) {
    let regex = compile(pattern, config);

    if regex.is_match(input).unwrap_or_else(|e| fail(e)) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_dot(pattern: &str, output: &Path, svg: Option<&Path>) {
    let regex = compile(pattern, Config::default());

    write_dot(regex.graph(), output)
        .unwrap_or_else(|e| fail(format!("cannot write {}: {}", output.display(), e)));
    println!("{} {}", "Wrote".bold(), output.display().to_string().green());

    if let Some(svg) = svg {
        render_svg(output, svg).unwrap_or_else(|e| fail(format!("dot failed: {}", e)));
        println!("{} {}", "Rendered".bold(), svg.display().to_string().green());
    }
}
