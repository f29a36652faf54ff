mod report;

use monochord::{ConstraintSet, ContextFreeGrammar, JustIntonationPitch, PitchSymbol};
use std::io::{self, IsTerminal};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let grammar = match ContextFreeGrammar::from_constraints(&config.constraints) {
        Ok(grammar) => grammar,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    report::print_grammar(&config.constraints, &grammar, config.color);

    if let Some(start) = config.resolve {
        let tree = grammar.resolve(PitchSymbol::NonTerminal(start), config.limit);
        report::print_derivation(&tree, config.color);
    }
}

struct CliConfig {
    constraints: ConstraintSet,
    resolve: Option<JustIntonationPitch>,
    limit: usize,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut max_cents: Option<f64> = None;
    let mut primes: Vec<(u64, u32)> = Vec::new();
    let mut add_unison = false;
    let mut octaves: Option<Vec<i32>> = None;
    let mut resolve: Option<JustIntonationPitch> = None;
    let mut limit: usize = 1;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("monochord {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--add-unison" => add_unison = true,
            "--max-cents" => max_cents = Some(parse_cents(&expect_value(&arg, &mut args)?)?),
            "--primes" => primes = parse_primes(&expect_value(&arg, &mut args)?)?,
            "--octaves" => octaves = Some(parse_octaves(&expect_value(&arg, &mut args)?)?),
            "--resolve" => resolve = Some(parse_ratio(&expect_value(&arg, &mut args)?)?),
            "--limit" => limit = parse_limit(&expect_value(&arg, &mut args)?)?,
            _ if arg.starts_with("--max-cents=") => {
                max_cents = Some(parse_cents(arg.trim_start_matches("--max-cents="))?);
            }
            _ if arg.starts_with("--primes=") => {
                primes = parse_primes(arg.trim_start_matches("--primes="))?;
            }
            _ if arg.starts_with("--octaves=") => {
                octaves = Some(parse_octaves(arg.trim_start_matches("--octaves="))?);
            }
            _ if arg.starts_with("--resolve=") => {
                resolve = Some(parse_ratio(arg.trim_start_matches("--resolve="))?);
            }
            _ if arg.starts_with("--limit=") => {
                limit = parse_limit(arg.trim_start_matches("--limit="))?;
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'"));
            }
        }
    }

    let max_cents = max_cents.ok_or_else(|| format!("error: --max-cents is required\n\n{}", help_text()))?;

    let mut constraints = ConstraintSet::new(max_cents);
    for (prime, bound) in primes {
        constraints = constraints.with_prime(prime, bound);
    }
    if add_unison {
        constraints = constraints.with_unison();
    }
    if let Some(octaves) = octaves {
        constraints = constraints.with_octaves(octaves);
    }

    Ok(CliConfig { constraints, resolve, limit, color })
}

fn expect_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn parse_cents(value: &str) -> Result<f64, String> {
    value.parse::<f64>().map_err(|_| format!("error: invalid --max-cents '{value}' (expected a number)"))
}

/// `3:1,5:1` means prime 3 with exponent bound 1 and prime 5 with bound 1.
fn parse_primes(value: &str) -> Result<Vec<(u64, u32)>, String> {
    value
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let (prime, bound) = entry
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("error: invalid --primes entry '{entry}' (expected PRIME:BOUND)"))?;
            let prime = prime.parse::<u64>().map_err(|_| format!("error: invalid prime '{prime}'"))?;
            let bound = bound.parse::<u32>().map_err(|_| format!("error: invalid exponent bound '{bound}'"))?;
            Ok((prime, bound))
        })
        .collect()
}

fn parse_octaves(value: &str) -> Result<Vec<i32>, String> {
    value
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| entry.trim().parse::<i32>().map_err(|_| format!("error: invalid octave '{entry}'")))
        .collect()
}

fn parse_ratio(value: &str) -> Result<JustIntonationPitch, String> {
    value.parse().map_err(|_| format!("error: invalid --resolve ratio '{value}' (expected e.g. 3/4)"))
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value.parse::<usize>().map_err(|_| format!("error: invalid --limit '{value}' (expected a count)"))
}

fn help_text() -> String {
    format!(
        "monochord {version}

Just-intonation pitch grammar CLI.

Usage:
  monochord --max-cents <cents> [OPTIONS]

Options:
  --max-cents <cents>        Maximum absolute cent deviation from unison.
                             Required.
  --primes <p:b,...>         Constrained primes with exponent bounds,
                             e.g. 3:1,5:1. Default: none.
  --add-unison               Admit 1/1 into the splittable universe.
  --octaves <k,...>          Allowed octave shifts when pairing factors,
                             e.g. -1,0,1. Default: 0.
  --resolve <ratio>          Derive this start ratio and print the tree,
                             e.g. 3/4.
  --limit <count>            Rewriting rounds for --resolve. Default: 1.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Grammar generation failed.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
