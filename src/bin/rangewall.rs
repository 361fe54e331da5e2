//! rangewall: CLI for checking packets against a rule file.

use clap::{Args, Parser, Subcommand};
use rangewall::{Firewall, FirewallConfig, OverlapPolicy, Query, RuleFormat};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rangewall")]
#[command(version = "0.1.0")]
#[command(about = "Check packets against a static range rule set", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RuleArgs {
    /// Rule file (text, or YAML with a .yml/.yaml extension)
    #[arg(short, long)]
    rules: PathBuf,

    /// Rule file format, overriding the extension
    #[arg(short, long)]
    format: Option<RuleFormat>,

    /// Skip the overlap check when building the index
    #[arg(long)]
    trust: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single packet
    Check {
        #[command(flatten)]
        rules: RuleArgs,

        /// inbound or outbound
        direction: String,

        /// tcp or udp
        protocol: String,

        /// Destination port
        port: u16,

        /// IPv4 address
        ip: String,
    },

    /// Check packets read one per line
    Batch {
        #[command(flatten)]
        rules: RuleArgs,

        /// Packet file, one `direction,protocol,port,ip` per line (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit one JSON object per packet
        #[arg(long)]
        json: bool,
    },

    /// Validate a rule file and print rule counts
    Verify {
        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Serialize)]
struct PacketResult<'a> {
    direction: &'a str,
    protocol: &'a str,
    port: u16,
    ip: String,
    accepted: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            rules,
            direction,
            protocol,
            port,
            ip,
        } => check(&rules, &direction, &protocol, port, &ip),
        Commands::Batch { rules, input, json } => batch(&rules, input.as_deref(), json),
        Commands::Verify { rules } => verify(&rules),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(args: &RuleArgs) -> rangewall::Result<Firewall> {
    let mut config = FirewallConfig::for_path(&args.rules);
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.trust {
        config = config.with_overlap(OverlapPolicy::Trust);
    }
    Firewall::from_path(&args.rules, config)
}

fn check(
    args: &RuleArgs,
    direction: &str,
    protocol: &str,
    port: u16,
    ip: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = load(args)?;
    let accepted = firewall.accept_packet(direction, protocol, port, ip)?;
    println!("{}", accepted);
    Ok(())
}

fn batch(
    args: &RuleArgs,
    input: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = load(args)?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let query: Query = line
            .parse()
            .map_err(|e| format!("packet line {}: {}", idx + 1, e))?;
        let verdict = firewall.evaluate(&query);

        if json {
            let result = PacketResult {
                direction: query.category.direction().as_str(),
                protocol: query.category.protocol().as_str(),
                port: query.port,
                ip: query.ip.to_string(),
                accepted: verdict.is_accept(),
            };
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
        } else {
            writeln!(out, "{}", verdict.is_accept())?;
        }
    }

    Ok(())
}

fn verify(args: &RuleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let firewall = load(args)?;

    println!("{}: {} rules", firewall.config().name, firewall.len());
    for (category, count) in firewall.summary() {
        println!("  {:<14} {}", category.to_string(), count);
    }

    Ok(())
}
