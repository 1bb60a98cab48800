//! MIPS cycle-accurate simulator CLI.
//!
//! This binary is the outer shell around `mipsim-core`. It performs:
//! 1. **Program loading:** Reads a flat hex listing into the text region.
//! 2. **Cycle loop:** Ticks the pipeline until the program halts (syscall
//!    with v0 == 10) or the cycle budget runs out.
//! 3. **Reporting:** Prints the final register state and statistics, as text
//!    or JSON.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use mipsim_core::sim::loader;
use mipsim_core::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "MIPS cycle-accurate pipeline simulator",
    long_about = "Run a MIPS program image through the five-stage pipeline model.\n\n\
                  Programs are flat hex listings (one 8-hex-digit word per line) placed at\n\
                  the text base 0x00400000. Configuration is JSON; every field is optional.\n\n\
                  Examples:\n  mipsim run -f software/qsort.hex\n  mipsim run -f loop.hex --config machine.json --stats-json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "mipsim_core=trace".
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until it halts.
    Run {
        /// Program image to execute (hex listing).
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file (defaults to the reference machine).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after this many cycles even if the program has not halted.
        #[arg(long, default_value_t = 50_000_000)]
        max_cycles: u64,

        /// Emit statistics as JSON instead of the text report.
        #[arg(long)]
        stats_json: bool,

        /// Dump the register file after the run.
        #[arg(long)]
        dump_regs: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = cli
        .log
        .map_or_else(EnvFilter::from_default_env, EnvFilter::new);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            stats_json,
            dump_regs,
        } => cmd_run(&file, config.as_deref(), max_cycles, stats_json, dump_regs),
    }
}

/// Loads the configuration and program, runs the cycle loop, and reports.
fn cmd_run(
    file: &std::path::Path,
    config_path: Option<&std::path::Path>,
    max_cycles: u64,
    stats_json: bool,
    dump_regs: bool,
) {
    let config = config_path.map_or_else(Config::default, |path| {
        let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("error: cannot read config '{}': {e}", path.display());
            process::exit(1);
        });
        Config::from_json(&text).unwrap_or_else(|e| {
            eprintln!("error: bad config '{}': {e}", path.display());
            process::exit(1);
        })
    });

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let words = loader::load_hex_file(file).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });
    sim.load_program(&words);

    println!(
        "[*] {} ({} words at {:#010x})",
        file.display(),
        words.len(),
        config.general.start_pc
    );

    let executed = sim.run(max_cycles);

    if sim.is_running() {
        eprintln!("[!] cycle budget of {max_cycles} exhausted before halt");
    } else {
        println!("[*] halted at PC {:#010x} after {executed} cycles", sim.pipe.pc);
    }

    if dump_regs {
        sim.pipe.regs.dump();
    }

    let report = sim.report();
    if stats_json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        report.print();
    }

    if sim.is_running() {
        process::exit(2);
    }
}
