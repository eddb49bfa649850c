use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, warn};
use serde::Serialize;
use seqstats::{
    prelude::{
        filter_fastq, process_sequences, sequence_stats, service_info, GcMode, SeqStatsError,
        Upload,
    },
    reporting::CommandOutput,
};

const INFO: &str = "\
seqstats: statistics for FASTA, FASTQ, GenBank, and EMBL files
usage: seqstats [--help] <subcommand>

Subcommands:

  process: per-record length, GC content, terminal bases (and quality for FASTQ).
  stats:   summary statistics only.
  filter:  FASTQ records, optionally restricted to a list of identifiers.
  info:    supported formats, compressions, and subcommands.

Files may be gzip (.gz, .gzip) or bzip2 (.bz2, .bzip2) compressed.
";

#[derive(Parser)]
#[clap(name = "seqstats")]
#[clap(about = INFO)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Process {
        /// a FASTA, FASTQ, GenBank, or EMBL file, optionally compressed
        #[arg(required = true)]
        file: PathBuf,

        /// how GC content is computed: 'raw' (over all characters) or
        /// 'canonical' (over A/C/G/T only)
        #[arg(long, default_value = "raw")]
        gc_mode: String,

        /// pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    Stats {
        /// a FASTA, FASTQ, GenBank, or EMBL file, optionally compressed
        #[arg(required = true)]
        file: PathBuf,

        /// how GC content is computed: 'raw' (over all characters) or
        /// 'canonical' (over A/C/G/T only)
        #[arg(long, default_value = "raw")]
        gc_mode: String,

        /// pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    Filter {
        /// a FASTQ file, optionally compressed
        #[arg(required = true)]
        file: PathBuf,

        /// comma-separated record identifiers to keep (all records if not specified)
        #[arg(long)]
        ids: Option<String>,

        /// pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    Info {
        /// pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), SeqStatsError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn emit<T: Serialize>(output: CommandOutput<T>, pretty: bool) -> Result<(), SeqStatsError> {
    let (value, report) = output.into_parts();
    for issue in report.issues() {
        warn!("{}", issue);
    }
    print_json(&value, pretty)
}

fn run() -> Result<(), SeqStatsError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match &cli.command {
        Some(Commands::Process {
            file,
            gc_mode,
            pretty,
        }) => {
            let gc_mode: GcMode = gc_mode.parse()?;
            let upload = Upload::from_path(file)?;
            emit(process_sequences(&upload, gc_mode)?, *pretty)
        }
        Some(Commands::Stats {
            file,
            gc_mode,
            pretty,
        }) => {
            let gc_mode: GcMode = gc_mode.parse()?;
            let upload = Upload::from_path(file)?;
            emit(sequence_stats(&upload, gc_mode)?, *pretty)
        }
        Some(Commands::Filter { file, ids, pretty }) => {
            let upload = Upload::from_path(file)?;
            debug!("filter identifiers: {:?}", ids);
            emit(filter_fastq(&upload, ids.as_deref())?, *pretty)
        }
        Some(Commands::Info { pretty }) => print_json(&service_info(), *pretty),
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = if e.is_client_error() { 2 } else { 1 };
            std::process::exit(code);
        }
    }
}
