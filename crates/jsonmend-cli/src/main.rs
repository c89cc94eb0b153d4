use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jsonmend",
    about = "Repair malformed JSON text and sanitize JSON file trees",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Repair one file; prints the repaired text or writes with --out
    Repair(RepairArgs),
    /// Check whether a file is repairable, printing the diagnostic if not
    Check(CheckArgs),
    /// Walk a directory tree, repairing every file in place
    Sanitize(SanitizeArgs),
}

#[derive(ClapArgs, Debug)]
struct RepairArgs {
    /// File to repair
    path: PathBuf,
    /// Optional output path; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct CheckArgs {
    /// File to check
    path: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct SanitizeArgs {
    /// Root directory to walk
    root: PathBuf,
    /// Delete files that cannot be repaired
    #[arg(long, default_value_t = false)]
    delete_failed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Repair(a) => cmd_repair(a),
        Cmd::Check(a) => cmd_check(a),
        Cmd::Sanitize(a) => cmd_sanitize(a),
    }
}

fn cmd_repair(args: RepairArgs) {
    let raw = std::fs::read_to_string(&args.path).unwrap_or_else(|e| {
        eprintln!("error reading {}: {}", args.path.display(), e);
        std::process::exit(2);
    });
    let repaired = jsonmend_core::repair_to_text(&raw).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(3);
    });
    if let Some(out) = args.out {
        std::fs::write(&out, &repaired).unwrap_or_else(|e| {
            eprintln!("error writing {}: {}", out.display(), e);
            std::process::exit(4);
        });
    } else {
        println!("{}", repaired);
    }
}

fn cmd_check(args: CheckArgs) {
    let raw = std::fs::read_to_string(&args.path).unwrap_or_else(|e| {
        eprintln!("error reading {}: {}", args.path.display(), e);
        std::process::exit(2);
    });
    let outcome = jsonmend_core::try_repair(&raw);
    if outcome.success {
        println!("ok");
    } else {
        eprintln!(
            "unrepairable: {}",
            outcome.diagnostic.unwrap_or_else(|| "unknown".to_string())
        );
        std::process::exit(3);
    }
}

fn cmd_sanitize(args: SanitizeArgs) {
    let summary = jsonmend_core::sanitize_tree(&args.root, args.delete_failed).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    });
    println!(
        "altered: {}\ndeleted: {}\nvalid: {}",
        summary.altered, summary.deleted, summary.valid
    );
}
