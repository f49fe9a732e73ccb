//! Tapedeck CLI

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use tapedeck::{TapeConfig, TapeMode};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    let result = match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: tapedeck check <config.toml>");
                process::exit(1);
            }

            check_config(&PathBuf::from(&args[2]))
        }
        "modes" => {
            show_modes();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!("Run 'tapedeck' for usage information.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Tapedeck v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("Usage: tapedeck <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check <config.toml>   Validate a tape configuration");
    eprintln!("  modes                 List tape modes and their permissions");
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let config = TapeConfig::from_file(path)
        .with_context(|| format!("invalid configuration {}", path.display()))?;

    let rules: Vec<String> = config.match_rules.iter().map(ToString::to_string).collect();

    println!("Configuration: {}", path.display());
    println!();
    println!("  mode               {}", config.mode);
    println!("  match rules        {}", rules.join(" + "));
    println!(
        "  scrub (request)    {}",
        config.scrub.request_headers.join(", ")
    );
    println!(
        "  scrub (response)   {}",
        config.scrub.response_headers.join(", ")
    );
    println!("  max tapes          {}", config.limits.max_tapes);
    println!("  max request body   {} bytes", config.limits.max_request_body);
    println!("  max response body  {} bytes", config.limits.max_response_body);

    Ok(())
}

fn show_modes() {
    println!("{:<24} {:<9} {:<9} sequential", "mode", "readable", "writable");
    for mode in TapeMode::ALL {
        println!(
            "{:<24} {:<9} {:<9} {}",
            mode.as_str(),
            mode.is_readable(),
            mode.is_writable(),
            mode.is_sequential()
        );
    }
}
