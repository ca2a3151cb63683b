//! CLI tool for calgrid - lays out a calendar year and outputs JSON
//!
//! Usage:
//!   calgrid_cli <year>                        # Instructions to stdout
//!   calgrid_cli <year> -o out.json            # Instructions to file
//!   calgrid_cli <year> --paper A3 --columns 14
//!
//! Set RUST_LOG=debug for stage-by-stage layout logging.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use calgrid::config::{LayoutConfig, Orientation, PageDimensions, PaperSize};
use calgrid::date_range::DateRange;
use calgrid::engine::LayoutEngine;
use calgrid::metrics::{ApproxMetrics, MemoizedMetrics};
use calgrid::render::InstructionLog;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: calgrid_cli <year> [-o output.json] [--paper A4] [--columns 21]");
        std::process::exit(1);
    }

    let year: i32 = match args[1].parse() {
        Ok(y) => y,
        Err(_) => {
            eprintln!("Error: '{}' is not a year", args[1]);
            std::process::exit(1);
        }
    };

    let mut config = LayoutConfig::default();
    let mut output_path = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--paper" if i + 1 < args.len() => {
                let paper = match PaperSize::parse(&args[i + 1]) {
                    Some(p) => p,
                    None => {
                        eprintln!("Error: unknown paper size '{}'", args[i + 1]);
                        std::process::exit(1);
                    }
                };
                config.page = PageDimensions::of(paper, Orientation::Landscape);
                i += 2;
            }
            "--columns" if i + 1 < args.len() => {
                config.columns = match args[i + 1].parse() {
                    Ok(c) => c,
                    Err(_) => {
                        eprintln!("Error: '{}' is not a column count", args[i + 1]);
                        std::process::exit(1);
                    }
                };
                i += 2;
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                std::process::exit(1);
            }
        }
    }

    // Build the range
    let range = match DateRange::full_year(year) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Run the layout
    let metrics = MemoizedMetrics::new(ApproxMetrics);
    let run = match LayoutEngine::new(&config, &metrics).layout(range) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error laying out {}: {}", year, e);
            std::process::exit(1);
        }
    };

    // Record into the JSON-dumpable backend
    let mut log = InstructionLog::default();
    if let Err(e) = run.render_to(&mut log) {
        eprintln!("Error rendering: {}", e);
        std::process::exit(1);
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&log.instructions) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
