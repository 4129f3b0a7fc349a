use codepoint_reader::{CodePointReader, EntryOptions, Projection};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <codepo_gb.zip | directory> [--areas NR,IP] [--no-proj] [--epsg CODE] [--limit N]",
            args[0]
        );
        std::process::exit(1);
    }

    let path = &args[1];
    let value_of = |flag: &str| flag_value(&args, flag);

    let mut options = EntryOptions::new();
    if let Some(areas) = value_of("--areas") {
        options = options.areas(areas.split(',').map(str::trim).filter(|a| !a.is_empty()));
    }
    if args.iter().any(|arg| arg == "--no-proj") {
        options = options.without_projection();
    } else if let Some(code) = value_of("--epsg") {
        let projection = code
            .parse::<u32>()
            .map_err(|e| e.to_string())
            .and_then(|code| Projection::from_epsg(code).map_err(|e| e.to_string()));
        match projection {
            Ok(projection) => options = options.projection(projection),
            Err(e) => {
                eprintln!("ERROR: Invalid --epsg value {}: {}", code, e);
                std::process::exit(1);
            }
        }
    }
    let limit = match value_of("--limit").map(|n| n.parse::<usize>()) {
        None => 10,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("ERROR: Invalid --limit value: {}", e);
            std::process::exit(1);
        }
    };

    println!("Reading Code-Point Open: {}", path);
    println!("{}", "=".repeat(60));

    let reader = match CodePointReader::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("\nERROR: Failed to open dataset");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nDataset Information:");
    println!("  Storage: {}", reader.kind());
    match reader.areas() {
        Ok(areas) => println!("  Postcode areas: {}", areas.len()),
        Err(e) => eprintln!("  Postcode areas unavailable: {}", e),
    }
    match reader.metadata() {
        Ok(metadata) => {
            for (key, value) in metadata.fields() {
                println!("  {}: {}", key, value);
            }
            println!("  Total postcodes: {}", metadata.total_count());
        }
        Err(e) => eprintln!("  Metadata unavailable: {}", e),
    }

    println!("\nSample Entries (first {}):", limit);
    for (i, result) in reader.entries_with(options).take(limit).enumerate() {
        match result {
            Ok(record) => {
                let position = record
                    .position()
                    .map(|p| format!(" {:.6} {:.6}", p.latitude, p.longitude))
                    .unwrap_or_default();
                println!(
                    "  {}. {} {} {}{}",
                    i + 1,
                    record.postcode().unwrap_or("?"),
                    record.get("Eastings").unwrap_or("?"),
                    record.get("Northings").unwrap_or("?"),
                    position
                );
            }
            Err(e) => {
                eprintln!("\nERROR: Failed to read entries");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Value following `flag`, exiting if the flag is last.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(value),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}
