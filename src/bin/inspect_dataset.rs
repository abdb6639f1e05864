use imoviedash::{
    derive::{derive_records, InvalidDatePolicy},
    load::{self, LoadOptions, Source},
    table::ViewingTable,
};
use std::{env, process::exit};

fn main() {
    // Expect exactly one CLI argument: the dataset path or URL.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <DATASET>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect(&args[1]) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

/// Load the dataset leniently and print row counts plus the selector options.
fn inspect(raw_source: &str) -> Result<(), Box<dyn std::error::Error>> {
    // 1) Load and derive, keeping rows with bad dates out but counted.
    let source = Source::parse(raw_source)?;
    let raw = load::load(&source, &LoadOptions::default())?;
    let loaded = raw.len();
    let derived = derive_records(raw, InvalidDatePolicy::Skip)?;
    let table = ViewingTable::new(derived.records);

    println!("=== Dataset: {} ===", source);
    println!("Rows loaded:          {}", loaded);
    println!("Rows with bad dates:  {}", derived.skipped);
    println!("Rows usable:          {}", table.len());
    println!();

    // 2) Rows per year.
    println!("=== Years ===");
    for (year, rows) in table.rows_per_year() {
        println!("- {:<6} {:>8} rows", year, rows);
    }
    println!();

    // 3) Selector options.
    println!("=== Categories ===");
    for c in table.categories() {
        println!("- {}", c);
    }
    println!();

    println!("=== Languages ===");
    for l in table.languages() {
        println!("- {}", l);
    }

    Ok(())
}
