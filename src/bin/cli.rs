//! Chain Greeks CLI
//!
//! Interactive entry point: asks for a ticker and a price mode, ingests the
//! full option chain, and prints a per-expiration summary plus a detailed
//! Greek table for the nearest expiration.

use std::io::{self, Write};

use chain_greeks::prelude::*;

fn prompt(message: &str) -> String {
    print!("{message}");
    io::stdout().flush().expect("stdout flush");

    let mut line = String::new();
    io::stdin().read_line(&mut line).expect("stdin read");
    line.trim().to_string()
}

/// Keep asking until the ticker has a listed option chain.
fn prompt_ticker(client: &YahooClient) -> String {
    loop {
        let ticker = prompt("Enter stock ticker: ").to_uppercase();
        if ticker.is_empty() {
            continue;
        }
        match client.get_expirations(&ticker) {
            Ok(expirations) if !expirations.is_empty() => return ticker,
            _ => println!("No listed options for {ticker}, try again"),
        }
    }
}

fn prompt_price_mode() -> PriceMode {
    loop {
        match prompt("Mid or last price? [mid/last]: ").parse::<PriceMode>() {
            Ok(mode) => return mode,
            Err(_) => println!("Expected mid or last"),
        }
    }
}

fn prompt_rate() -> f64 {
    let raw = prompt("Risk-free rate [0.00]: ");
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(rate) if rate.is_finite() => rate,
        _ => {
            println!("Not a number, using 0.00");
            0.0
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Chain Greeks");
    println!("============\n");

    let client = YahooClient::new();
    let ticker = prompt_ticker(&client);
    let price_mode = prompt_price_mode();
    let rate = prompt_rate();

    println!("\nFetching option chain for {ticker}...\n");

    let chains = match fetch_chain_set(&ticker, price_mode, rate) {
        Ok(chains) => chains,
        Err(e) => {
            eprintln!("Failed to fetch {ticker}: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{}: ${:.2} @ [{} | {}]",
        chains.underlying,
        chains.spot,
        chains.quote_date,
        chains.quote_time.format("%H:%M")
    );
    println!(
        "{} records across {} expirations\n",
        chains.total_records(),
        chains.expirations().len()
    );

    println!("Chain Summary:");
    for (label, records) in &chains.call_options {
        println!("  {label}: {} records", records.len());
    }
    for (label, records) in &chains.put_options {
        println!("  {label}: {} records", records.len());
    }

    // Detailed table for the nearest expiration
    let Some(nearest) = chains.expirations().first().copied() else {
        return;
    };

    for kind in [OptionKind::Call, OptionKind::Put] {
        let Some(records) = chains.records(nearest, kind) else {
            continue;
        };

        println!("\n{} {}s:", nearest, kind);
        println!(
            "{:>8} {:>8} {:>4} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "strike", "price", "itm", "iv", "delta", "gamma", "theta", "vega"
        );
        for r in records {
            println!(
                "{:>8.2} {:>8.3} {:>4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
                r.strike,
                r.observed_price,
                if r.itm { "itm" } else { "otm" },
                r.implied_volatility,
                r.greeks.delta,
                r.greeks.gamma,
                r.greeks.theta,
                r.greeks.vega,
            );
        }
    }

    println!("\nRun greeks_gui to plot any Greek across strikes and expirations.");
}
