//! Basic pricing and Greeks example
//!
//! Run with: cargo run --example basic_greeks

use chain_greeks::models::black_scholes;
use chain_greeks::models::implied_volatility;
use chain_greeks::prelude::*;

fn main() {
    let spot = 100.0;
    let strike = 100.0;
    let rate = 0.02;
    let vol = 0.20;
    let time = 0.5; // 6 months

    println!("Black-Scholes Pricing Example:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Time: {:.0} days", time * 365.0);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%\n", vol * 100.0);

    let call = black_scholes::price(spot, strike, rate, DIVIDEND_YIELD, vol, time, OptionKind::Call);
    let put = black_scholes::price(spot, strike, rate, DIVIDEND_YIELD, vol, time, OptionKind::Put);

    println!("Option Prices:");
    println!("  Call: ${:.3}", call);
    println!("  Put: ${:.3}", put);

    // Invert the call price back to a volatility
    let solved = implied_volatility(
        call,
        spot,
        strike,
        rate,
        DIVIDEND_YIELD,
        time,
        OptionKind::Call,
    )
    .unwrap();
    println!(
        "\nImplied Volatility: {:.2}% (expected {:.2}%)",
        solved.sigma * 100.0,
        vol * 100.0
    );

    // The full battery at the solved volatility
    let greeks = black_scholes::greeks(
        spot,
        strike,
        rate,
        DIVIDEND_YIELD,
        solved.sigma,
        time,
        call,
        OptionKind::Call,
    );

    println!("\nCall Greeks:");
    println!("  Delta: {:.4}", greeks.delta);
    println!("  Gamma: {:.4}", greeks.gamma);
    println!("  Theta: {:.4}", greeks.theta);
    println!("  Rho: {:.4}", greeks.rho);
    println!("  Vega: {:.4}", greeks.vega);
    println!("  Lambda: {:.4}", greeks.lambda);
    println!("  Vanna: {:.4}", greeks.vanna);
    println!("  Charm: {:.4}", greeks.charm);
    println!("  Vomma: {:.4}", greeks.vomma);
    println!("  Veta: {:.4}", greeks.veta);
    println!("  Speed: {:.6}", greeks.speed);
    println!("  Zomma: {:.4}", greeks.zomma);
    println!("  Color: {:.6}", greeks.color);
    println!("  Ultima: {:.4}", greeks.ultima);
}
