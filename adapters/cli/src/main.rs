#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the License to Grill order engine.

mod cook;
mod ruleset_file;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use license_to_grill_core::{RoundSummary, Ruleset};
use license_to_grill_world::{derive_session_seed, query, OrderQueue};
use serde::Serialize;

use crate::cook::ScriptedCook;

/// Order generation and grading for a burger-assembly game.
#[derive(Debug, Parser)]
#[command(name = "license-to-grill", version)]
struct Cli {
    /// TOML ruleset overriding the built-in tables.
    #[arg(long, global = true, value_name = "PATH")]
    ruleset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Shows the customers waiting at the head of a freshly seeded line.
    Preview {
        /// Seed for order generation.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of upcoming orders to show.
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Serves orders with a scripted cook and reports the grading.
    Simulate(SimulateArgs),
    /// Prints the active ruleset as TOML.
    Ruleset,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Global seed; every session derives its own seed from it.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Orders to serve per session.
    #[arg(long, default_value_t = 20)]
    orders: usize,
    /// Number of independent sessions.
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Probability that the cook gets a layer right, between 0 and 1.
    #[arg(long, default_value_t = 0.8, value_parser = parse_accuracy)]
    accuracy: f64,
    /// Emit session summaries as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_accuracy(text: &str) -> Result<f64, String> {
    let accuracy: f64 = text
        .parse()
        .map_err(|error| format!("`{text}` is not a number: {error}"))?;
    if !(0.0..=1.0).contains(&accuracy) {
        return Err(format!("`{text}` is not a probability between 0 and 1"));
    }
    Ok(accuracy)
}

#[derive(Debug, Serialize)]
struct SessionReport {
    session: u32,
    seed: u64,
    summary: RoundSummary,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let ruleset = ruleset_file::load(cli.ruleset.as_deref())?;

    match cli.command {
        Command::Preview { seed, count } => preview(ruleset, seed, count),
        Command::Simulate(args) => simulate(&ruleset, &args),
        Command::Ruleset => {
            print!("{}", ruleset_file::render(&ruleset)?);
            Ok(())
        }
    }
}

fn preview(ruleset: Ruleset, seed: u64, count: usize) -> Result<()> {
    let queue = OrderQueue::new(ruleset, seed)?;
    let upcoming = queue.peek_next(count);
    if upcoming.len() < count {
        log::warn!(
            "only {} orders are buffered; showing those",
            upcoming.len()
        );
    }
    for order in upcoming {
        println!("{} {}: {}", order.id(), order.name(), order.requested());
    }
    Ok(())
}

fn simulate(ruleset: &Ruleset, args: &SimulateArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(args.sessions as usize);

    for session in 0..args.sessions {
        let seed = derive_session_seed(args.seed, session);
        let mut queue = OrderQueue::new(ruleset.clone(), seed)?;
        let mut cook = ScriptedCook::new(args.accuracy, seed);
        log::info!("session {session} seeded with {seed:#018x}");

        for _ in 0..args.orders {
            let Some(order) = query::head(&queue) else {
                bail!("session {session} ran out of orders; check the refill policy");
            };
            let id = order.id();
            let name = order.name().to_owned();
            let plate = cook.plate(order.requested(), &ruleset.doneness);
            let outcome = queue.serve_head(plate)?;

            if !args.json {
                println!(
                    "[{session}] {id} {name}: score {} tip {}",
                    outcome.score, outcome.tip
                );
                for complaint in &outcome.complaints {
                    println!("      {complaint}");
                }
            }
        }

        reports.push(SessionReport {
            session,
            seed,
            summary: query::round_summary(&queue),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_summary(report);
        }
    }
    Ok(())
}

fn print_summary(report: &SessionReport) {
    let summary = &report.summary;
    println!();
    println!("session {} (seed {:#018x})", report.session, report.seed);
    println!(
        "  served {} orders, {} perfect",
        summary.orders_served, summary.perfect_orders
    );
    println!(
        "  score {} tips {} deductions {}",
        summary.total_score, summary.total_tips, summary.total_deductions
    );
}
