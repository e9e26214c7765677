//! Block Swap
//!
//! This example swaps two blocks using a spare location.
//!
//! Key concepts:
//! - Describing a problem with names
//! - Breadth-first search with a budget
//! - Inspecting the plan and search statistics
//! - Saving the plan as a checkpoint
//!
//! Run with: RUST_LOG=pickplace=debug cargo run --example block_swap

use pickplace::budget::BudgetBuilder;
use pickplace::builder::ProblemBuilder;
use pickplace::checkpoint::PlanCheckpoint;
use pickplace::search::Planner;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Block Swap Example ===\n");

    let problem = match ProblemBuilder::new()
        .locations(["A", "B", "C"])
        .object("X", "A")
        .object("Y", "B")
        .goal("X", "B")
        .goal("Y", "A")
        .build()
    {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Invalid problem: {}", e);
            return;
        }
    };

    println!("Initial: {}", problem.initial());

    let planner = Planner::new(
        BudgetBuilder::new()
            .max_expansions(10_000)
            .timeout(Duration::from_secs(5))
            .build(),
    );

    let outcome = match problem.solve(&planner) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return;
        }
    };

    println!("\nPlan ({} actions):", outcome.plan.len());
    for (i, step) in outcome.plan.steps().enumerate() {
        println!("  {}. {:<16} {}", i + 1, problem.describe(step.action), step.to);
    }

    println!("\nSearch statistics:");
    println!("  Expanded:  {}", outcome.stats.expanded);
    println!("  Generated: {}", outcome.stats.generated);
    println!("  Pruned:    {}", outcome.stats.duplicates);
    println!("  Elapsed:   {:?}", outcome.stats.elapsed);

    match PlanCheckpoint::capture(&outcome.plan, problem.goal()).to_json() {
        Ok(json) => println!("\nCheckpoint:\n{}", json),
        Err(e) => eprintln!("Checkpoint failed: {}", e),
    }

    println!("\n=== Example Complete ===");
}
