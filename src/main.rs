//! Ghost Pointer CLI - path inspection entry point
//!
//! Prints sample trajectories so path shapes and densities can be checked
//! or plotted without driving a real surface.
//!
//! Usage: `ghost-pointer [x1 y1 x2 y2 [width]]`

use std::env;

use ghost_pointer::config::PathOptions;
use ghost_pointer::path::overshoot::DEFAULT_OVERSHOOT_THRESHOLD;
use ghost_pointer::path::{fitts, plan_approach};
use ghost_pointer::{path, Point, Rect};

fn main() {
    println!("Ghost Pointer - Human-like Pointer Paths");
    println!("========================================");
    println!();

    let args: Vec<f64> = env::args().skip(1).filter_map(|a| a.parse().ok()).collect();
    let (from, to, width) = match args.as_slice() {
        [x1, y1, x2, y2, rest @ ..] => (
            Point::new(*x1, *y1),
            Point::new(*x2, *y2),
            rest.first().copied().unwrap_or(40.0),
        ),
        _ => (Point::new(40.0, 60.0), Point::new(900.0, 420.0), 40.0),
    };

    let distance = from.distance_to(to);
    println!("From: ({:.1}, {:.1})", from.x, from.y);
    println!("To:   ({:.1}, {:.1})", to.x, to.y);
    println!("  - Distance: {:.1}px", distance);
    println!("  - Fitts index: {:.2}", fitts(distance, width));
    println!();

    let target = Rect::new(to.x - width / 2.0, to.y - width / 2.0, width, width);
    let options = PathOptions {
        use_timestamps: Some(true),
        ..Default::default()
    };

    let direct = path(from, target, &options);
    println!("Direct path, {}px box ({} points):", width, direct.len());
    print_json(&direct);
    println!();

    let approach = plan_approach(
        &mut rand::thread_rng(),
        from,
        to,
        &target,
        DEFAULT_OVERSHOOT_THRESHOLD,
        &options,
    );
    match &approach.correction {
        Some(correction) => {
            println!(
                "Overshooting approach: {} + {} points",
                approach.primary.len(),
                correction.len()
            );
        }
        None => println!("Direct approach: {} points", approach.primary.len()),
    }
    for leg in approach.legs() {
        print_json(leg);
    }
}

fn print_json(route: &ghost_pointer::Trajectory) {
    match serde_json::to_string(route) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize path: {}", e),
    }
}
