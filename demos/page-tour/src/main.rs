use std::path::PathBuf;
use std::rc::Rc;

use amalgated_core::TestClock;
use amalgated_platform::{RunReport, ScrollScript, run_headless, run_headless_with};
use amalgated_site::PageOptions;
use anyhow::Context;
use clap::Parser;
use web_time::Duration;

/// Scrolls the Amalgated page without a browser and prints when each
/// section came into view.
///
/// ```bash
/// RUST_LOG=info page-tour --speed 2400 --anchor performance-metrics --dump
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scroll speed in px per second.
    #[arg(short, long, default_value_t = 1200.0)]
    speed: f32,

    /// Overrides the options file's viewport height.
    #[arg(long)]
    viewport_height: Option<f32>,

    /// `PageOptions` JSON file.
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Stop at this section instead of the bottom of the page.
    #[arg(short, long)]
    anchor: Option<String>,

    /// Keep running this long after the scroll stops.
    #[arg(long, default_value_t = 2000)]
    settle_ms: u64,

    /// Give up after this many seconds.
    #[arg(long, default_value_t = 60)]
    max_secs: u64,

    /// Simulated clock: finishes immediately with identical results.
    #[arg(long)]
    instant: bool,

    /// Print the final frame's outline.
    #[arg(long)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = match &args.options {
        Some(path) => PageOptions::load(path)
            .with_context(|| format!("loading page options from {}", path.display()))?,
        None => PageOptions::default(),
    };
    if let Some(h) = args.viewport_height {
        options.viewport_height = h;
    }

    let script = script_for(&args);
    let report = if args.instant {
        let clock = TestClock::new();
        run_headless_with(&options, &script, Rc::new(clock.clone()), |d| clock.advance(d))
    } else {
        run_headless(&options, &script)
    }
    .context("page tour failed")?;

    print_report(&report);
    if args.dump {
        println!("\n{}", report.final_view);
    }
    Ok(())
}

fn script_for(args: &Args) -> ScrollScript {
    let script = ScrollScript::new()
        .speed(args.speed)
        .settle(Duration::from_millis(args.settle_ms))
        .max_duration(Duration::from_secs(args.max_secs));
    match &args.anchor {
        Some(anchor) => script.target(anchor.clone()),
        None => script,
    }
}

fn print_report(report: &RunReport) {
    println!(
        "{} ticks, {} frames, {} timers over {} ms; stopped at {}px",
        report.ticks,
        report.frames_run,
        report.timers_run,
        report.elapsed.as_millis(),
        report.final_scroll
    );
    for (anchor, at) in &report.seen {
        println!("{:>8} ms  #{anchor}", at.as_millis());
    }
    if report.leaked_tasks > 0 {
        log::warn!("{} tasks outlived the page", report.leaked_tasks);
    }
}
