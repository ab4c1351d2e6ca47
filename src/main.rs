/*!
 * Interleave - Main Entry Point
 *
 * Headless driver for the interleaving scheduler:
 * - Loads the task list (seeding defaults when missing)
 * - Ticks virtual time at a fixed real-time cadence
 * - Rings the terminal bell on phase boundaries
 * - Accepts completion commands on stdin between ticks
 */

use interleave::monitoring::SessionSpan;
use interleave::{
    init_tracing, load_task_names, Bell, Driver, DriverConfig, InterleavingScheduler, Notifier,
    Outcome, Silent,
};
use std::io::BufRead;
use std::thread;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn, Instrument};

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    init_tracing();

    let config = DriverConfig::from_env()?;
    info!(
        tasks_path = %config.tasks_path.display(),
        seconds_per_tick = config.seconds_per_tick,
        tick_interval = ?config.tick_interval,
        "Interleave starting"
    );

    let names = load_task_names(&config.tasks_path)?;
    let scheduler = InterleavingScheduler::new(&names);
    let session = SessionSpan::new(scheduler.len());

    let notifier: Box<dyn Notifier> = if config.bell {
        Box::new(Bell::stdout())
    } else {
        Box::new(Silent)
    };
    let mut driver = Driver::new(scheduler, notifier, config.seconds_per_tick);

    println!("{}", driver.board());
    println!("{}", interleave::driver::HELP);

    let mut interval = tokio::time::interval(config.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let lines = spawn_stdin_reader()?;
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let session_loop = async {
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let transition = driver.step()?;
                    let ticks = driver.ticks();

                    let periodic = config.render_every > 0 && ticks % config.render_every == 0;
                    if transition.is_boundary() || periodic {
                        println!("{}", driver.board());
                    }

                    if !driver.scheduler().has_pending_work() {
                        info!("All tasks completed");
                        break;
                    }
                    if config.max_ticks.is_some_and(|max| ticks >= max) {
                        info!(ticks, "Tick limit reached");
                        break;
                    }
                }
                line = lines.recv_async(), if stdin_open => match line {
                    Ok(line) => match driver.handle_command(&line) {
                        Outcome::Quit => break,
                        Outcome::Continue(Some(reply)) => println!("{}", reply),
                        Outcome::Continue(None) => {}
                    },
                    Err(_) => stdin_open = false,
                },
                _ = &mut shutdown => {
                    info!("Interrupted");
                    break;
                }
            }
        }
        Ok::<(), miette::Report>(())
    };
    session_loop.instrument(session.span().clone()).await?;

    let stats = driver.scheduler().stats();
    session.record_totals(stats.ticks, stats.completions);

    println!("{}", driver.board());
    println!("{}", driver.stats_json());
    Ok(())
}

/// Read stdin on a plain thread so a pending read never blocks shutdown
fn spawn_stdin_reader() -> interleave::Result<flume::Receiver<String>> {
    let (tx, rx) = flume::unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Stdin closed");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
