use chrono::Local;
use clap::Subcommand;
use studyroom_core::{Config, JsonSessionStore, SessionTimer, TickDriver, TimerEvent, TimerSettings};
use tracing::info;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run Work/Break phases until interrupted (Ctrl-C)
    Run {
        /// Work phase length in minutes
        #[arg(long)]
        work: Option<u32>,
        /// Break phase length in minutes
        #[arg(long = "break")]
        break_minutes: Option<u32>,
        /// Daily goal of completed Work phases
        #[arg(long)]
        goal: Option<u32>,
        /// Print every timer event as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Print today's goal progress
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_timer(settings: TimerSettings) -> Result<SessionTimer, Box<dyn std::error::Error>> {
    let store = JsonSessionStore::open()?;
    Ok(SessionTimer::new(settings, Box::new(store)))
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        TimerAction::Run {
            work,
            break_minutes,
            goal,
            json,
        } => {
            let mut settings = config.timer_settings();
            if let Some(minutes) = work {
                settings.work_minutes = minutes;
            }
            if let Some(minutes) = break_minutes {
                settings.break_minutes = minutes;
            }
            if let Some(goal) = goal {
                settings.goal = goal;
            }

            let (mut driver, mut events) = TickDriver::new(load_timer(settings)?);
            driver.start();
            info!(
                work_minutes = settings.work_minutes,
                break_minutes = settings.break_minutes,
                "timer running"
            );

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        driver.stop();
                        break;
                    }
                    event = events.recv() => match event {
                        Some(event) => print_event(&event, json)?,
                        None => break,
                    },
                }
            }

            // Drain whatever stop() emitted.
            while let Ok(event) = events.try_recv() {
                print_event(&event, json)?;
            }
            if !json {
                println!("{}", driver.with_timer(|t| t.goal_progress_text()));
            }
        }
        TimerAction::Status { json } => {
            let timer = load_timer(config.timer_settings())?;
            let snapshot = timer.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("Date: {}", snapshot.date);
                println!("{}", snapshot.goal_progress);
            }
        }
    }
    Ok(())
}

fn print_event(event: &TimerEvent, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    let now = Local::now().format("%H:%M:%S");
    match event {
        TimerEvent::TimerStarted { phase, duration_secs, .. } => {
            println!(
                "[{now}] {} started ({:02}:{:02})",
                phase.label(),
                duration_secs / 60,
                duration_secs % 60
            );
        }
        TimerEvent::TimerStopped { remaining_secs, .. } => {
            println!(
                "[{now}] stopped with {:02}:{:02} left",
                remaining_secs / 60,
                remaining_secs % 60
            );
        }
        _ => {}
    }

    if let Some((title, body)) = event.notification() {
        println!("[{now}] {title} {body}");
    }
    if let TimerEvent::WorkPhaseEnded { completed_today, .. } = event {
        println!("[{now}] {completed_today} session(s) completed today");
    }
    Ok(())
}
