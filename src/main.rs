//! u-taskman - run a task manager against the wall clock

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use u_taskman::container::Discipline;
use u_taskman::driver::{Driver, DriverConfig, MonotonicClock};
use u_taskman::models::{Task, TaskFactory};
use u_taskman::scheduler::TaskManager;
use u_taskman::validation::parse_task_spec;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DisciplineArg {
    Fifo,
    Lifo,
}

impl From<DisciplineArg> for Discipline {
    fn from(arg: DisciplineArg) -> Self {
        match arg {
            DisciplineArg::Fifo => Discipline::Fifo,
            DisciplineArg::Lifo => Discipline::Lifo,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "u-taskman", version, about = "Complete tasks as wall-clock time elapses")]
struct Cli {
    /// Completion order
    #[arg(short, long, value_enum, default_value = "fifo")]
    discipline: DisciplineArg,

    /// Seconds between ticks
    #[arg(long, default_value_t = 1.0)]
    tick: f64,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Stop once every task has completed
    #[arg(long)]
    until_idle: bool,

    /// Task as NAME=SECONDS (repeatable)
    #[arg(short, long = "task", value_name = "NAME=SECONDS")]
    tasks: Vec<String>,

    /// Number of generated tasks with random durations
    #[arg(short, long, default_value_t = 0)]
    random: usize,

    /// Seed for generated durations
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_taskman=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DriverConfig {
        discipline: cli.discipline.into(),
        tick_secs: cli.tick,
        max_ticks: cli.ticks,
        stop_when_idle: cli.until_idle,
    };
    config.validate()?;

    let mut factory = match cli.seed {
        Some(seed) => TaskFactory::seeded(seed),
        None => TaskFactory::new(),
    };

    let mut manager = TaskManager::new(config.discipline);
    if cli.tasks.is_empty() && cli.random == 0 {
        manager.add_task(Task::new("a", 10.0)?);
        manager.add_task(Task::new("b", 3.0)?);
        manager.add_task(factory.next_task());
        manager.add_task(factory.next_task());
    } else {
        for spec in &cli.tasks {
            let (name, secs) = parse_task_spec(spec)?;
            manager.add_task(Task::new(name, secs)?);
        }
        for _ in 0..cli.random {
            manager.add_task(factory.next_task());
        }
    }

    let mut driver = Driver::new(config, manager, MonotonicClock::new())?;
    let stats = driver.run(&mut std::io::stdout().lock())?;

    tracing::info!(
        ticks = stats.ticks,
        completed = stats.completed,
        utilization = stats.utilization(),
        "finished"
    );
    Ok(())
}
