use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

// Categories for the timing report
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum OperationCategory {
    DataLoad,
    GridBuild,
    EnergyModel,
    Export,
    Other,
}

impl OperationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationCategory::DataLoad => "Data Load",
            OperationCategory::GridBuild => "Grid Build",
            OperationCategory::EnergyModel => "Energy Model",
            OperationCategory::Export => "Export",
            OperationCategory::Other => "Other",
        }
    }
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref TIMINGS: RwLock<HashMap<String, (OperationCategory, Duration, usize)>> =
        RwLock::new(HashMap::new());
}

pub struct TimingGuard {
    name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if !is_timing_enabled() {
            return;
        }
        let elapsed = self.start.elapsed();
        let mut timings = TIMINGS.write();
        let entry = timings
            .entry(self.name.clone())
            .or_insert((self.category, Duration::ZERO, 0));
        entry.1 += elapsed;
        entry.2 += 1;
    }
}

pub fn start_timing(name: &str, category: OperationCategory) -> TimingGuard {
    TimingGuard {
        name: name.to_string(),
        category,
        start: Instant::now(),
    }
}

pub fn init_logging(debug_logging: bool, enable_timing: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let default_level = if debug_logging {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(default_level.into());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set up tracing subscriber");
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nTiming Report");
    println!("=============");
    let timings = TIMINGS.read();
    let mut entries: Vec<_> = timings.iter().collect();
    entries.sort_by(|a, b| b.1 .1.cmp(&a.1 .1));

    for (name, (category, total, count)) in entries {
        let avg = total.div_f64(*count as f64);
        println!(
            "[{}] {}: total={:.2}s, count={}, avg={:.2}ms",
            category.as_str(),
            name,
            total.as_secs_f64(),
            count,
            avg.as_secs_f64() * 1000.0,
        );
    }
    println!("=============\n");
}
