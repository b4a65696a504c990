use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::{Builder, Histogram};

// Longest duration a histogram tracks, in nanoseconds
const HISTOGRAM_MAX_NS: u64 = 60_000_000_000;

// Categories of timed operations
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Calculation,
    Persistence { subcategory: PersistenceType },
    FileIO { subcategory: FileIOType },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum PersistenceType {
    RemoteSave,
    LocalSave,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ConfigLoad,
    HistoryLoad,
    CsvExport,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Calculation => "Calculation".to_string(),
            OperationCategory::Persistence { subcategory } => {
                format!("Persistence - {}", match subcategory {
                    PersistenceType::RemoteSave => "Remote Save",
                    PersistenceType::LocalSave => "Local Save",
                })
            },
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::ConfigLoad => "Config Load",
                    FileIOType::HistoryLoad => "History Load",
                    FileIOType::CsvExport => "CSV Export",
                })
            },
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref CATEGORY_TIMINGS: RwLock<HashMap<OperationCategory, Histogram<u64>>> = RwLock::new(HashMap::new());
    static ref HIERARCHICAL_TIMINGS: RwLock<HashMap<String, (Duration, usize, Vec<String>)>> = RwLock::new(HashMap::new());
}

pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        record_timing_end(&self.function_name, duration, &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    TIMING_STACK.with(|stack| {
        stack.borrow_mut().push(function_name.to_string());
    });

    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3).ok()
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    // Always unwind the stack so nested guards stay balanced
    let parent = TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();
        stack.last().cloned()
    });

    if !is_timing_enabled() {
        return;
    }

    {
        let mut hierarchical = HIERARCHICAL_TIMINGS.write();
        let entry = hierarchical
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0, Vec::new()));
        entry.0 += duration;
        entry.1 += 1;
        if let Some(parent_name) = parent {
            if !entry.2.contains(&parent_name) {
                entry.2.push(parent_name);
            }
        }
    }

    let mut category_timings = CATEGORY_TIMINGS.write();
    if !category_timings.contains_key(category) {
        match new_histogram() {
            Some(histogram) => {
                category_timings.insert(category.clone(), histogram);
            }
            None => return,
        }
    }
    if let Some(histogram) = category_timings.get_mut(category) {
        let duration_ns = (duration.as_nanos() as u64).clamp(1, HISTOGRAM_MAX_NS);
        let _ = histogram.record(duration_ns);
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let crate_level = if debug_logging { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy()
        .add_directive(format!("kaboni={}", crate_level).parse().unwrap_or_else(|_| Level::INFO.into()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if enable_timing {
        let timing_layer = Builder::default()
            .layer(|| Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3).expect("valid histogram bounds"));

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(timing_layer);

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nPerformance Report");
    println!("==========================");

    println!("\nHierarchical Timing Analysis:");
    println!("---------------------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.3}ms, count={}, avg={:.3}ms{}",
            function_name,
            total_duration.as_secs_f64() * 1000.0,
            count,
            avg_duration.as_secs_f64() * 1000.0,
            if !parents.is_empty() {
                format!("\n  Called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    println!("\nPerformance by Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        b.1.mean().partial_cmp(&a.1.mean()).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (category, histogram) in category_vec {
        println!(
            "{}: mean={:.3}ms, p95={:.3}ms, count={}",
            category.as_str(),
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }

    println!("==========================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names() {
        assert_eq!(OperationCategory::Calculation.as_str(), "Calculation");
        assert_eq!(
            OperationCategory::Persistence { subcategory: PersistenceType::LocalSave }.as_str(),
            "Persistence - Local Save"
        );
        assert_eq!(
            OperationCategory::FileIO { subcategory: FileIOType::CsvExport }.as_str(),
            "File I/O - CSV Export"
        );
    }

    #[test]
    fn nested_guards_keep_stack_balanced() {
        {
            let _outer = start_timing("outer", OperationCategory::Other);
            {
                let _inner = start_timing("inner", OperationCategory::Calculation);
            }
        }
        TIMING_STACK.with(|stack| assert!(stack.borrow().is_empty()));
    }
}
