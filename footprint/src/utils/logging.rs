use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, Level};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_timing::Histogram;
use std::collections::HashMap;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use std::cell::RefCell;

const HISTOGRAM_MAX_NS: u64 = 60_000_000_000;
const HISTOGRAM_SIGFIG: u8 = 3;

// Categories for the operations we time
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Calculation,
    Batch,
    FileIO {
        subcategory: FileIOType,
    },
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    FactorLoad,
    ConfigLoad,
    ScenarioLoad,
    ResultsExport,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Calculation => "Calculation".to_string(),
            OperationCategory::Batch => "Batch".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::FactorLoad => "Factor Load",
                    FileIOType::ConfigLoad => "Config Load",
                    FileIOType::ScenarioLoad => "Scenario Load",
                    FileIOType::ResultsExport => "Results Export",
                })
            },
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: RwLock<HashMap<String, Histogram<u64>>> = RwLock::new(HashMap::new());
    static ref CATEGORY_TIMINGS: RwLock<HashMap<OperationCategory, Histogram<u64>>> = RwLock::new(HashMap::new());
    static ref HIERARCHICAL_TIMINGS: RwLock<HashMap<String, (Duration, usize, Vec<String>)>> = RwLock::new(HashMap::new());
}

/// Records the elapsed time of an operation when dropped.
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
    if is_timing_enabled() {
        TIMING_STACK.with(|stack| {
            stack.borrow_mut().push(function_name.to_string());
        });
    }

    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, HISTOGRAM_SIGFIG).ok()
}

fn record_into<K>(map: &RwLock<HashMap<K, Histogram<u64>>>, key: &K, duration_ns: u64)
where
    K: std::hash::Hash + Eq + Clone,
{
    let mut timings = map.write();
    if !timings.contains_key(key) {
        match new_histogram() {
            Some(histogram) => {
                timings.insert(key.clone(), histogram);
            }
            None => return,
        }
    }
    if let Some(histogram) = timings.get_mut(key) {
        if let Err(e) = histogram.record(duration_ns.max(1)) {
            debug!(error = ?e, duration_ns, "dropped timing sample");
        }
    }
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    if !is_timing_enabled() {
        return;
    }

    // Pop ourselves and note which operation we were called from
    TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.pop().is_some() {
            let mut hierarchical = HIERARCHICAL_TIMINGS.write();
            let entry = hierarchical
                .entry(function_name.to_string())
                .or_insert((Duration::from_nanos(0), 0, Vec::new()));

            entry.0 += duration;
            entry.1 += 1;

            if let Some(parent_name) = stack.last() {
                if !entry.2.contains(parent_name) {
                    entry.2.push(parent_name.clone());
                }
            }
        }
    });

    let duration_ns = duration.as_nanos().min(HISTOGRAM_MAX_NS as u128) as u64;
    record_into(&*FUNCTION_TIMINGS, &function_name.to_string(), duration_ns);
    record_into(&*CATEGORY_TIMINGS, category, duration_ns);
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for reports.
pub fn init_logging(enable_timing: bool, debug_logging: bool) -> Result<(), SetGlobalDefaultError> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let crate_directive = if debug_logging { "coalprint=debug" } else { "coalprint=info" };
    let mut env_filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into());
    if let Ok(directive) = crate_directive.parse() {
        env_filter = env_filter.add_directive(directive);
    }

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing::subscriber::set_global_default(subscriber)
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

    println!("\nBy Operation:");
    println!("---------------------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.3}ms, count={}, avg={:.3}µs{}",
            function_name,
            total_duration.as_secs_f64() * 1000.0,
            count,
            avg_duration.as_secs_f64() * 1_000_000.0,
            if !parents.is_empty() {
                format!("\n  Called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    println!("\nBy Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        b.1.mean().partial_cmp(&a.1.mean()).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (category, histogram) in category_vec {
        println!(
            "{}: mean={:.3}µs, p95={:.3}µs, p99={:.3}µs, count={}",
            category.as_str(),
            histogram.mean() / 1_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000.0,
            histogram.value_at_quantile(0.99) as f64 / 1_000.0,
            histogram.len(),
        );
    }

    println!("==========================\n");
}
