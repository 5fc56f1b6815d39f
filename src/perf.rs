//! Performance monitoring utilities.
//!
//! Tracks how long the canvas spends handling each input event so slow
//! pointer moves and reflows show up in the logs.
//!
//! ## Features
//!
//! - **Event timing**: Track per-event handling time with rolling averages
//! - **Scoped timers**: RAII-style timing for code blocks
//! - **Aggregated statistics**: Per-operation averages and p95
//! - **Conditional compilation**: Zero-cost when profiling disabled
//!
//! ## Usage
//!
//! Enable profiling with the `profiling` feature flag, then instrument hot
//! paths with the macros:
//! ```ignore
//! fn update_drag() {
//!     profile_scope!("drag_sort::update_drag");
//!     // ... work ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};
#[cfg(feature = "profiling")]
use tracing::trace;

use crate::constants::EVENT_BUDGET_MS;

// ============================================================================
// Constants
// ============================================================================

/// Number of samples to keep for rolling averages
const SAMPLE_COUNT: usize = 60;

/// Threshold multiplier for warning (2.0 = warn if an event takes twice the budget)
const WARN_THRESHOLD: f64 = 2.0;

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Profile the current function. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_scope!($crate::function_name!());
    };
}

/// Name of the enclosing function
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Strip the trailing "::f"
        &name[..name.len() - 3]
    }};
}

// ============================================================================
// Event Performance Monitor
// ============================================================================

/// Tracks input event handling times and per-operation statistics.
#[derive(Debug)]
pub struct PerfMonitor {
    /// Recent event times in milliseconds
    event_times: VecDeque<f64>,
    /// When the current event started, and what it was
    event_start: Option<(Instant, &'static str)>,
    /// Count of events that exceeded the warning threshold
    slow_event_count: u64,
    /// Total events tracked
    total_events: u64,
    /// Per-operation timing statistics
    operation_stats: HashMap<&'static str, OperationStats>,
}

/// Statistics for a specific operation type.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    min_ms: f64,
    max_ms: f64,
    /// Running sum over `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min_ms(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    /// Average time over recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over recent samples.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self {
            event_times: VecDeque::with_capacity(SAMPLE_COUNT),
            event_start: None,
            slow_event_count: 0,
            total_events: 0,
            operation_stats: HashMap::new(),
        }
    }

    /// Mark the start of handling one input event.
    pub fn begin_event(&mut self, name: &'static str) {
        self.event_start = Some((Instant::now(), name));
    }

    /// Mark the end of the current event and record its timing.
    /// Returns the handling time in milliseconds.
    pub fn end_event(&mut self) -> Option<f64> {
        let (start, name) = self.event_start.take()?;
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record_event(name, ms);
        Some(ms)
    }

    fn record_event(&mut self, name: &'static str, ms: f64) {
        if self.event_times.len() >= SAMPLE_COUNT {
            self.event_times.pop_front();
        }
        self.event_times.push_back(ms);
        self.total_events += 1;
        self.record_operation(name, ms);

        if ms > EVENT_BUDGET_MS * WARN_THRESHOLD {
            self.slow_event_count += 1;
            warn!(
                event = name,
                elapsed_ms = format!("{:.2}", ms),
                budget_ms = format!("{:.2}", EVENT_BUDGET_MS),
                "Slow input event"
            );
        }
    }

    /// Record an operation timing.
    pub fn record_operation(&mut self, name: &'static str, elapsed_ms: f64) {
        self.operation_stats.entry(name).or_default().record(elapsed_ms);
    }

    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    /// Average event time over recent samples.
    pub fn average_event_time(&self) -> f64 {
        if self.event_times.is_empty() {
            return 0.0;
        }
        self.event_times.iter().sum::<f64>() / self.event_times.len() as f64
    }

    /// Maximum event time in recent samples.
    pub fn max_event_time(&self) -> f64 {
        self.event_times.iter().copied().fold(0.0, f64::max)
    }

    /// Percentage of events that blew the budget.
    pub fn slow_event_percentage(&self) -> f64 {
        if self.total_events == 0 {
            return 0.0;
        }
        (self.slow_event_count as f64 / self.total_events as f64) * 100.0
    }

    pub fn get_operation_stats(&self, name: &str) -> Option<&OperationStats> {
        self.operation_stats.get(name)
    }

    /// Log a performance summary if the average event is over budget.
    pub fn log_summary_if_slow(&self) {
        let avg = self.average_event_time();
        if avg <= EVENT_BUDGET_MS {
            return;
        }
        warn!(
            avg_event_ms = format!("{:.2}", avg),
            max_event_ms = format!("{:.2}", self.max_event_time()),
            slow_percentage = format!("{:.1}%", self.slow_event_percentage()),
            "Input handling below target"
        );

        let mut ops: Vec<_> = self.operation_stats.iter().collect();
        ops.sort_by(|a, b| b.1.average().partial_cmp(&a.1.average()).unwrap_or(std::cmp::Ordering::Equal));
        for (name, stats) in ops.iter().take(5) {
            debug!(
                "  {}: avg={:.2}ms, p95={:.2}ms, max={:.2}ms, count={}",
                name,
                stats.average(),
                stats.p95(),
                stats.max_ms,
                stats.count
            );
        }
    }

    pub fn reset(&mut self) {
        self.event_times.clear();
        self.event_start = None;
        self.slow_event_count = 0;
        self.total_events = 0;
        self.operation_stats.clear();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs its duration on drop when over a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer with the per-event budget as threshold.
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, EVENT_BUDGET_MS)
    }

    /// Timer for profiling (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run a closure and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}

/// Run a closure and warn if it exceeds the threshold.
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let (result, elapsed_ms) = measure(f);
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    result
}
