//! Background sampling of the process's resident memory.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const MB: f64 = 1024.0 * 1024.0;

/// Resident memory around one measured run, in bytes. All zero on platforms
/// where `memory-stats` cannot read the process's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    pub baseline: usize,
    pub current: usize,
    pub peak: usize,
}

impl MemoryUsage {
    pub fn current_mb(&self) -> f64 {
        self.current as f64 / MB
    }

    pub fn peak_mb(&self) -> f64 {
        self.peak as f64 / MB
    }

    /// Growth of the peak over the baseline.
    pub fn peak_delta_mb(&self) -> f64 {
        self.peak.saturating_sub(self.baseline) as f64 / MB
    }
}

fn physical_mem() -> usize {
    memory_stats::memory_stats()
        .map(|usage| usage.physical_mem)
        .unwrap_or(0)
}

/// Spawns a thread that samples resident memory until stopped, keeping the
/// highest value seen.
pub struct MemoryMonitor {
    baseline: usize,
    peak: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MemoryMonitor {
    pub fn start(interval: Duration) -> Self {
        let baseline = physical_mem();
        let peak = Arc::new(AtomicUsize::new(baseline));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let peak = Arc::clone(&peak);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("jsonpick-memory-monitor".to_string())
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        peak.fetch_max(physical_mem(), Ordering::Relaxed);
                        thread::sleep(interval);
                    }
                })
        };

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                // Still report baseline and final usage.
                log::warn!("Could not start memory monitor: {}", e);
                None
            }
        };

        Self {
            baseline,
            peak,
            stop,
            handle,
        }
    }

    /// Stops sampling and returns the usage observed since `start`.
    pub fn stop(mut self) -> MemoryUsage {
        self.shutdown();
        let current = physical_mem();
        let peak = self.peak.fetch_max(current, Ordering::Relaxed).max(current);
        MemoryUsage {
            baseline: self.baseline,
            current,
            peak,
        }
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Memory monitor thread panicked");
            }
        }
    }
}

impl Drop for MemoryMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_never_below_current_or_baseline() {
        let monitor = MemoryMonitor::start(Duration::from_millis(1));
        let buffer = vec![1u8; 8 * 1024 * 1024];
        thread::sleep(Duration::from_millis(5));
        let usage = monitor.stop();
        drop(buffer);

        assert!(usage.peak >= usage.current);
        assert!(usage.peak >= usage.baseline);
        assert!(usage.peak_delta_mb() >= 0.0);
    }
}
