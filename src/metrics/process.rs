use std::sync::Mutex;
use sysinfo::System;

/// Samples process-level CPU and memory usage via sysinfo.
///
/// `System` needs `&mut` to refresh, so the sampler wraps it in a mutex; the
/// critical section is the refresh plus two reads. One sampler instance is
/// shared for the process lifetime so CPU usage deltas have a baseline.
pub struct ProcessSampler {
    sys: Mutex<System>,
}

impl ProcessSampler {
    pub fn new() -> Self {
        let mut sys = System::new();
        // First refresh sets the baseline for subsequent CPU deltas.
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        ProcessSampler {
            sys: Mutex::new(sys),
        }
    }

    /// Takes one synchronous sample: (CPU utilization percent, used memory
    /// in bytes).
    pub fn sample(&self) -> (f64, u64) {
        let mut sys = self.sys.lock().expect("process sampler mutex poisoned");
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        (f64::from(sys.global_cpu_usage()), sys.used_memory())
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        ProcessSampler::new()
    }
}
