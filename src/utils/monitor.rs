#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
    pub since_last: Duration,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    peak_memory_mb: u64,
    last_checkpoint: Instant,
}

/// 批次處理時的行程監控：每個檔案結束後記錄記憶體與耗時
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    pid: Option<Pid>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let start_time = Instant::now();
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                if enabled {
                    tracing::warn!("System monitoring unavailable: {}", e);
                }
                None
            }
        };

        let state = (enabled && pid.is_some()).then(|| {
            Mutex::new(MonitorState {
                system: System::new(),
                peak_memory_mb: 0,
                last_checkpoint: start_time,
            })
        });

        Self {
            state,
            pid,
            start_time,
        }
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        let pid = self.pid?;
        let mut state = self.state.as_ref()?.lock().ok()?;

        state
            .system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let memory_mb = state.system.process(pid)?.memory() / 1024 / 1024;
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let since_last = now.duration_since(state.last_checkpoint);
        state.last_checkpoint = now;

        Some(SystemStats {
            memory_usage_mb: memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            elapsed_time: self.start_time.elapsed(),
            since_last,
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - Memory: {}MB, Peak: {}MB, Took: {:?}",
                phase,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.since_last
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境下的空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
