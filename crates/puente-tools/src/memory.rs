//! Process memory instrumentation for solve sessions.
//!
//! Solve sessions capture a snapshot before and after the engine run and
//! log the delta, which makes runaway instances visible in logs long before
//! a host notices.

use std::time::Instant;
use sysinfo::System;

/// Memory state of the current process at one point in time.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    /// Resident set size in bytes.
    pub rss_bytes: u64,
    /// Virtual memory size in bytes.
    pub virtual_bytes: u64,
    /// When this snapshot was captured.
    pub timestamp: Instant,
}

/// Errors produced by memory instrumentation.
#[derive(Debug, Clone)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "failed to locate process {}", pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

impl MemorySnapshot {
    /// Capture the current process memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn capture() -> Result<Self, MemoryError> {
        let pid = sysinfo::Pid::from(std::process::id() as usize);

        // Only refresh the specific process we care about, not the entire system
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            sysinfo::ProcessesToUpdate::Some(&[pid]),
            true,
            sysinfo::ProcessRefreshKind::nothing().with_memory(),
        );

        let process = sys.process(pid).ok_or(MemoryError::ProcessNotFound {
            pid: std::process::id(),
        })?;

        // sysinfo 0.33+ returns memory in bytes directly
        Ok(MemorySnapshot {
            rss_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
            timestamp: Instant::now(),
        })
    }

    /// RSS growth since an earlier snapshot, in bytes (negative = shrank).
    pub fn delta_rss(&self, earlier: &Self) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }

    /// RSS in whole mebibytes, the unit used in log fields.
    pub fn rss_mb(&self) -> u64 {
        self.rss_bytes / (1024 * 1024)
    }
}
