//! Process memory diagnostics
//!
//! Captures the memory counters reported by `/health` and logged by the
//! periodic monitor: resident set size, allocated data segment, private
//! resident bytes, and shared/off-heap bytes, each reported in megabytes
//! rounded to two decimal places.
//!
//! Counters come from `/proc/self/status`, which reports sizes in kB and is
//! independent of the kernel page size. Capture is best-effort: on platforms
//! without `/proc` every counter reads zero rather than failing the request.

use serde::{Deserialize, Serialize};

/// Raw memory counters in bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySnapshot {
    /// Resident set size
    pub rss_bytes: u64,

    /// Data segment size (heap + stack), the allocated-heap analog
    pub heap_total_bytes: u64,

    /// Private resident bytes, the used-heap analog
    pub heap_used_bytes: u64,

    /// Shared resident bytes (file-backed mappings and shmem, off-heap)
    pub external_bytes: u64,
}

/// Memory counters formatted for the health response, e.g. `"12.34 MB"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryReport {
    /// Resident set size
    pub rss: String,

    /// Allocated data segment
    pub heap_total: String,

    /// Private resident bytes
    pub heap_used: String,

    /// Shared/off-heap bytes
    pub external: String,
}

impl MemorySnapshot {
    /// Captures the current process counters
    pub fn capture() -> Self {
        read_proc_status().unwrap_or_default()
    }

    /// Logs the snapshot at info level
    pub fn log(&self) {
        let report = self.report();
        tracing::info!(
            rss = %report.rss,
            heap_total = %report.heap_total,
            heap_used = %report.heap_used,
            external = %report.external,
            "Memory usage"
        );
    }

    /// Formats every counter in megabytes rounded to two decimal places
    pub fn report(&self) -> MemoryReport {
        MemoryReport {
            rss: format_megabytes(self.rss_bytes),
            heap_total: format_megabytes(self.heap_total_bytes),
            heap_used: format_megabytes(self.heap_used_bytes),
            external: format_megabytes(self.external_bytes),
        }
    }
}

/// Converts bytes to megabytes rounded to two decimal places
pub fn megabytes(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

fn format_megabytes(bytes: u64) -> String {
    format!("{} MB", megabytes(bytes))
}

fn read_proc_status() -> Option<MemorySnapshot> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_proc_status(&status)
}

/// Parses the VmRSS/VmData/RssFile/RssShmem lines of `/proc/self/status`
///
/// `VmRSS` and `VmData` must be present; the shared counters default to zero
/// on kernels that do not split them out.
fn parse_proc_status(status: &str) -> Option<MemorySnapshot> {
    let mut rss_kb = None;
    let mut data_kb = None;
    let mut file_kb = 0;
    let mut shmem_kb = 0;

    for line in status.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest.split_whitespace().next() else {
            continue;
        };
        let Ok(kb) = value.parse::<u64>() else {
            continue;
        };

        match key {
            "VmRSS" => rss_kb = Some(kb),
            "VmData" => data_kb = Some(kb),
            "RssFile" => file_kb = kb,
            "RssShmem" => shmem_kb = kb,
            _ => {}
        }
    }

    let rss = rss_kb? * 1024;
    let data = data_kb? * 1024;
    let shared = (file_kb + shmem_kb) * 1024;

    Some(MemorySnapshot {
        rss_bytes: rss,
        heap_total_bytes: data,
        heap_used_bytes: rss.saturating_sub(shared),
        external_bytes: shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megabytes_rounds_to_two_decimal_places() {
        assert_eq!(megabytes(0), 0.0);
        assert_eq!(megabytes(1024 * 1024), 1.0);
        assert_eq!(megabytes(1024 * 1024 + 512 * 1024), 1.5);
        // 1.2345... MB rounds to 1.23
        assert_eq!(megabytes(1_294_336), 1.23);
    }

    #[test]
    fn test_report_formats_counters_with_unit() {
        let snapshot = MemorySnapshot {
            rss_bytes: 2 * 1024 * 1024,
            heap_total_bytes: 1024 * 1024,
            heap_used_bytes: 512 * 1024,
            external_bytes: 0,
        };

        let report = snapshot.report();
        assert_eq!(report.rss, "2 MB");
        assert_eq!(report.heap_total, "1 MB");
        assert_eq!(report.heap_used, "0.5 MB");
        assert_eq!(report.external, "0 MB");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let json = serde_json::to_value(MemorySnapshot::default().report()).unwrap();
        assert!(json.get("heapTotal").is_some());
        assert!(json.get("heapUsed").is_some());
        assert!(json.get("external").is_some());
    }

    #[test]
    fn test_parse_proc_status_reads_kb_counters() {
        let status = "\
Name:\ttasktracker\n\
VmPeak:\t   20480 kB\n\
VmRSS:\t   10240 kB\n\
RssAnon:\t    6144 kB\n\
RssFile:\t    3072 kB\n\
RssShmem:\t    1024 kB\n\
VmData:\t    8192 kB\n\
Threads:\t2\n";

        let snapshot = parse_proc_status(status).unwrap();
        assert_eq!(snapshot.rss_bytes, 10240 * 1024);
        assert_eq!(snapshot.heap_total_bytes, 8192 * 1024);
        assert_eq!(snapshot.external_bytes, (3072 + 1024) * 1024);
        assert_eq!(snapshot.heap_used_bytes, (10240 - 4096) * 1024);
    }

    #[test]
    fn test_parse_proc_status_tolerates_missing_shared_counters() {
        let status = "VmRSS:\t 1024 kB\nVmData:\t 512 kB\n";

        let snapshot = parse_proc_status(status).unwrap();
        assert_eq!(snapshot.external_bytes, 0);
        assert_eq!(snapshot.heap_used_bytes, snapshot.rss_bytes);
    }

    #[test]
    fn test_parse_proc_status_requires_rss() {
        assert!(parse_proc_status("VmData:\t 512 kB\n").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_capture_reads_nonzero_rss_on_linux() {
        let snapshot = MemorySnapshot::capture();
        assert!(snapshot.rss_bytes > 0);
    }
}
