use crate::{histogram::PERCENTAGES, report::RunReport};

use super::Reporter;

use serde::Serialize;
use std::{collections::BTreeMap, io::Write};

/// Machine-readable report as pretty-printed JSON.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn print(&self, w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
        let summary = Summary {
            concurrency: report.concurrency,
            total_time: report.elapsed_secs(),
            total: report.total,
            success: report.success_count,
            errors: report.error_count,
            success_ratio: report.success_ratio(),
            rate: report.rate(),
        };

        let hist = &report.hist;
        let latency = (!hist.is_empty()).then(|| Latency {
            stats: LatencyStats {
                min: hist.min().as_secs_f64(),
                max: hist.max().as_secs_f64(),
                mean: hist.mean().as_secs_f64(),
                median: hist.median().as_secs_f64(),
                stdev: hist.stdev().as_secs_f64(),
            },
            percentiles: hist
                .percentiles(PERCENTAGES)
                .map(|(p, v)| (format!("p{p}"), v.as_secs_f64()))
                .collect(),
        });

        serde_json::to_writer_pretty(
            &mut *w,
            &Report {
                summary,
                latency,
                status: report.other_status_codes.iter().map(|(k, &v)| (k.to_string(), v)).collect(),
                errors: report.error_dist.clone(),
            },
        )?;

        writeln!(w)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Summary {
    concurrency: u32,
    total_time: f64,
    total: u64,
    success: u64,
    errors: u64,
    success_ratio: f64,
    rate: f64,
}

#[derive(Serialize)]
struct LatencyStats {
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    stdev: f64,
}

#[derive(Serialize)]
struct Latency {
    stats: LatencyStats,
    percentiles: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct Report {
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency: Option<Latency>,
    status: BTreeMap<String, u64>,
    errors: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{error::TransportError, outcome::Outcome, stats::Stats};

    #[test]
    fn serializes_summary_and_distributions() {
        let mut stats = Stats::new();
        let latency = Duration::from_millis(8);
        for status in [200, 200, 200, 503] {
            stats.record(&Outcome::Success { status, latency });
        }
        stats.record(&Outcome::Failure { cause: TransportError::Timeout, latency });
        let report = RunReport::new(2, 5, stats, Duration::from_secs(1));

        let mut buf = Vec::new();
        JsonReporter.print(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["summary"]["total"], 5);
        assert_eq!(v["summary"]["success"], 3);
        assert_eq!(v["summary"]["errors"], 1);
        assert_eq!(v["summary"]["concurrency"], 2);
        assert_eq!(v["status"]["503"], 1);
        assert!(v["status"].get("200").is_none());
        assert_eq!(v["errors"]["request timed out"], 1);
        assert!(v["latency"]["percentiles"]["p99"].is_number());
    }

    #[test]
    fn omits_latency_for_empty_run() {
        let report = RunReport::new(1, 0, Stats::new(), Duration::ZERO);
        let mut buf = Vec::new();
        JsonReporter.print(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["summary"]["total"], 0);
        assert!(v.get("latency").is_none());
        assert_eq!(v["status"], serde_json::json!({}));
    }
}
