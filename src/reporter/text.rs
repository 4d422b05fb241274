use crossterm::style::{StyledContent, Stylize};
use itertools::Itertools;
use std::{cmp::Reverse, io::Write, time::Duration};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Margin, Padding, Style, object::Rows, object::Cell, themes::Colorization},
};

use crate::{
    histogram::{LatencyHistogram, PERCENTAGES},
    report::{RunReport, STATUS_OK},
    status::{Status, StatusKind},
};

/// Human-readable report with terminal colours.
pub struct TextReporter;

impl super::Reporter for TextReporter {
    fn print(&self, w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
        print_summary(w, report)?;
        writeln!(w)?;

        print_status(w, report)?;
        writeln!(w)?;

        if !report.hist.is_empty() {
            print_latency(w, &report.hist)?;
            writeln!(w)?;
        }

        print_error(w, report)?;

        Ok(())
    }
}

#[rustfmt::skip]
fn print_summary(w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
    writeln!(w, "{}", "Results".h1())?;
    writeln!(w,       "  Concurrency level:                        {}", report.concurrency.to_string().green().bold())?;
    writeln!(w,       "  Total time spent executing:               {} seconds", format!("{:.2}", report.elapsed_secs()).green().bold())?;
    writeln!(w,       "  Total number of requests made:            {}", report.total.to_string().green().bold())?;
    writeln!(w,       "  Number of requests with HTTP status {STATUS_OK}:  {}", report.success_count.to_string().green().bold())?;
    writeln!(w,       "  Errored requests:                         {}", render_errors(report.error_count))?;
    writeln!(w,       "  Requests per second:                      {}", format!("{:.2}", report.rate()).green())?;
    Ok(())
}

fn render_errors(count: u64) -> StyledContent<String> {
    let text = count.to_string();
    if count == 0 { text.green().bold() } else { text.red().bold() }
}

fn print_status(w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
    writeln!(w, "{}", "Distribution of other HTTP status codes".h1())?;
    for (&code, count) in &report.other_status_codes {
        let line = format!("  {code}: {count}");
        let line = match Status::from_code(code).kind() {
            StatusKind::Success | StatusKind::Informational => line.green(),
            StatusKind::Redirection => line.cyan(),
            StatusKind::ClientError => line.yellow(),
            StatusKind::ServerError | StatusKind::Unknown => line.red(),
        };
        writeln!(w, "{line}")?;
    }
    Ok(())
}

fn print_latency(w: &mut dyn Write, hist: &LatencyHistogram) -> anyhow::Result<()> {
    writeln!(w, "{}", "Latencies".h1())?;

    let stats = vec![
        vec!["Avg".into(), "Min".into(), "Med".into(), "Max".into(), "Stdev".into()],
        vec![
            millis(hist.mean()),
            millis(hist.min()),
            millis(hist.median()),
            millis(hist.max()),
            millis(hist.stdev()),
        ],
    ];
    let mut stats = Builder::from(stats).build();
    stats
        .with(Style::empty())
        .with(Margin::new(1, 0, 0, 0))
        .with(Alignment::center())
        .with(Colorization::exact([Color::FG_GREEN], Rows::new(1..=1)))
        .with(Colorization::exact([Color::FG_BLUE], Cell::new(0, 0)))
        .with(Colorization::exact([Color::FG_CYAN], Cell::new(0, 1)))
        .with(Colorization::exact([Color::FG_YELLOW], Cell::new(0, 2)))
        .with(Colorization::exact([Color::FG_RED], Cell::new(0, 3)))
        .with(Colorization::exact([Color::FG_MAGENTA], Cell::new(0, 4)));
    writeln!(w, "{stats}")?;
    writeln!(w)?;

    writeln!(w, "{}", "  Percentiles".h2())?;
    let percentiles = hist
        .percentiles(PERCENTAGES)
        .map(|(p, v)| vec![format!("{p:.2}%"), " in ".to_string(), millis(v)]);
    let mut percentiles = Builder::from_iter(percentiles).build();
    percentiles
        .with(Style::empty())
        .with(Margin::new(3, 0, 0, 0))
        .with(Alignment::right())
        .with(Padding::zero());
    writeln!(w, "{}", percentiles.to_string().green())?;
    Ok(())
}

fn millis(d: Duration) -> String {
    format!("{:.2}ms", d.as_secs_f64() * 1_000.0)
}

fn print_error(w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
    let error_v = report
        .error_dist
        .iter()
        .sorted_unstable_by_key(|&(_, &cnt)| Reverse(cnt))
        .collect_vec();
    if let Some(width) = error_v.iter().map(|(_, cnt)| cnt.to_string().len()).max() {
        writeln!(w, "{}", "Error distribution".h1())?;
        for (error, count) in error_v {
            writeln!(w, "{}", format!("  [{count:>width$}] {error}").red())?;
        }
    }
    Ok(())
}

trait ReportStyle {
    fn h1(&self) -> StyledContent<&str>;
    fn h2(&self) -> StyledContent<&str>;
}

impl<T: AsRef<str>> ReportStyle for T {
    fn h1(&self) -> StyledContent<&str> {
        self.as_ref().bold().underlined().yellow()
    }

    fn h2(&self) -> StyledContent<&str> {
        self.as_ref().bold().cyan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TransportError, outcome::Outcome, reporter::Reporter, stats::Stats};

    fn render(report: &RunReport) -> String {
        let mut buf = Vec::new();
        TextReporter.print(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_counts_and_other_codes() {
        let mut stats = Stats::new();
        let latency = Duration::from_millis(12);
        for status in [200, 200, 404, 500, 500] {
            stats.record(&Outcome::Success { status, latency });
        }
        stats.record(&Outcome::Failure { cause: TransportError::Timeout, latency });
        let report = RunReport::new(3, 6, stats, Duration::from_millis(1500));

        let out = render(&report);
        assert!(out.contains("Concurrency level:"));
        assert!(out.contains("1.50"));
        assert!(out.contains("404: 1"));
        assert!(out.contains("500: 2"));
        assert!(!out.contains("200: 2"));
        assert!(out.contains("Latencies"));
        assert!(out.contains("request timed out"));
    }

    #[test]
    fn renders_empty_run() {
        let report = RunReport::new(1, 0, Stats::new(), Duration::ZERO);
        let out = render(&report);
        assert!(out.contains("Results"));
        assert!(out.contains("0.00"));
        assert!(!out.contains("Latencies"));
        assert!(!out.contains("Error distribution"));
    }
}
