//! Status report assembly
//!
//! `StatusPresenter` fetches the node's operation list and statistics, then
//! writes a textual report: the active and recent operation tables, a
//! skipped-record summary, then the node statistics. Fetch failures never escape;
//! they are written to the error sink and reflected in the returned
//! [`ReportOutcome`].

use std::io::{self, Write};

use crate::app::client::{NodeClient, StatusConfig};
use crate::app::format::{abbreviate_space, abbreviate_time};
use crate::app::models::{OperationKind, OperationRecord, StatsSnapshot, StatusSnapshot};
use crate::app::progress;
use crate::constants::{endpoints, report, stats};
use crate::errors::{FetchError, FetchResult};

/// Record counts from a rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub active: usize,
    pub recent: usize,
    /// Records that could not be meaningfully summarized
    pub skipped: usize,
}

impl ReportSummary {
    pub fn total(&self) -> usize {
        self.active + self.recent
    }
}

/// What a report run managed to show
#[derive(Debug)]
pub enum ReportOutcome {
    /// Operations and statistics were both rendered
    Complete { summary: ReportSummary },
    /// Operations were rendered, statistics could not be fetched
    Partial {
        summary: ReportSummary,
        error: FetchError,
    },
    /// No operation data could be fetched
    Unavailable { error: FetchError },
}

impl ReportOutcome {
    pub fn summary(&self) -> Option<&ReportSummary> {
        match self {
            ReportOutcome::Complete { summary } | ReportOutcome::Partial { summary, .. } => {
                Some(summary)
            }
            ReportOutcome::Unavailable { .. } => None,
        }
    }

    pub fn has_operations(&self) -> bool {
        self.summary().is_some()
    }
}

/// Fetches snapshots from the node and renders the report
#[derive(Debug, Clone)]
pub struct StatusPresenter {
    client: NodeClient,
}

impl StatusPresenter {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &NodeClient {
        &self.client
    }

    /// Fetch both snapshots
    ///
    /// The requests are issued concurrently; neither depends on the other.
    pub async fn fetch(&self) -> (FetchResult<StatusSnapshot>, FetchResult<StatsSnapshot>) {
        tokio::join!(self.fetch_status(), self.fetch_statistics())
    }

    async fn fetch_status(&self) -> FetchResult<StatusSnapshot> {
        let value = self.client.get_json(endpoints::STATUS).await?;
        StatusSnapshot::from_json(&value).ok_or_else(|| self.unexpected_shape(endpoints::STATUS))
    }

    async fn fetch_statistics(&self) -> FetchResult<StatsSnapshot> {
        let value = self.client.get_json(endpoints::STATISTICS).await?;
        StatsSnapshot::from_json(&value)
            .ok_or_else(|| self.unexpected_shape(endpoints::STATISTICS))
    }

    fn unexpected_shape(&self, fragment: &str) -> FetchError {
        FetchError::UnexpectedShape {
            url: format!("{}/{}", self.client.config().node_url, fragment),
            expected: "a JSON object",
        }
    }

    /// Fetch from the node and write the report
    ///
    /// # Errors
    ///
    /// Only I/O errors writing to `out` or `err` are returned; fetch failures
    /// are reported through the outcome.
    pub async fn render_report<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<ReportOutcome> {
        let (status, statistics) = self.fetch().await;
        write_report(self.client.config(), status, statistics, out, err)
    }
}

/// Write the report for already-fetched snapshots
///
/// The operation snapshot (or its failure) always comes first; statistics
/// trail it.
pub fn write_report<O: Write, E: Write>(
    config: &StatusConfig,
    status: FetchResult<StatusSnapshot>,
    statistics: FetchResult<StatsSnapshot>,
    out: &mut O,
    err: &mut E,
) -> io::Result<ReportOutcome> {
    let summary = match status {
        Ok(snapshot) => Ok(write_operations(config, &snapshot, out)?),
        Err(e) => {
            tracing::warn!("Operation status unavailable: {}", e);
            writeln!(err, "failed to retrieve data: {}", e)?;
            Err(e)
        }
    };

    let stats_error = match statistics {
        Ok(stats) => {
            write_statistics(&stats, out)?;
            None
        }
        Err(e) => {
            tracing::warn!("Statistics unavailable: {}", e);
            writeln!(err, "failed to retrieve statistics: {}", e)?;
            Some(e)
        }
    };

    Ok(match (summary, stats_error) {
        (Err(error), _) => ReportOutcome::Unavailable { error },
        (Ok(summary), None) => ReportOutcome::Complete { summary },
        (Ok(summary), Some(error)) => ReportOutcome::Partial { summary, error },
    })
}

/// Active and recent sections followed by the skipped-record line
fn write_operations<O: Write>(
    config: &StatusConfig,
    snapshot: &StatusSnapshot,
    out: &mut O,
) -> io::Result<ReportSummary> {
    let renderer = RowRenderer::new(config);
    let mut skipped = 0;
    skipped += renderer.write_section(out, "Active", &snapshot.active)?;
    writeln!(out)?;
    skipped += renderer.write_section(out, "Recent", &snapshot.recent)?;
    writeln!(out)?;

    let summary = ReportSummary {
        active: snapshot.active.len(),
        recent: snapshot.recent.len(),
        skipped,
    };
    writeln!(
        out,
        "Skipped {} of {} operations (unrecognized type)",
        summary.skipped,
        summary.total()
    )?;
    writeln!(out)?;
    Ok(summary)
}

fn write_statistics<O: Write>(stats_snapshot: &StatsSnapshot, out: &mut O) -> io::Result<()> {
    writeln!(
        out,
        "Statistics (for last {}):",
        abbreviate_time(stats_snapshot.stat(stats::NODE_UPTIME))
    )?;
    writeln!(
        out,
        "    uploaded {} in {} files",
        abbreviate_space(stats_snapshot.counter(stats::BYTES_UPLOADED)),
        stats_snapshot.counter(stats::FILES_UPLOADED) as u64
    )?;
    writeln!(
        out,
        "    downloaded {} in {} files",
        abbreviate_space(stats_snapshot.counter(stats::BYTES_DOWNLOADED)),
        stats_snapshot.counter(stats::FILES_DOWNLOADED) as u64
    )
}

/// Box-drawing characters for the operation table
struct Borders {
    vertical: char,
    horizontal: char,
    top: [char; 2],
    middle: [char; 2],
    bottom: [char; 2],
}

const UNICODE_BORDERS: Borders = Borders {
    vertical: '\u{2551}',
    horizontal: '\u{2500}',
    top: ['\u{2553}', '\u{2565}'],
    middle: ['\u{255f}', '\u{256b}'],
    bottom: ['\u{2559}', '\u{2568}'],
};

const ASCII_BORDERS: Borders = Borders {
    vertical: '|',
    horizontal: '-',
    top: ['+', '+'],
    middle: ['+', '+'],
    bottom: ['+', '+'],
};

/// Formats one table row per operation record
struct RowRenderer<'a> {
    config: &'a StatusConfig,
    borders: &'static Borders,
}

impl<'a> RowRenderer<'a> {
    fn new(config: &'a StatusConfig) -> Self {
        let borders = if config.ascii {
            &ASCII_BORDERS
        } else {
            &UNICODE_BORDERS
        };
        Self { config, borders }
    }

    /// Width of the progress column: bar, space, "(NNN%)"
    fn progress_width(&self) -> usize {
        self.config.bar_width.saturating_add(7).max(report::PROGRESS_WIDTH)
    }

    /// Write a titled section and return how many records were skipped
    fn write_section<O: Write>(
        &self,
        out: &mut O,
        title: &str,
        records: &[OperationRecord],
    ) -> io::Result<usize> {
        if records.is_empty() {
            writeln!(out, "No {} operations.", title.to_lowercase())?;
            return Ok(0);
        }

        writeln!(out, "{} operations:", title)?;
        self.write_header(out)?;
        let mut skipped = 0;
        for record in records {
            if !record.is_known() {
                skipped += 1;
            }
            writeln!(out, "{}", self.row(record))?;
        }
        self.write_rule(out, self.borders.bottom)?;
        Ok(skipped)
    }

    fn write_header<O: Write>(&self, out: &mut O) -> io::Result<()> {
        let [outer, inner] = self.borders.top;
        writeln!(
            out,
            "{outer} {:<kind$} {inner} {:<si$} {inner} {:<progress$} {inner} {}",
            "type",
            "storage index",
            "progress",
            "status message",
            kind = report::KIND_WIDTH,
            si = report::STORAGE_INDEX_WIDTH,
            progress = self.progress_width(),
        )?;
        self.write_rule(out, self.borders.middle)
    }

    fn write_rule<O: Write>(&self, out: &mut O, [outer, inner]: [char; 2]) -> io::Result<()> {
        let h = self.borders.horizontal;
        let span = |width: usize| std::iter::repeat(h).take(width + 2).collect::<String>();
        writeln!(
            out,
            "{outer}{}{inner}{}{inner}{}{inner}{}",
            span(report::KIND_WIDTH),
            span(report::STORAGE_INDEX_WIDTH),
            span(self.progress_width()),
            span(report::STATUS_WIDTH),
        )
    }

    /// One line for one record; never fails, whatever fields are missing
    fn row(&self, record: &OperationRecord) -> String {
        let v = self.borders.vertical;
        format!(
            "{v} {:<kind$} {v} {:<si$} {v} {:<progress$} {v} {}",
            record.kind.label(),
            record.storage_index.as_deref().unwrap_or(report::PLACEHOLDER),
            self.progress_cell(record),
            self.message(record),
            kind = report::KIND_WIDTH,
            si = report::STORAGE_INDEX_WIDTH,
            progress = self.progress_width(),
        )
    }

    fn progress_cell(&self, record: &OperationRecord) -> String {
        match record.progress_fraction() {
            Some(fraction) => {
                let percent = fraction * 100.0;
                format!(
                    "{} ({:>3}%)",
                    progress::render(percent, self.config.bar_width, self.config.ascii),
                    percent.clamp(0.0, 100.0).round() as u32
                )
            }
            None => report::PLACEHOLDER.to_string(),
        }
    }

    fn message(&self, record: &OperationRecord) -> String {
        let mut parts = Vec::new();

        match &record.kind {
            OperationKind::Unknown { type_name, .. } => parts.push(format!(
                "unrecognized operation '{}'",
                type_name.as_deref().unwrap_or("?")
            )),
            _ => parts.push(
                record
                    .status
                    .clone()
                    .unwrap_or_else(|| report::PLACEHOLDER.to_string()),
            ),
        }

        if let Some(size) = record.total_size {
            parts.push(format!("[{}]", abbreviate_space(size as f64)));
        }

        if self.config.verbose {
            parts.extend(self.details(record));
        }

        parts.join(" ")
    }

    /// Verbose-only detail fields
    fn details(&self, record: &OperationRecord) -> Vec<String> {
        let mut details = Vec::new();

        if let Some(started) = record.started_at() {
            details.push(format!("started {}", started.format("%H:%M:%S")));
        }

        match &record.kind {
            OperationKind::Upload(phases) => {
                let phase = |value: Option<f64>| match value {
                    Some(fraction) => {
                        format!("{}%", (fraction * 100.0).clamp(0.0, 100.0).round() as u32)
                    }
                    None => report::PLACEHOLDER.to_string(),
                };
                details.push(format!(
                    "hash {} / ciphertext {} / push {}",
                    phase(phases.hash),
                    phase(phases.ciphertext),
                    phase(phases.encode_push)
                ));
            }
            OperationKind::ServermapUpdate { mode: Some(mode) } => {
                details.push(format!("mode {}", mode));
            }
            OperationKind::Unknown {
                class: Some(class), ..
            } => {
                details.push(format!("class {}", class));
            }
            _ => {}
        }

        details
    }
}
