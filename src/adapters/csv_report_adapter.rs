//! CSV trade-log report adapter.

use std::path::Path;

use crate::domain::error::DrillError;
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write_summary(&self, summary: &Summary, output: &Path) -> Result<(), DrillError> {
        let mut wtr = csv::Writer::from_path(output).map_err(|e| DrillError::Data {
            reason: format!("failed to open {}: {}", output.display(), e),
        })?;

        wtr.write_record([
            "date",
            "ticker",
            "entry_time",
            "entry_price",
            "exit_price",
            "outcome",
            "pnl",
        ])
        .map_err(report_error)?;

        for record in &summary.records {
            wtr.write_record([
                record.date.to_string(),
                record.ticker.clone(),
                record.entry_time.format("%H:%M:%S").to_string(),
                format!("{:.4}", record.entry_price),
                format!("{:.4}", record.exit_price),
                record.outcome.to_string(),
                format!("{:.2}", record.pnl),
            ])
            .map_err(report_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn report_error(e: csv::Error) -> DrillError {
    DrillError::Data {
        reason: format!("failed to write report: {e}"),
    }
}
