//! History export (CSV and JSON).

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::LogResult;
use crate::log::TimeSeriesLog;

/// Snapshot of a log, one record per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub timestamp: String,
    pub dt_s: f64,
    pub variables: Vec<String>,
    pub samples: Vec<HistorySample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySample {
    pub time_s: f64,
    /// One entry per variable; `None` where no sample exists yet.
    pub values: Vec<Option<f64>>,
}

impl HistoryExport {
    pub fn from_log(log: &TimeSeriesLog) -> Self {
        let samples = (0..log.ncol())
            .map(|i| HistorySample {
                time_s: log.time(i),
                values: (0..log.len())
                    .map(|r| {
                        log.row(r)
                            .and_then(|row| row.get(i).copied())
                            .filter(|v| !v.is_nan())
                    })
                    .collect(),
            })
            .collect();
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            dt_s: log.dt(),
            variables: log.variables().iter().map(|v| v.to_string()).collect(),
            samples,
        }
    }
}

impl TimeSeriesLog {
    /// Write `time` plus one column per variable. Missing samples are empty cells.
    pub fn write_csv<W: Write>(&self, mut out: W) -> LogResult<()> {
        let mut header = String::from("time");
        for var in self.variables() {
            header.push(',');
            header.push_str(var.as_str());
        }
        writeln!(out, "{header}")?;

        for i in 0..self.ncol() {
            let mut line = format!("{}", self.time(i));
            for r in 0..self.len() {
                line.push(',');
                if let Some(v) = self.row(r).and_then(|row| row.get(i)).filter(|v| !v.is_nan()) {
                    line.push_str(&v.to_string());
                }
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: W) -> LogResult<()> {
        serde_json::to_writer_pretty(out, &HistoryExport::from_log(self))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_core::VarPath;
    use std::convert::Infallible;

    fn sample_log() -> TimeSeriesLog {
        let mut log = TimeSeriesLog::new(0.5);
        let a = VarPath::parse("a/x").unwrap();
        let b = VarPath::parse("b").unwrap();
        log.bind(std::slice::from_ref(&a), |_| Ok::<_, Infallible>(1.0))
            .unwrap();
        log.step(|_| Ok::<_, Infallible>(2.0)).unwrap();
        log.bind(&[b], |_| Ok::<_, Infallible>(5.0)).unwrap();
        log
    }

    #[test]
    fn csv_leaves_missing_history_blank() {
        let mut buf = Vec::new();
        sample_log().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "time,a/x,b\n0,1,\n0.5,2,5\n");
    }

    #[test]
    fn json_export_parses_back() {
        let mut buf = Vec::new();
        sample_log().write_json(&mut buf).unwrap();
        let export: HistoryExport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(export.variables, ["a/x", "b"]);
        assert_eq!(export.samples.len(), 2);
        assert_eq!(export.samples[0].values, [Some(1.0), None]);
        assert_eq!(export.samples[1].values, [Some(2.0), Some(5.0)]);
    }
}
