//! Use case orchestration for doppel.
//!
//! This crate provides the application layer: the end-of-build gate and the
//! dev-mode snapshot, coordinating the session, analyzer, and render layers.
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod gate;

pub use gate::{run_gate, run_snapshot, verdict_exit_code, GateInput, GateOutput};
use anyhow::Context;
use doppel_types::{DoppelReport, SCHEMA_REPORT_V1};

pub fn parse_report_json(text: &str) -> anyhow::Result<DoppelReport> {
    let report: DoppelReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

pub fn serialize_report(report: &DoppelReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}
