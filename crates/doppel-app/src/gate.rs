//! The end-of-build gate and the dev-mode snapshot.

use doppel_analyzer::{analyze, verdict, ExceptionPolicy};
use doppel_manifest::ManifestSource;
use doppel_render::{render_failure, render_summary_lines};
use doppel_session::BuildSession;
use doppel_types::{
    DoppelData, DoppelReport, PackagePath, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Input for the gate and snapshot use cases.
pub struct GateInput<'a> {
    pub session: &'a BuildSession,
    pub exceptions: &'a ExceptionPolicy,
    /// Module paths the host confirmed are part of the final artifact
    /// (build mode) or currently loaded (dev mode). Merged into the
    /// session's own set before analysis, since dev-mode modules come and
    /// go outside our observation.
    pub host_modules: Vec<PackagePath>,
}

/// Output from the gate use case.
#[derive(Clone, Debug)]
pub struct GateOutput {
    pub report: DoppelReport,
    /// The fatal, build-halting message. `Some` iff the verdict is `Fail`;
    /// the shell hands it to the host's fatal-error collaborator.
    pub failure: Option<String>,
    /// Informational per-identity doppelganger lines for the build log.
    pub summary_lines: Vec<String>,
}

/// Run the end-of-build gate: analyze the final module set and decide
/// whether the build fails. Runs once, after all modules for the artifact
/// are known; never speculatively mid-build.
pub fn run_gate<S: ManifestSource + Copy>(source: S, input: GateInput<'_>) -> GateOutput {
    let report = build_report(source, &input);
    let failure = match report.verdict {
        Verdict::Fail => Some(render_failure(&report.analysis)),
        Verdict::Pass => None,
    };
    let summary_lines = render_summary_lines(&report.doppelgangers);

    GateOutput {
        report,
        failure,
        summary_lines,
    }
}

/// Dev-mode equivalent of the gate: same analysis, returned as data, never
/// fatal. The module set is inherently partial and growing, so failing here
/// would be noise.
pub fn run_snapshot<S: ManifestSource + Copy>(source: S, input: GateInput<'_>) -> DoppelReport {
    build_report(source, &input)
}

fn build_report<S: ManifestSource + Copy>(source: S, input: &GateInput<'_>) -> DoppelReport {
    let started_at = OffsetDateTime::now_utc();

    input
        .session
        .merge_modules(input.host_modules.iter().cloned());

    let identities = input.session.collect_identities(source);
    let packages_seen: BTreeSet<&str> = identities.iter().map(|i| i.name.as_str()).collect();
    let packages_seen = packages_seen.len() as u32;
    let modules_seen = input.session.modules_seen() as u32;

    let analysis = analyze(identities, input.exceptions);
    let verdict = verdict(&analysis);
    let doppelgangers = input.session.doppelganger_summaries();

    DoppelReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "doppel".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        has_issues: analysis.has_issues(),
        analysis,
        doppelgangers,
        data: DoppelData {
            mode: input.session.mode().as_str().to_string(),
            modules_seen,
            packages_seen,
        },
    }
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
