use crate::model::DoppelConfigV1;
use anyhow::Context;
use doppel_analyzer::{Exception, ExceptionPolicy};
use doppel_session::SessionMode;

/// CLI/host overrides layered over file config.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub mode: Option<String>,
    pub deduplicate_doppelgangers: Option<bool>,
}

/// Effective options a session is constructed from.
#[derive(Clone, Debug)]
pub struct ResolvedOptions {
    pub mode: SessionMode,
    pub deduplicate_doppelgangers: bool,
    pub exceptions: ExceptionPolicy,
}

pub fn resolve_config(cfg: DoppelConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedOptions> {
    let mode = match overrides.mode.or(cfg.mode) {
        Some(s) => parse_mode(&s)?,
        None => SessionMode::OneShotBuild,
    };

    let deduplicate_doppelgangers = overrides
        .deduplicate_doppelgangers
        .or(cfg.deduplicate_doppelgangers)
        .unwrap_or(false);

    let mut exceptions = ExceptionPolicy::new();
    for (package, ec) in cfg.exceptions.iter() {
        let max_versions = ec
            .max_versions
            .with_context(|| format!("exception for {package} is missing max_versions"))?;
        if max_versions < 1 {
            anyhow::bail!("exception for {package}: max_versions must be >= 1");
        }
        exceptions.insert(package.clone(), Exception::new(max_versions));
    }

    Ok(ResolvedOptions {
        mode,
        deduplicate_doppelgangers,
        exceptions,
    })
}

fn parse_mode(v: &str) -> anyhow::Result<SessionMode> {
    match v {
        "build" => Ok(SessionMode::OneShotBuild),
        "dev" => Ok(SessionMode::InteractiveSession),
        other => anyhow::bail!("unknown mode: {other} (expected 'build' or 'dev')"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved =
            resolve_config(DoppelConfigV1::default(), Overrides::default()).expect("resolve");
        assert_eq!(resolved.mode, SessionMode::OneShotBuild);
        assert!(!resolved.deduplicate_doppelgangers);
        assert!(resolved.exceptions.is_empty());
    }

    #[test]
    fn full_config_round_trips() {
        let cfg = parse_config_toml(
            r#"
schema = "doppel.config.v1"
deduplicate_doppelgangers = true
mode = "dev"

[exceptions.react]
max_versions = 2

[exceptions."@babel/runtime"]
max_versions = 3
"#,
        )
        .expect("parse");

        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        assert_eq!(resolved.mode, SessionMode::InteractiveSession);
        assert!(resolved.deduplicate_doppelgangers);
        assert_eq!(resolved.exceptions.get("react").unwrap().max_versions, 2);
        assert_eq!(
            resolved.exceptions.get("@babel/runtime").unwrap().max_versions,
            3
        );
    }

    #[test]
    fn overrides_win_over_file_config() {
        let cfg = parse_config_toml("mode = \"build\"").expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                mode: Some("dev".to_string()),
                deduplicate_doppelgangers: Some(true),
            },
        )
        .expect("resolve");

        assert_eq!(resolved.mode, SessionMode::InteractiveSession);
        assert!(resolved.deduplicate_doppelgangers);
    }

    #[test]
    fn zero_max_versions_is_rejected() {
        let cfg = parse_config_toml("[exceptions.react]\nmax_versions = 0").expect("parse");
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("max_versions"));
    }

    #[test]
    fn missing_max_versions_is_rejected() {
        let cfg = parse_config_toml("[exceptions.react]").expect("parse");
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let cfg = parse_config_toml("mode = \"watch\"").expect("parse");
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown mode"));
    }
}
