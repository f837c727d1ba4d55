use std::path::Path;

use anyhow::Context;
use zbx_config::ZbxConfig;

use crate::cli::ConfigOverrides;

/// Load `.env`, layered configuration, then command-line overrides.
pub fn load_config(overrides: &ConfigOverrides) -> anyhow::Result<ZbxConfig> {
    load_dotenv(Path::new(".env"))?;

    let mut config = ZbxConfig::load().context("failed to load zbx-audit configuration")?;
    apply_overrides(&mut config, overrides);
    config
        .validate()
        .context("invalid command-line options")?;
    Ok(config)
}

fn load_dotenv(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load dotenv file at {}", path.display()))?;
    }
    Ok(())
}

/// Command-line values replace whatever the config layers resolved.
pub fn apply_overrides(config: &mut ZbxConfig, overrides: &ConfigOverrides) {
    if let Some(url) = &overrides.url {
        config.api.url.clone_from(url);
    }
    if let Some(username) = &overrides.username {
        config.api.username.clone_from(username);
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.api.timeout_secs = timeout;
    }
    config.api.accept_invalid_certs |= overrides.accept_invalid_certs;
    config.api.bearer_auth |= overrides.bearer_auth;

    if let Some(group_by) = overrides.group_by {
        config.report.group_by = group_by;
    }
    if let Some(layout) = overrides.layout {
        config.report.layout = layout;
    }
    if let Some(output_dir) = &overrides.output_dir {
        config.report.output_dir.clone_from(output_dir);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use zbx_core::enums::{GroupBy, ReportLayout};

    use super::*;

    fn configured() -> ZbxConfig {
        let mut config = ZbxConfig::default();
        config.api.url = "http://config.example/zabbix".into();
        config.api.username = "svc-audit".into();
        config.api.accept_invalid_certs = true;
        config.report.group_by = GroupBy::Template;
        config.report.output_dir = "/var/reports".into();
        config
    }

    #[test]
    fn empty_overrides_keep_config_values() {
        let mut config = configured();
        apply_overrides(&mut config, &ConfigOverrides::default());

        assert_eq!(config.api.url, "http://config.example/zabbix");
        assert_eq!(config.api.username, "svc-audit");
        assert!(config.api.accept_invalid_certs);
        assert_eq!(config.report.group_by, GroupBy::Template);
        assert_eq!(config.report.output_dir, "/var/reports");
    }

    #[test]
    fn flags_take_precedence() {
        let mut config = configured();
        apply_overrides(
            &mut config,
            &ConfigOverrides {
                url: Some("https://cli.example".into()),
                group_by: Some(GroupBy::Both),
                layout: Some(ReportLayout::Combined),
                output_dir: Some("out".into()),
                timeout_secs: Some(5),
                bearer_auth: true,
                ..ConfigOverrides::default()
            },
        );

        assert_eq!(config.api.url, "https://cli.example");
        assert_eq!(config.api.username, "svc-audit");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.api.bearer_auth);
        assert_eq!(config.report.group_by, GroupBy::Both);
        assert_eq!(config.report.layout, ReportLayout::Combined);
        assert_eq!(config.report.output_dir, "out");
    }

    #[test]
    fn zero_timeout_flag_fails_validation() {
        let mut config = configured();
        apply_overrides(
            &mut config,
            &ConfigOverrides {
                timeout_secs: Some(0),
                ..ConfigOverrides::default()
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_dotenv_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dotenv(&dir.path().join(".env")).is_ok());
    }
}
