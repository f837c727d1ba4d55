use zbx_config::ZbxConfig;

/// Warn about env keys that look meant for zbx-audit but were not picked up.
pub fn warn_misspelled_env(config: &ZbxConfig) {
    for warning in collect_env_warnings(config, std::env::vars().map(|(key, _)| key)) {
        tracing::warn!("{warning}");
    }
}

fn collect_env_warnings<I>(config: &ZbxConfig, keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let keys = keys.into_iter().collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if config.api.base_url().is_none() && has_single_underscore_key(&keys, "ZBX_API") {
        warnings.push(
            "API config has no URL while ZBX_API_* env vars exist. Use double underscores (example: ZBX_API__URL)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&keys, "ZBX_REPORT") {
        warnings.push(
            "ZBX_REPORT_* env vars are ignored. Use double underscores (example: ZBX_REPORT__GROUP_BY)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use zbx_config::ZbxConfig;

    use super::collect_env_warnings;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn warns_for_single_underscore_sections() {
        let warnings = collect_env_warnings(
            &ZbxConfig::default(),
            keys(&["ZBX_API_URL", "ZBX_REPORT_GROUP_BY", "PATH"]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("ZBX_API__URL"));
    }

    #[test]
    fn double_underscore_keys_are_fine() {
        let mut config = ZbxConfig::default();
        config.api.url = "http://localhost/zabbix".into();
        let warnings = collect_env_warnings(
            &config,
            keys(&["ZBX_API__URL", "ZBX_REPORT__LAYOUT", "ZBX_LOG"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn configured_url_silences_api_warning() {
        let mut config = ZbxConfig::default();
        config.api.url = "http://localhost/zabbix".into();
        let warnings = collect_env_warnings(&config, keys(&["ZBX_API_TIMEOUT"]));
        assert!(warnings.is_empty());
    }
}
