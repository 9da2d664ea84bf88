use quire_config::ENV_PREFIX;
use quire_config::QuireConfig;

const SECTIONS: [(&str, &str); 3] = [
    ("DATABASE", "QUIRE_DATABASE__PATH"),
    ("SEARCH", "QUIRE_SEARCH__MAX_PAGE_SIZE"),
    ("DASHBOARD", "QUIRE_DASHBOARD__ACTIVITY_DAYS"),
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &QuireConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &QuireConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();
    for (section, example) in SECTIONS {
        let single = format!("{ENV_PREFIX}{section}_");
        let double = format!("{ENV_PREFIX}{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{key} is ignored; section keys need double underscores (example: {example})."
            ));
        }
    }

    if config.database.is_in_memory() {
        warnings.push(
            "database.path is :memory:; recorded entries are discarded when the command exits."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use quire_config::QuireConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_section_keys() {
        let config = QuireConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("QUIRE_DATABASE_PATH".to_string(), "/tmp/a.db".to_string()),
                ("QUIRE_SEARCH_MAX_PAGE_SIZE".to_string(), "5".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("QUIRE_DATABASE_PATH"));
    }

    #[test]
    fn does_not_warn_for_well_formed_keys() {
        let config = QuireConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("QUIRE_DATABASE__PATH".to_string(), "/tmp/a.db".to_string()),
                ("QUIRE_DASHBOARD__ACTIVITY_DAYS".to_string(), "7".to_string()),
                ("QUIRE_LOG".to_string(), "debug".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn warns_for_in_memory_store() {
        let mut config = QuireConfig::default();
        config.database.path = PathBuf::from(":memory:");
        let warnings = collect_unconfigured_warnings(&config, Vec::new());
        assert_eq!(warnings.len(), 1);
    }
}
