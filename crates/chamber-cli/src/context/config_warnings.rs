use chamber_config::ChamberConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &ChamberConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ChamberConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.storage.is_configured() && has_env_prefix(&env_keys, "CHAMBER_STORAGE") {
        warnings.push(
            "Storage config appears incomplete while CHAMBER_STORAGE* env vars exist. Use double underscores (example: CHAMBER_STORAGE__BUCKET)."
                .to_string(),
        );
    }

    if !config.mail.is_configured() && has_env_prefix(&env_keys, "CHAMBER_MAIL") {
        warnings.push(
            "Mail config appears incomplete while CHAMBER_MAIL* env vars exist. Use double underscores (example: CHAMBER_MAIL__API_KEY)."
                .to_string(),
        );
    }

    if !config.database.url.is_empty() && !config.database.is_remote() {
        warnings.push(
            "database.url is set without database.auth_token; using the local database file."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use chamber_config::ChamberConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_unconfigured_sections_with_env_prefixes() {
        let config = ChamberConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("CHAMBER_STORAGE_BUCKET".to_string(), "logos".to_string()),
                ("CHAMBER_MAIL_API_KEY".to_string(), "key".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let mut config = ChamberConfig::default();
        config.storage.bucket = "chamber-uploads".to_string();
        config.storage.access_key_id = "key".to_string();
        config.storage.secret_access_key = "secret".to_string();
        config.mail.endpoint = "https://mail.example.test/send".to_string();
        config.mail.api_key = "key".to_string();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("CHAMBER_STORAGE__BUCKET".to_string(), "chamber-uploads".to_string()),
                ("CHAMBER_MAIL__API_KEY".to_string(), "key".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn remote_url_without_token_is_flagged() {
        let mut config = ChamberConfig::default();
        config.database.url = "libsql://chamber.example.test".to_string();
        let warnings = collect_unconfigured_warnings(&config, Vec::new());
        assert_eq!(warnings.len(), 1);
    }
}
