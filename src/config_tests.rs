// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for configuration parsing.

#[cfg(test)]
mod tests {
    use crate::config::{parse_flag, BackendSettings, Config, CrdGroup};
    use crate::errors::ConfigError;
    use crate::routing::RoutingKind;
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["kuma-ingress-watcher"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn with_backend(args: &[&str]) -> Config {
        let mut all = vec![
            "--kuma-url",
            "http://kuma:8000",
            "--kuma-user",
            "admin",
            "--kuma-password",
            "secret",
        ];
        all.extend_from_slice(args);
        parse(&all)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.watch_interval, 10);
        assert!(config.watch_ingressroutes);
        assert!(!config.watch_ingress);
        assert!(!config.use_traefik_v3_crd_group);
        assert_eq!(config.default_parent_name, None);
        assert!(!config.enable_monitor_file);
        assert_eq!(
            config.monitor_file_path,
            PathBuf::from("/config/monitors.yaml")
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_backend_settings() {
        let config = with_backend(&[]);
        assert_eq!(
            config.backend_settings(),
            Ok(BackendSettings {
                url: "http://kuma:8000".to_string(),
                user: "admin".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_backend_settings_missing_url() {
        let config = parse(&["--kuma-user", "admin", "--kuma-password", "secret"]);
        assert_eq!(
            config.backend_settings(),
            Err(ConfigError::MissingBackendSetting("UPTIME_KUMA_URL"))
        );
    }

    #[test]
    fn test_backend_settings_empty_password() {
        let config = parse(&[
            "--kuma-url",
            "http://kuma:8000",
            "--kuma-user",
            "admin",
            "--kuma-password",
            "",
        ]);
        assert_eq!(
            config.backend_settings(),
            Err(ConfigError::MissingBackendSetting("UPTIME_KUMA_PASSWORD"))
        );
    }

    #[test]
    fn test_backend_settings_rejects_zero_interval() {
        let config = with_backend(&["--watch-interval", "0"]);
        assert_eq!(
            config.backend_settings(),
            Err(ConfigError::InvalidWatchInterval)
        );
    }

    #[test]
    fn test_watched_kinds_default() {
        assert_eq!(parse(&[]).watched_kinds(), vec![RoutingKind::IngressRoute]);
    }

    #[test]
    fn test_watched_kinds_both() {
        let config = parse(&["--watch-ingress", "true"]);
        assert_eq!(
            config.watched_kinds(),
            vec![RoutingKind::IngressRoute, RoutingKind::Ingress]
        );
    }

    #[test]
    fn test_watched_kinds_none() {
        let config = parse(&["--watch-ingressroutes", "false"]);
        assert!(config.watched_kinds().is_empty());
    }

    #[test]
    fn test_crd_group() {
        assert_eq!(parse(&[]).crd_group(), CrdGroup::TraefikLegacy);
        assert_eq!(
            parse(&["--use-traefik-v3-crd-group", "yes"]).crd_group(),
            CrdGroup::Traefik
        );
        assert_eq!(CrdGroup::Traefik.api_group(), "traefik.io");
        assert_eq!(CrdGroup::TraefikLegacy.api_group(), "traefik.containo.us");
    }

    #[test]
    fn test_watch_interval_duration() {
        let config = parse(&["--watch-interval", "30"]);
        assert_eq!(config.watch_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_parent_ignores_empty() {
        assert_eq!(parse(&["--default-parent-name", ""]).default_parent(), None);
        assert_eq!(
            parse(&["--default-parent-name", "infra"]).default_parent(),
            Some("infra")
        );
    }

    #[test]
    fn test_parse_flag() {
        for value in ["true", "True", "1", "t", "y", "YES"] {
            assert_eq!(parse_flag(value), Ok(true), "{value}");
        }
        for value in ["false", "0", "no", "off", ""] {
            assert_eq!(parse_flag(value), Ok(false), "{value}");
        }
    }
}
