// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Process configuration.
//!
//! Every setting can be given as a command line flag or through the
//! environment variable named in the table below.
//!
//! | Variable | Default |
//! |---|---|
//! | `UPTIME_KUMA_URL` | required |
//! | `UPTIME_KUMA_USER` | required |
//! | `UPTIME_KUMA_PASSWORD` | required |
//! | `WATCH_INTERVAL` | `10` |
//! | `WATCH_INGRESSROUTES` | `true` |
//! | `WATCH_INGRESS` | `false` |
//! | `USE_TRAEFIK_V3_CRD_GROUP` | `false` |
//! | `DEFAULT_PARENT_NAME` | unset |
//! | `ENABLE_MONITOR_FILE` | `false` |
//! | `MONITOR_FILE_PATH` | `/config/monitors.yaml` |
//! | `LOG_LEVEL` | `info` |

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_MONITOR_FILE_PATH, DEFAULT_WATCH_INTERVAL_SECS,
    TRAEFIK_API_GROUP, TRAEFIK_LEGACY_API_GROUP,
};
use crate::errors::ConfigError;
use crate::routing::RoutingKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Watch Kubernetes routing objects and keep Uptime Kuma monitors in sync.
#[derive(Debug, Clone, Parser)]
#[command(name = "kuma-ingress-watcher", version, about)]
pub struct Config {
    /// Base URL of the Uptime Kuma API
    #[arg(long, env = "UPTIME_KUMA_URL")]
    pub kuma_url: Option<String>,

    /// Uptime Kuma user name
    #[arg(long, env = "UPTIME_KUMA_USER")]
    pub kuma_user: Option<String>,

    /// Uptime Kuma password
    #[arg(long, env = "UPTIME_KUMA_PASSWORD", hide_env_values = true)]
    pub kuma_password: Option<String>,

    /// Seconds to sleep between two poll cycles
    #[arg(long, env = "WATCH_INTERVAL", default_value_t = DEFAULT_WATCH_INTERVAL_SECS)]
    pub watch_interval: u64,

    /// Watch Traefik IngressRoute objects
    #[arg(long, env = "WATCH_INGRESSROUTES", default_value = "true", action = ArgAction::Set, value_parser = parse_flag)]
    pub watch_ingressroutes: bool,

    /// Watch networking.k8s.io/v1 Ingress objects
    #[arg(long, env = "WATCH_INGRESS", default_value = "false", action = ArgAction::Set, value_parser = parse_flag)]
    pub watch_ingress: bool,

    /// Read IngressRoutes from traefik.io instead of traefik.containo.us
    #[arg(long, env = "USE_TRAEFIK_V3_CRD_GROUP", default_value = "false", action = ArgAction::Set, value_parser = parse_flag)]
    pub use_traefik_v3_crd_group: bool,

    /// Monitor group used when an object has no parent annotation
    #[arg(long, env = "DEFAULT_PARENT_NAME")]
    pub default_parent_name: Option<String>,

    /// Load monitors from a static file once at startup
    #[arg(long, env = "ENABLE_MONITOR_FILE", default_value = "false", action = ArgAction::Set, value_parser = parse_flag)]
    pub enable_monitor_file: bool,

    /// Location of the static monitor file
    #[arg(long, env = "MONITOR_FILE_PATH", default_value = DEFAULT_MONITOR_FILE_PATH)]
    pub monitor_file_path: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

/// Credentials needed to log in to the monitor backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub url: String,
    pub user: String,
    pub password: String,
}

/// Which API group Traefik's CRDs are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrdGroup {
    /// `traefik.io` (Traefik v3)
    Traefik,
    /// `traefik.containo.us` (Traefik v2)
    TraefikLegacy,
}

impl CrdGroup {
    #[must_use]
    pub fn api_group(self) -> &'static str {
        match self {
            Self::Traefik => TRAEFIK_API_GROUP,
            Self::TraefikLegacy => TRAEFIK_LEGACY_API_GROUP,
        }
    }
}

impl Config {
    /// Check the settings the process cannot start without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBackendSetting`] if the backend URL or a
    /// credential is missing or empty, and [`ConfigError::InvalidWatchInterval`]
    /// if the poll interval is zero.
    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        if self.watch_interval == 0 {
            return Err(ConfigError::InvalidWatchInterval);
        }

        let required = |value: &Option<String>, name: &'static str| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingBackendSetting(name))
        };

        Ok(BackendSettings {
            url: required(&self.kuma_url, "UPTIME_KUMA_URL")?,
            user: required(&self.kuma_user, "UPTIME_KUMA_USER")?,
            password: required(&self.kuma_password, "UPTIME_KUMA_PASSWORD")?,
        })
    }

    /// Routing kinds to watch, in the order they are polled.
    #[must_use]
    pub fn watched_kinds(&self) -> Vec<RoutingKind> {
        let mut kinds = Vec::new();
        if self.watch_ingressroutes {
            kinds.push(RoutingKind::IngressRoute);
        }
        if self.watch_ingress {
            kinds.push(RoutingKind::Ingress);
        }
        kinds
    }

    #[must_use]
    pub fn crd_group(&self) -> CrdGroup {
        if self.use_traefik_v3_crd_group {
            CrdGroup::Traefik
        } else {
            CrdGroup::TraefikLegacy
        }
    }

    #[must_use]
    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval)
    }

    /// Default parent group name, ignoring an empty value.
    #[must_use]
    pub fn default_parent(&self) -> Option<&str> {
        self.default_parent_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// Parse a boolean flag the lenient way: `true`, `1`, `t`, `y` and `yes` are true
/// (case-insensitive), anything else is false.
///
/// # Errors
///
/// Never fails; the signature is the one clap value parsers require.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "t" | "y" | "yes"
    ))
}
