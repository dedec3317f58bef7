// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostname extraction from routing rules.
//!
//! Only the ``Host(`...`)`` predicate of Traefik match expressions is
//! recognized. Everything else in the expression (`PathPrefix`, `Headers`,
//! boolean operators) is ignored.

use crate::routing::{RouteRule, RoutingKind};
use regex::Regex;
use std::sync::LazyLock;

static HOST_PREDICATE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"Host\(`([^`]*)`\)").expect("host predicate pattern is valid")
});

/// Return every host named in a match expression, left to right.
///
/// ```rust
/// use kuma_ingress_watcher::hosts::extract_hosts_from_match;
///
/// let hosts = extract_hosts_from_match("Host(`a.com`) && Host(`b.com`)");
/// assert_eq!(hosts, vec!["a.com", "b.com"]);
/// ```
#[must_use]
pub fn extract_hosts_from_match(expression: &str) -> Vec<String> {
    HOST_PREDICATE
        .captures_iter(expression)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Return the hosts a rule resolves to for the given kind.
///
/// A rule whose variant does not belong to `kind` yields no hosts.
#[must_use]
pub fn extract_hosts(rule: &RouteRule, kind: RoutingKind) -> Vec<String> {
    match (kind, rule) {
        (RoutingKind::IngressRoute, RouteRule::Match(Some(expression))) => {
            extract_hosts_from_match(expression)
        }
        (RoutingKind::Ingress, RouteRule::Host(Some(host))) if !host.is_empty() => {
            vec![host.clone()]
        }
        _ => Vec::new(),
    }
}
