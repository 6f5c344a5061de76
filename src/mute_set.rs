/// Muted-domain set and hostname matching for Site Muter
use std::collections::HashSet;

use url::Url;

use crate::tab_data::TabInfo;

/// Extract the hostname from a URL
///
/// Returns the hostname exactly as URL parsing produces it (lowercase for
/// registered names). `None` for unparsable URLs and for URLs without a
/// host (about:blank, data:, chrome://newtab-style pages on some hosts).
pub fn hostname_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_string())
}

/// Whether a tab's hostname matches a muted domain.
///
/// Substring containment, not suffix matching: "example.com" matches
/// "a.example.com" but also "evil-example.com". Known broad-match policy,
/// kept because the persisted domain list was written under it.
pub fn domain_matches(hostname: &str, domain: &str) -> bool {
    hostname.contains(domain)
}

/// Tabs whose URL hostname matches `domain`. Tabs with unparsable URLs are
/// skipped, not errors.
pub fn matching_tabs<'a>(tabs: &'a [TabInfo], domain: &str) -> Vec<&'a TabInfo> {
    tabs.iter()
        .filter(|tab| {
            hostname_of(&tab.url)
                .map(|hostname| domain_matches(&hostname, domain))
                .unwrap_or(false)
        })
        .collect()
}

/// Outcome of a toggle: the state the domain's tabs should be driven to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Muted,
    Unmuted,
}

/// The set of muted domains. A domain is present iff the user muted it;
/// absence means the default (unmuted) state.
#[derive(Debug, Clone, Default)]
pub struct MuteSet {
    domains: HashSet<String>,
}

impl MuteSet {
    pub fn new() -> Self {
        MuteSet {
            domains: HashSet::new(),
        }
    }

    /// Exact-equality membership on stored keys
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Flip a domain's membership: absent becomes muted, present becomes
    /// unmuted. The only mutating entry point besides `merge`.
    pub fn toggle(&mut self, domain: &str) -> ToggleAction {
        if self.domains.remove(domain) {
            ToggleAction::Unmuted
        } else {
            self.domains.insert(domain.to_string());
            ToggleAction::Muted
        }
    }

    /// Merge persisted domains into the set. Additive only: entries already
    /// in memory are never dropped because they are absent from storage.
    pub fn merge(&mut self, domains: impl IntoIterator<Item = String>) {
        self.domains.extend(domains);
    }

    /// All muted domains, sorted so the persisted array is deterministic
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.domains.iter().cloned().collect();
        domains.sort();
        domains
    }

    /// Whether any muted domain matches this hostname under the substring
    /// policy. Used to auto-mute navigated tabs.
    pub fn matches_hostname(&self, hostname: &str) -> bool {
        self.domains
            .iter()
            .any(|domain| domain_matches(hostname, domain))
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
