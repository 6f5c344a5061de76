/// Mute registry: orchestrates the muted-domain set against the host's
/// tab and storage APIs
use std::cell::RefCell;

use futures::future::join_all;
use log::warn;

use crate::mute_set::{MuteSet, ToggleAction, matching_tabs};
use crate::tab_data::TabInfo;

/// Key the muted-domain array lives under in the host's local storage
pub const STORAGE_KEY: &str = "mutedDomains";

/// Host-provided tab operations
#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn all_tabs(&self) -> Result<Vec<TabInfo>, String>;
    async fn set_muted(&self, tab_id: i32, muted: bool) -> Result<(), String>;
}

/// Host-provided persistence for the muted-domain list
#[allow(async_fn_in_trait)]
pub trait MuteStore {
    async fn load_domains(&self) -> Result<Vec<String>, String>;
    async fn save_domains(&self, domains: &[String]) -> Result<(), String>;
}

/// The authoritative mute state plus the host collaborators it drives.
///
/// Hosts are injected so the orchestration can be exercised against
/// in-memory fakes. All failures degrade to a log line; the registry never
/// propagates an error to its caller.
pub struct MuteRegistry<H, S> {
    set: RefCell<MuteSet>,
    tabs: H,
    store: S,
}

impl<H: TabHost, S: MuteStore> MuteRegistry<H, S> {
    pub fn new(tabs: H, store: S) -> Self {
        MuteRegistry {
            set: RefCell::new(MuteSet::new()),
            tabs,
            store,
        }
    }

    /// Merge the persisted domain list into the in-memory set. Additive:
    /// a failed or empty read never drops what is already in memory.
    pub async fn load(&self) {
        match self.store.load_domains().await {
            Ok(domains) => self.set.borrow_mut().merge(domains),
            Err(e) => warn!("Failed to load muted domains: {}", e),
        }
    }

    /// Persist the full current set, replacing stored content. No retry.
    pub async fn save(&self) {
        let domains = self.set.borrow().domains();
        if let Err(e) = self.store.save_domains(&domains).await {
            warn!("Failed to save muted domains: {}", e);
        }
    }

    /// Exact membership of a stored domain key
    pub fn contains(&self, domain: &str) -> bool {
        self.set.borrow().contains(domain)
    }

    /// Flip a domain's mute state, drive every matching open tab to the new
    /// state, then persist. The only mutating entry point.
    pub async fn toggle(&self, domain: &str) {
        let action = self.set.borrow_mut().toggle(domain);
        let muted = action == ToggleAction::Muted;
        self.apply_to_matching(domain, muted).await;
        self.save().await;
    }

    /// Auto-mute a navigated tab whose hostname matches a muted domain
    pub async fn apply_to_tab(&self, tab_id: i32, hostname: &str) {
        let should_mute = self.set.borrow().matches_hostname(hostname);
        if should_mute {
            if let Err(e) = self.tabs.set_muted(tab_id, true).await {
                warn!("Failed to mute tab {}: {}", tab_id, e);
            }
        }
    }

    /// Fan the per-tab updates out as independent futures with individually
    /// captured results, so one tab failing cannot strand the rest. Tabs
    /// already in the target state are left alone.
    async fn apply_to_matching(&self, domain: &str, muted: bool) {
        let tabs = match self.tabs.all_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!("Failed to enumerate tabs: {}", e);
                return;
            }
        };

        let updates = matching_tabs(&tabs, domain)
            .into_iter()
            .filter(|tab| tab.muted != muted)
            .map(|tab| async move { (tab.id, self.tabs.set_muted(tab.id, muted).await) });

        for (tab_id, result) in join_all(updates).await {
            if let Err(e) = result {
                warn!("Failed to update mute state of tab {}: {}", tab_id, e);
            }
        }
    }
}
