/// Event routing: maps host events onto mute registry operations
use crate::mute_set::hostname_of;
use crate::registry::{MuteRegistry, MuteStore, TabHost};

pub const MUTE_LABEL: &str = "Mute this site";
pub const UNMUTE_LABEL: &str = "Unmute this site";
/// Shown when the tab's URL has no usable hostname
pub const FALLBACK_LABEL: &str = "Mute/Unmute site";

/// Reactive dispatcher for the four host events: startup, tab update, menu
/// show, menu click. Unparsable URLs make a handler no-op (or fall back to
/// the generic label); they never propagate.
pub struct EventRouter<H, S> {
    registry: MuteRegistry<H, S>,
}

impl<H: TabHost, S: MuteStore> EventRouter<H, S> {
    pub fn new(registry: MuteRegistry<H, S>) -> Self {
        EventRouter { registry }
    }

    /// Startup: pull the persisted domain list into memory
    pub async fn handle_startup(&self) {
        self.registry.load().await;
    }

    /// A tab navigated or its URL became available: auto-mute it when its
    /// hostname matches a muted domain
    pub async fn handle_tab_updated(&self, tab_id: i32, url: &str) {
        if let Some(hostname) = hostname_of(url) {
            self.registry.apply_to_tab(tab_id, &hostname).await;
        }
    }

    /// Menu label for the tab under the cursor. Membership here is the
    /// exact hostname key, not the substring tab-matching policy.
    pub fn menu_label(&self, url: &str) -> &'static str {
        match hostname_of(url) {
            Some(hostname) if self.registry.contains(&hostname) => UNMUTE_LABEL,
            Some(_) => MUTE_LABEL,
            None => FALLBACK_LABEL,
        }
    }

    /// Menu click: toggle the clicked tab's hostname
    pub async fn handle_menu_click(&self, url: &str) {
        if let Some(hostname) = hostname_of(url) {
            self.registry.toggle(&hostname).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_data::TabInfo;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeTabs {
        tabs: RefCell<Vec<TabInfo>>,
        calls: RefCell<Vec<(i32, bool)>>,
    }

    impl TabHost for &FakeTabs {
        async fn all_tabs(&self) -> Result<Vec<TabInfo>, String> {
            Ok(self.tabs.borrow().clone())
        }

        async fn set_muted(&self, tab_id: i32, muted: bool) -> Result<(), String> {
            self.calls.borrow_mut().push((tab_id, muted));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        domains: RefCell<Vec<String>>,
    }

    impl MuteStore for &FakeStore {
        async fn load_domains(&self) -> Result<Vec<String>, String> {
            Ok(self.domains.borrow().clone())
        }

        async fn save_domains(&self, domains: &[String]) -> Result<(), String> {
            *self.domains.borrow_mut() = domains.to_vec();
            Ok(())
        }
    }

    fn create_router<'a>(
        tabs: &'a FakeTabs,
        store: &'a FakeStore,
    ) -> EventRouter<&'a FakeTabs, &'a FakeStore> {
        EventRouter::new(MuteRegistry::new(tabs, store))
    }

    #[test]
    fn test_startup_loads_persisted_domains() {
        let tabs = FakeTabs::default();
        let store = FakeStore {
            domains: RefCell::new(vec!["youtube.com".to_string()]),
        };
        let router = create_router(&tabs, &store);

        block_on(router.handle_startup());

        assert_eq!(router.menu_label("https://youtube.com/watch"), UNMUTE_LABEL);
    }

    #[test]
    fn test_menu_click_toggles_hostname() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        block_on(router.handle_menu_click("https://www.reddit.com/r/rust"));

        assert_eq!(
            *store.domains.borrow(),
            vec!["www.reddit.com".to_string()]
        );
    }

    #[test]
    fn test_menu_click_with_unparsable_url_is_a_no_op() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        block_on(router.handle_menu_click("about:blank"));

        assert!(store.domains.borrow().is_empty());
        assert!(tabs.calls.borrow().is_empty());
    }

    #[test]
    fn test_menu_label_tracks_exact_membership() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        assert_eq!(router.menu_label("https://www.youtube.com"), MUTE_LABEL);

        block_on(router.handle_menu_click("https://www.youtube.com"));
        assert_eq!(router.menu_label("https://www.youtube.com"), UNMUTE_LABEL);

        // Exact key check: a sibling hostname is not a member even though
        // tab matching would catch it
        assert_eq!(router.menu_label("https://music.youtube.com"), MUTE_LABEL);
    }

    #[test]
    fn test_menu_label_falls_back_on_parse_failure() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        assert_eq!(router.menu_label("about:blank"), FALLBACK_LABEL);
        assert_eq!(router.menu_label(""), FALLBACK_LABEL);
    }

    #[test]
    fn test_tab_update_auto_mutes_matching_tab() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        block_on(router.handle_menu_click("https://youtube.com"));
        tabs.calls.borrow_mut().clear();

        block_on(router.handle_tab_updated(9, "https://music.youtube.com/playlist"));

        assert_eq!(*tabs.calls.borrow(), vec![(9, true)]);
    }

    #[test]
    fn test_tab_update_with_unparsable_url_changes_nothing() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        block_on(router.handle_menu_click("https://youtube.com"));
        tabs.calls.borrow_mut().clear();

        block_on(router.handle_tab_updated(9, "not a url"));

        assert!(tabs.calls.borrow().is_empty());
        assert_eq!(router.menu_label("https://youtube.com"), UNMUTE_LABEL);
    }

    #[test]
    fn test_tab_update_ignores_unmuted_domain() {
        let tabs = FakeTabs::default();
        let store = FakeStore::default();
        let router = create_router(&tabs, &store);

        block_on(router.handle_tab_updated(9, "https://github.com"));

        assert!(tabs.calls.borrow().is_empty());
    }
}
