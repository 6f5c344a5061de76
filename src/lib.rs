/// Site Muter - Chrome/Firefox extension background core
/// Built with Rust + WASM

mod bridge;
mod mute_set;
mod registry;
mod router;
mod tab_data;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use bridge::{BridgeStorage, BridgeTabs};
use registry::MuteRegistry;
use router::EventRouter;

type BackgroundRouter = EventRouter<BridgeTabs, BridgeStorage>;

thread_local! {
    // Process-lifetime root the exports dispatch through; all logic lives
    // behind the registry injected into the router.
    static ROUTER: Rc<BackgroundRouter> = Rc::new(EventRouter::new(MuteRegistry::new(
        BridgeTabs,
        BridgeStorage,
    )));
}

fn router() -> Rc<BackgroundRouter> {
    ROUTER.with(|router| router.clone())
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Called once by background.js when the background script starts
#[wasm_bindgen]
pub fn background_init() {
    let router = router();
    spawn_local(async move {
        router.handle_startup().await;
    });
}

// Tab navigation/update event carrying the tab's URL
#[wasm_bindgen]
pub fn on_tab_updated(tab_id: i32, url: String) {
    let router = router();
    spawn_local(async move {
        router.handle_tab_updated(tab_id, &url).await;
    });
}

// Label for the context-menu entry over the tab with this URL
#[wasm_bindgen]
pub fn menu_label(url: &str) -> String {
    router().menu_label(url).to_string()
}

// Context-menu click on the tab with this URL
#[wasm_bindgen]
pub fn on_menu_clicked(url: String) {
    let router = router();
    spawn_local(async move {
        router.handle_menu_click(&url).await;
    });
}
