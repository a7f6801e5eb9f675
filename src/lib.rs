#![cfg(target_arch = "wasm32")]
use crate::config::PageConfig;
use crate::constants::{
    GLOBE_CONTAINER_ID, MUSIC_ROOT_ID, OVERLAY_ROOT_ID, SPARKLES_CONTAINER_ID,
};
use crate::events::Shortcut;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod config;
mod constants;
mod dom;
mod error;
mod events;
mod frame;
mod globe;
mod overlay;
mod sparkles;
mod state;

use audio::MusicWidget;
use dom::{EventListener, MountRoot};
use globe::GlobeWidget;
use overlay::{FullscreenButton, LinkButton};
use sparkles::SparklesWidget;

/// Everything mounted on the page. Dropping it tears every widget down.
struct Page {
    _globe: Option<GlobeWidget>,
    _sparkles: Option<SparklesWidget>,
    music: Option<MusicWidget>,
    _github: Option<LinkButton>,
    fullscreen: Option<FullscreenButton>,
    _keys: Option<EventListener>,
    // Declared last so widgets detach before their roots go away.
    _roots: [MountRoot; 2],
}

impl Drop for Page {
    fn drop(&mut self) {
        log::info!("[page] unmounting");
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    // Bumped on every unmount so a globe still initialising can tell it is stale.
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|slot| match slot.try_borrow() {
        Ok(page) => {
            if let Some(page) = page.as_ref() {
                f(page);
            }
        }
        Err(_) => log::warn!("[page] busy, input dropped"),
    });
}

fn on_shortcut(shortcut: Shortcut) {
    with_page(|page| match shortcut {
        Shortcut::ToggleMusic => {
            if let Some(music) = page.music.as_ref() {
                music.toggle();
            }
        }
        Shortcut::ToggleFullscreen => {
            if let Some(fullscreen) = page.fullscreen.as_ref() {
                fullscreen.toggle();
            }
        }
    });
}

/// Log a failed widget and keep the rest of the page going.
fn optional<T>(name: &str, result: Result<T, error::WidgetError>) -> Option<T> {
    match result {
        Ok(widget) => Some(widget),
        Err(e) => {
            log::error!("[page] {} unavailable: {}", name, e);
            None
        }
    }
}

fn read_config(document: &web::Document) -> PageConfig {
    let body = document.body();
    PageConfig::from_lookup(|key| {
        body.as_ref()
            .and_then(|b| b.get_attribute(&format!("data-{}", key)))
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glowbe starting");
    mount();
    Ok(())
}

/// Mount every widget. A second call while mounted is ignored.
#[wasm_bindgen]
pub fn mount() {
    let mounted = PAGE.with(|slot| slot.borrow().is_some());
    if mounted {
        log::warn!("[page] already mounted");
        return;
    }
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
}

/// Tear the page down: stop animation loops, pause the music, remove listeners
/// and the elements the widgets created.
#[wasm_bindgen]
pub fn unmount() {
    GENERATION.with(|g| g.set(g.get().wrapping_add(1)));
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = read_config(&document);
    document.set_title(&config.title);

    let sparkles = match document.get_element_by_id(SPARKLES_CONTAINER_ID) {
        Some(container) => optional(
            "sparkles",
            SparklesWidget::mount(&document, &container, config.sparkles.clone()),
        ),
        None => {
            log::warn!("[page] #{} not found, sparkles skipped", SPARKLES_CONTAINER_ID);
            None
        }
    };

    let music_root = dom::ensure_root(&document, MUSIC_ROOT_ID)?;
    let music = optional(
        "music",
        MusicWidget::mount(&document, music_root.element(), &config.music),
    );

    let overlay_root = dom::ensure_root(&document, OVERLAY_ROOT_ID)?;
    let github = if config.overlay.show_github {
        optional(
            "github link",
            LinkButton::mount(
                &document,
                overlay_root.element(),
                &config.overlay.github_url,
            ),
        )
    } else {
        None
    };
    let fullscreen = if config.overlay.show_fullscreen {
        optional(
            "fullscreen button",
            FullscreenButton::mount(&document, overlay_root.element()),
        )
    } else {
        None
    };

    let keys = optional("shortcuts", events::wire_shortcuts(&window, on_shortcut));

    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(Page {
            _globe: None,
            _sparkles: sparkles,
            music,
            _github: github,
            fullscreen,
            _keys: keys,
            _roots: [music_root, overlay_root],
        })
    });

    match document.get_element_by_id(GLOBE_CONTAINER_ID) {
        Some(container) => {
            let generation = GENERATION.with(Cell::get);
            let globe_config = config.globe;
            spawn_local(async move {
                let globe = match GlobeWidget::mount(&document, container, globe_config).await {
                    Ok(globe) => globe,
                    Err(e) => {
                        log::error!("[page] globe unavailable: {}", e);
                        return;
                    }
                };
                if GENERATION.with(Cell::get) != generation {
                    log::info!("[page] unmounted while the globe was starting");
                    return;
                }
                PAGE.with(|slot| {
                    if let Some(page) = slot.borrow_mut().as_mut() {
                        page._globe = Some(globe);
                    }
                });
            });
        }
        None => log::warn!("[page] #{} not found, globe skipped", GLOBE_CONTAINER_ID),
    }

    log::info!("[page] mounted");
    Ok(())
}
