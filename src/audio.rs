use crate::config::MusicConfig;
use crate::dom::{self, EventListener};
use crate::error::{PlaybackError, WidgetError};
use crate::events;
use crate::state::{MediaCommand, MediaEvent, PlaybackController, Rendered, VisualizerMode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const PLAY_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="currentColor"><path d="M8 5.14v14l11-7-11-7z"/></svg>"#;
const PAUSE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="currentColor"><path d="M6 4h4v16H6V4zm8 0h4v16h-4V4z"/></svg>"#;
const VISUALIZER_BARS: usize = 4;

struct MusicInner {
    controller: PlaybackController,
    audio: web::HtmlAudioElement,
    toggle: web::HtmlElement,
    visualizer: web::HtmlElement,
    icon: Rendered<bool>,
}

impl MusicInner {
    fn render(&mut self) {
        let state = self.controller.state();
        _ = self
            .toggle
            .set_attribute("aria-label", self.controller.aria_label());
        dom::set_class(&self.toggle, "is-playing", state.is_playing);
        let glow = self.controller.glow_class();
        for class in ["glow-hover", "glow-soft", "glow-strong"] {
            dom::set_class(&self.toggle, class, class == glow);
        }
        if self.icon.update(state.is_playing) {
            self.toggle
                .set_inner_html(if state.is_playing { PAUSE_ICON } else { PLAY_ICON });
        }
        let animated = self.controller.visualizer() == VisualizerMode::Animated;
        dom::set_class(&self.visualizer, "animated", animated);
        dom::set_class(&self.visualizer, "static", !animated);
    }
}

fn playback_error(err: &JsValue) -> PlaybackError {
    match err.dyn_ref::<web::DomException>() {
        Some(ex) => PlaybackError::from_dom(&ex.name(), &ex.message()),
        None => PlaybackError::Other(dom::js_error(err)),
    }
}

/// Run one controller command against the audio element. Must be called
/// without an outstanding borrow of `inner`.
fn dispatch(inner: &Rc<RefCell<MusicInner>>, cmd: MediaCommand) {
    let audio = inner.borrow().audio.clone();
    match cmd {
        MediaCommand::SetVolume(v) => audio.set_volume(v),
        MediaCommand::Pause => {
            if let Err(e) = audio.pause() {
                log::warn!("[music] pause failed: {}", dom::js_error(&e));
            }
        }
        MediaCommand::Play => {
            let attempt = inner.borrow().controller.play_attempt();
            match audio.play() {
                Ok(promise) => {
                    let weak = Rc::downgrade(inner);
                    spawn_local(async move {
                        let result = JsFuture::from(promise)
                            .await
                            .map(|_| ())
                            .map_err(|e| playback_error(&e));
                        if let Some(inner) = weak.upgrade() {
                            let mut inner = inner.borrow_mut();
                            inner.controller.play_settled(attempt, result);
                            inner.render();
                        }
                    });
                }
                Err(e) => {
                    let mut inner = inner.borrow_mut();
                    inner
                        .controller
                        .play_settled(attempt, Err(playback_error(&e)));
                    inner.render();
                }
            }
        }
    }
}

fn toggle_playback(inner: &Rc<RefCell<MusicInner>>) {
    let cmd = inner.borrow_mut().controller.toggle();
    if let Some(cmd) = cmd {
        dispatch(inner, cmd);
    }
    inner.borrow_mut().render();
}

/// Background music control: a looping `<audio>` element, a glowing
/// play/pause button, and a decorative bars button that mirrors playback.
pub struct MusicWidget {
    inner: Rc<RefCell<MusicInner>>,
    root: web::Element,
    _listeners: Vec<EventListener>,
}

impl MusicWidget {
    pub fn mount(
        document: &web::Document,
        parent: &web::Element,
        config: &MusicConfig,
    ) -> Result<Self, WidgetError> {
        let root: web::Element = dom::create_element(document, "div", "music-control")?;
        let audio = web::HtmlAudioElement::new_with_src(&config.src).map_err(dom::dom_err)?;
        audio.set_loop(true);
        audio.set_preload("auto");

        let toggle: web::HtmlElement = dom::create_element(document, "button", "music-toggle")?;
        _ = toggle.set_attribute("type", "button");

        let visualizer: web::HtmlElement =
            dom::create_element(document, "button", "music-visualizer")?;
        _ = visualizer.set_attribute("type", "button");
        _ = visualizer.set_attribute("aria-hidden", "true");
        _ = visualizer.set_attribute("tabindex", "-1");
        visualizer.set_inner_html(&r#"<span class="bar"></span>"#.repeat(VISUALIZER_BARS));

        root.append_child(&audio).map_err(dom::dom_err)?;
        root.append_child(&toggle).map_err(dom::dom_err)?;
        root.append_child(&visualizer).map_err(dom::dom_err)?;
        parent.append_child(&root).map_err(dom::dom_err)?;

        let inner = Rc::new(RefCell::new(MusicInner {
            controller: PlaybackController::new(config.autoplay),
            audio: audio.clone(),
            toggle: toggle.clone(),
            visualizer,
            icon: Rendered::default(),
        }));

        let mut listeners = Vec::with_capacity(5);
        for (name, event) in [("play", MediaEvent::Played), ("pause", MediaEvent::Paused)] {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(&audio, name, move |_| {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.controller.media_event(event);
                    inner.render();
                }
            })?);
        }
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    toggle_playback(&inner);
                }
            })?);
        }
        {
            let weak = Rc::downgrade(&inner);
            listeners.extend(events::wire_hover(&toggle, move |hovered| {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.controller.set_hovered(hovered);
                    inner.render();
                }
            })?);
        }

        let cmds = inner.borrow_mut().controller.mount();
        for cmd in cmds {
            dispatch(&inner, cmd);
        }
        inner.borrow_mut().render();
        log::info!(
            "[music] mounted src={} autoplay={}",
            config.src,
            config.autoplay
        );

        Ok(Self {
            inner,
            root,
            _listeners: listeners,
        })
    }

    pub fn toggle(&self) {
        toggle_playback(&self.inner);
    }
}

impl Drop for MusicWidget {
    fn drop(&mut self) {
        let cmd = self.inner.borrow_mut().controller.unmount();
        if let Some(cmd) = cmd {
            dispatch(&self.inner, cmd);
        }
        self.root.remove();
        log::info!("[music] unmounted");
    }
}
