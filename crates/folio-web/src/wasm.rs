#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the portfolio page.
//!
//! This module wraps [`folio_core::PortfolioCore`] with DOM discovery, event
//! listeners, a patch applier and one cancellable toast timer. Only compiled
//! on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use folio_core::dom::names;
use folio_core::{
    ContactSubmission, DomPatch, DomTarget, FilterButtonSpec, FolioConfig, NavBindings,
    PageBindings, PortfolioCore, SectionExtent, ShowcaseBindings, ToastId, ToastKind,
};
use js_sys::Array;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};
use web_time::Instant;

use crate::{host, logging};

type Listener = Closure<dyn FnMut(Event)>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;
type Slot = Rc<RefCell<Option<Shell>>>;
type WeakSlot = Weak<RefCell<Option<Shell>>>;

fn console_log(line: &str) {
    web_sys::console::log_1(&JsValue::from_str(line));
}

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn install_logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        logging::install(console_log, logging::default_level());
    });
}

fn element(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn read_submission(form: &HtmlFormElement) -> ContactSubmission {
    let input = |selector: &str| {
        form.query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default()
    };
    let message = form
        .query_selector("textarea")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default();
    ContactSubmission {
        name: input("input[type=\"text\"]"),
        email: input("input[type=\"email\"]"),
        message,
    }
}

/// Elements the shell reads from and writes to.
struct PageElements {
    window: Window,
    document: Document,
    nav_menu: Option<Element>,
    nav_container: Option<Element>,
    nav_links: Vec<Element>,
    mobile_toggle: Option<Element>,
    grid: Option<Element>,
    form: Option<HtmlFormElement>,
    cta: Option<Element>,
    projects: Option<Element>,
    sections: Vec<Element>,
    filter_buttons: Vec<Element>,
    cards: Vec<Element>,
    toasts: HashMap<ToastId, Element>,
}

impl PageElements {
    fn discover(window: Window, document: Document) -> Self {
        Self {
            nav_menu: element(&document, names::NAV_MENU),
            nav_container: element(&document, names::NAV_CONTAINER),
            nav_links: elements(&document, names::NAV_LINK),
            mobile_toggle: None,
            grid: document.get_element_by_id(names::PROJECT_GRID_ID),
            form: document
                .get_element_by_id(names::CONTACT_FORM_ID)
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
            cta: document.get_element_by_id(names::CTA_BUTTON_ID),
            projects: document.get_element_by_id(names::PROJECTS_SECTION_ID),
            sections: elements(&document, names::SECTION),
            filter_buttons: Vec::new(),
            cards: Vec::new(),
            toasts: HashMap::new(),
            window,
            document,
        }
    }

    fn bindings(&self) -> PageBindings {
        PageBindings {
            nav: NavBindings {
                has_menu: self.nav_menu.is_some(),
                has_container: self.nav_container.is_some(),
                link_hrefs: self
                    .nav_links
                    .iter()
                    .map(|link| link.get_attribute("href").unwrap_or_default())
                    .collect(),
            },
            showcase: ShowcaseBindings {
                has_grid: self.grid.is_some(),
                has_contact_form: self.form.is_some(),
                has_cta: self.cta.is_some(),
                has_projects_section: self.projects.is_some(),
            },
            section_count: self.sections.len(),
        }
    }

    fn resolve(&self, target: &DomTarget) -> Option<Element> {
        match target {
            DomTarget::NavMenu => self.nav_menu.clone(),
            DomTarget::MobileToggle => self.mobile_toggle.clone(),
            DomTarget::NavLink(i) => self.nav_links.get(*i).cloned(),
            DomTarget::FilterButton(i) => self.filter_buttons.get(*i).cloned(),
            DomTarget::ProjectCard(i) => self.cards.get(*i).cloned(),
            DomTarget::ProjectGrid => self.grid.clone(),
            DomTarget::ById(id) => self.document.get_element_by_id(id),
            DomTarget::Section(i) => self.sections.get(*i).cloned(),
            DomTarget::Toast(id) => self.toasts.get(id).cloned(),
        }
    }

    /// Live `section[id]` geometry in document coordinates.
    fn section_extents(&self) -> Vec<SectionExtent> {
        elements(&self.document, names::SECTION_WITH_ID)
            .into_iter()
            .filter_map(|el| {
                let id = el.get_attribute("id")?;
                let html = el.dyn_into::<HtmlElement>().ok()?;
                Some(SectionExtent::new(
                    id,
                    f64::from(html.offset_top()),
                    f64::from(html.offset_height()),
                ))
            })
            .collect()
    }
}

/// Run `f` against the mounted shell, then apply patches and re-arm the
/// timer. Events arriving while the shell is already borrowed are dropped.
fn with_shell(weak: &WeakSlot, f: impl FnOnce(&mut Shell)) {
    let Some(slot) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        warn!(target: "folio.web", "re-entrant DOM event dropped");
        return;
    };
    if let Some(shell) = guard.as_mut() {
        shell.sync_clock();
        f(shell);
        shell.flush();
    }
}

fn listen(
    weak: &WeakSlot,
    target: &EventTarget,
    kind: &'static str,
    handler: impl Fn(&mut Shell, &Event) + 'static,
) -> Option<Listener> {
    let weak = weak.clone();
    let closure = Listener::new(move |event: Event| {
        with_shell(&weak, |shell| handler(shell, &event));
    });
    match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        Ok(()) => Some(closure),
        Err(err) => {
            warn!(target: "folio.web", kind, error = ?err, "addEventListener failed");
            None
        }
    }
}

/// Mounted page state. Dropping it unhooks every listener.
struct Shell {
    core: PortfolioCore,
    page: PageElements,
    this: WeakSlot,
    started: Instant,
    timer: Option<i32>,
    timer_callback: Option<Closure<dyn FnMut()>>,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
}

impl Shell {
    fn boot(slot: &Slot, config: FolioConfig) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let page = PageElements::discover(window, document);
        let mut core = PortfolioCore::new(config, page.bindings());
        core.init();

        let this = Rc::downgrade(slot);
        let timer_weak = this.clone();
        let timer_callback = Closure::<dyn FnMut()>::new(move || {
            with_shell(&timer_weak, |shell| {
                shell.timer = None;
            });
        });

        let mut shell = Self {
            core,
            page,
            this,
            started: Instant::now(),
            timer: None,
            timer_callback: Some(timer_callback),
            listeners: Vec::new(),
            observer: None,
        };
        shell.apply_pending();
        shell.page.cards = elements(&shell.page.document, names::PROJECT_CARD);
        shell.bind_all();
        shell.observe_sections();
        shell.flush();

        info!(
            target: "folio.web",
            nav_links = shell.page.nav_links.len(),
            cards = shell.page.cards.len(),
            sections = shell.page.sections.len(),
            listeners = shell.listeners.len(),
            "portfolio app mounted"
        );
        *slot.borrow_mut() = Some(shell);
        Ok(())
    }

    fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn sync_clock(&mut self) {
        let now = self.elapsed_ms();
        self.core.set_time_ms(now);
    }

    fn bind(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl Fn(&mut Shell, &Event) + 'static,
    ) {
        if let Some(listener) = listen(&self.this, target, kind, handler) {
            self.listeners.push((target.clone(), kind, listener));
        }
    }

    fn bind_all(&mut self) {
        let window = self.page.window.clone();
        self.bind(&window, "scroll", |shell, _| shell.on_scroll());

        if let Some(toggle) = self.page.mobile_toggle.clone() {
            self.bind(&toggle, "click", |shell, _| {
                if let Err(err) = shell.core.toggle_mobile_menu() {
                    warn!(target: "folio.web", error = %err, "menu toggle rejected");
                }
            });
        }

        for (index, link) in self.page.nav_links.clone().into_iter().enumerate() {
            self.bind(&link, "click", move |shell, _| {
                if let Err(err) = shell.core.click_nav_link(index) {
                    warn!(target: "folio.web", error = %err, "nav click rejected");
                }
            });
        }

        for (index, card) in self.page.cards.clone().into_iter().enumerate() {
            for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
                self.bind(&card, kind, move |shell, _| {
                    if let Err(err) = shell.core.hover_card(index, entered) {
                        warn!(target: "folio.web", error = %err, "hover rejected");
                    }
                });
            }
        }

        for (index, button) in self.page.filter_buttons.clone().into_iter().enumerate() {
            self.bind(&button, "click", move |shell, _| {
                if let Err(err) = shell.core.select_filter(index) {
                    warn!(target: "folio.web", error = %err, "filter click rejected");
                }
            });
        }

        if let Some(form) = self.page.form.clone() {
            self.bind(&form, "submit", |shell, event| shell.on_submit(event));
        }

        if let Some(cta) = self.page.cta.clone() {
            self.bind(&cta, "click", |shell, _| {
                if let Err(err) = shell.core.click_cta() {
                    warn!(target: "folio.web", error = %err, "cta click rejected");
                }
            });
        }

        // Anchors are collected after rendering so card links are included.
        for anchor in elements(&self.page.document, names::IN_PAGE_ANCHOR) {
            let href_source = anchor.clone();
            self.bind(&anchor, "click", move |shell, event| {
                let href = href_source.get_attribute("href").unwrap_or_default();
                shell.on_anchor(&href, event);
            });
        }
    }

    fn observe_sections(&mut self) {
        if self.page.sections.is_empty() {
            return;
        }
        let reveal = &self.core.config().reveal;
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(reveal.threshold));
        init.set_root_margin(&reveal.root_margin_css());

        let weak = self.this.clone();
        let callback = ObserverCallback::new(move |entries: Array, _observer: IntersectionObserver| {
            with_shell(&weak, |shell| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if let Some(index) = shell.page.sections.iter().position(|s| *s == target) {
                        shell.core.section_intersecting(index, entry.is_intersecting());
                    }
                }
            });
        });

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for section in &self.page.sections {
                    observer.observe(section);
                }
                self.observer = Some((observer, callback));
            }
            Err(err) => {
                warn!(target: "folio.web", error = ?err, "IntersectionObserver unavailable; revealing by geometry");
                self.reveal_by_geometry();
            }
        }
    }

    fn reveal_by_geometry(&mut self) {
        let Some(viewport) = self
            .page
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
        else {
            return;
        };
        for (index, section) in self.page.sections.clone().iter().enumerate() {
            let rect = section.get_bounding_client_rect();
            self.core
                .section_geometry(index, rect.top(), rect.height(), viewport);
        }
    }

    fn on_scroll(&mut self) {
        let Ok(scroll_y) = self.page.window.scroll_y() else {
            return;
        };
        let sections = self.page.section_extents();
        self.core.on_scroll(scroll_y, &sections);
        if self.observer.is_none() {
            self.reveal_by_geometry();
        }
    }

    fn on_submit(&mut self, event: &Event) {
        event.prevent_default();
        let Some(form) = self.page.form.as_ref() else {
            return;
        };
        let submission = read_submission(form);
        match self.core.submit_contact(&submission) {
            Ok(Some(receipt)) => {
                debug!(target: "folio.web", toast = receipt.toast.get(), "contact submit handled");
            }
            Ok(None) => {}
            Err(err) => warn!(target: "folio.web", error = %err, "contact submit rejected"),
        }
    }

    fn on_anchor(&mut self, href: &str, event: &Event) {
        let Self { core, page, .. } = self;
        let outcome = core.click_anchor(href, |id| page.document.get_element_by_id(id).is_some());
        if outcome.is_some_and(|o| o.prevent_default) {
            event.prevent_default();
        }
    }

    // ---------------------------------------------------------------------
    // Patch application
    // ---------------------------------------------------------------------

    fn flush(&mut self) {
        self.apply_pending();
        self.schedule_timer();
    }

    fn apply_pending(&mut self) {
        for patch in self.core.take_patches() {
            self.apply(patch);
        }
    }

    fn apply(&mut self, patch: DomPatch) {
        match patch {
            DomPatch::AddClass { target, class } => {
                if let Some(el) = self.page.resolve(&target) {
                    let _ = el.class_list().add_1(class);
                }
            }
            DomPatch::RemoveClass { target, class } => {
                if let Some(el) = self.page.resolve(&target) {
                    let _ = el.class_list().remove_1(class);
                }
            }
            DomPatch::SetVisible { target, visible } => {
                if let Some(el) = self
                    .page
                    .resolve(&target)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = el
                        .style()
                        .set_property("display", host::display_value(visible));
                }
            }
            DomPatch::SetInnerHtml { target, html } => {
                if let Some(el) = self.page.resolve(&target) {
                    el.set_inner_html(&html);
                }
            }
            DomPatch::MountMobileToggle => self.mount_toggle(),
            DomPatch::MountFilterBar { buttons } => self.mount_filter_bar(&buttons),
            DomPatch::ScrollIntoView {
                target,
                smooth,
                align_start,
            } => {
                if let Some(el) = self.page.resolve(&target) {
                    let options = ScrollIntoViewOptions::new();
                    if smooth {
                        options.set_behavior(ScrollBehavior::Smooth);
                    }
                    if align_start {
                        options.set_block(ScrollLogicalPosition::Start);
                    }
                    el.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
            DomPatch::AppendToast { id, text, kind } => self.append_toast(id, &text, kind),
            DomPatch::RemoveToast { id } => {
                if let Some(el) = self.page.toasts.remove(&id) {
                    el.remove();
                }
            }
            DomPatch::ResetForm => {
                if let Some(form) = &self.page.form {
                    form.reset();
                }
            }
        }
    }

    fn mount_toggle(&mut self) {
        let Some(container) = self.page.nav_container.clone() else {
            return;
        };
        let Ok(button) = self.page.document.create_element("button") else {
            return;
        };
        button.set_class_name(names::MOBILE_TOGGLE);
        button.set_text_content(Some(names::MOBILE_TOGGLE_GLYPH));
        if container.append_child(&button).is_ok() {
            self.page.mobile_toggle = Some(button);
        }
    }

    fn mount_filter_bar(&mut self, buttons: &[FilterButtonSpec]) {
        let document = self.page.document.clone();
        let Ok(bar) = document.create_element("div") else {
            return;
        };
        bar.set_class_name(names::FILTER_CONTAINER);
        for spec in buttons {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            button.set_class_name(&host::filter_button_class(spec.active));
            button.set_text_content(Some(&spec.label));
            let _ = bar.append_child(&button);
            self.page.filter_buttons.push(button);
        }
        if let Some(grid) = &self.page.grid {
            if let Some(parent) = grid.parent_node() {
                let _ = parent.insert_before(&bar, Some(grid));
            }
        }
    }

    fn append_toast(&mut self, id: ToastId, text: &str, kind: ToastKind) {
        let Some(body) = self.page.document.body() else {
            return;
        };
        let Ok(toast) = self.page.document.create_element("div") else {
            return;
        };
        toast.set_class_name(&host::toast_class(kind));
        toast.set_text_content(Some(text));
        if body.append_child(&toast).is_err() {
            return;
        }
        self.page.toasts.insert(id, toast);
    }

    /// Re-arm the single toast timer for the earliest pending transition.
    fn schedule_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.page.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = self.core.next_deadline_ms() else {
            return;
        };
        let Some(callback) = self.timer_callback.as_ref() else {
            return;
        };
        let delay = host::timer_delay_ms(deadline, self.elapsed_ms());
        match self
            .page
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(handle) => self.timer = Some(handle),
            Err(err) => warn!(target: "folio.web", error = ?err, "setTimeout failed"),
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.page.window.clear_timeout_with_handle(handle);
        }
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
        for (target, kind, listener) in &self.listeners {
            let _ = target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

/// Portfolio page controller exported to JavaScript.
///
/// Construct once per page with [`PortfolioApp::mount`] and keep the handle
/// alive; freeing it unhooks every listener.
#[wasm_bindgen]
pub struct PortfolioApp {
    slot: Slot,
    ready: Option<(Document, Listener)>,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PortfolioApp {
    /// Bind to the current document. If the DOM is still loading, binding is
    /// deferred to `DOMContentLoaded`.
    ///
    /// `config_json` is an optional `FolioConfig` JSON object; invalid
    /// configs are logged and replaced by defaults.
    pub fn mount(config_json: Option<String>) -> Result<PortfolioApp, JsValue> {
        install_panic_hook();
        install_logging();
        let config = host::load_config(config_json.as_deref());
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let slot: Slot = Rc::new(RefCell::new(None));

        if document.ready_state() != "loading" {
            Shell::boot(&slot, config)?;
            return Ok(Self { slot, ready: None });
        }

        let weak = Rc::downgrade(&slot);
        let ready = Listener::new(move |_event: Event| {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            if slot.borrow().is_some() {
                return;
            }
            if let Err(err) = Shell::boot(&slot, config.clone()) {
                console_error(&format!("portfolio mount failed: {err:?}"));
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
        debug!(target: "folio.web", "mount deferred until DOMContentLoaded");
        Ok(Self {
            slot,
            ready: Some((document, ready)),
        })
    }

    /// Whether the page has been bound.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// JSON snapshot of the observable page state, or `undefined` before
    /// mounting.
    pub fn snapshot(&self) -> Option<String> {
        let guard = self.slot.try_borrow().ok()?;
        let shell = guard.as_ref()?;
        match shell.core.snapshot_json() {
            Ok(json) => Some(json),
            Err(err) => {
                warn!(target: "folio.web", error = %err, "snapshot failed");
                None
            }
        }
    }

    /// Show a toast. Returns `false` before mounting.
    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(&self, text: String, is_error: bool) -> bool {
        let kind = if is_error {
            ToastKind::Error
        } else {
            ToastKind::Success
        };
        let mut shown = false;
        with_shell(&Rc::downgrade(&self.slot), |shell| {
            shell.core.notify(text, kind);
            shown = true;
        });
        shown
    }
}

impl Drop for PortfolioApp {
    fn drop(&mut self) {
        if let Some((document, ready)) = &self.ready {
            let _ = document
                .remove_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref());
        }
    }
}
