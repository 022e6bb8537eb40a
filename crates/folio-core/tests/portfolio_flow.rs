#![forbid(unsafe_code)]

//! End-to-end page flows against `PortfolioCore`.
//!
//! A tiny in-memory page model applies the emitted patches so assertions can
//! be written against resulting class sets rather than raw patch lists.
//!
//! Run:
//!   cargo test -p folio-core --test portfolio_flow

use std::collections::{BTreeMap, BTreeSet};

use folio_core::dom::names;
use folio_core::{
    ContactSubmission, DomPatch, DomTarget, FolioConfig, NavBindings, PageBindings,
    PortfolioCore, SectionExtent, ShowcaseBindings, ToastKind,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct FakePage {
    classes: BTreeMap<String, BTreeSet<&'static str>>,
    hidden: BTreeSet<String>,
    grid_html: Option<String>,
    filter_labels: Vec<String>,
    toggle_mounted: bool,
    toasts: BTreeMap<u64, (String, ToastKind)>,
    scrolled_to: Vec<String>,
    form_resets: usize,
}

fn key(target: &DomTarget) -> String {
    serde_json::to_string(target).expect("target serializes")
}

impl FakePage {
    fn apply(&mut self, patches: Vec<DomPatch>) {
        for patch in patches {
            match patch {
                DomPatch::AddClass { target, class } => {
                    self.classes.entry(key(&target)).or_default().insert(class);
                }
                DomPatch::RemoveClass { target, class } => {
                    self.classes.entry(key(&target)).or_default().remove(class);
                }
                DomPatch::SetVisible { target, visible } => {
                    if visible {
                        self.hidden.remove(&key(&target));
                    } else {
                        self.hidden.insert(key(&target));
                    }
                }
                DomPatch::SetInnerHtml { html, .. } => self.grid_html = Some(html),
                DomPatch::MountMobileToggle => self.toggle_mounted = true,
                DomPatch::MountFilterBar { buttons } => {
                    for (i, b) in buttons.iter().enumerate() {
                        if b.active {
                            self.classes
                                .entry(key(&DomTarget::FilterButton(i)))
                                .or_default()
                                .insert(names::ACTIVE);
                        }
                    }
                    self.filter_labels = buttons.into_iter().map(|b| b.label).collect();
                }
                DomPatch::ScrollIntoView { target, .. } => {
                    if let DomTarget::ById(id) = target {
                        self.scrolled_to.push(id);
                    }
                }
                DomPatch::AppendToast { id, text, kind } => {
                    self.toasts.insert(id.get(), (text, kind));
                }
                DomPatch::RemoveToast { id } => {
                    self.toasts.remove(&id.get());
                }
                DomPatch::ResetForm => self.form_resets += 1,
            }
        }
    }

    fn has(&self, target: &DomTarget, class: &str) -> bool {
        self.classes
            .get(&key(target))
            .is_some_and(|set| set.contains(class))
    }

    fn active_filters(&self) -> Vec<usize> {
        (0..self.filter_labels.len())
            .filter(|i| self.has(&DomTarget::FilterButton(*i), names::ACTIVE))
            .collect()
    }

    fn visible_cards(&self, count: usize) -> Vec<usize> {
        (0..count)
            .filter(|i| !self.hidden.contains(&key(&DomTarget::ProjectCard(*i))))
            .collect()
    }

    fn active_links(&self, count: usize) -> Vec<usize> {
        (0..count)
            .filter(|i| self.has(&DomTarget::NavLink(*i), names::ACTIVE))
            .collect()
    }
}

fn page() -> PageBindings {
    PageBindings {
        nav: NavBindings {
            has_menu: true,
            has_container: true,
            link_hrefs: vec![
                "#home".into(),
                "#about".into(),
                "#projects".into(),
                "#contact".into(),
            ],
        },
        showcase: ShowcaseBindings {
            has_grid: true,
            has_contact_form: true,
            has_cta: true,
            has_projects_section: true,
        },
        section_count: 4,
    }
}

fn sections() -> Vec<SectionExtent> {
    vec![
        SectionExtent::new("home", 0.0, 700.0),
        SectionExtent::new("about", 700.0, 500.0),
        SectionExtent::new("projects", 1200.0, 900.0),
        SectionExtent::new("contact", 2100.0, 600.0),
    ]
}

fn booted() -> (PortfolioCore, FakePage) {
    let mut core = PortfolioCore::new(FolioConfig::default(), page());
    core.init();
    let mut fake = FakePage::default();
    fake.apply(core.take_patches());
    (core, fake)
}

#[test]
fn boot_renders_grid_filters_and_toggle() {
    let (core, fake) = booted();
    assert!(fake.toggle_mounted);
    let html = fake.grid_html.as_deref().expect("grid rendered");
    assert_eq!(html.matches("class=\"project-card\"").count(), 3);
    assert_eq!(fake.filter_labels.first().map(String::as_str), Some("All"));
    assert_eq!(fake.active_filters(), vec![0]);
    assert_eq!(core.showcase().card_count(), 3);
}

#[test]
fn scrolling_inside_each_section_highlights_its_link() {
    let (mut core, mut fake) = booted();
    for (expected, scroll_y) in [(0, 0.0), (1, 650.0), (2, 1500.0), (3, 2200.0)] {
        core.on_scroll(scroll_y, &sections());
        fake.apply(core.take_patches());
        assert_eq!(fake.active_links(4), vec![expected], "scroll_y={scroll_y}");
    }
}

#[test]
fn all_filter_restores_every_card() {
    let (mut core, mut fake) = booted();
    let vue = fake
        .filter_labels
        .iter()
        .position(|l| l == "Vue.js")
        .expect("vue button");

    core.select_filter(vue).unwrap();
    fake.apply(core.take_patches());
    assert_eq!(fake.visible_cards(3), vec![1]);
    assert_eq!(fake.active_filters(), vec![vue]);
    assert!(!fake.has(&DomTarget::ProjectCard(0), names::FADE_IN));
    assert!(fake.has(&DomTarget::ProjectCard(1), names::FADE_IN));

    core.select_filter(0).unwrap();
    fake.apply(core.take_patches());
    assert_eq!(fake.visible_cards(3), vec![0, 1, 2]);
    assert_eq!(fake.active_filters(), vec![0]);
}

#[test]
fn every_tag_filter_shows_exactly_the_substring_matches() {
    let (mut core, mut fake) = booted();
    let keys: Vec<String> = core
        .showcase()
        .catalog()
        .projects()
        .iter()
        .map(|p| p.technology_key())
        .collect();

    for (index, label) in fake.filter_labels.clone().into_iter().enumerate().skip(1) {
        core.select_filter(index).unwrap();
        fake.apply(core.take_patches());
        let tag = label.to_lowercase();
        let expected: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.contains(&tag))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fake.visible_cards(3), expected, "filter {label}");
        assert_eq!(fake.active_filters(), vec![index]);
    }
}

#[test]
fn contact_submit_toasts_success_and_clears_form() {
    let (mut core, mut fake) = booted();
    let receipt = core
        .submit_contact(&ContactSubmission {
            name: "Ada".into(),
            email: "not-an-email".into(),
            message: String::new(),
        })
        .unwrap()
        .expect("form bound");
    assert!(receipt.prevent_default);
    fake.apply(core.take_patches());
    assert_eq!(fake.form_resets, 1);
    let (text, kind) = fake.toasts.get(&receipt.toast.get()).expect("toast appended");
    assert_eq!(*kind, ToastKind::Success);
    assert_eq!(text, "Message sent successfully! I'll get back to you soon.");
}

#[test]
fn toast_shows_hides_and_leaves_on_schedule() {
    let (mut core, mut fake) = booted();
    let receipt = core
        .submit_contact(&ContactSubmission::default())
        .unwrap()
        .expect("form bound");
    let target = DomTarget::Toast(receipt.toast);
    fake.apply(core.take_patches());

    core.set_time_ms(99.0);
    fake.apply(core.take_patches());
    assert!(!fake.has(&target, names::SHOW));

    core.set_time_ms(100.0);
    fake.apply(core.take_patches());
    assert!(fake.has(&target, names::SHOW));

    core.set_time_ms(3000.0);
    fake.apply(core.take_patches());
    assert!(!fake.has(&target, names::SHOW));
    assert!(fake.toasts.contains_key(&receipt.toast.get()));

    core.set_time_ms(3300.0);
    fake.apply(core.take_patches());
    assert!(fake.toasts.is_empty());
    assert_eq!(core.next_deadline_ms(), None);
}

#[test]
fn cta_and_anchor_clicks_scroll_without_navigation() {
    let (mut core, mut fake) = booted();
    assert!(core.click_cta().unwrap());

    let ids = ["home", "about", "projects", "contact"];
    let hit = core
        .click_anchor("#contact", |id| ids.contains(&id))
        .expect("in-page anchor");
    assert!(hit.prevent_default);
    let miss = core
        .click_anchor("#missing", |id| ids.contains(&id))
        .expect("in-page anchor");
    assert!(miss.prevent_default);
    assert_eq!(miss.scrolled_to, None);

    fake.apply(core.take_patches());
    assert_eq!(fake.scrolled_to, vec!["projects", "contact"]);
}

#[test]
fn mobile_menu_toggles_and_closes_on_link_click() {
    let (mut core, mut fake) = booted();
    assert!(core.toggle_mobile_menu().unwrap());
    fake.apply(core.take_patches());
    assert!(fake.has(&DomTarget::NavMenu, names::ACTIVE));
    assert!(fake.has(&DomTarget::MobileToggle, names::ACTIVE));

    core.click_nav_link(1).unwrap();
    fake.apply(core.take_patches());
    assert!(!fake.has(&DomTarget::NavMenu, names::ACTIVE));
    assert!(!fake.has(&DomTarget::MobileToggle, names::ACTIVE));
}

#[test]
fn reveal_adds_fade_in_once() {
    let (mut core, mut fake) = booted();
    assert!(core.section_intersecting(2, true));
    assert!(!core.section_intersecting(2, true));
    fake.apply(core.take_patches());
    assert!(fake.has(&DomTarget::Section(2), names::FADE_IN));
    assert_eq!(core.snapshot().revealed_sections, 1);
}

#[test]
fn bare_page_degrades_to_no_ops() {
    let mut core = PortfolioCore::new(FolioConfig::default(), PageBindings::default());
    core.init();
    assert!(core.take_patches().is_empty());

    assert_eq!(core.on_scroll(0.0, &sections()), None);
    assert!(!core.toggle_mobile_menu().unwrap());
    assert_eq!(core.submit_contact(&ContactSubmission::default()).unwrap(), None);
    assert!(!core.click_cta().unwrap());
    assert!(core.take_patches().is_empty());
}
