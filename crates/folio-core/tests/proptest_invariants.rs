//! Property-based checks for the selection and timing invariants:
//!
//! 1. **Single active link**: for any scroll position strictly inside one of
//!    a set of contiguous, non-overlapping sections, exactly one nav link is
//!    active and it names that section.
//!
//! 2. **Single active filter**: after any sequence of filter clicks, exactly
//!    one filter button is active and card visibility matches the last
//!    selection.
//!
//! 3. **Toast schedule**: however the host slices time, each toast is shown
//!    at +reveal, hidden at +display and removed at +display+hide.

use folio_core::dom::{DomPatch, DomTarget, PatchBuffer};
use folio_core::filter::{FilterBar, FilterMatch, TechFilter};
use folio_core::navigation::{NavBindings, NavigationController, SectionExtent, active_section};
use folio_core::notification::{ToastKind, ToastPhase, ToastStack, ToastTimings};
use folio_core::project::ProjectCatalog;
use proptest::prelude::*;

fn contiguous_sections(heights: &[u16]) -> Vec<SectionExtent> {
    let mut top = 0.0;
    heights
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let s = SectionExtent::new(format!("s{i}"), top, f64::from(*h));
            top += f64::from(*h);
            s
        })
        .collect()
}

proptest! {
    #[test]
    fn exactly_one_link_active_inside_a_section(
        heights in prop::collection::vec(1u16..2_000, 1..8),
        pick in any::<prop::sample::Index>(),
        frac in 0.0f64..1.0,
    ) {
        let sections = contiguous_sections(&heights);
        let target = pick.index(sections.len());
        // Whole pixels keep `scroll_y + lookahead` exact.
        let probe = sections[target].top + (frac * sections[target].height).floor();
        prop_assert!(sections[target].contains(probe));

        let lookahead = 100.0;
        let scroll_y = probe - lookahead;
        prop_assert_eq!(active_section(scroll_y, lookahead, &sections), Some(sections[target].id.as_str()));

        let hrefs: Vec<String> = sections.iter().map(|s| format!("#{}", s.id)).collect();
        let mut nav = NavigationController::new(
            NavBindings { has_menu: true, has_container: true, link_hrefs: hrefs },
            lookahead,
        );
        let mut out = PatchBuffer::new();
        nav.on_scroll(scroll_y, &sections, &mut out);

        let added: Vec<usize> = out
            .take()
            .into_iter()
            .filter_map(|p| match p {
                DomPatch::AddClass { target: DomTarget::NavLink(i), .. } => Some(i),
                _ => None,
            })
            .collect();
        prop_assert_eq!(added, vec![target]);
        prop_assert_eq!(nav.active_link(), Some(target));
    }

    #[test]
    fn exactly_one_filter_active_after_any_clicks(
        clicks in prop::collection::vec(0usize..11, 1..20),
        exact in any::<bool>(),
    ) {
        let catalog = ProjectCatalog::default();
        let mode = if exact { FilterMatch::ExactTag } else { FilterMatch::Substring };
        let keys: Vec<String> = catalog.projects().iter().map(|p| p.technology_key()).collect();
        let mut bar = FilterBar::from_catalog(&catalog, mode);

        let mut visible = Vec::new();
        for click in &clicks {
            visible = bar.select(*click, keys.iter().map(String::as_str)).unwrap();
        }
        let last = *clicks.last().unwrap();
        prop_assert_eq!(bar.active(), last);
        prop_assert_eq!(bar.specs().iter().filter(|s| s.active).count(), 1);

        match &bar.buttons()[last].filter {
            TechFilter::All => prop_assert!(visible.iter().all(|v| *v)),
            TechFilter::Tag(tag) => {
                for (key, shown) in keys.iter().zip(&visible) {
                    prop_assert_eq!(*shown, mode.matches(key, tag));
                }
                // Every tag comes from some project, so at least one card stays.
                prop_assert!(visible.iter().any(|v| *v));
            }
        }
    }

    #[test]
    fn toast_schedule_is_independent_of_time_slicing(
        steps in prop::collection::vec(1u64..400, 1..60),
    ) {
        let mut stack = ToastStack::new(&ToastTimings::default());
        let mut out = PatchBuffer::new();
        let id = stack.push("hello", ToastKind::Success, &mut out);
        out.take();

        let mut now = 0u64;
        for step in steps {
            now += step;
            stack.advance_to(core::time::Duration::from_millis(now), &mut out);
            let expected = match now {
                0..100 => ToastPhase::Created,
                100..3000 => ToastPhase::Shown,
                3000..3300 => ToastPhase::Hiding,
                _ => ToastPhase::Removed,
            };
            prop_assert_eq!(stack.phase(id), expected, "now={}", now);
        }
    }
}
