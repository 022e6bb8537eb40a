#![forbid(unsafe_code)]

//! Technology filter bar.

use serde::{Deserialize, Serialize};

use crate::dom::FilterButtonSpec;
use crate::error::{FolioError, Result};
use crate::project::ProjectCatalog;

/// How a filter tag is compared against a card's stored technology key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMatch {
    /// Substring containment on the comma-joined key. `react` also matches
    /// `reactive`.
    #[default]
    Substring,
    /// Whole-tag comparison against each comma-separated entry.
    ExactTag,
}

impl FilterMatch {
    #[must_use]
    pub fn matches(self, technology_key: &str, tag: &str) -> bool {
        match self {
            Self::Substring => technology_key.contains(tag),
            Self::ExactTag => technology_key.split(',').any(|t| t == tag),
        }
    }
}

/// The selection a filter button applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechFilter {
    All,
    /// Lowercased tag.
    Tag(String),
}

impl TechFilter {
    #[must_use]
    pub fn tag(label: &str) -> Self {
        Self::Tag(label.to_lowercase())
    }

    #[must_use]
    pub fn admits(&self, technology_key: &str, mode: FilterMatch) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => mode.matches(technology_key, tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: String,
    pub filter: TechFilter,
}

/// "All" plus one button per distinct technology; exactly one is active.
#[derive(Debug, Clone)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
    active: usize,
    mode: FilterMatch,
}

impl FilterBar {
    #[must_use]
    pub fn from_catalog(catalog: &ProjectCatalog, mode: FilterMatch) -> Self {
        let mut buttons = vec![FilterButton {
            label: "All".to_owned(),
            filter: TechFilter::All,
        }];
        buttons.extend(
            catalog
                .technology_filters()
                .into_iter()
                .map(|label| FilterButton {
                    label: label.to_owned(),
                    filter: TechFilter::tag(label),
                }),
        );
        Self {
            buttons,
            active: 0,
            mode,
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn active_filter(&self) -> &TechFilter {
        &self.buttons[self.active].filter
    }

    /// Button specs for mounting, with the current active flag.
    #[must_use]
    pub fn specs(&self) -> Vec<FilterButtonSpec> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, b)| FilterButtonSpec {
                label: b.label.clone(),
                active: i == self.active,
            })
            .collect()
    }

    /// Activate button `index` and return per-card visibility for `keys`.
    pub fn select<'a, I>(&mut self, index: usize, keys: I) -> Result<Vec<bool>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if index >= self.buttons.len() {
            return Err(FolioError::UnknownFilter {
                index,
                len: self.buttons.len(),
            });
        }
        self.active = index;
        let filter = &self.buttons[index].filter;
        Ok(keys
            .into_iter()
            .map(|key| filter.admits(key, self.mode))
            .collect())
    }
}
