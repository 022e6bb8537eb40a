#![forbid(unsafe_code)]

//! `folio-core` holds the behavior of the portfolio page, independent of any
//! browser binding.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment reports scroll offsets,
//!   section geometry, clicks and elapsed time; the core answers with an
//!   ordered list of [`DomPatch`] commands.
//! - **Deterministic time**: toast sequencing runs on a clock the host
//!   advances explicitly, so a single cancellable timer serves every toast.
//! - **Degrade, don't fail**: a missing page element turns the dependent
//!   feature into a no-op.
//!
//! `folio-web` wraps [`PortfolioCore`] with `wasm-bindgen` and applies the
//! patches to the live DOM.

pub mod anchor;
pub mod app;
pub mod config;
pub mod contact;
pub mod dom;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod notification;
pub mod project;
pub mod reveal;
pub mod showcase;

pub use app::{PageBindings, PortfolioCore, PortfolioSnapshot};
pub use config::FolioConfig;
pub use contact::ContactSubmission;
pub use dom::{DomPatch, DomTarget, FilterButtonSpec};
pub use error::{FolioError, Result};
pub use navigation::{NavBindings, SectionExtent};
pub use notification::{ToastId, ToastKind, ToastPhase};
pub use showcase::ShowcaseBindings;
