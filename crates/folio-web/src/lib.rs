#![forbid(unsafe_code)]

//! WASM front-end for the portfolio page.
//!
//! This crate provides [`PortfolioApp`], a `wasm-bindgen`-exported struct
//! that discovers the page's elements, feeds DOM events into
//! `folio_core::PortfolioCore`, and applies the resulting patches.
//!
//! ```js
//! import init, { PortfolioApp } from "./pkg/folio_web.js";
//! await init();
//! const app = PortfolioApp.mount(null); // or a JSON config string
//! ```

pub mod host;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PortfolioApp;
