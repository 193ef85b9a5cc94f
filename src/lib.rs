//! navtree: collapsible heading navigation for generated HTML documentation.
//!
//! The library scans a rendered page for `h1`/`h2`/`h3` headings, numbers them into a
//! three-level outline, and binds that outline to a hierarchical list widget with
//! click-to-navigate and bulk expand/collapse controls.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod binder;
pub mod config;
pub mod error;
pub mod formats;
pub mod heading;
pub mod outline;
pub mod page;
pub mod ui;
pub mod widget;
