//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a navtree.toml, and if present we load settings from there.
//! This provides the tree variant and the width of the tree pane.

use crate::binder::{Activation, RenderOptions};
use crate::error::Error;
use crate::formats::markup::MarkupFormat;
use crate::formats::plain::PlainFormat;
use crate::formats::LabelFormat;
use crate::widget::WidgetOptions;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "navtree.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from navtree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "scroll".to_string())]
    /// Tree flavour: `scroll` or `fragment`.
    pub variant: String,
    #[facet(default = 40)]
    /// Width of the tree pane in columns.
    pub tree_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: "scroll".to_string(),
            tree_width: 40,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from navtree.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from the given file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "ignoring unreadable config: {e}");
                Self::default()
            }
        }
    }

    /// The configured variant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariant`] if the name is not recognised.
    pub fn variant(&self) -> Result<Variant, Error> {
        self.variant.parse()
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
/// The two flavours of navigation tree.
pub enum Variant {
    /// Plain labels; clicking a node scrolls its heading to the top.
    Scroll,
    /// Markup labels, two levels expanded; clicking a node sets the fragment.
    Fragment,
}

impl Variant {
    #[must_use]
    /// How labels are numbered and displayed.
    pub fn label_format(self) -> Box<dyn LabelFormat> {
        match self {
            Variant::Scroll => Box::new(PlainFormat),
            Variant::Fragment => Box::new(MarkupFormat),
        }
    }

    #[must_use]
    /// How the outline is mounted.
    pub fn render_options(self) -> RenderOptions {
        match self {
            Variant::Scroll => RenderOptions {
                widget: WidgetOptions {
                    auto_escape: PlainFormat.auto_escape(),
                    auto_open: None,
                },
                activation: Activation::Scroll,
            },
            Variant::Fragment => RenderOptions {
                widget: WidgetOptions {
                    auto_escape: MarkupFormat.auto_escape(),
                    auto_open: Some(2),
                },
                activation: Activation::Fragment,
            },
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scroll" => Ok(Variant::Scroll),
            "fragment" => Ok(Variant::Fragment),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
