//! Category Color Assignment
//!
//! Every category gets a stable display color: a built-in default, a user
//! override, or a fallback derived from its name.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ReviewResult;
use crate::storage::KeyValueStorage;

/// Storage key of the persisted color map
pub const COLORS_KEY: &str = "category-colors";

/// Built-in colors, in palette order. `All` and `Pending` are the sidebar's
/// pseudo-categories.
pub const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("All", "var(--highlight-color)"),
    ("Pending", "#F97316"),
    ("coding", "#6366f1"),
    ("Coding", "#6366f1"),
    ("design", "#f472b6"),
    ("Personal", "#ec4899"),
    ("Work", "#22c55e"),
    ("Gaming", "#3b82f6"),
    ("Market Research", "#14b8a6"),
    ("Geoguessr", "#8b5cf6"),
    ("Wordle", "#facc15"),
    ("misc", "#e2e8f0"),
    ("General", "#64748b"),
    ("Important", "#f97316"),
    ("To Review", "#0ea5e9"),
    ("default", "#94a3b8"),
];

const PSEUDO_CATEGORIES: &[&str] = &["All", "Pending"];

/// Used only if the palette were ever empty
const NEUTRAL_COLOR: &str = "#f1f3f5";

/// Category name -> CSS color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColors {
    colors: BTreeMap<String, String>,
}

impl Default for CategoryColors {
    fn default() -> Self {
        Self {
            colors: default_map(),
        }
    }
}

/// Persisted shape, `{"state":{"colors":{...}},"version":0}`
#[derive(Serialize, Deserialize)]
struct PersistedEnvelope {
    state: PersistedColors,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct PersistedColors {
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

impl CategoryColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// User override
    pub fn set_color(&mut self, name: &str, color: &str) {
        if name.is_empty() {
            return;
        }
        self.colors.insert(name.to_string(), color.to_string());
    }

    /// Give `name` a fallback color unless it already has one.
    /// Returns the color now assigned.
    pub fn ensure_color(&mut self, name: &str) -> Option<&str> {
        if name.is_empty() {
            return None;
        }
        let color = self
            .colors
            .entry(name.to_string())
            .or_insert_with(|| fallback_color(name).to_string());
        Some(color.as_str())
    }

    pub fn ensure_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.ensure_color(name);
        }
    }

    /// Move the entry of `old` to `new`; no-op when `old` has none
    pub fn rename(&mut self, old: &str, new: &str) {
        if old.is_empty() || new.is_empty() || old == new {
            return;
        }
        if let Some(color) = self.colors.remove(old) {
            self.colors.insert(new.to_string(), color);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.colors.remove(name);
    }

    /// Back to the built-in map, dropping every override
    pub fn reset(&mut self) {
        self.colors = default_map();
    }

    /// Defaults merged under the persisted overrides
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        let mut colors = Self::default();
        let raw = match storage.get_item(COLORS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return colors,
            Err(e) => {
                warn!("[COLORS] Failed to read category colors: {}", e);
                return colors;
            }
        };
        match parse_persisted(&raw) {
            Some(persisted) => {
                debug!("[COLORS] Loaded {} persisted category colors", persisted.len());
                colors.colors.extend(persisted);
            }
            None => warn!("[COLORS] Ignoring malformed category colors"),
        }
        colors
    }

    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &S) -> ReviewResult<()> {
        let envelope = PersistedEnvelope {
            state: PersistedColors {
                colors: self.colors.clone(),
            },
            version: 0,
        };
        let json = serde_json::to_string(&envelope)?;
        storage.set_item(COLORS_KEY, &json)
    }
}

fn default_map() -> BTreeMap<String, String> {
    DEFAULT_COLORS
        .iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect()
}

/// Accepts the enveloped shape and a bare `{"colors":{...}}`
fn parse_persisted(raw: &str) -> Option<BTreeMap<String, String>> {
    if let Ok(envelope) = serde_json::from_str::<PersistedEnvelope>(raw) {
        return Some(envelope.state.colors);
    }
    serde_json::from_str::<PersistedColors>(raw)
        .ok()
        .map(|persisted| persisted.colors)
}

/// Default colors minus pseudo-categories, duplicates removed, in order
fn fallback_palette() -> Vec<&'static str> {
    let mut palette: Vec<&'static str> = Vec::new();
    for (name, color) in DEFAULT_COLORS {
        if PSEUDO_CATEGORIES.contains(name) || palette.contains(color) {
            continue;
        }
        palette.push(color);
    }
    palette
}

/// Same name, same color, in every session, without persisted state
pub fn fallback_color(name: &str) -> &'static str {
    let palette = fallback_palette();
    if palette.is_empty() {
        return NEUTRAL_COLOR;
    }
    let index = fnv1a(name.as_bytes()) as usize % palette.len();
    palette[index]
}

/// 32-bit FNV-1a
fn fnv1a(bytes: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(PRIME)
    })
}
