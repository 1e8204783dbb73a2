//! Measured label cache
//!
//! Text measurement can be costly on the host side (font shaping, DOM calls),
//! so every label is measured once per font and remembered.

use std::collections::HashMap;

use super::{FontRole, TextExtent, TextMeasurer};

#[derive(Debug, Clone, Default)]
pub struct TextCache {
    extents: HashMap<FontRole, HashMap<String, TextExtent>>,
}

impl TextCache {
    pub fn new() -> Self {
        Self {
            extents: HashMap::new(),
        }
    }

    /// Return the cached extent, measuring with `measurer` on a miss.
    pub fn get_or_measure(
        &mut self,
        measurer: &(impl TextMeasurer + ?Sized),
        role: FontRole,
        text: &str,
    ) -> Option<TextExtent> {
        if let Some(extent) = self.get(role, text) {
            return Some(extent);
        }
        let extent = measurer.measure_text(role, text)?;
        self.extents
            .entry(role)
            .or_default()
            .insert(text.to_string(), extent);
        Some(extent)
    }

    pub fn get(&self, role: FontRole, text: &str) -> Option<TextExtent> {
        self.extents.get(&role)?.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.extents.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
