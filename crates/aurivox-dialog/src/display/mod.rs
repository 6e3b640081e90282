//! Inter-layer display policy.
//!
//! Display-capable agents register a layer when they render and remove
//! it when they clear. Rendering a higher-category layer evaporates
//! lower-category layers that allow it, and a same-category render
//! replaces the previous layer.

use std::sync::{Arc, Mutex};

use tracing::debug;

use aurivox_core::LayerCategory;
use aurivox_runtime::listeners::Listeners;

/// One rendered surface participating in inter-layer policy.
pub trait DisplayLayer: Send + Sync {
    fn category(&self) -> LayerCategory;
    fn interface_name(&self) -> &str;
    /// Whether a higher-category render may clear this layer.
    fn is_evaporatable(&self) -> bool {
        true
    }
    /// The layer lost its slot and must clear itself.
    fn on_evaporated(&self);
}

pub trait DisplayPolicyListener: Send + Sync {
    fn on_layer_rendered(&self, category: LayerCategory, interface_name: &str);
    fn on_layer_cleared(&self, category: LayerCategory, interface_name: &str);
}

pub struct InterLayerDisplayPolicyManager {
    layers: Mutex<Vec<Arc<dyn DisplayLayer>>>,
    listeners: Listeners<dyn DisplayPolicyListener>,
}

impl InterLayerDisplayPolicyManager {
    pub fn new() -> Self {
        Self {
            layers: Mutex::new(Vec::new()),
            listeners: Listeners::new(),
        }
    }

    /// Registers a rendered layer, evaporating whatever it covers.
    pub fn on_layer_rendered(&self, layer: Arc<dyn DisplayLayer>) {
        let category = layer.category();
        let evaporated = {
            let mut layers = self.lock();
            let mut evaporated = Vec::new();
            layers.retain(|existing| {
                let replace = existing.category() == category;
                let covered = category.covers(existing.category()) && existing.is_evaporatable();
                if replace || covered {
                    evaporated.push(Arc::clone(existing));
                    false
                } else {
                    true
                }
            });
            layers.push(Arc::clone(&layer));
            evaporated
        };
        for gone in evaporated {
            debug!(
                interface = gone.interface_name(),
                category = ?gone.category(),
                "display layer evaporated"
            );
            gone.on_evaporated();
            self.listeners
                .notify(|l| l.on_layer_cleared(gone.category(), gone.interface_name()));
        }
        debug!(interface = layer.interface_name(), category = ?category, "display layer rendered");
        self.listeners
            .notify(|l| l.on_layer_rendered(category, layer.interface_name()));
    }

    /// Unregisters a cleared layer; clearing an unknown layer is a no-op.
    pub fn on_layer_cleared(&self, layer: &Arc<dyn DisplayLayer>) {
        let removed = {
            let mut layers = self.lock();
            let before = layers.len();
            layers.retain(|existing| !Arc::ptr_eq(existing, layer));
            layers.len() != before
        };
        if removed {
            debug!(interface = layer.interface_name(), "display layer cleared");
            self.listeners
                .notify(|l| l.on_layer_cleared(layer.category(), layer.interface_name()));
        }
    }

    pub fn rendered_layers(&self) -> Vec<(LayerCategory, String)> {
        self.lock()
            .iter()
            .map(|l| (l.category(), l.interface_name().to_string()))
            .collect()
    }

    pub fn add_listener(&self, listener: Arc<dyn DisplayPolicyListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn DisplayPolicyListener>) {
        self.listeners.remove(listener);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn DisplayLayer>>> {
        self.layers.lock().expect("display layer mutex poisoned")
    }
}

impl Default for InterLayerDisplayPolicyManager {
    fn default() -> Self {
        Self::new()
    }
}
