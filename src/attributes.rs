//! Custom attribute catalog.
//!
//! Maps externally defined customer attribute ids to display names so
//! customer listings can be labeled. Populated once at startup; when that
//! fetch fails the catalog stays empty and listings keep the raw ids.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ProxyResult;
use crate::graphql::operations::{CustomerAttribute, NoVariables};
use crate::graphql::{ListCustomerAttributes, QueryForwarder};
use crate::observability::metrics;

/// Lock-free id → name map, swapped wholesale on refresh.
#[derive(Default)]
pub struct AttributeCatalog {
    names: ArcSwap<HashMap<String, String>>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch all attribute definitions and replace the map.
    ///
    /// On failure the previous map is kept.
    pub async fn refresh(&self, forwarder: &QueryForwarder) -> ProxyResult<usize> {
        let data = forwarder
            .execute::<ListCustomerAttributes>(&NoVariables::default())
            .await?;

        let map: HashMap<String, String> = data
            .list_customer_attribute
            .into_iter()
            .map(|def| (def.id, def.name))
            .collect();
        let count = map.len();
        self.replace(map);

        tracing::info!(attributes = count, "Customer attribute catalog loaded");
        Ok(count)
    }

    /// Install a new map.
    pub fn replace(&self, names: HashMap<String, String>) {
        metrics::record_attribute_catalog_size(names.len());
        self.names.store(Arc::new(names));
    }

    /// Fill in `name` on each attribute whose id is known.
    pub fn label(&self, attributes: &mut [CustomerAttribute]) {
        let names = self.names.load();
        for attr in attributes {
            attr.name = names.get(&attr.customer_attribute_id).cloned();
        }
    }

    pub fn len(&self) -> usize {
        self.names.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.load().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(id: &str) -> CustomerAttribute {
        CustomerAttribute {
            customer_attribute_id: id.to_string(),
            value: Some("v".to_string()),
            name: None,
        }
    }

    #[test]
    fn test_empty_catalog_leaves_ids_unlabeled() {
        let catalog = AttributeCatalog::new();
        let mut attrs = vec![attribute("a-1")];
        catalog.label(&mut attrs);
        assert!(catalog.is_empty());
        assert_eq!(attrs[0].customer_attribute_id, "a-1");
        assert!(attrs[0].name.is_none());
    }

    #[test]
    fn test_labels_known_ids_only() {
        let catalog = AttributeCatalog::new();
        catalog.replace(HashMap::from([("a-1".to_string(), "Loyalty tier".to_string())]));

        let mut attrs = vec![attribute("a-1"), attribute("a-2")];
        catalog.label(&mut attrs);

        assert_eq!(attrs[0].name.as_deref(), Some("Loyalty tier"));
        assert!(attrs[1].name.is_none());
        assert_eq!(catalog.len(), 1);
    }
}
