//! Page registry: the set of registered pages keyed by URL path.
//!
//! Mirrors the host-framework boundary the route plan is handed to:
//! registering a path that already exists silently overwrites the earlier
//! registration (last one wins). Path uniqueness is deliberately NOT
//! enforced by the router, so the registry must not reject duplicates
//! either.

use crate::route::{self, PageFields, RoutePlan};
use crate::types::RouteEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One registered page: the route plus its attached display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredPage {
    pub entry: RouteEntry,
    /// Display metadata attached by the annotation pass.
    #[serde(default)]
    pub fields: PageFields,
}

/// All registered pages, ordered by URL path for deterministic output.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageRegistry {
    pages: BTreeMap<String, RegisteredPage>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every route in a plan, then annotate.
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let mut registry = Self::new();
        for entry in &plan.routes {
            registry.register(entry.clone());
        }
        registry.annotate_all();
        registry
    }

    /// Register one page. A duplicate URL path silently overwrites the
    /// earlier registration.
    pub fn register(&mut self, entry: RouteEntry) {
        self.pages.insert(
            entry.url_path.clone(),
            RegisteredPage {
                entry,
                fields: PageFields::default(),
            },
        );
    }

    /// Attach display metadata to every registered page.
    ///
    /// Pure classification keyed by each page's carried class tag; running
    /// it twice produces the same field values.
    pub fn annotate_all(&mut self) {
        for page in self.pages.values_mut() {
            page.fields = route::annotate(&page.entry);
        }
    }

    pub fn get(&self, url_path: &str) -> Option<&RegisteredPage> {
        self.pages.get(url_path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in URL-path order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredPage> {
        self.pages.values()
    }
}
