//! Page request/result types and cache keys

use crate::domain::ResourceKind;
use crate::error::{Error, Result};

/// One fetch unit: page `page_number` of the children of `resource_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub kind: ResourceKind,
    pub resource_id: String,
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Build a validated request
    ///
    /// Pages are 1-based; an empty `resource_id` never reaches the network.
    pub fn new(
        kind: ResourceKind,
        resource_id: impl Into<String>,
        page_number: u32,
        page_size: u32,
    ) -> Result<Self> {
        let resource_id = resource_id.into();
        if resource_id.trim().is_empty() {
            return Err(Error::invalid(format!("{kind}: empty resource id")));
        }
        if page_number == 0 {
            return Err(Error::invalid("page number must be >= 1"));
        }
        if page_size == 0 {
            return Err(Error::invalid("page size must be > 0"));
        }
        Ok(Self {
            kind,
            resource_id,
            page_number,
            page_size,
        })
    }

    /// Cache key for this exact page
    pub fn key(&self) -> PageKey {
        PageKey {
            prefix: self.prefix(),
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }

    /// Cache prefix covering every page of this resource
    pub fn prefix(&self) -> KeyPrefix {
        KeyPrefix::new(self.kind, self.resource_id.clone())
    }
}

/// Items returned for one page, in server order
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of items the server returned for this page
    pub fn returned_count(&self) -> usize {
        self.items.len()
    }

    /// A page is considered full when it holds exactly `page_size` items.
    ///
    /// The server sends no total, so a full page is taken to mean more pages
    /// exist. This misreports exactly one case: a final page that happens to
    /// be full.
    pub fn is_full(&self, page_size: u32) -> bool {
        self.returned_count() == page_size as usize
    }
}

/// Collection-and-parent part of a cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPrefix {
    pub kind: ResourceKind,
    pub resource_id: String,
}

impl KeyPrefix {
    pub fn new(kind: ResourceKind, resource_id: impl Into<String>) -> Self {
        Self {
            kind,
            resource_id: resource_id.into(),
        }
    }
}

/// Cache key for one raw page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub prefix: KeyPrefix,
    pub page_number: u32,
    pub page_size: u32,
}

impl PageKey {
    pub fn matches(&self, prefix: &KeyPrefix) -> bool {
        &self.prefix == prefix
    }
}
