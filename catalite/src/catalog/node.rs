// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog node: the common shape of every catalog entity
//!
//! A `CatalogNode` carries the generic storage every entity type shares:
//! a stable numeric id, a tree path, a raw attribute map seeded from the
//! type's schema, the declared child collections, and the derived native
//! fields materialized at commit time. Nothing here is specific to any one
//! entity type; the per-type shape comes entirely from the `TypeSchema`
//! the node was constructed with.
//!
//! Mutation goes through the owning `Catalog`; the node surface exposed to
//! readers is read-only.

use super::error::{CatalogError, CatalogResult};
use super::value::{CatalogValue, NativeValue};
use crate::schema::types::TypeSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Stable node identifier, assigned at creation and never reused
pub type NodeId = usize;

/// Two-phase populate/commit lifecycle tag
///
/// `Constructed` → `Populated` on the first attribute set, `Populated` →
/// `Committed` when derived fields are materialized. A post-commit
/// attribute set demotes the node back to `Populated` so stale derived
/// reads are detectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Constructed,
    Populated,
    Committed,
}

/// One named child collection: an ordered, name-keyed set of owned children
#[derive(Debug, Clone)]
pub struct ChildCollection {
    child_type: String,
    children: BTreeMap<String, NodeId>,
}

impl ChildCollection {
    fn new(child_type: &str) -> Self {
        Self {
            child_type: child_type.to_string(),
            children: BTreeMap::new(),
        }
    }

    /// Concrete type every child of this collection is created as
    pub fn child_type(&self) -> &str {
        &self.child_type
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

/// One entity in the catalog tree
#[derive(Debug, Clone)]
pub struct CatalogNode {
    id: NodeId,
    path: String,
    name: String,
    type_name: String,
    parent: Option<NodeId>,
    /// 1-based ordinal within the owning collection at insertion time
    relative_index: usize,
    attributes: BTreeMap<String, CatalogValue>,
    collections: BTreeMap<String, ChildCollection>,
    derived: BTreeMap<String, NativeValue>,
    state: LifecycleState,
}

impl CatalogNode {
    /// Construct a node of the given type with every declared attribute
    /// present at its default value and every declared collection empty.
    pub(crate) fn new(
        id: NodeId,
        path: &str,
        name: &str,
        schema: &TypeSchema,
        parent: Option<NodeId>,
        relative_index: usize,
    ) -> Self {
        let attributes = schema
            .attributes
            .iter()
            .map(|a| (a.name.clone(), CatalogValue::default_for(a.kind)))
            .collect();
        let collections = schema
            .collections
            .iter()
            .map(|c| (c.name.clone(), ChildCollection::new(&c.child_type)))
            .collect();

        Self {
            id,
            path: path.to_string(),
            name: name.to_string(),
            type_name: schema.name.clone(),
            parent,
            relative_index,
            attributes,
            collections,
            derived: BTreeMap::new(),
            state: LifecycleState::Constructed,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn relative_index(&self) -> usize {
        self.relative_index
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Raw attribute value; every declared attribute is always present, so
    /// a missing key means the name is not declared for this node's type.
    pub fn attribute(&self, name: &str) -> CatalogResult<&CatalogValue> {
        self.attributes.get(name).ok_or_else(|| {
            CatalogError::UnknownAttribute(format!("{} on {}", name, self.path))
        })
    }

    /// Declared attribute names in stable order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(|k| k.as_str())
    }

    /// Declared collection names in stable order
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(|k| k.as_str())
    }

    pub fn collection(&self, name: &str) -> CatalogResult<&ChildCollection> {
        self.collections.get(name).ok_or_else(|| {
            CatalogError::UnknownCollection(format!("{} on {}", name, self.path))
        })
    }

    /// Child id by collection and name. Absence of the name is not an
    /// error; an undeclared collection is.
    pub fn child(&self, collection: &str, name: &str) -> CatalogResult<Option<NodeId>> {
        Ok(self.collection(collection)?.get(name))
    }

    /// Ids of a collection's children in name order
    pub fn children(&self, collection: &str) -> CatalogResult<Vec<NodeId>> {
        Ok(self.collection(collection)?.iter().map(|(_, id)| id).collect())
    }

    /// Set a raw attribute value, enforcing the schema-fixed kind.
    ///
    /// Demotes a committed node back to `Populated`; its derived fields are
    /// stale until the next commit.
    pub(crate) fn set_attribute(&mut self, name: &str, value: CatalogValue) -> CatalogResult<()> {
        let slot = self.attributes.get_mut(name).ok_or_else(|| {
            CatalogError::UnknownAttribute(format!("{} on {}", name, self.path))
        })?;
        if slot.kind() != value.kind() {
            return Err(CatalogError::TypeMismatch(format!(
                "attribute '{}' on {} is {}, got {}",
                name,
                self.path,
                slot.kind(),
                value.kind()
            )));
        }
        *slot = value;
        if self.state == LifecycleState::Committed {
            log::warn!("Attribute set after commit on {}, derived fields stale", self.path);
        }
        self.state = LifecycleState::Populated;
        Ok(())
    }

    pub(crate) fn insert_child(
        &mut self,
        collection: &str,
        name: &str,
        id: NodeId,
    ) -> CatalogResult<()> {
        let coll = self.collections.get_mut(collection).ok_or_else(|| {
            CatalogError::UnknownCollection(format!("{} on {}", collection, self.path))
        })?;
        if coll.contains(name) {
            return Err(CatalogError::DuplicateName(format!(
                "{} in collection {} of {}",
                name, collection, self.path
            )));
        }
        coll.children.insert(name.to_string(), id);
        Ok(())
    }

    /// Detach a child entry, returning its id.
    ///
    /// Contract: callers must check existence first. An absent collection or
    /// child name is a programming defect, caught fatally.
    pub(crate) fn remove_child_entry(&mut self, collection: &str, name: &str) -> NodeId {
        let coll = self
            .collections
            .get_mut(collection)
            .unwrap_or_else(|| panic!("collection '{}' not declared on {}", collection, self.path));
        assert!(
            coll.contains(name),
            "no child '{}' in collection '{}' of {}",
            name,
            collection,
            self.path
        );
        coll.children.remove(name).expect("presence asserted above")
    }

    /// Name of the collection holding the child `(name, id)`, if any
    pub(crate) fn collection_containing(&self, name: &str, id: NodeId) -> Option<&str> {
        self.collections
            .iter()
            .find(|(_, coll)| coll.get(name) == Some(id))
            .map(|(coll_name, _)| coll_name.as_str())
    }

    /// Clear every reference attribute pointing at a removed path.
    ///
    /// Single references become the null reference; list entries are
    /// dropped. Returns the number of cleared references.
    pub(crate) fn scrub_references(&mut self, removed: &HashSet<String>) -> usize {
        let mut cleared = 0;
        for (name, value) in self.attributes.iter_mut() {
            match value {
                CatalogValue::Reference(slot) => {
                    if slot.as_deref().is_some_and(|p| removed.contains(p)) {
                        log::warn!(
                            "Clearing reference '{}' on {} into removed subtree",
                            name,
                            self.path
                        );
                        *slot = None;
                        cleared += 1;
                    }
                }
                CatalogValue::ReferenceList(list) => {
                    let before = list.len();
                    list.retain(|p| !removed.contains(p));
                    if list.len() != before {
                        log::warn!(
                            "Dropped {} entry(ies) from reference list '{}' on {}",
                            before - list.len(),
                            name,
                            self.path
                        );
                        cleared += before - list.len();
                    }
                }
                _ => {}
            }
        }
        cleared
    }

    /// Materialize derived native fields from the raw attribute map.
    ///
    /// Always recomputes from scratch, so replaying commit after further
    /// attribute changes re-derives consistently.
    pub(crate) fn commit(&mut self, schema: &TypeSchema) -> CatalogResult<()> {
        self.derived.clear();
        for def in &schema.derived {
            let raw = self.attribute(&def.source)?;
            self.derived
                .insert(def.field.clone(), NativeValue::from_catalog_value(raw)?);
        }
        self.state = LifecycleState::Committed;
        Ok(())
    }

    fn derived_field(&self, name: &str) -> CatalogResult<&NativeValue> {
        if self.state != LifecycleState::Committed {
            return Err(CatalogError::NotCommitted(self.path.clone()));
        }
        self.derived.get(name).ok_or_else(|| {
            CatalogError::UnknownAttribute(format!("derived field {} on {}", name, self.path))
        })
    }

    pub fn derived_integer(&self, name: &str) -> CatalogResult<i64> {
        match self.derived_field(name)? {
            NativeValue::Integer(v) => Ok(*v),
            other => Err(Self::derived_mismatch(name, "integer", other)),
        }
    }

    pub fn derived_double(&self, name: &str) -> CatalogResult<f64> {
        match self.derived_field(name)? {
            NativeValue::Double(v) => Ok(*v),
            other => Err(Self::derived_mismatch(name, "double", other)),
        }
    }

    pub fn derived_boolean(&self, name: &str) -> CatalogResult<bool> {
        match self.derived_field(name)? {
            NativeValue::Boolean(v) => Ok(*v),
            other => Err(Self::derived_mismatch(name, "boolean", other)),
        }
    }

    pub fn derived_str(&self, name: &str) -> CatalogResult<&str> {
        match self.derived_field(name)? {
            NativeValue::String(v) => Ok(v.as_str()),
            other => Err(Self::derived_mismatch(name, "string", other)),
        }
    }

    fn derived_mismatch(name: &str, expected: &str, found: &NativeValue) -> CatalogError {
        CatalogError::TypeMismatch(format!(
            "derived field '{}' is not {} (found {:?})",
            name, expected, found
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::value::ValueKind;
    use crate::schema::types::TypeSchema;

    fn partition_schema() -> TypeSchema {
        TypeSchema::new("Partition")
            .with_attribute("id", ValueKind::Integer)
            .with_derived("id")
    }

    fn table_schema() -> TypeSchema {
        TypeSchema::new("Table")
            .with_attribute("isreplicated", ValueKind::Boolean)
            .with_collection("columns", "Column")
    }

    #[test]
    fn test_construction_seeds_defaults() {
        let schema = partition_schema();
        let node = CatalogNode::new(1, "/p0", "p0", &schema, Some(0), 1);

        assert_eq!(node.state(), LifecycleState::Constructed);
        assert_eq!(
            node.attribute("id").unwrap(),
            &CatalogValue::Integer(0)
        );
        assert!(matches!(
            node.attribute("nope"),
            Err(CatalogError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_declared_collections_start_empty() {
        let schema = table_schema();
        let node = CatalogNode::new(1, "/t", "t", &schema, Some(0), 1);

        assert!(node.collection("columns").unwrap().is_empty());
        assert_eq!(node.child("columns", "c0").unwrap(), None);
        assert!(matches!(
            node.child("rows", "c0"),
            Err(CatalogError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_set_attribute_enforces_kind() {
        let schema = partition_schema();
        let mut node = CatalogNode::new(1, "/p0", "p0", &schema, Some(0), 1);

        node.set_attribute("id", CatalogValue::Integer(7)).unwrap();
        assert_eq!(node.state(), LifecycleState::Populated);
        assert_eq!(node.attribute("id").unwrap(), &CatalogValue::Integer(7));

        assert!(matches!(
            node.set_attribute("id", CatalogValue::String("7".to_string())),
            Err(CatalogError::TypeMismatch(_))
        ));
        // Failed set leaves the stored value untouched
        assert_eq!(node.attribute("id").unwrap(), &CatalogValue::Integer(7));
    }

    #[test]
    fn test_commit_materializes_and_is_idempotent() {
        let schema = partition_schema();
        let mut node = CatalogNode::new(1, "/p0", "p0", &schema, Some(0), 1);

        // Derived fields are unreadable before commit
        assert!(matches!(
            node.derived_integer("id"),
            Err(CatalogError::NotCommitted(_))
        ));

        node.set_attribute("id", CatalogValue::Integer(7)).unwrap();
        node.commit(&schema).unwrap();
        assert_eq!(node.state(), LifecycleState::Committed);
        assert_eq!(node.derived_integer("id").unwrap(), 7);

        node.commit(&schema).unwrap();
        assert_eq!(node.derived_integer("id").unwrap(), 7);
    }

    #[test]
    fn test_set_after_commit_demotes() {
        let schema = partition_schema();
        let mut node = CatalogNode::new(1, "/p0", "p0", &schema, Some(0), 1);
        node.set_attribute("id", CatalogValue::Integer(7)).unwrap();
        node.commit(&schema).unwrap();

        node.set_attribute("id", CatalogValue::Integer(9)).unwrap();
        assert_eq!(node.state(), LifecycleState::Populated);
        assert!(matches!(
            node.derived_integer("id"),
            Err(CatalogError::NotCommitted(_))
        ));

        node.commit(&schema).unwrap();
        assert_eq!(node.derived_integer("id").unwrap(), 9);
    }

    #[test]
    #[should_panic(expected = "no child")]
    fn test_remove_missing_child_is_fatal() {
        let schema = table_schema();
        let mut node = CatalogNode::new(1, "/t", "t", &schema, Some(0), 1);
        node.remove_child_entry("columns", "nonexistent");
    }
}
