// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog registry: the owning tree root and path index
//!
//! The `Catalog` owns every node in the tree (an arena keyed by stable
//! `NodeId`, ids never reused) and keeps a flat path index so lookups never
//! walk the tree. It is the single entry point for all mutation: node
//! creation, attribute sets, child add/remove, subtree deletion, and the
//! commit pass that materializes derived fields. The loader drives it in
//! sequence — create, set, add/remove, commit — and all errors surface to
//! that caller.
//!
//! The index and the tree are kept mutually consistent on every edit: a
//! path resolves if and only if a node at that path currently exists.

use super::error::{CatalogError, CatalogResult};
use super::node::{CatalogNode, NodeId};
use super::value::CatalogValue;
use crate::schema::types::SchemaRegistry;
use std::collections::{HashMap, HashSet};

/// Path of the catalog root node
pub const ROOT_PATH: &str = "/";

/// The catalog tree root and node registry
pub struct Catalog {
    schemas: SchemaRegistry,
    /// Arena of all nodes; a slot is `None` once its node is deleted and is
    /// never reused, keeping ids stable for the catalog's lifetime.
    nodes: Vec<Option<CatalogNode>>,
    /// Flat path → id index, maintained on every structural edit
    index: HashMap<String, NodeId>,
    root: NodeId,
}

impl Catalog {
    /// Build an empty catalog holding only the root node of the registry's
    /// designated root type. Validates the schema registry first.
    pub fn new(schemas: SchemaRegistry) -> CatalogResult<Self> {
        schemas.validate()?;
        let root_schema = schemas.get(schemas.root_type())?;
        let root_node = CatalogNode::new(0, ROOT_PATH, "", root_schema, None, 0);

        let mut index = HashMap::new();
        index.insert(ROOT_PATH.to_string(), 0);

        log::debug!(
            "Created catalog with root type '{}' ({} registered types)",
            schemas.root_type(),
            schemas.type_count()
        );

        Ok(Self {
            schemas,
            nodes: vec![Some(root_node)],
            index,
            root: 0,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Number of live nodes (including the root)
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Node by id, if still live
    pub fn node(&self, id: NodeId) -> Option<&CatalogNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    /// Node by path, if present
    pub fn get(&self, path: &str) -> Option<&CatalogNode> {
        self.index.get(path).and_then(|id| self.node(*id))
    }

    /// Id of the node at `path`, or `NoSuchPath`
    pub fn lookup(&self, path: &str) -> CatalogResult<NodeId> {
        self.index
            .get(path)
            .copied()
            .ok_or_else(|| CatalogError::NoSuchPath(path.to_string()))
    }

    /// Resolve a stored reference path to a live node id.
    ///
    /// Unlike `lookup`, a miss here means a reference attribute points at a
    /// node that does not exist, which is its own error condition.
    pub fn resolve_reference(&self, path: &str) -> CatalogResult<NodeId> {
        self.index
            .get(path)
            .copied()
            .ok_or_else(|| CatalogError::DanglingReference(path.to_string()))
    }

    /// Materialize the `Reference` attribute `attr` of the node at `path`:
    /// `Ok(None)` for the null reference, `DanglingReference` if the stored
    /// path no longer resolves.
    pub fn resolve(&self, path: &str, attr: &str) -> CatalogResult<Option<NodeId>> {
        match self.get_attribute(path, attr)?.as_reference()? {
            Some(target) => Ok(Some(self.resolve_reference(target)?)),
            None => Ok(None),
        }
    }

    /// Materialize a `ReferenceList` attribute into live node ids
    pub fn resolve_list(&self, path: &str, attr: &str) -> CatalogResult<Vec<NodeId>> {
        let targets = self.get_attribute(path, attr)?.as_reference_list()?.to_vec();
        targets
            .iter()
            .map(|target| self.resolve_reference(target))
            .collect()
    }

    /// Create a node of `type_name` at `path`, named `name`.
    ///
    /// The parent is the node at the path prefix; the owning collection is
    /// the parent type's collection declared to hold `type_name`.
    pub fn create_node(&mut self, path: &str, type_name: &str, name: &str) -> CatalogResult<NodeId> {
        // Resolves the factory first so an unknown type is reported as such
        // even when the path is also bad.
        self.schemas.get(type_name)?;

        if self.index.contains_key(path) {
            return Err(CatalogError::DuplicateName(path.to_string()));
        }

        let (parent_path, leaf) = split_path(path)?;
        if leaf != name {
            return Err(CatalogError::InvalidPath(format!(
                "terminal segment of '{}' does not match node name '{}'",
                path, name
            )));
        }

        let parent_id = self.lookup(parent_path)?;
        let parent_schema = self.schemas.get(self.node_at(parent_id).type_name())?;
        let collection = parent_schema
            .collection_for_child_type(type_name)
            .ok_or_else(|| {
                CatalogError::UnknownCollection(format!(
                    "type '{}' declares no collection holding '{}'",
                    parent_schema.name, type_name
                ))
            })?
            .name
            .clone();

        self.insert_node(parent_id, &collection, type_name, name)
    }

    /// Add a child to a named collection of the node at `parent_path`.
    ///
    /// The collection's declared child type decides which concrete node
    /// type is instantiated.
    pub fn add_child(
        &mut self,
        parent_path: &str,
        collection: &str,
        child_name: &str,
    ) -> CatalogResult<NodeId> {
        let parent_id = self.lookup(parent_path)?;
        let child_type = self
            .node_at(parent_id)
            .collection(collection)?
            .child_type()
            .to_string();
        self.insert_node(parent_id, collection, &child_type, child_name)
    }

    /// Child id by collection and name; `Ok(None)` when the name is absent
    pub fn get_child(
        &self,
        parent_path: &str,
        collection: &str,
        child_name: &str,
    ) -> CatalogResult<Option<NodeId>> {
        let parent_id = self.lookup(parent_path)?;
        self.node_at(parent_id).child(collection, child_name)
    }

    /// Remove a child and destroy its subtree.
    ///
    /// Contract: the caller must have checked the child exists. An absent
    /// collection or child name is a defect and fails fatally, not as a
    /// recoverable error.
    pub fn remove_child(
        &mut self,
        parent_path: &str,
        collection: &str,
        child_name: &str,
    ) -> CatalogResult<()> {
        let parent_id = self.lookup(parent_path)?;
        let child_id = self
            .node_at_mut(parent_id)
            .remove_child_entry(collection, child_name);
        self.destroy_subtree(child_id);
        Ok(())
    }

    /// Delete the node at `path` and its whole subtree.
    ///
    /// Detaches it from the parent collection, drops every descendant from
    /// the path index, and scrubs reference attributes elsewhere in the
    /// tree that pointed into the removed subtree.
    pub fn delete_node(&mut self, path: &str) -> CatalogResult<()> {
        let id = self.lookup(path)?;
        if id == self.root {
            return Err(CatalogError::InvalidPath(
                "cannot delete the catalog root".to_string(),
            ));
        }

        let node = self.node_at(id);
        let name = node.name().to_string();
        let parent_id = node.parent().expect("non-root node has a parent");

        let collection = self
            .node_at(parent_id)
            .collection_containing(&name, id)
            .expect("child is registered in a parent collection")
            .to_string();

        self.node_at_mut(parent_id).remove_child_entry(&collection, &name);
        self.destroy_subtree(id);
        Ok(())
    }

    /// Set a raw attribute on the node at `path`, enforcing its declared kind
    pub fn set_attribute(&mut self, path: &str, name: &str, value: CatalogValue) -> CatalogResult<()> {
        let id = self.lookup(path)?;
        self.node_at_mut(id).set_attribute(name, value)?;
        log::debug!("Set attribute '{}' on {}", name, path);
        Ok(())
    }

    /// Raw attribute value of the node at `path`
    pub fn get_attribute(&self, path: &str, name: &str) -> CatalogResult<&CatalogValue> {
        let id = self.lookup(path)?;
        self.node_at(id).attribute(name)
    }

    /// Materialize derived fields for the node at `path`
    pub fn commit(&mut self, path: &str) -> CatalogResult<()> {
        let id = self.lookup(path)?;
        self.commit_id(id)
    }

    /// Commit every live node. Run after a load/update batch so readers
    /// only ever observe a fully committed tree.
    pub fn commit_all(&mut self) -> CatalogResult<()> {
        for id in 0..self.nodes.len() {
            if self.nodes[id].is_some() {
                self.commit_id(id)?;
            }
        }
        log::debug!("Committed all {} catalog nodes", self.node_count());
        Ok(())
    }

    fn commit_id(&mut self, id: NodeId) -> CatalogResult<()> {
        let type_name = self.node_at(id).type_name().to_string();
        let schema = self.schemas.get(&type_name)?;
        self.nodes[id]
            .as_mut()
            .expect("live node id")
            .commit(schema)
    }

    fn insert_node(
        &mut self,
        parent_id: NodeId,
        collection: &str,
        type_name: &str,
        name: &str,
    ) -> CatalogResult<NodeId> {
        if name.is_empty() || name.contains('/') {
            return Err(CatalogError::InvalidPath(format!(
                "invalid node name '{}'",
                name
            )));
        }

        let schema = self.schemas.get(type_name)?.clone();

        let parent = self.node_at(parent_id);
        let child_path = join_path(parent.path(), name);
        if self.index.contains_key(&child_path) {
            return Err(CatalogError::DuplicateName(child_path));
        }
        let relative_index = parent.collection(collection)?.len() + 1;

        let id = self.nodes.len();
        let node = CatalogNode::new(id, &child_path, name, &schema, Some(parent_id), relative_index);

        self.node_at_mut(parent_id).insert_child(collection, name, id)?;
        self.index.insert(child_path.clone(), id);
        self.nodes.push(Some(node));

        log::debug!("Created node {} at {} ({})", id, child_path, type_name);
        Ok(id)
    }

    /// Release a detached subtree: unindex and drop every node in it, then
    /// clear reference attributes elsewhere that pointed into it.
    fn destroy_subtree(&mut self, root_id: NodeId) {
        let mut removed_paths = HashSet::new();
        let mut stack = vec![root_id];
        while let Some(id) = stack.pop() {
            let node = self.nodes[id].take().expect("live node id");
            for collection in node.collection_names() {
                for (_, child_id) in node
                    .collection(collection)
                    .expect("declared collection")
                    .iter()
                {
                    stack.push(child_id);
                }
            }
            self.index.remove(node.path());
            removed_paths.insert(node.path().to_string());
        }

        let mut cleared = 0;
        for slot in &mut self.nodes {
            if let Some(node) = slot.as_mut() {
                cleared += node.scrub_references(&removed_paths);
            }
        }
        if cleared > 0 {
            log::warn!(
                "Cleared {} reference(s) into removed subtree ({} nodes)",
                cleared,
                removed_paths.len()
            );
        }
        log::debug!("Removed {} node(s) from the catalog", removed_paths.len());
    }

    fn node_at(&self, id: NodeId) -> &CatalogNode {
        self.nodes[id].as_ref().expect("live node id")
    }

    fn node_at_mut(&mut self, id: NodeId) -> &mut CatalogNode {
        self.nodes[id].as_mut().expect("live node id")
    }
}

/// Split a path into (parent path, terminal segment)
fn split_path(path: &str) -> CatalogResult<(&str, &str)> {
    if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
        return Err(CatalogError::InvalidPath(path.to_string()));
    }
    let cut = path.rfind('/').expect("leading slash present");
    let parent = if cut == 0 { ROOT_PATH } else { &path[..cut] };
    Ok((parent, &path[cut + 1..]))
}

/// Child path under a parent path
fn join_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}
