// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema descriptors for catalog node types
//!
//! A `TypeSchema` is the registration metadata the upstream schema compiler
//! emits for one entity type: which attribute names (and kinds) the type
//! carries, which child collections it owns, and which raw attributes are
//! materialized into derived native fields at commit time. The tree
//! machinery never special-cases a node type; everything it needs to know
//! about a type lives here as data.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One declared attribute on a node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    pub kind: ValueKind,
    pub description: Option<String>,
}

/// One declared child collection on a node type
///
/// The `child_type` acts as the collection's factory: adding a child to the
/// collection always instantiates that concrete type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDef {
    pub name: String,
    pub child_type: String,
}

/// Mapping from a raw scalar attribute to a derived native field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedFieldDef {
    /// Name of the derived field exposed to readers
    pub field: String,
    /// Name of the raw attribute it is materialized from
    pub source: String,
}

/// Complete descriptor for one catalog node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSchema {
    pub name: String,
    pub attributes: Vec<AttributeDef>,
    pub collections: Vec<CollectionDef>,
    pub derived: Vec<DerivedFieldDef>,
}

impl TypeSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            collections: Vec::new(),
            derived: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, kind: ValueKind) -> Self {
        self.attributes.push(AttributeDef {
            name: name.to_string(),
            kind,
            description: None,
        });
        self
    }

    pub fn with_collection(mut self, name: &str, child_type: &str) -> Self {
        self.collections.push(CollectionDef {
            name: name.to_string(),
            child_type: child_type.to_string(),
        });
        self
    }

    /// Declare a derived field materialized from the attribute of the same
    /// name. Scalar attributes only; references stay registry-resolved.
    pub fn with_derived(mut self, field: &str) -> Self {
        self.derived.push(DerivedFieldDef {
            field: field.to_string(),
            source: field.to_string(),
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionDef> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// The unique collection holding children of `child_type`, if any
    pub fn collection_for_child_type(&self, child_type: &str) -> Option<&CollectionDef> {
        self.collections.iter().find(|c| c.child_type == child_type)
    }
}

/// Registry of all declared node types plus the designated root type
///
/// This is the factory table the catalog consults when creating nodes. It
/// is usually populated from the built-in descriptor set
/// (`schema::builtin::database_schema`) but can also be loaded from the
/// JSON form the schema compiler emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRegistry {
    root_type: String,
    types: HashMap<String, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new(root_type: &str) -> Self {
        Self {
            root_type: root_type.to_string(),
            types: HashMap::new(),
        }
    }

    /// Register a type descriptor, replacing any previous one of that name
    pub fn register(&mut self, schema: TypeSchema) {
        log::debug!("Registered catalog type descriptor: {}", schema.name);
        self.types.insert(schema.name.clone(), schema);
    }

    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    pub fn get(&self, type_name: &str) -> CatalogResult<&TypeSchema> {
        self.types
            .get(type_name)
            .ok_or_else(|| CatalogError::UnknownType(type_name.to_string()))
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Load a registry from the JSON form emitted by the schema compiler
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let registry: SchemaRegistry = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Cross-type consistency checks, run once before the registry is used
    /// to build a tree:
    /// - the root type is registered
    /// - every collection's child type is registered
    /// - every derived field sources a declared scalar attribute
    /// - attribute, collection and derived-field names are unique per type
    pub fn validate(&self) -> CatalogResult<()> {
        if !self.types.contains_key(&self.root_type) {
            return Err(CatalogError::InvalidSchema(format!(
                "root type '{}' is not registered",
                self.root_type
            )));
        }

        for schema in self.types.values() {
            let mut seen = std::collections::HashSet::new();
            for attr in &schema.attributes {
                if !seen.insert(attr.name.as_str()) {
                    return Err(CatalogError::InvalidSchema(format!(
                        "type '{}' declares attribute '{}' twice",
                        schema.name, attr.name
                    )));
                }
            }

            let mut seen = std::collections::HashSet::new();
            for coll in &schema.collections {
                if !seen.insert(coll.name.as_str()) {
                    return Err(CatalogError::InvalidSchema(format!(
                        "type '{}' declares collection '{}' twice",
                        schema.name, coll.name
                    )));
                }
                if !self.types.contains_key(&coll.child_type) {
                    return Err(CatalogError::InvalidSchema(format!(
                        "type '{}' collection '{}' holds unregistered type '{}'",
                        schema.name, coll.name, coll.child_type
                    )));
                }
            }

            let mut seen = std::collections::HashSet::new();
            for derived in &schema.derived {
                if !seen.insert(derived.field.as_str()) {
                    return Err(CatalogError::InvalidSchema(format!(
                        "type '{}' declares derived field '{}' twice",
                        schema.name, derived.field
                    )));
                }
                match schema.attribute(&derived.source) {
                    None => {
                        return Err(CatalogError::InvalidSchema(format!(
                            "type '{}' derived field '{}' sources undeclared attribute '{}'",
                            schema.name, derived.field, derived.source
                        )));
                    }
                    Some(attr) if !attr.kind.is_scalar() => {
                        return Err(CatalogError::InvalidSchema(format!(
                            "type '{}' derived field '{}' sources non-scalar attribute '{}'",
                            schema.name, derived.field, derived.source
                        )));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}
