// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Strongly-typed read-only views over catalog nodes
//!
//! One wrapper per built-in entity type, exposing the type's derived fields
//! and child collections with native signatures instead of string-keyed
//! lookups. The wrappers add no storage of their own; they borrow the
//! generic node and check its type tag at wrap time. Derived getters
//! require a committed node, so a reader holding a wrapper before the
//! commit pass gets `NotCommitted` rather than a stale or default value.
//!
//! Reference getters (`Site::host`, `Table::partition_column`, ...) go back
//! through the registry so a scrubbed reference surfaces as `Ok(None)` and
//! a genuinely broken one as `DanglingReference`.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::node::{CatalogNode, NodeId};
use crate::catalog::registry::Catalog;

fn check_type<'a>(node: &'a CatalogNode, expected: &str) -> CatalogResult<&'a CatalogNode> {
    if node.type_name() != expected {
        return Err(CatalogError::TypeMismatch(format!(
            "node {} is a {}, not a {}",
            node.path(),
            node.type_name(),
            expected
        )));
    }
    Ok(node)
}

/// A set of connected hosts running the database
pub struct Cluster<'a> {
    node: &'a CatalogNode,
}

impl<'a> Cluster<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Cluster")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    pub fn leader_address(&self) -> CatalogResult<&str> {
        self.node.derived_str("leaderaddress")
    }

    pub fn local_epoch(&self) -> CatalogResult<i64> {
        self.node.derived_integer("localepoch")
    }

    pub fn databases(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("databases")
    }

    pub fn sites(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("sites")
    }
}

/// A logical database with its tables and partitions
pub struct Database<'a> {
    node: &'a CatalogNode,
}

impl<'a> Database<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Database")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    pub fn schema(&self) -> CatalogResult<&str> {
        self.node.derived_str("schema")
    }

    pub fn tables(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("tables")
    }

    pub fn partitions(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("partitions")
    }
}

/// A table descriptor
pub struct Table<'a> {
    node: &'a CatalogNode,
}

impl<'a> Table<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Table")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    pub fn is_replicated(&self) -> CatalogResult<bool> {
        self.node.derived_boolean("isreplicated")
    }

    pub fn estimated_tuple_count(&self) -> CatalogResult<i64> {
        self.node.derived_integer("estimatedtuplecount")
    }

    /// The column the table is partitioned on, if any
    pub fn partition_column(&self, catalog: &Catalog) -> CatalogResult<Option<NodeId>> {
        catalog.resolve(self.node.path(), "partitioncolumn")
    }

    pub fn columns(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("columns")
    }

    pub fn indexes(&self) -> CatalogResult<Vec<NodeId>> {
        self.node.children("indexes")
    }
}

/// A column descriptor
pub struct Column<'a> {
    node: &'a CatalogNode,
}

impl<'a> Column<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Column")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    /// Ordinal position within the table
    pub fn index(&self) -> CatalogResult<i64> {
        self.node.derived_integer("index")
    }

    pub fn column_type(&self) -> CatalogResult<i64> {
        self.node.derived_integer("type")
    }

    pub fn size(&self) -> CatalogResult<i64> {
        self.node.derived_integer("size")
    }

    pub fn nullable(&self) -> CatalogResult<bool> {
        self.node.derived_boolean("nullable")
    }

    pub fn default_value(&self) -> CatalogResult<&str> {
        self.node.derived_str("defaultvalue")
    }
}

/// An index descriptor
pub struct Index<'a> {
    node: &'a CatalogNode,
}

impl<'a> Index<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Index")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    pub fn unique(&self) -> CatalogResult<bool> {
        self.node.derived_boolean("unique")
    }

    pub fn index_type(&self) -> CatalogResult<i64> {
        self.node.derived_integer("type")
    }

    /// Columns covered by the index, in declaration order
    pub fn columns(&self, catalog: &Catalog) -> CatalogResult<Vec<NodeId>> {
        catalog.resolve_list(self.node.path(), "columns")
    }
}

/// A physical execution context for the system
pub struct Site<'a> {
    node: &'a CatalogNode,
}

impl<'a> Site<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Site")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    /// Does the site execute workunits?
    pub fn is_exec(&self) -> CatalogResult<bool> {
        self.node.derived_boolean("isexec")
    }

    /// Which host does the site belong to?
    pub fn host(&self, catalog: &Catalog) -> CatalogResult<Option<NodeId>> {
        catalog.resolve(self.node.path(), "host")
    }

    /// Which logical data partition does this site process?
    pub fn partition(&self, catalog: &Catalog) -> CatalogResult<Option<NodeId>> {
        catalog.resolve(self.node.path(), "partition")
    }

    /// If the site is an initiator, its tightly packed id
    pub fn initiator_id(&self) -> CatalogResult<i64> {
        self.node.derived_integer("initiatorid")
    }

    /// Is the site up?
    pub fn is_up(&self) -> CatalogResult<bool> {
        self.node.derived_boolean("isUp")
    }

    pub fn port(&self) -> CatalogResult<i64> {
        self.node.derived_integer("port")
    }

    /// Inbound port for receiving data messages
    pub fn messenger_port(&self) -> CatalogResult<i64> {
        self.node.derived_integer("messenger_port")
    }
}

/// A logical data partition
pub struct Partition<'a> {
    node: &'a CatalogNode,
}

impl<'a> Partition<'a> {
    pub fn wrap(node: &'a CatalogNode) -> CatalogResult<Self> {
        Ok(Self {
            node: check_type(node, "Partition")?,
        })
    }

    pub fn node(&self) -> &CatalogNode {
        self.node
    }

    pub fn id(&self) -> CatalogResult<i64> {
        self.node.derived_integer("id")
    }
}
