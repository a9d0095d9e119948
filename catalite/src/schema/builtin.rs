// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Built-in descriptor set for the database catalog
//!
//! Stands in for the output of the schema compiler: one `TypeSchema` per
//! entity type in the physical/logical database model. Each descriptor is a
//! small, mechanically similar increment; none of them adds behavior.

use super::types::{SchemaRegistry, TypeSchema};
use crate::catalog::value::ValueKind;

/// Root type name used by the built-in descriptor set
pub const ROOT_TYPE: &str = "Catalog";

/// Build the registry for the standard database catalog tree:
///
/// ```text
/// Catalog
/// └── clusters: Cluster
///     ├── hosts: Host
///     ├── sites: Site
///     └── databases: Database
///         ├── tables: Table
///         │   ├── columns: Column
///         │   └── indexes: Index
///         └── partitions: Partition
/// ```
pub fn database_schema() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new(ROOT_TYPE);

    registry.register(TypeSchema::new(ROOT_TYPE).with_collection("clusters", "Cluster"));

    registry.register(
        TypeSchema::new("Cluster")
            .with_attribute("leaderaddress", ValueKind::String)
            .with_attribute("localepoch", ValueKind::Integer)
            .with_collection("hosts", "Host")
            .with_collection("sites", "Site")
            .with_collection("databases", "Database")
            .with_derived("leaderaddress")
            .with_derived("localepoch"),
    );

    registry.register(
        TypeSchema::new("Host")
            .with_attribute("ipaddr", ValueKind::String)
            .with_derived("ipaddr"),
    );

    // A physical execution context: which host it runs on and which logical
    // partition it serves are cross-tree references.
    registry.register(
        TypeSchema::new("Site")
            .with_attribute("isexec", ValueKind::Boolean)
            .with_attribute("host", ValueKind::Reference)
            .with_attribute("partition", ValueKind::Reference)
            .with_attribute("initiatorid", ValueKind::Integer)
            .with_attribute("isUp", ValueKind::Boolean)
            .with_attribute("port", ValueKind::Integer)
            .with_attribute("messenger_port", ValueKind::Integer)
            .with_derived("isexec")
            .with_derived("initiatorid")
            .with_derived("isUp")
            .with_derived("port")
            .with_derived("messenger_port"),
    );

    registry.register(
        TypeSchema::new("Database")
            .with_attribute("schema", ValueKind::String)
            .with_collection("tables", "Table")
            .with_collection("partitions", "Partition")
            .with_derived("schema"),
    );

    registry.register(
        TypeSchema::new("Table")
            .with_attribute("isreplicated", ValueKind::Boolean)
            .with_attribute("partitioncolumn", ValueKind::Reference)
            .with_attribute("estimatedtuplecount", ValueKind::Integer)
            .with_collection("columns", "Column")
            .with_collection("indexes", "Index")
            .with_derived("isreplicated")
            .with_derived("estimatedtuplecount"),
    );

    registry.register(
        TypeSchema::new("Column")
            .with_attribute("index", ValueKind::Integer)
            .with_attribute("type", ValueKind::Integer)
            .with_attribute("size", ValueKind::Integer)
            .with_attribute("nullable", ValueKind::Boolean)
            .with_attribute("defaultvalue", ValueKind::String)
            .with_derived("index")
            .with_derived("type")
            .with_derived("size")
            .with_derived("nullable")
            .with_derived("defaultvalue"),
    );

    registry.register(
        TypeSchema::new("Index")
            .with_attribute("unique", ValueKind::Boolean)
            .with_attribute("type", ValueKind::Integer)
            .with_attribute("columns", ValueKind::ReferenceList)
            .with_derived("unique")
            .with_derived("type"),
    );

    registry.register(
        TypeSchema::new("Partition")
            .with_attribute("id", ValueKind::Integer)
            .with_derived("id"),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = database_schema();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.root_type(), ROOT_TYPE);
        assert_eq!(registry.type_count(), 9);
    }

    #[test]
    fn test_partition_declares_single_integer_attribute() {
        let registry = database_schema();
        let partition = registry.get("Partition").unwrap();
        assert_eq!(partition.attributes.len(), 1);
        assert_eq!(
            partition.attribute("id").unwrap().kind,
            ValueKind::Integer
        );
        assert!(partition.collections.is_empty());
    }
}
