// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalite - a schema-driven in-memory metadata catalog
//!
//! Catalite models a database's logical and physical structure as a tree of
//! typed nodes: clusters, databases, tables, columns, indexes, partitions.
//! Node shapes are declared as schema data rather than hand-written types,
//! so the tree machinery never special-cases an entity type.
//!
//! # Usage
//!
//! ```rust
//! use catalite::{Catalog, CatalogValue};
//! use catalite::schema::builtin;
//! use catalite::typed::Partition;
//!
//! let mut catalog = Catalog::new(builtin::database_schema())?;
//! catalog.create_node("/cluster", "Cluster", "cluster")?;
//! catalog.create_node("/cluster/db0", "Database", "db0")?;
//! catalog.create_node("/cluster/db0/partition0", "Partition", "partition0")?;
//! catalog.set_attribute("/cluster/db0/partition0", "id", CatalogValue::Integer(7))?;
//! catalog.commit_all()?;
//!
//! let node = catalog.get("/cluster/db0/partition0").unwrap();
//! assert_eq!(Partition::wrap(node)?.id()?, 7);
//! # Ok::<(), catalite::CatalogError>(())
//! ```
//!
//! Mutation runs through the [`Catalog`] registry only, in the loader's
//! create → set → add/remove → commit sequence; readers observe the tree
//! after the commit pass.

pub mod catalog;
pub mod schema;
pub mod typed;

// Re-export the core surface
pub use catalog::error::{CatalogError, CatalogResult};
pub use catalog::node::{CatalogNode, LifecycleState, NodeId};
pub use catalog::registry::{Catalog, ROOT_PATH};
pub use catalog::value::{CatalogValue, NativeValue, ValueKind};
pub use schema::types::{SchemaRegistry, TypeSchema};

/// Catalite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Catalite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
