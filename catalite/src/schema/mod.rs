// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema descriptors and the built-in type set
//!
//! Node types are declared as data, not code: a `TypeSchema` per entity
//! type, collected in a `SchemaRegistry` the catalog consults when creating
//! nodes. `builtin` holds the descriptor set for the standard database
//! catalog tree.

pub mod builtin;
pub mod types;
