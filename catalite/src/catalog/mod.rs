// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog tree core
//!
//! The generic object model every catalog entity type builds on: tagged
//! attribute values, the base node shape, and the owning registry that
//! indexes nodes by path and keeps the tree consistent through structural
//! edits.

pub mod error;
pub mod node;
pub mod registry;
pub mod value;
