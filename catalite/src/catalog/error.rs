// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the catalog tree

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Unknown catalog type: {0}")]
    UnknownType(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("No such path: {0}")]
    NoSuchPath(String),

    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    #[error("Node not committed: {0}")]
    NotCommitted(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidSchema(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
