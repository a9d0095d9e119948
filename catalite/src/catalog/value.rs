// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value types for catalog node attributes
//!
//! Every attribute on a catalog node holds a `CatalogValue`, a tagged union
//! over the closed set of kinds the schema language supports:
//! - Scalars: Integer, Double, Boolean, String
//! - Cross-tree links: Reference (a path), ReferenceList (ordered paths)
//!
//! The kind stored for a given (type, attribute) pair is fixed by schema and
//! never changes over a node's lifetime. An unset reference is
//! `Reference(None)`, never a dangling path.

use super::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant for the kinds a `CatalogValue` can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Double,
    Boolean,
    String,
    Reference,
    ReferenceList,
}

impl ValueKind {
    /// Whether values of this kind are materialized into derived native
    /// fields at commit time. References stay path-valued and are resolved
    /// through the registry instead.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ValueKind::Reference | ValueKind::ReferenceList)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Reference => "reference",
            ValueKind::ReferenceList => "reference_list",
        };
        write!(f, "{}", s)
    }
}

/// Tagged attribute value stored in a node's raw field map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    /// Path of the referenced node; `None` is the null reference
    Reference(Option<String>),
    /// Ordered list of referenced node paths
    ReferenceList(Vec<String>),
}

impl CatalogValue {
    /// Empty/default value for a schema-declared kind
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => CatalogValue::Integer(0),
            ValueKind::Double => CatalogValue::Double(0.0),
            ValueKind::Boolean => CatalogValue::Boolean(false),
            ValueKind::String => CatalogValue::String(String::new()),
            ValueKind::Reference => CatalogValue::Reference(None),
            ValueKind::ReferenceList => CatalogValue::ReferenceList(Vec::new()),
        }
    }

    /// Kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            CatalogValue::Integer(_) => ValueKind::Integer,
            CatalogValue::Double(_) => ValueKind::Double,
            CatalogValue::Boolean(_) => ValueKind::Boolean,
            CatalogValue::String(_) => ValueKind::String,
            CatalogValue::Reference(_) => ValueKind::Reference,
            CatalogValue::ReferenceList(_) => ValueKind::ReferenceList,
        }
    }

    pub fn as_integer(&self) -> CatalogResult<i64> {
        match self {
            CatalogValue::Integer(v) => Ok(*v),
            other => Err(Self::mismatch(ValueKind::Integer, other)),
        }
    }

    pub fn as_double(&self) -> CatalogResult<f64> {
        match self {
            CatalogValue::Double(v) => Ok(*v),
            other => Err(Self::mismatch(ValueKind::Double, other)),
        }
    }

    pub fn as_boolean(&self) -> CatalogResult<bool> {
        match self {
            CatalogValue::Boolean(v) => Ok(*v),
            other => Err(Self::mismatch(ValueKind::Boolean, other)),
        }
    }

    pub fn as_str(&self) -> CatalogResult<&str> {
        match self {
            CatalogValue::String(v) => Ok(v.as_str()),
            other => Err(Self::mismatch(ValueKind::String, other)),
        }
    }

    /// Path of a reference value; `Ok(None)` for the null reference
    pub fn as_reference(&self) -> CatalogResult<Option<&str>> {
        match self {
            CatalogValue::Reference(v) => Ok(v.as_deref()),
            other => Err(Self::mismatch(ValueKind::Reference, other)),
        }
    }

    pub fn as_reference_list(&self) -> CatalogResult<&[String]> {
        match self {
            CatalogValue::ReferenceList(v) => Ok(v.as_slice()),
            other => Err(Self::mismatch(ValueKind::ReferenceList, other)),
        }
    }

    fn mismatch(expected: ValueKind, found: &CatalogValue) -> CatalogError {
        CatalogError::TypeMismatch(format!(
            "expected {}, found {}",
            expected,
            found.kind()
        ))
    }
}

/// Derived native field value, materialized at commit time
///
/// Commit copies scalar attributes out of the raw tagged map into this form
/// so readers get concrete in-memory values without re-checking tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl NativeValue {
    /// Materialize a scalar catalog value; references are not derivable
    pub fn from_catalog_value(value: &CatalogValue) -> CatalogResult<Self> {
        match value {
            CatalogValue::Integer(v) => Ok(NativeValue::Integer(*v)),
            CatalogValue::Double(v) => Ok(NativeValue::Double(*v)),
            CatalogValue::Boolean(v) => Ok(NativeValue::Boolean(*v)),
            CatalogValue::String(v) => Ok(NativeValue::String(v.clone())),
            other => Err(CatalogError::TypeMismatch(format!(
                "cannot derive native field from {} value",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_declared_kind() {
        for kind in [
            ValueKind::Integer,
            ValueKind::Double,
            ValueKind::Boolean,
            ValueKind::String,
            ValueKind::Reference,
            ValueKind::ReferenceList,
        ] {
            assert_eq!(CatalogValue::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_kind_checked_accessors() {
        let v = CatalogValue::Integer(42);
        assert_eq!(v.as_integer().unwrap(), 42);
        assert!(matches!(
            v.as_str(),
            Err(CatalogError::TypeMismatch(_))
        ));

        let r = CatalogValue::Reference(None);
        assert_eq!(r.as_reference().unwrap(), None);

        let r = CatalogValue::Reference(Some("/cluster/db0".to_string()));
        assert_eq!(r.as_reference().unwrap(), Some("/cluster/db0"));
    }

    #[test]
    fn test_native_value_rejects_references() {
        let v = CatalogValue::Reference(Some("/cluster".to_string()));
        assert!(matches!(
            NativeValue::from_catalog_value(&v),
            Err(CatalogError::TypeMismatch(_))
        ));
        assert_eq!(
            NativeValue::from_catalog_value(&CatalogValue::Boolean(true)).unwrap(),
            NativeValue::Boolean(true)
        );
    }
}
