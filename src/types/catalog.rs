use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{Oid, PgType, INVALID_OID};

/// Catalog facts about a single type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub oid: Oid,
    pub name: String,
    /// Element type when this is an array type
    pub element_type: Option<Oid>,
    /// Array type whose elements are of this type
    pub array_type: Option<Oid>,
    pub collatable: bool,
}

/// Type metadata lookups needed while resolving node attributes.
///
/// The tree code never talks to a real system catalog; callers plug in
/// whatever backs their type registry.
pub trait TypeCatalog {
    /// Look up everything known about a type
    fn type_info(&self, type_oid: Oid) -> Option<&TypeInfo>;

    /// Array type whose elements are `elem_type`
    fn array_type(&self, elem_type: Oid) -> Option<Oid> {
        self.type_info(elem_type).and_then(|info| info.array_type)
    }

    /// Element type of an array type
    fn element_type(&self, array_type: Oid) -> Option<Oid> {
        self.type_info(array_type).and_then(|info| info.element_type)
    }

    /// Array type used to hold a collection of `type_oid` values.
    ///
    /// Arrays of arrays are not a separate type, so an array type promotes
    /// to itself.
    fn promoted_array_type(&self, type_oid: Oid) -> Option<Oid> {
        if let Some(array) = self.array_type(type_oid) {
            return Some(array);
        }
        if self.element_type(type_oid).is_some() {
            return Some(type_oid);
        }
        None
    }

    fn is_collatable(&self, type_oid: Oid) -> bool {
        self.type_info(type_oid).is_some_and(|info| info.collatable)
    }

    fn type_name(&self, type_oid: Oid) -> Option<&str> {
        self.type_info(type_oid).map(|info| info.name.as_str())
    }
}

/// Built-in types, keyed by OID
static BUILTIN_TYPES: Lazy<HashMap<Oid, TypeInfo>> = Lazy::new(|| {
    PgType::ALL
        .iter()
        .map(|ty| {
            let info = TypeInfo {
                oid: ty.to_oid(),
                name: ty.name().to_string(),
                element_type: ty.element_type().map(|t| t.to_oid()),
                array_type: ty.array_type().map(|t| t.to_oid()),
                collatable: ty.is_collatable(),
            };
            (info.oid, info)
        })
        .collect()
});

/// Catalog answering only for built-in types
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTypeCatalog;

impl TypeCatalog for BuiltinTypeCatalog {
    fn type_info(&self, type_oid: Oid) -> Option<&TypeInfo> {
        BUILTIN_TYPES.get(&type_oid)
    }
}

/// Catalog seeded with the built-in types that also accepts user-defined
/// types (domains, composites, enums and their array types)
#[derive(Debug, Clone)]
pub struct InMemoryTypeCatalog {
    types: HashMap<Oid, TypeInfo>,
}

impl InMemoryTypeCatalog {
    pub fn new() -> Self {
        Self {
            types: BUILTIN_TYPES.clone(),
        }
    }

    /// Register (or replace) a type
    pub fn register(&mut self, info: TypeInfo) {
        self.types.insert(info.oid, info);
    }

    /// Register a scalar type together with its array type
    pub fn register_with_array(&mut self, oid: Oid, name: &str, array_oid: Oid, collatable: bool) {
        self.register(TypeInfo {
            oid,
            name: name.to_string(),
            element_type: None,
            array_type: Some(array_oid),
            collatable,
        });
        self.register(TypeInfo {
            oid: array_oid,
            name: format!("_{}", name),
            element_type: Some(oid),
            array_type: None,
            collatable,
        });
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for InMemoryTypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog for InMemoryTypeCatalog {
    fn type_info(&self, type_oid: Oid) -> Option<&TypeInfo> {
        if type_oid == INVALID_OID {
            return None;
        }
        self.types.get(&type_oid)
    }
}
