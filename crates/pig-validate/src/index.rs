//! Lookup maps built in one pass over a package graph.
//!
//! Builders never fail. An id that is absent simply has no entry; the
//! checkers that need a reference resolved decide what that means. When ids
//! repeat (uniqueness not selected), the first occurrence wins.

use pig_model::{
    EntityClass, InstanceRef, Item, ItemType, LinkClass, Package, PropertyClass, RelationshipClass,
};
use std::collections::BTreeMap;

/// `id → itemType` over every top-level item.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex<'a> {
    types: BTreeMap<&'a str, ItemType>,
}

impl<'a> TypeIndex<'a> {
    pub fn build(package: &'a Package) -> Self {
        let mut types = BTreeMap::new();
        for item in &package.graph {
            if let Some(id) = item.id() {
                types.entry(id).or_insert_with(|| item.item_type());
            }
        }
        Self { types }
    }

    pub fn get(&self, id: &str) -> Option<ItemType> {
        self.types.get(id).copied()
    }
}

/// An Entity or Relationship class definition.
#[derive(Debug, Clone, Copy)]
pub enum ClassDef<'a> {
    Entity(&'a EntityClass),
    Relationship(&'a RelationshipClass),
}

impl<'a> ClassDef<'a> {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Entity(_) => ItemType::Entity,
            Self::Relationship(_) => ItemType::Relationship,
        }
    }

    pub fn specializes(&self) -> Option<&'a str> {
        match self {
            Self::Entity(class) => class.specializes.as_deref(),
            Self::Relationship(class) => class.specializes.as_deref(),
        }
    }

    pub fn eligible_property(&self) -> Option<&'a [String]> {
        match self {
            Self::Entity(class) => class.eligible_property.as_deref(),
            Self::Relationship(class) => class.eligible_property.as_deref(),
        }
    }

    pub fn eligible_target_link(&self) -> Option<&'a [String]> {
        match self {
            Self::Entity(class) => class.eligible_target_link.as_deref(),
            Self::Relationship(class) => class.eligible_target_link.as_deref(),
        }
    }

    /// Entity classes have no source side; they never restrict it.
    pub fn eligible_source_link(&self) -> Option<&'a [String]> {
        match self {
            Self::Entity(_) => None,
            Self::Relationship(class) => class.eligible_source_link.as_deref(),
        }
    }
}

/// `id → class definition` restricted to Entity/Relationship classes.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex<'a> {
    classes: BTreeMap<&'a str, ClassDef<'a>>,
}

impl<'a> ClassIndex<'a> {
    pub fn build(package: &'a Package) -> Self {
        let mut classes = BTreeMap::new();
        for item in &package.graph {
            let (id, class) = match item {
                Item::Entity(class) => (class.id.as_deref(), ClassDef::Entity(class)),
                Item::Relationship(class) => (class.id.as_deref(), ClassDef::Relationship(class)),
                _ => continue,
            };
            if let Some(id) = id {
                classes.entry(id).or_insert(class);
            }
        }
        Self { classes }
    }

    pub fn get(&self, id: &str) -> Option<ClassDef<'a>> {
        self.classes.get(id).copied()
    }
}

/// `id → Property class definition`.
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex<'a> {
    properties: BTreeMap<&'a str, &'a PropertyClass>,
}

impl<'a> PropertyIndex<'a> {
    pub fn build(package: &'a Package) -> Self {
        let mut properties = BTreeMap::new();
        for item in &package.graph {
            if let Item::Property(class) = item
                && let Some(id) = class.id.as_deref()
            {
                properties.entry(id).or_insert(class);
            }
        }
        Self { properties }
    }

    pub fn get(&self, id: &str) -> Option<&'a PropertyClass> {
        self.properties.get(id).copied()
    }
}

/// `id → Link class definition`.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex<'a> {
    links: BTreeMap<&'a str, &'a LinkClass>,
}

impl<'a> LinkIndex<'a> {
    pub fn build(package: &'a Package) -> Self {
        let mut links = BTreeMap::new();
        for item in &package.graph {
            if let Item::Link(class) = item
                && let Some(id) = class.id.as_deref()
            {
                links.entry(id).or_insert(class);
            }
        }
        Self { links }
    }

    pub fn get(&self, id: &str) -> Option<&'a LinkClass> {
        self.links.get(id).copied()
    }
}

/// `id → instance`, used to judge link endpoints.
#[derive(Debug, Clone, Default)]
pub struct InstanceIndex<'a> {
    instances: BTreeMap<&'a str, InstanceRef<'a>>,
}

impl<'a> InstanceIndex<'a> {
    pub fn build(package: &'a Package) -> Self {
        let mut instances = BTreeMap::new();
        for (_, instance) in package.instances() {
            if let Some(id) = instance.id() {
                instances.entry(id).or_insert(instance);
            }
        }
        Self { instances }
    }

    pub fn get(&self, id: &str) -> Option<InstanceRef<'a>> {
        self.instances.get(id).copied()
    }
}
