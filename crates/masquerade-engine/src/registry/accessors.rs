use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use crate::errors::{AnonymizeError, Result};
use crate::value::{FieldValue, GeneratedValue};

/// Conventional read/write accessor names for `field`.
pub fn accessor_names(field: &str) -> (String, String) {
    (format!("get_{field}"), format!("set_{field}"))
}

/// Field being processed, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    pub type_name: &'static str,
    pub field: &'static str,
}

impl FieldRef {
    fn getter(&self) -> String {
        accessor_names(self.field).0
    }

    fn setter(&self) -> String {
        accessor_names(self.field).1
    }

    fn mismatch(&self, value: &GeneratedValue, expected: &'static str) -> AnonymizeError {
        AnonymizeError::Configuration(format!(
            "field '{}' of {} holds {expected} which cannot take a generated {} value",
            self.field,
            self.type_name,
            value.kind()
        ))
    }
}

/// Registration state of one accessor.
#[derive(Debug, Clone, Copy)]
pub enum Accessor<F> {
    Bound(F),
    /// No accessor was registered.
    Missing,
    /// Registered but not callable; carries the reason.
    Restricted(&'static str),
}

impl<F: Copy> Accessor<F> {
    fn resolve(&self, field: FieldRef, name: String) -> Result<F> {
        match self {
            Accessor::Bound(accessor) => Ok(*accessor),
            Accessor::Missing => Err(AnonymizeError::MethodResolution {
                type_name: field.type_name,
                field: field.field,
                accessor: name,
            }),
            Accessor::Restricted(reason) => Err(AnonymizeError::Access {
                type_name: field.type_name,
                accessor: name,
                reason: *reason,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Vec,
    VecDeque,
    LinkedList,
    BTreeSet,
    HashSet,
    BoxedSlice,
    Array,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Vec => "Vec",
            CollectionKind::VecDeque => "VecDeque",
            CollectionKind::LinkedList => "LinkedList",
            CollectionKind::BTreeSet => "BTreeSet",
            CollectionKind::HashSet => "HashSet",
            CollectionKind::BoxedSlice => "boxed slice",
            CollectionKind::Array => "fixed-size array",
        }
    }

    /// Whether values can be appended to an existing instance.
    pub fn is_appendable(&self) -> bool {
        !matches!(self, CollectionKind::BoxedSlice | CollectionKind::Array)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar,
    Collection(CollectionKind),
}

/// Multi-valued field types.
///
/// Sets may absorb duplicates, so they can grow by fewer elements than
/// were generated.
pub trait Collection: 'static {
    type Item: FieldValue;
    const KIND: CollectionKind;

    /// Appends `items` in place and returns how many were inserted, or
    /// reports the kind when the container is fixed.
    fn append(&mut self, items: Vec<Self::Item>) -> std::result::Result<usize, CollectionKind>;
}

impl<V: FieldValue> Collection for Vec<V> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::Vec;

    fn append(&mut self, items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        let inserted = items.len();
        self.extend(items);
        Ok(inserted)
    }
}

impl<V: FieldValue> Collection for VecDeque<V> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::VecDeque;

    fn append(&mut self, items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        let inserted = items.len();
        self.extend(items);
        Ok(inserted)
    }
}

impl<V: FieldValue> Collection for LinkedList<V> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::LinkedList;

    fn append(&mut self, items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        let inserted = items.len();
        self.extend(items);
        Ok(inserted)
    }
}

impl<V: FieldValue + Ord> Collection for BTreeSet<V> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::BTreeSet;

    fn append(&mut self, items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        let before = self.len();
        self.extend(items);
        Ok(self.len() - before)
    }
}

impl<V: FieldValue + Eq + Hash> Collection for HashSet<V> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::HashSet;

    fn append(&mut self, items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        let before = self.len();
        self.extend(items);
        Ok(self.len() - before)
    }
}

impl<V: FieldValue> Collection for Box<[V]> {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::BoxedSlice;

    fn append(&mut self, _items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        Err(Self::KIND)
    }
}

impl<V: FieldValue, const N: usize> Collection for [V; N] {
    type Item = V;
    const KIND: CollectionKind = CollectionKind::Array;

    fn append(&mut self, _items: Vec<V>) -> std::result::Result<usize, CollectionKind> {
        Err(Self::KIND)
    }
}

/// Type-erased access to one registered field.
pub(crate) trait FieldBinding<T>: Send + Sync {
    fn shape(&self) -> FieldShape;

    /// Reads the field through its read accessor; `false` when unset.
    fn is_present(&self, field: FieldRef, target: &T) -> Result<bool>;

    /// Fails when the accessor `store` would call cannot be resolved.
    fn check_writable(&self, field: FieldRef) -> Result<()>;

    /// Current value as a path, for file markers.
    fn current_text(&self, field: FieldRef, target: &T) -> Result<String>;

    /// Scalars receive the first value through the write accessor;
    /// collections append every value in place. Returns the number of
    /// values that landed in the field.
    fn store(
        &self,
        field: FieldRef,
        target: &mut T,
        values: Vec<GeneratedValue>,
    ) -> Result<usize>;
}

pub(crate) struct ScalarBinding<T, V> {
    pub(crate) read: Accessor<fn(&T) -> Option<&V>>,
    pub(crate) write: Accessor<fn(&mut T, V)>,
}

impl<T: 'static, V: FieldValue> FieldBinding<T> for ScalarBinding<T, V> {
    fn shape(&self) -> FieldShape {
        FieldShape::Scalar
    }

    fn is_present(&self, field: FieldRef, target: &T) -> Result<bool> {
        let read = self.read.resolve(field, field.getter())?;
        Ok(read(target).is_some())
    }

    fn check_writable(&self, field: FieldRef) -> Result<()> {
        self.write.resolve(field, field.setter()).map(|_| ())
    }

    fn current_text(&self, field: FieldRef, target: &T) -> Result<String> {
        let read = self.read.resolve(field, field.getter())?;
        let current = read(target).ok_or_else(|| {
            AnonymizeError::Configuration(format!(
                "field '{}' of {} has no current path",
                field.field, field.type_name
            ))
        })?;
        current.as_text().map(str::to_string).ok_or_else(|| {
            AnonymizeError::Configuration(format!(
                "field '{}' of {} holds {} which is not a textual path",
                field.field,
                field.type_name,
                V::TYPE_NAME
            ))
        })
    }

    fn store(
        &self,
        field: FieldRef,
        target: &mut T,
        values: Vec<GeneratedValue>,
    ) -> Result<usize> {
        let Some(value) = values.into_iter().next() else {
            return Ok(0);
        };
        let converted = match V::from_generated(value.clone()) {
            Some(converted) => converted,
            None => return Err(field.mismatch(&value, V::TYPE_NAME)),
        };
        let write = self.write.resolve(field, field.setter())?;
        write(target, converted);
        Ok(1)
    }
}

type CollectionAccessors<T, C> = (fn(&T) -> Option<&C>, fn(&mut T) -> Option<&mut C>);

pub(crate) struct CollectionBinding<T, C> {
    pub(crate) read: Accessor<CollectionAccessors<T, C>>,
}

impl<T: 'static, C: Collection> FieldBinding<T> for CollectionBinding<T, C> {
    fn shape(&self) -> FieldShape {
        FieldShape::Collection(C::KIND)
    }

    fn is_present(&self, field: FieldRef, target: &T) -> Result<bool> {
        let (read, _) = self.read.resolve(field, field.getter())?;
        Ok(read(target).is_some())
    }

    fn check_writable(&self, field: FieldRef) -> Result<()> {
        self.read.resolve(field, field.getter()).map(|_| ())
    }

    fn current_text(&self, field: FieldRef, _target: &T) -> Result<String> {
        Err(AnonymizeError::Configuration(format!(
            "field '{}' of {} is a {}; file markers require a single path field",
            field.field,
            field.type_name,
            C::KIND.as_str()
        )))
    }

    fn store(
        &self,
        field: FieldRef,
        target: &mut T,
        values: Vec<GeneratedValue>,
    ) -> Result<usize> {
        let mut items = Vec::with_capacity(values.len());
        for value in values {
            match C::Item::from_generated(value.clone()) {
                Some(item) => items.push(item),
                None => return Err(field.mismatch(&value, <C::Item as FieldValue>::TYPE_NAME)),
            }
        }
        let (_, read_mut) = self.read.resolve(field, field.getter())?;
        let Some(container) = read_mut(target) else {
            return Ok(0);
        };
        container
            .append(items)
            .map_err(|kind| AnonymizeError::UnsupportedContainer {
                type_name: field.type_name,
                field: field.field,
                container: kind.as_str(),
            })
    }
}
