//! Per-type registry of anonymizable fields and completion hooks.
//!
//! A `Schema<T>` is the explicit description of what gets anonymized on a
//! `T`: one entry per field (markers, container shape and accessors) plus the
//! hooks run once every field has been processed. Registering a schema in a
//! `Registry` is what makes a type anonymizable.

pub mod accessors;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use masquerade_core::Markers;

use crate::errors::{AnonymizeError, HookError, Result};
use crate::value::FieldValue;

pub use accessors::{Accessor, Collection, CollectionKind, FieldRef, FieldShape, accessor_names};

use accessors::{CollectionBinding, FieldBinding, ScalarBinding};

/// Types that describe their own schema.
pub trait Anonymizable: Sized + 'static {
    fn schema() -> Schema<Self>;
}

/// One registered field.
pub struct FieldDescriptor<T> {
    name: &'static str,
    markers: Markers,
    binding: Box<dyn FieldBinding<T>>,
}

impl<T> FieldDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn shape(&self) -> FieldShape {
        self.binding.shape()
    }

    pub(crate) fn binding(&self) -> &dyn FieldBinding<T> {
        self.binding.as_ref()
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .field("shape", &self.binding.shape())
            .finish()
    }
}

enum HookFn<T> {
    Infallible(fn(&mut T)),
    Fallible(fn(&mut T) -> std::result::Result<(), HookError>),
}

/// Completion hook run once per object after its fields are anonymized.
pub struct HookDescriptor<T> {
    name: &'static str,
    call: HookFn<T>,
}

impl<T> HookDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn invoke(&self, type_name: &'static str, target: &mut T) -> Result<()> {
        match &self.call {
            HookFn::Infallible(hook) => {
                hook(target);
                Ok(())
            }
            HookFn::Fallible(hook) => hook(target).map_err(|source| {
                AnonymizeError::HookInvocation {
                    type_name,
                    hook: self.name,
                    source,
                }
            }),
        }
    }
}

impl<T> std::fmt::Debug for HookDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug)]
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    hooks: Vec<HookDescriptor<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn builder(type_name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                type_name,
                fields: Vec::new(),
                hooks: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn hooks(&self) -> &[HookDescriptor<T>] {
        &self.hooks
    }
}

/// Builder for `Schema`; fields are processed in declaration order.
pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Single-valued field with a read and a write accessor.
    pub fn scalar<V: FieldValue>(
        self,
        name: &'static str,
        markers: impl Into<Markers>,
        read: fn(&T) -> Option<&V>,
        write: fn(&mut T, V),
    ) -> Self {
        self.push_scalar(name, markers, Accessor::Bound(read), Accessor::Bound(write))
    }

    /// Scalar field without a write accessor.
    pub fn read_only<V: FieldValue>(
        self,
        name: &'static str,
        markers: impl Into<Markers>,
        read: fn(&T) -> Option<&V>,
    ) -> Self {
        self.push_scalar(name, markers, Accessor::Bound(read), Accessor::Missing)
    }

    /// Scalar field without a read accessor.
    pub fn write_only<V: FieldValue>(
        self,
        name: &'static str,
        markers: impl Into<Markers>,
        write: fn(&mut T, V),
    ) -> Self {
        self.push_scalar(name, markers, Accessor::Missing, Accessor::Bound(write))
    }

    /// Scalar field whose write accessor must never be called.
    pub fn locked<V: FieldValue>(
        self,
        name: &'static str,
        markers: impl Into<Markers>,
        read: fn(&T) -> Option<&V>,
        reason: &'static str,
    ) -> Self {
        self.push_scalar(
            name,
            markers,
            Accessor::Bound(read),
            Accessor::Restricted(reason),
        )
    }

    /// Multi-valued field; generated values are appended to the existing container.
    pub fn collection<C: Collection>(
        mut self,
        name: &'static str,
        markers: impl Into<Markers>,
        read: fn(&T) -> Option<&C>,
        read_mut: fn(&mut T) -> Option<&mut C>,
    ) -> Self {
        self.schema.fields.push(FieldDescriptor {
            name,
            markers: markers.into(),
            binding: Box::new(CollectionBinding {
                read: Accessor::Bound((read, read_mut)),
            }),
        });
        self
    }

    pub fn hook(mut self, name: &'static str, hook: fn(&mut T)) -> Self {
        self.schema.hooks.push(HookDescriptor {
            name,
            call: HookFn::Infallible(hook),
        });
        self
    }

    pub fn try_hook(
        mut self,
        name: &'static str,
        hook: fn(&mut T) -> std::result::Result<(), HookError>,
    ) -> Self {
        self.schema.hooks.push(HookDescriptor {
            name,
            call: HookFn::Fallible(hook),
        });
        self
    }

    pub fn build(self) -> Schema<T> {
        self.schema
    }

    fn push_scalar<V: FieldValue>(
        mut self,
        name: &'static str,
        markers: impl Into<Markers>,
        read: Accessor<fn(&T) -> Option<&V>>,
        write: Accessor<fn(&mut T, V)>,
    ) -> Self {
        self.schema.fields.push(FieldDescriptor {
            name,
            markers: markers.into(),
            binding: Box::new(ScalarBinding { read, write }),
        });
        self
    }
}

/// Schemas of every anonymizable type, keyed by `TypeId`.
#[derive(Default)]
pub struct Registry {
    schemas: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Anonymizable>(&mut self) -> &mut Self {
        self.insert(T::schema())
    }

    /// Registers a schema built outside the type, e.g. for foreign types.
    pub fn insert<T: 'static>(&mut self, schema: Schema<T>) -> &mut Self {
        self.schemas.insert(TypeId::of::<T>(), Box::new(schema));
        self
    }

    pub fn schema<T: 'static>(&self) -> Option<&Schema<T>> {
        self.schemas
            .get(&TypeId::of::<T>())
            .and_then(|schema| schema.downcast_ref::<Schema<T>>())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("schemas", &self.schemas.len())
            .finish()
    }
}
