//! Typed nodes: runtime instances of a [`NodeSchema`].
//!
//! A [`TypedNode`] stores every field as an ordered list of [`Value`]s, so a
//! document carrying more occurrences than the schema allows is kept intact.
//! Field lists are never left empty: removing the last value drops the field.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::ModelError;
use crate::lineage::NodeId;
use crate::mixed::MixedItem;
use crate::primitive::Scalar;
use crate::schema::{FieldDescriptor, FieldKind, NodeSchema};

/// A field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A primitive value.
    Scalar(Scalar),
    /// A nested node.
    Node(Box<TypedNode>),
    /// Serialized markup of an `xs:any` child.
    Any(String),
}

impl Value {
    /// Returns the scalar if this is a `Scalar` variant.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the node if this is a `Node` variant.
    #[must_use]
    pub fn as_node(&self) -> Option<&TypedNode> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the node mutably if this is a `Node` variant.
    #[must_use]
    pub fn as_node_mut(&mut self) -> Option<&mut TypedNode> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the markup if this is an `Any` variant.
    #[must_use]
    pub fn as_any(&self) -> Option<&str> {
        match self {
            Self::Any(markup) => Some(markup),
            _ => None,
        }
    }

    fn fits(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Scalar(_), FieldKind::Simple(_))
                | (Self::Node(_), FieldKind::Node { .. })
                | (Self::Any(_), FieldKind::Any)
        )
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<TypedNode> for Value {
    fn from(n: TypedNode) -> Self {
        Self::Node(Box::new(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Integer(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Scalar(Scalar::Decimal(d))
    }
}

/// A runtime instance of a complex type.
#[derive(Debug, Clone)]
pub struct TypedNode {
    schema: &'static NodeSchema,
    tag: String,
    prefix: Option<String>,
    fields: HashMap<&'static str, Vec<Value>>,
    field_prefixes: HashMap<&'static str, String>,
    mixed: Vec<MixedItem>,
    text: Option<Scalar>,
    type_hint: Option<String>,
    id: Option<NodeId>,
    parent: Option<NodeId>,
    line: Option<u64>,
}

impl PartialEq for TypedNode {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name
            && self.tag == other.tag
            && self.prefix == other.prefix
            && self.fields == other.fields
            && self.field_prefixes == other.field_prefixes
            && self.mixed == other.mixed
            && self.text == other.text
            && self.type_hint == other.type_hint
    }
}

impl TypedNode {
    /// Creates an empty node tagged with the type name.
    #[must_use]
    pub fn new(schema: &'static NodeSchema) -> Self {
        Self {
            schema,
            tag: schema.name.to_owned(),
            prefix: None,
            fields: HashMap::new(),
            field_prefixes: HashMap::new(),
            mixed: Vec::new(),
            text: None,
            type_hint: None,
            id: None,
            parent: None,
            line: None,
        }
    }

    /// Replaces the tag, builder style.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Returns the node's schema.
    #[must_use]
    pub fn schema(&self) -> &'static NodeSchema {
        self.schema
    }

    /// Returns the type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.schema.name
    }

    /// Returns the tag used on export.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replaces the tag used on export.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// Returns the captured namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Replaces the namespace prefix.
    pub fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    /// Returns the captured prefix of a scalar field.
    #[must_use]
    pub fn field_prefix(&self, name: &str) -> Option<&str> {
        self.field_prefixes.get(name).map(String::as_str)
    }

    /// Replaces the captured prefix of a field.
    pub fn set_field_prefix(
        &mut self,
        name: &str,
        prefix: Option<String>,
    ) -> Result<(), ModelError> {
        let descriptor = self.descriptor(name)?;
        match prefix {
            Some(prefix) => {
                self.field_prefixes.insert(descriptor.name, prefix);
            }
            None => {
                self.field_prefixes.remove(descriptor.name);
            }
        }
        Ok(())
    }

    /// Returns the first value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.get_all(name).first()
    }

    /// Returns all values of a field in document order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[Value] {
        self.fields.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns one value of a field mutably.
    #[must_use]
    pub fn get_mut(&mut self, name: &str, index: usize) -> Option<&mut Value> {
        self.fields.get_mut(name).and_then(|values| values.get_mut(index))
    }

    /// Counts the occurrences of a field, including named mixed items.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        let in_mixed = self
            .mixed
            .iter()
            .filter(|item| item.name() == Some(name))
            .count();
        self.get_all(name).len() + in_mixed
    }

    /// Replaces all values of a field with one value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let value = value.into();
        let descriptor = self.checked(name, &value)?;
        self.fields.insert(descriptor.name, vec![value]);
        Ok(())
    }

    /// Appends a value to a field.
    pub fn push(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let value = value.into();
        let descriptor = self.checked(name, &value)?;
        self.fields.entry(descriptor.name).or_default().push(value);
        Ok(())
    }

    /// Inserts a value at `index`, shifting later values.
    pub fn insert_at(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<(), ModelError> {
        let value = value.into();
        let descriptor = self.checked(name, &value)?;
        let values = self.fields.entry(descriptor.name).or_default();
        if index > values.len() {
            let len = values.len();
            if values.is_empty() {
                self.fields.remove(descriptor.name);
            }
            return Err(ModelError::IndexOutOfRange {
                field: descriptor.name,
                index,
                len,
            });
        }
        values.insert(index, value);
        Ok(())
    }

    /// Replaces the value at `index` and returns the previous one.
    pub fn replace_at(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<Value, ModelError> {
        let value = value.into();
        let descriptor = self.checked(name, &value)?;
        let len = self.get_all(name).len();
        match self
            .fields
            .get_mut(descriptor.name)
            .and_then(|values| values.get_mut(index))
        {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(ModelError::IndexOutOfRange {
                field: descriptor.name,
                index,
                len,
            }),
        }
    }

    /// Removes all values of a field and returns them.
    pub fn remove(&mut self, name: &str) -> Vec<Value> {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Returns the first scalar of a field.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.get(name).and_then(Value::as_scalar)
    }

    /// Returns the first nested node of a field.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&TypedNode> {
        self.get(name).and_then(Value::as_node)
    }

    /// Returns the first nested node of a field mutably.
    #[must_use]
    pub fn node_mut(&mut self, name: &str) -> Option<&mut TypedNode> {
        self.get_mut(name, 0).and_then(Value::as_node_mut)
    }

    /// Iterates over all nested nodes of a field.
    pub fn nodes(&self, name: &str) -> impl Iterator<Item = &TypedNode> {
        self.get_all(name).iter().filter_map(Value::as_node)
    }

    /// Returns the first string value of a field.
    #[must_use]
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.scalar(name).and_then(Scalar::as_str)
    }

    /// Returns the first integer value of a field.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.scalar(name).and_then(Scalar::as_integer)
    }

    /// Returns the first decimal value of a field.
    #[must_use]
    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        self.scalar(name).and_then(Scalar::as_decimal)
    }

    /// Returns the first float or double value of a field.
    #[must_use]
    pub fn double(&self, name: &str) -> Option<f64> {
        self.scalar(name).and_then(Scalar::as_f64)
    }

    /// Returns the first boolean value of a field.
    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.scalar(name).and_then(Scalar::as_bool)
    }

    /// Returns the simple-content value.
    #[must_use]
    pub fn text(&self) -> Option<&Scalar> {
        self.text.as_ref()
    }

    /// Replaces the simple-content value.
    pub fn set_text(&mut self, text: Option<Scalar>) {
        self.text = text;
    }

    /// Returns the mixed-content sequence.
    #[must_use]
    pub fn mixed(&self) -> &[MixedItem] {
        &self.mixed
    }

    /// Appends to the mixed-content sequence.
    pub fn push_mixed(&mut self, item: MixedItem) {
        self.mixed.push(item);
    }

    /// Returns the mixed-content sequence mutably.
    pub fn mixed_mut(&mut self) -> &mut Vec<MixedItem> {
        &mut self.mixed
    }

    /// Returns the `xsi:type` hint the node was built from.
    #[must_use]
    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    /// Replaces the `xsi:type` hint written on export.
    pub fn set_type_hint(&mut self, hint: Option<String>) {
        self.type_hint = hint;
    }

    /// Returns the lineage id, for nodes built from a document.
    #[must_use]
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Returns the parent's lineage id.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the source line of the node's start tag.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Records where the node came from.
    pub fn set_origin(&mut self, id: NodeId, line: Option<u64>) {
        self.id = Some(id);
        self.line = line;
    }

    /// Sets the parent once. Returns `false` if a parent is already set.
    pub fn attach_parent(&mut self, parent: NodeId) -> bool {
        if self.parent.is_some() {
            return false;
        }
        self.parent = Some(parent);
        true
    }

    /// Returns `true` if exporting the node would produce any content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.fields.values().any(|values| !values.is_empty())
            || self.mixed.iter().any(|item| !item.is_blank())
            || self.text.is_some()
    }

    /// Iterates over populated fields in declaration order.
    pub fn populated_fields(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &[Value])> {
        self.schema.fields.iter().filter_map(|descriptor| {
            self.fields
                .get(descriptor.name)
                .filter(|values| !values.is_empty())
                .map(|values| (descriptor, values.as_slice()))
        })
    }

    fn descriptor(&self, name: &str) -> Result<&'static FieldDescriptor, ModelError> {
        self.schema
            .field(name)
            .ok_or_else(|| ModelError::UnknownField {
                type_name: self.schema.name,
                field: name.to_owned(),
            })
    }

    fn checked(&self, name: &str, value: &Value) -> Result<&'static FieldDescriptor, ModelError> {
        let descriptor = self.descriptor(name)?;
        if !value.fits(&descriptor.kind) {
            let expected = match descriptor.kind {
                FieldKind::Simple(_) => "a scalar",
                FieldKind::Node { .. } => "a nested node",
                FieldKind::Any => "markup",
            };
            return Err(ModelError::KindMismatch {
                type_name: self.schema.name,
                field: descriptor.name,
                expected,
            });
        }
        Ok(descriptor)
    }
}
