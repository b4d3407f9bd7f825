//! Static schema descriptors.
//!
//! A schema is a set of `static` tables: one [`NodeSchema`] per complex type,
//! each listing its [`FieldDescriptor`]s in declaration order. Descriptors are
//! built with `const fn` helpers so carrier schemas can be written as plain
//! statics:
//!
//! ```
//! use shipbind_model::{FieldDescriptor, NodeSchema, SimpleType};
//!
//! static WEIGHT: NodeSchema = NodeSchema::new(
//!     "Weight",
//!     &[
//!         FieldDescriptor::simple("Unit", SimpleType::STRING),
//!         FieldDescriptor::simple("Value", SimpleType::DOUBLE).required(),
//!     ],
//! );
//! assert_eq!(WEIGHT.fields.len(), 2);
//! ```

use crate::primitive::PrimitiveKind;

/// Restriction facets checked softly against parsed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facets {
    /// Allowed lexical values; empty means unrestricted.
    pub enumeration: &'static [&'static str],
    /// Regular expressions the whole lexical value must match.
    pub patterns: &'static [&'static str],
    /// Minimum length in characters (items for lists).
    pub min_length: Option<usize>,
    /// Maximum length in characters (items for lists).
    pub max_length: Option<usize>,
    /// Inclusive numeric lower bound.
    pub min_inclusive: Option<f64>,
    /// Inclusive numeric upper bound.
    pub max_inclusive: Option<f64>,
}

impl Facets {
    /// No restrictions.
    pub const NONE: Self = Self {
        enumeration: &[],
        patterns: &[],
        min_length: None,
        max_length: None,
        min_inclusive: None,
        max_inclusive: None,
    };

    /// Restricts values to an enumeration.
    #[must_use]
    pub const fn enumeration(values: &'static [&'static str]) -> Self {
        Self {
            enumeration: values,
            ..Self::NONE
        }
    }

    /// Restricts values to those matching every pattern.
    #[must_use]
    pub const fn patterns(patterns: &'static [&'static str]) -> Self {
        Self {
            patterns,
            ..Self::NONE
        }
    }

    /// Restricts the value length.
    #[must_use]
    pub const fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_length: min,
            max_length: max,
            ..Self::NONE
        }
    }

    /// Restricts the numeric range, bounds inclusive.
    #[must_use]
    pub const fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min_inclusive: min,
            max_inclusive: max,
            ..Self::NONE
        }
    }

    /// Returns `true` when no facet is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enumeration.is_empty()
            && self.patterns.is_empty()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.min_inclusive.is_none()
            && self.max_inclusive.is_none()
    }
}

/// Declared type of a scalar field or of simple content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleType {
    /// Primitive kind of the value (or of each list item).
    pub kind: PrimitiveKind,
    /// Whether the value is a whitespace-separated list.
    pub list: bool,
    /// Restriction facets.
    pub facets: Facets,
}

impl SimpleType {
    /// `xs:string`.
    pub const STRING: Self = Self::of(PrimitiveKind::String);
    /// `xs:int`, `xs:long`, `xs:integer`.
    pub const INTEGER: Self = Self::of(PrimitiveKind::Integer);
    /// `xs:float`.
    pub const FLOAT: Self = Self::of(PrimitiveKind::Float);
    /// `xs:decimal`.
    pub const DECIMAL: Self = Self::of(PrimitiveKind::Decimal);
    /// `xs:double`.
    pub const DOUBLE: Self = Self::of(PrimitiveKind::Double);
    /// `xs:boolean`.
    pub const BOOLEAN: Self = Self::of(PrimitiveKind::Boolean);
    /// `xs:base64Binary`.
    pub const BASE64: Self = Self::of(PrimitiveKind::Base64);
    /// `xs:date`.
    pub const DATE: Self = Self::of(PrimitiveKind::Date);
    /// `xs:time`.
    pub const TIME: Self = Self::of(PrimitiveKind::Time);
    /// `xs:dateTime`.
    pub const DATETIME: Self = Self::of(PrimitiveKind::DateTime);

    /// A single value of `kind` without facets.
    #[must_use]
    pub const fn of(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            list: false,
            facets: Facets::NONE,
        }
    }

    /// A list of `kind` items without facets.
    #[must_use]
    pub const fn list_of(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            list: true,
            facets: Facets::NONE,
        }
    }

    /// Replaces the facets.
    #[must_use]
    pub const fn with_facets(self, facets: Facets) -> Self {
        Self { facets, ..self }
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// A primitive value.
    Simple(SimpleType),
    /// A nested complex node, referenced by type name.
    Node {
        /// Declared type name, resolved through the type registry.
        type_name: &'static str,
    },
    /// Arbitrary well-formed markup (`xs:any`).
    Any,
}

/// Where a field appears in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A child element.
    Element,
    /// An attribute of the node's element.
    Attribute,
}

/// Upper occurrence bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    /// At most this many occurrences.
    Bounded(u32),
    /// Any number of occurrences.
    Unbounded,
}

impl MaxOccurs {
    /// Returns `true` if `count` does not exceed the bound.
    #[must_use]
    pub const fn allows(&self, count: usize) -> bool {
        match self {
            Self::Bounded(max) => count <= *max as usize,
            Self::Unbounded => true,
        }
    }
}

/// Occurrence bounds of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: MaxOccurs,
}

impl Occurs {
    /// `minOccurs="0"`.
    pub const OPTIONAL: Self = Self {
        min: 0,
        max: MaxOccurs::Bounded(1),
    };
    /// `minOccurs="1"`.
    pub const ONE: Self = Self {
        min: 1,
        max: MaxOccurs::Bounded(1),
    };
    /// `minOccurs="0" maxOccurs="unbounded"`.
    pub const MANY: Self = Self {
        min: 0,
        max: MaxOccurs::Unbounded,
    };

    /// Returns `true` if more than one occurrence is allowed.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        !matches!(self.max, MaxOccurs::Bounded(0 | 1))
    }
}

/// Static description of one field of a complex type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Element local name or attribute name.
    pub name: &'static str,
    /// Value kind.
    pub kind: FieldKind,
    /// Occurrence bounds.
    pub occurs: Occurs,
    /// Whether absence is reported.
    pub required: bool,
    /// Element or attribute.
    pub placement: Placement,
}

impl FieldDescriptor {
    /// An optional single-valued child element.
    #[must_use]
    pub const fn element(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            occurs: Occurs::OPTIONAL,
            required: false,
            placement: Placement::Element,
        }
    }

    /// An optional scalar child element.
    #[must_use]
    pub const fn simple(name: &'static str, simple_type: SimpleType) -> Self {
        Self::element(name, FieldKind::Simple(simple_type))
    }

    /// An optional nested node child element.
    #[must_use]
    pub const fn node(name: &'static str, type_name: &'static str) -> Self {
        Self::element(name, FieldKind::Node { type_name })
    }

    /// An optional `xs:any` child element.
    #[must_use]
    pub const fn any(name: &'static str) -> Self {
        Self::element(name, FieldKind::Any)
    }

    /// An optional attribute.
    #[must_use]
    pub const fn attribute(name: &'static str, simple_type: SimpleType) -> Self {
        Self {
            placement: Placement::Attribute,
            ..Self::simple(name, simple_type)
        }
    }

    /// Marks the field required with `minOccurs="1"`.
    #[must_use]
    pub const fn required(self) -> Self {
        let min = if self.occurs.min == 0 { 1 } else { self.occurs.min };
        Self {
            required: true,
            occurs: Occurs {
                min,
                max: self.occurs.max,
            },
            ..self
        }
    }

    /// Replaces the occurrence bounds.
    #[must_use]
    pub const fn occurs(self, min: u32, max: MaxOccurs) -> Self {
        Self {
            occurs: Occurs { min, max },
            ..self
        }
    }

    /// Allows unbounded repetition, keeping the lower bound.
    #[must_use]
    pub const fn unbounded(self) -> Self {
        Self {
            occurs: Occurs {
                min: self.occurs.min,
                max: MaxOccurs::Unbounded,
            },
            ..self
        }
    }

    /// Returns `true` for attribute fields.
    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        matches!(self.placement, Placement::Attribute)
    }

    /// Returns `true` if more than one occurrence is allowed.
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.occurs.is_repeated()
    }
}

/// Content model of a complex type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentModel {
    /// Child elements only.
    Elements,
    /// Child elements interleaved with text.
    Mixed,
    /// A text value plus attributes.
    Simple(SimpleType),
}

/// Static description of a complex type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSchema {
    /// Type name.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor],
    /// Content model.
    pub content: ContentModel,
}

impl NodeSchema {
    /// A type with element-only content.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name,
            fields,
            content: ContentModel::Elements,
        }
    }

    /// A type with mixed content.
    #[must_use]
    pub const fn mixed(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name,
            fields,
            content: ContentModel::Mixed,
        }
    }

    /// A type with simple content; `fields` should hold attributes only.
    #[must_use]
    pub const fn simple_content(
        name: &'static str,
        value: SimpleType,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self {
            name,
            fields,
            content: ContentModel::Simple(value),
        }
    }

    /// Looks up a child element field by name.
    #[must_use]
    pub fn element_field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| !f.is_attribute() && f.name == name)
    }

    /// Looks up an attribute field by name.
    #[must_use]
    pub fn attribute_field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.is_attribute() && f.name == name)
    }

    /// Looks up any field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` for mixed content.
    #[must_use]
    pub const fn is_mixed(&self) -> bool {
        matches!(self.content, ContentModel::Mixed)
    }
}

/// The types and global elements of one schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaSet {
    /// Human readable name of the schema.
    pub name: &'static str,
    /// Target namespace URI.
    pub namespace: &'static str,
    /// Complex types.
    pub types: &'static [&'static NodeSchema],
    /// Global element tag -> type name.
    pub elements: &'static [(&'static str, &'static str)],
}

impl SchemaSet {
    /// Looks up a complex type by name.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&'static NodeSchema> {
        self.types.iter().copied().find(|t| t.name == name)
    }

    /// Returns the type name of a global element.
    #[must_use]
    pub fn element_type(&self, tag: &str) -> Option<&'static str> {
        self.elements
            .iter()
            .find(|(element, _)| *element == tag)
            .map(|(_, type_name)| *type_name)
    }
}
