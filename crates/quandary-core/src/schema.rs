use std::collections::HashSet;

use crate::{AttributeType, ModelError, ObjectInstance, State, StateFactory, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named, typed attribute declaration.
pub struct Attribute {
    name: String,
    kind: AttributeType,
}

impl Attribute {
    /// Declared attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type and legal values.
    pub fn kind(&self) -> &AttributeType {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An object class: an ordered group of declared attributes.
pub struct ObjectClass {
    name: String,
    attributes: Vec<String>,
}

impl ObjectClass {
    /// Declared class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Whether `attribute` belongs to this class.
    pub fn declares(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered registry of attributes and object classes.
///
/// Declarations are append-only: a name can be registered once and is never
/// redefined. Once a schema is handed to a `Domain` it is only reachable
/// through shared references.
pub struct Schema {
    attributes: Vec<Attribute>,
    classes: Vec<ObjectClass>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute. Fails with `SchemaConflict` on a duplicate name.
    pub fn define_attribute(
        &mut self,
        name: impl Into<String>,
        kind: AttributeType,
    ) -> Result<&mut Self, ModelError> {
        let name = name.into();
        if self.attribute(&name).is_some() {
            return Err(ModelError::SchemaConflict {
                kind: "attribute",
                name,
            });
        }

        if let AttributeType::Enumerated(values) = &kind {
            if values.is_empty() {
                return Err(ModelError::EmptyEnumeration { attribute: name });
            }
            let mut seen = HashSet::with_capacity(values.len());
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(ModelError::SchemaConflict {
                        kind: "enumeration value",
                        name: format!("{name}.{value}"),
                    });
                }
            }
        }

        self.attributes.push(Attribute { name, kind });
        Ok(self)
    }

    /// Register an object class over already-declared attributes.
    pub fn define_class<I, S>(
        &mut self,
        name: impl Into<String>,
        attribute_names: I,
    ) -> Result<&mut Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if self.class(&name).is_some() {
            return Err(ModelError::SchemaConflict {
                kind: "class",
                name,
            });
        }

        let mut attributes: Vec<String> = Vec::new();
        for attribute in attribute_names {
            let attribute = attribute.into();
            if self.attribute(&attribute).is_none() {
                return Err(ModelError::UnknownAttribute { attribute });
            }
            if attributes.contains(&attribute) {
                return Err(ModelError::SchemaConflict {
                    kind: "class attribute",
                    name: format!("{name}.{attribute}"),
                });
            }
            attributes.push(attribute);
        }

        self.classes.push(ObjectClass { name, attributes });
        Ok(self)
    }

    /// Look up an attribute declaration by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up a class declaration by name.
    pub fn class(&self, name: &str) -> Option<&ObjectClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Classes in declaration order.
    pub fn classes(&self) -> &[ObjectClass] {
        &self.classes
    }

    /// Borrow a state factory bound to this schema.
    pub fn factory(&self) -> StateFactory<'_> {
        StateFactory::new(self)
    }

    pub(crate) fn require_class(&self, name: &str) -> Result<&ObjectClass, ModelError> {
        self.class(name).ok_or_else(|| ModelError::UnknownClass {
            class: name.to_string(),
        })
    }

    /// Check that `value` is legal for `attribute` on `class`.
    pub fn check_value(&self, class: &str, attribute: &str, value: &Value) -> Result<(), ModelError> {
        let object_class = self.require_class(class)?;
        if !object_class.declares(attribute) {
            return Err(ModelError::UnknownField {
                class: class.to_string(),
                attribute: attribute.to_string(),
            });
        }

        let declared = self
            .attribute(attribute)
            .ok_or_else(|| ModelError::UnknownAttribute {
                attribute: attribute.to_string(),
            })?;

        if !declared.kind.admits(value) {
            return Err(ModelError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: declared.kind.describe(),
                found: value.describe(),
            });
        }
        Ok(())
    }

    /// Check that an object carries exactly its class attributes, all set and well typed.
    pub fn validate_object(&self, object: &ObjectInstance) -> Result<(), ModelError> {
        let object_class = self.require_class(object.class())?;

        for (attribute, value) in object.entries() {
            if !object_class.declares(attribute) {
                return Err(ModelError::UnknownField {
                    class: object.class().to_string(),
                    attribute: attribute.to_string(),
                });
            }
            match value {
                Some(value) => self.check_value(object.class(), attribute, value)?,
                None => {
                    return Err(ModelError::UnsetAttribute {
                        class: object.class().to_string(),
                        attribute: attribute.to_string(),
                    });
                }
            }
        }

        for attribute in &object_class.attributes {
            if !object.has_slot(attribute) {
                return Err(ModelError::MissingField {
                    class: object.class().to_string(),
                    attribute: attribute.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate every object in a state.
    pub fn validate_state(&self, state: &State) -> Result<(), ModelError> {
        state
            .objects()
            .iter()
            .try_for_each(|object| self.validate_object(object))
    }
}
