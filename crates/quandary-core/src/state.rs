use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{ModelError, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One object: a class tag plus a slot for each attribute the class declares.
///
/// A slot holding `None` is declared but unset; reading it is an error.
pub struct ObjectInstance {
    class: String,
    values: BTreeMap<String, Option<Value>>,
}

impl ObjectInstance {
    /// Create an object with every declared slot unset.
    pub(crate) fn blank<I, S>(class: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: class.to_string(),
            values: attributes.into_iter().map(|a| (a.into(), None)).collect(),
        }
    }

    /// Create a fully-set object without consulting a schema.
    /// Only used by typed records, whose field lists are fixed at compile time.
    pub(crate) fn from_values<I, S>(class: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            class: class.to_string(),
            values: fields
                .into_iter()
                .map(|(attr, value)| (attr.into(), Some(value)))
                .collect(),
        }
    }

    /// Class this object instantiates.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Iterate `(attribute, value)` slots in attribute-name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub(crate) fn has_slot(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub(crate) fn put(&mut self, attribute: &str, value: Value) {
        self.values.insert(attribute.to_string(), Some(value));
    }

    /// Whether every slot holds a value.
    pub fn is_complete(&self) -> bool {
        self.values.values().all(Option::is_some)
    }

    /// Read a value; unset slots fail with `UnsetAttribute`.
    pub fn get(&self, attribute: &str) -> Result<&Value, ModelError> {
        match self.values.get(attribute) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(ModelError::UnsetAttribute {
                class: self.class.clone(),
                attribute: attribute.to_string(),
            }),
            None => Err(ModelError::UnknownField {
                class: self.class.clone(),
                attribute: attribute.to_string(),
            }),
        }
    }

    /// Read a boolean attribute.
    pub fn get_bool(&self, attribute: &str) -> Result<bool, ModelError> {
        let value = self.get(attribute)?;
        value.as_bool().ok_or_else(|| ModelError::TypeMismatch {
            attribute: attribute.to_string(),
            expected: "a boolean".to_string(),
            found: value.describe(),
        })
    }

    /// Read an enumerated attribute as its category name.
    pub fn get_category(&self, attribute: &str) -> Result<&str, ModelError> {
        let value = self.get(attribute)?;
        value.as_category().ok_or_else(|| ModelError::TypeMismatch {
            attribute: attribute.to_string(),
            expected: "a category".to_string(),
            found: value.describe(),
        })
    }
}

impl fmt::Display for ObjectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.class)?;
        for (i, (attribute, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match value {
                Some(value) => write!(f, " {attribute}={value}")?,
                None => write!(f, " {attribute}=<unset>")?,
            }
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// An ordered collection of object instances.
///
/// Used both for world states and for observations; a state with no objects
/// is the null observation. Cloning is a deep copy.
pub struct State {
    objects: Vec<ObjectInstance>,
}

impl State {
    /// The empty state, used as the null observation.
    pub fn null() -> Self {
        Self::default()
    }

    /// Whether this is the null observation (no objects).
    pub fn is_null(&self) -> bool {
        self.objects.is_empty()
    }

    /// Append an object; validation happens where the state is consumed.
    pub fn add_object(&mut self, object: ObjectInstance) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[ObjectInstance] {
        &self.objects
    }

    /// Number of objects of any class.
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Objects of `class`, in insertion order.
    pub fn objects_of_class<'a, 'b>(
        &'a self,
        class: &'b str,
    ) -> impl Iterator<Item = &'a ObjectInstance> + use<'a, 'b> {
        self.objects.iter().filter(move |o| o.class == class)
    }

    /// The first object of `class`; the borrow is tied to `self` only.
    pub fn first_object_of_class(&self, class: &str) -> Result<&ObjectInstance, ModelError> {
        self.objects
            .iter()
            .find(|o| o.class == class)
            .ok_or_else(|| ModelError::MissingObject {
                class: class.to_string(),
            })
    }

    /// Mutable access to the first object of `class`.
    pub fn first_object_of_class_mut(
        &mut self,
        class: &str,
    ) -> Result<&mut ObjectInstance, ModelError> {
        self.objects
            .iter_mut()
            .find(|o| o.class == class)
            .ok_or_else(|| ModelError::MissingObject {
                class: class.to_string(),
            })
    }

    /// Fail unless the state holds between `min` and `max` objects of `class`.
    pub(crate) fn expect_class_count(
        &self,
        class: &str,
        min: usize,
        max: usize,
    ) -> Result<(), ModelError> {
        let count = self.objects_of_class(class).count();
        if count < min {
            return Err(ModelError::MissingObject {
                class: class.to_string(),
            });
        }
        if count > max {
            return Err(ModelError::UnexpectedObjects {
                class: class.to_string(),
                count,
            });
        }
        Ok(())
    }
}

impl From<ObjectInstance> for State {
    fn from(object: ObjectInstance) -> Self {
        Self {
            objects: vec![object],
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.objects.is_empty() {
            return write!(f, "<null>");
        }
        for (i, object) in self.objects.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{object}")?;
        }
        Ok(())
    }
}
