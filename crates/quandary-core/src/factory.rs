use std::collections::HashSet;

use crate::{ModelError, ObjectInstance, Schema, State, Value};

#[derive(Debug, Clone, Copy)]
/// Builds schema-checked object instances and states.
pub struct StateFactory<'a> {
    schema: &'a Schema,
}

impl<'a> StateFactory<'a> {
    /// Create a factory bound to `schema`.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Schema this factory checks against.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Build one object with every attribute of `class` set from `fields`.
    ///
    /// Every declared attribute must be supplied exactly once; extraneous or
    /// ill-typed values are rejected rather than dropped.
    pub fn make_object<I, S>(&self, class: &str, fields: I) -> Result<ObjectInstance, ModelError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let object_class = self.schema.require_class(class)?;
        let mut object = ObjectInstance::blank(class, object_class.attributes().iter().cloned());
        let mut supplied = HashSet::new();

        for (attribute, value) in fields {
            let attribute = attribute.as_ref();
            self.schema.check_value(class, attribute, &value)?;
            if !supplied.insert(attribute.to_string()) {
                return Err(ModelError::DuplicateField {
                    class: class.to_string(),
                    attribute: attribute.to_string(),
                });
            }
            object.put(attribute, value);
        }

        if let Some(missing) = object_class
            .attributes()
            .iter()
            .find(|a| !supplied.contains(a.as_str()))
        {
            return Err(ModelError::MissingField {
                class: class.to_string(),
                attribute: missing.clone(),
            });
        }

        Ok(object)
    }

    /// Build a state holding one fully-set object of `class`.
    pub fn make_state<I, S>(&self, class: &str, fields: I) -> Result<State, ModelError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        self.make_object(class, fields).map(State::from)
    }

    /// Create an object of `class` with every slot unset, to be filled with `set_value`.
    pub fn blank_object(&self, class: &str) -> Result<ObjectInstance, ModelError> {
        let object_class = self.schema.require_class(class)?;
        Ok(ObjectInstance::blank(
            class,
            object_class.attributes().iter().cloned(),
        ))
    }

    /// Set one slot after checking it against the schema.
    pub fn set_value(
        &self,
        object: &mut ObjectInstance,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<(), ModelError> {
        let value = value.into();
        self.schema.check_value(object.class(), attribute, &value)?;
        object.put(attribute, value);
        Ok(())
    }

    /// Independent deep copy; branches built from the copy never alias `state`.
    pub fn copy_state(&self, state: &State) -> State {
        state.clone()
    }
}
