use crate::{ModelError, ObjectInstance, State, Value};

/// A strongly-typed view of one object class.
///
/// Domain logic reads a record out of a `State`, edits plain struct fields,
/// and writes it back. The field list is fixed per type, so a record always
/// produces a fully-set object.
pub trait Record: Sized {
    /// Class the record maps to.
    const CLASS: &'static str;

    /// Every attribute of the class, with its current value.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Read the record from an object of `CLASS`.
    fn from_object(object: &ObjectInstance) -> Result<Self, ModelError>;

    fn to_object(&self) -> ObjectInstance {
        ObjectInstance::from_values(Self::CLASS, self.fields())
    }

    fn to_state(&self) -> State {
        State::from(self.to_object())
    }

    /// Read the first object of `CLASS` in `state`.
    fn from_state(state: &State) -> Result<Self, ModelError> {
        Self::from_object(state.first_object_of_class(Self::CLASS)?)
    }
}
