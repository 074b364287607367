use crate::{ModelError, State, Value};

use super::fixtures::{COIN, coin_schema};

#[test]
fn make_state_sets_every_field() {
    let schema = coin_schema();
    let state = schema
        .factory()
        .make_state(
            COIN,
            [("face", Value::from("tails")), ("done", Value::from(false))],
        )
        .expect("complete mapping");

    let coin = state.first_object_of_class(COIN).expect("coin object");
    assert_eq!(coin.get_category("face"), Ok("tails"));
    assert_eq!(coin.get_bool("done"), Ok(false));
    assert!(coin.is_complete());
    schema.validate_state(&state).expect("state is well formed");
}

#[test]
fn make_state_reports_missing_field() {
    let schema = coin_schema();
    let err = schema
        .factory()
        .make_state(COIN, [("face", Value::from("heads"))])
        .expect_err("done is absent");
    assert_eq!(
        err,
        ModelError::MissingField {
            class: COIN.to_string(),
            attribute: "done".to_string()
        }
    );
}

#[test]
fn make_state_reports_unknown_and_mistyped_fields() {
    let schema = coin_schema();
    let factory = schema.factory();

    let err = factory
        .make_state(
            COIN,
            [
                ("face", Value::from("heads")),
                ("done", Value::from(false)),
                ("weight", Value::from(true)),
            ],
        )
        .expect_err("weight is not declared");
    assert!(matches!(err, ModelError::UnknownField { .. }));

    let err = factory
        .make_state(COIN, [("face", Value::from(true)), ("done", Value::from(false))])
        .expect_err("face is enumerated");
    assert!(matches!(err, ModelError::TypeMismatch { .. }));

    let err = factory
        .make_state(
            COIN,
            [
                ("face", Value::from("heads")),
                ("face", Value::from("tails")),
                ("done", Value::from(false)),
            ],
        )
        .expect_err("face supplied twice");
    assert!(matches!(err, ModelError::DuplicateField { .. }));
}

#[test]
fn reading_an_unset_slot_fails() {
    let schema = coin_schema();
    let factory = schema.factory();
    let mut object = factory.blank_object(COIN).expect("blank object");
    factory
        .set_value(&mut object, "face", "heads")
        .expect("legal value");

    assert_eq!(object.get_category("face"), Ok("heads"));
    assert_eq!(
        object.get("done"),
        Err(ModelError::UnsetAttribute {
            class: COIN.to_string(),
            attribute: "done".to_string()
        })
    );

    let err = schema
        .validate_state(&State::from(object))
        .expect_err("incomplete object");
    assert!(matches!(err, ModelError::UnsetAttribute { .. }));
}

#[test]
fn copy_state_is_independent() {
    let schema = coin_schema();
    let factory = schema.factory();
    let original = factory
        .make_state(COIN, [("face", Value::from("heads")), ("done", Value::from(false))])
        .expect("state");

    let mut copy = factory.copy_state(&original);
    let coin = copy.first_object_of_class_mut(COIN).expect("coin");
    factory.set_value(coin, "done", true).expect("set done");

    assert_ne!(copy, original);
    assert_eq!(
        original
            .first_object_of_class(COIN)
            .and_then(|o| o.get_bool("done")),
        Ok(false)
    );
}

#[test]
fn null_state_has_no_objects() {
    let null = State::null();
    assert!(null.is_null());
    assert_eq!(null.to_string(), "<null>");
    assert!(matches!(
        null.first_object_of_class(COIN),
        Err(ModelError::MissingObject { .. })
    ));
}

#[test]
fn object_lookup_outlives_the_class_name() {
    let schema = coin_schema();
    let state = schema
        .factory()
        .make_state(COIN, [("face", Value::from("heads")), ("done", Value::from(true))])
        .expect("state");

    let (first, all) = {
        let class = String::from(COIN);
        let first = state.first_object_of_class(&class).expect("coin object");
        let all: Vec<_> = state.objects_of_class(&class).collect();
        (first, all)
    };

    assert_eq!(first.get_bool("done"), Ok(true));
    assert_eq!(all, vec![first]);
}
