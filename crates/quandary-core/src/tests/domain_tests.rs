use rand::RngCore;

use crate::{
    Action, Distribution, DomainBuilder, ModelError, Record, State, null_action,
};

use super::fixtures::{
    COIN, Coin, CoinDone, CoinObservations, FLIP, HeadsReward, LOOK, PEEK, WAIT, coin_domain,
    coin_schema, peek,
};

fn fresh(heads: bool) -> State {
    Coin { heads, done: false }.to_state()
}

#[test]
fn domain_exposes_components_by_name() {
    let domain = coin_domain();

    assert_eq!(domain.action_names(), vec![FLIP, LOOK, WAIT]);
    assert_eq!(domain.state_class(), COIN);
    assert_eq!(domain.observation_class(), PEEK);
    assert_eq!(domain.seed_states().len(), 2);
    assert_eq!(domain.observation_model().enumerate_observations().len(), 3);
    assert!(domain.action("Flip").is_err(), "names are case sensitive");
    assert!(matches!(
        domain.action("toss"),
        Err(ModelError::UnknownAction { .. })
    ));
}

#[test]
fn checked_transitions_are_normalized() {
    let domain = coin_domain();
    let dist = domain
        .transitions(FLIP, &fresh(false))
        .expect("flip enumerates");

    assert_eq!(dist.len(), 2);
    assert!((dist.total() - 1.0).abs() < 1e-12);
    for (next, _) in dist.iter() {
        assert!(domain.is_terminal(next).expect("terminal check"));
    }
}

#[test]
fn noiseless_peek_follows_the_hidden_face() {
    let domain = coin_domain();
    for heads in [true, false] {
        let state = fresh(heads);
        let dist = domain.observations(LOOK, &state).expect("look observes");
        let (right, wrong) = if heads { ("heads", "tails") } else { ("tails", "heads") };

        assert_eq!(dist.probability_of(&peek(right)), 1.0);
        assert_eq!(dist.probability_of(&peek(wrong)), 0.0);

        let silent = domain.observations(WAIT, &state).expect("wait observes");
        assert_eq!(silent.probability_of(&State::null()), 1.0);
    }
}

#[test]
fn absorbing_reward_is_zero_from_terminal_states() {
    let domain = coin_domain();
    let done = Coin {
        heads: true,
        done: true,
    }
    .to_state();

    for action in domain.action_names() {
        assert_eq!(domain.reward(&done, action, &done), Ok(0.0));
    }
    assert_eq!(domain.reward(&fresh(false), FLIP, &done), Ok(1.0));
}

struct Leaky;

impl Action for Leaky {
    fn name(&self) -> &str {
        "leaky"
    }

    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError> {
        let mut dist = Distribution::new();
        dist.push(state.clone(), 0.6);
        dist.push(
            Coin {
                heads: true,
                done: true,
            }
            .to_state(),
            0.3,
        );
        Ok(dist)
    }

    fn sample_step(&self, state: &State, _rng: &mut dyn RngCore) -> Result<State, ModelError> {
        Ok(state.clone())
    }
}

fn builder_with(action: impl Action + 'static) -> DomainBuilder {
    let mut builder = DomainBuilder::new(coin_schema(), COIN, PEEK);
    builder.add_action(action).expect("action");
    builder
        .set_observation_model(CoinObservations)
        .set_terminal_fn(CoinDone)
        .set_reward_fn(HeadsReward);
    builder
}

#[test]
fn unnormalized_transitions_name_the_action_and_state() {
    let domain = builder_with(Leaky).build().expect("domain builds");
    let err = domain
        .transitions("leaky", &fresh(true))
        .expect_err("mass is 0.9");

    match err {
        ModelError::Normalization { context, state, .. } => {
            assert!(context.contains("leaky"));
            assert!(state.contains("face=heads"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn builder_rejects_duplicates_and_missing_components() {
    let mut builder = DomainBuilder::new(coin_schema(), COIN, PEEK);
    builder.add_action(null_action(WAIT)).expect("first wait");
    let err = builder
        .add_action(null_action(WAIT))
        .err()
        .expect("second wait must fail");
    assert!(matches!(err, ModelError::SchemaConflict { kind: "action", .. }));

    let err = builder.build().expect_err("no observation model");
    assert_eq!(
        err,
        ModelError::MissingComponent {
            component: "observation model"
        }
    );
}

#[test]
fn builder_rejects_malformed_seeds() {
    let mut builder = builder_with(null_action(WAIT));
    builder.add_seed_state(State::null());
    assert!(matches!(
        builder.build(),
        Err(ModelError::MissingObject { .. })
    ));

    let mut builder = builder_with(null_action(WAIT));
    let mut doubled = fresh(true);
    doubled.add_object(Coin { heads: false, done: false }.to_object());
    builder.add_seed_state(doubled);
    assert!(matches!(
        builder.build(),
        Err(ModelError::UnexpectedObjects { count: 2, .. })
    ));
}

#[test]
fn observations_must_hold_at_most_one_token() {
    let domain = coin_domain();
    domain
        .validate_observation(&State::null())
        .expect("null observation");
    domain
        .validate_observation(&peek("heads"))
        .expect("single token");

    let mut two = peek("heads");
    two.add_object(peek("tails").objects()[0].clone());
    assert!(domain.validate_observation(&two).is_err());
    assert!(domain.validate_observation(&fresh(true)).is_err());
}
