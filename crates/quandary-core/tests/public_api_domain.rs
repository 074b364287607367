use quandary_core::{
    Absorbing, Action, AttributeType, Distribution, DomainBuilder, ModelError, ObservationModel,
    PomdpSimulator, RewardFunction, Schema, State, TerminalFunction, Value,
};
use rand::{Rng, RngCore};

const LAMP: &str = "lamp";
const GLIMPSE: &str = "glimpse";
const SWITCH: &str = "switch";
const FAIL_RATE: f64 = 0.2;

fn lamp_schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .define_attribute("lit", AttributeType::Boolean)
        .and_then(|s| s.define_attribute("broken", AttributeType::Boolean))
        .and_then(|s| s.define_attribute("glow", AttributeType::enumerated(["bright", "dark"])))
        .and_then(|s| s.define_class(LAMP, ["lit", "broken"]))
        .and_then(|s| s.define_class(GLIMPSE, ["glow"]))
        .expect("lamp schema");
    schema
}

fn lamp(schema: &Schema, lit: bool, broken: bool) -> Result<State, ModelError> {
    schema
        .factory()
        .make_state(LAMP, [("lit", Value::from(lit)), ("broken", Value::from(broken))])
}

/// Flip the lamp; with `FAIL_RATE` the bulb breaks instead.
struct Switch {
    schema: Schema,
}

impl Switch {
    fn resolve(&self, state: &State, breaks: bool) -> Result<State, ModelError> {
        let factory = self.schema.factory();
        let mut next = factory.copy_state(state);
        let object = next.first_object_of_class_mut(LAMP)?;
        if breaks {
            factory.set_value(object, "broken", true)?;
            factory.set_value(object, "lit", false)?;
        } else {
            let lit = object.get_bool("lit")?;
            factory.set_value(object, "lit", !lit)?;
        }
        Ok(next)
    }
}

impl Action for Switch {
    fn name(&self) -> &str {
        SWITCH
    }

    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError> {
        let mut dist = Distribution::new();
        dist.push(self.resolve(state, true)?, FAIL_RATE);
        dist.push(self.resolve(state, false)?, 1.0 - FAIL_RATE);
        Ok(dist)
    }

    fn sample_step(&self, state: &State, rng: &mut dyn RngCore) -> Result<State, ModelError> {
        self.resolve(state, rng.gen_bool(FAIL_RATE))
    }
}

struct Glimpses {
    schema: Schema,
}

impl Glimpses {
    fn glimpse(&self, glow: &str) -> Result<State, ModelError> {
        self.schema
            .factory()
            .make_state(GLIMPSE, [("glow", Value::from(glow))])
    }
}

impl ObservationModel for Glimpses {
    fn enumerate_observations(&self) -> Vec<State> {
        let mut all = vec![State::null()];
        all.extend(["bright", "dark"].into_iter().filter_map(|g| self.glimpse(g).ok()));
        all
    }

    fn distribution(&self, state: &State, _action: &str) -> Result<Distribution<State>, ModelError> {
        let lit = state.first_object_of_class(LAMP)?.get_bool("lit")?;
        let mut dist = Distribution::new();
        dist.push(self.glimpse("bright")?, if lit { 1.0 } else { 0.0 });
        dist.push(self.glimpse("dark")?, if lit { 0.0 } else { 1.0 });
        Ok(dist)
    }
}

struct Broken;

impl TerminalFunction for Broken {
    fn is_terminal(&self, state: &State) -> Result<bool, ModelError> {
        state.first_object_of_class(LAMP)?.get_bool("broken")
    }
}

struct LightReward;

impl RewardFunction for LightReward {
    fn reward(&self, _state: &State, _action: &str, next: &State) -> Result<f64, ModelError> {
        let object = next.first_object_of_class(LAMP)?;
        if object.get_bool("broken")? {
            return Ok(-5.0);
        }
        Ok(if object.get_bool("lit")? { 1.0 } else { 0.0 })
    }
}

fn lamp_domain() -> quandary_core::Domain {
    let schema = lamp_schema();
    let seed = lamp(&schema, false, false).expect("seed");
    let mut builder = DomainBuilder::new(schema.clone(), LAMP, GLIMPSE);
    builder
        .add_action(Switch {
            schema: schema.clone(),
        })
        .expect("switch");
    builder
        .set_observation_model(Glimpses { schema })
        .set_terminal_fn(Broken)
        .set_reward_fn(Absorbing::new(Broken, LightReward))
        .add_seed_state(seed);
    builder.build().expect("lamp domain")
}

#[test]
fn public_dynamic_states_drive_a_domain() {
    let domain = lamp_domain();
    let start = domain.seed_states()[0].clone();

    let dist = domain.transitions(SWITCH, &start).expect("switch enumerates");
    let lit = lamp(domain.schema(), true, false).expect("lit lamp");
    let broken = lamp(domain.schema(), false, true).expect("broken lamp");

    assert_eq!(dist.len(), 2);
    assert!((dist.probability_of(&lit) - 0.8).abs() < 1e-12);
    assert!((dist.probability_of(&broken) - 0.2).abs() < 1e-12);

    let observed = domain.observations(SWITCH, &lit).expect("glimpse");
    assert_eq!(observed.len(), 2);
    assert!((observed.total() - 1.0).abs() < 1e-12);

    assert_eq!(domain.reward(&broken, SWITCH, &lit), Ok(0.0));
    assert_eq!(domain.reward(&start, SWITCH, &broken), Ok(-5.0));
}

#[test]
fn public_sampled_switch_matches_enumeration() {
    let domain = lamp_domain();
    let start = domain.seed_states()[0].clone();
    let dist = domain.transitions(SWITCH, &start).expect("switch enumerates");

    let mut sim = PomdpSimulator::new(&domain, start.clone(), 2024).expect("simulator");
    let mut broken = 0usize;
    let draws = 5_000;
    for _ in 0..draws {
        sim.reset(start.clone()).expect("reset");
        let outcome = sim.step(SWITCH).expect("step");
        assert!(dist.probability_of(&outcome.next) > 0.0);
        if outcome.terminal {
            broken += 1;
        }
    }

    let freq = broken as f64 / draws as f64;
    assert!((freq - FAIL_RATE).abs() < 0.03, "observed break rate {freq}");
}
