use std::path::PathBuf;

use quandary_core::{PomdpSimulator, Record};
use quandary_domains::burning_room::{ACTION_ASK, ACTION_LONG_GRAB, ACTION_SHORT_GRAB, ValueAnswer};
use quandary_domains::{BurningRoom, BurningRoomConfig, YamlConfig};

fn main() {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => BurningRoomConfig::from_yaml_path(&path).expect("failed to load config YAML"),
        None => BurningRoomConfig::from_default_yaml().expect("bundled config is valid"),
    };
    let domain = BurningRoom::new(config)
        .build_domain()
        .expect("failed to build burning-room domain");

    let names = domain.action_names();
    let index = |name: &str| {
        names
            .iter()
            .position(|a| *a == name)
            .expect("action registered")
    };
    let (ask, short, long) = (
        index(ACTION_ASK),
        index(ACTION_SHORT_GRAB),
        index(ACTION_LONG_GRAB),
    );

    for (episode, seed) in domain.seed_states().iter().enumerate() {
        let mut sim =
            PomdpSimulator::new(&domain, seed.clone(), 12345 + episode as u64).expect("valid seed");

        // Ask first; risk the short grab only when the robot is expendable.
        let metrics = sim
            .run_episode_with_hook(
                8,
                |observation| match ValueAnswer::from_state(observation) {
                    Err(_) => ask,
                    Ok(answer) if answer.robot_valuable => long,
                    Ok(_) => short,
                },
                |event| {
                    let line = serde_json::to_string(event).expect("step event serializes");
                    println!("{line}");
                },
            )
            .expect("episode failed");

        println!(
            "episode={episode} start={seed} steps={} return={:.3} terminated={}",
            metrics.steps, metrics.total_return, metrics.terminated
        );
    }
}
