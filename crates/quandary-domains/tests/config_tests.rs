use quandary_domains::burning_room::GrabConfig;
use quandary_domains::{BurningRoomConfig, CakeDeathConfig, ConfigError, YamlConfig};

#[test]
fn bundled_yaml_matches_code_defaults() {
    let burning = BurningRoomConfig::from_default_yaml().expect("burning-room YAML parses");
    assert_eq!(burning, BurningRoomConfig::default());

    let cake = CakeDeathConfig::from_default_yaml().expect("cake/death YAML parses");
    assert_eq!(cake, CakeDeathConfig::default());
}

#[test]
fn partial_yaml_keeps_remaining_defaults() {
    let config = BurningRoomConfig::from_yaml_str(
        "fire_destroy_probability: 0.4\npenalties:\n  valuable_robot: 40.0\n",
    )
    .expect("partial YAML parses");

    assert_eq!(config.fire_destroy_probability, 0.4);
    assert_eq!(config.penalties.valuable_robot, 40.0);
    assert_eq!(config.penalties.object_destroyed, 10.0);
    assert_eq!(config.long_grab, BurningRoomConfig::default().long_grab);
}

#[test]
fn out_of_range_probability_is_rejected() {
    let err = BurningRoomConfig::from_yaml_str(
        "reach_grab:\n  destroy_probability: 1.5\n  success_bonus: 8.0\n",
    )
    .expect_err("probability above one");

    match err {
        ConfigError::Invalid(message) => assert!(message.contains("reach_grab.destroy_probability")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = CakeDeathConfig::from_yaml_str("cake_reward: [1, 2").expect_err("bad YAML");
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = CakeDeathConfig::from_yaml_path("does/not/exist.yaml").expect_err("no file");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn grab_entries_override_one_key_at_a_time() {
    let config = BurningRoomConfig::from_yaml_str(
        "short_grab:\n  destroy_probability: 0.005\nlong_grab:\n  success_bonus: 4.0\n",
    )
    .expect("single-key grab overrides parse");

    assert_eq!(
        config.short_grab,
        GrabConfig {
            destroy_probability: 0.005,
            success_bonus: GrabConfig::SHORT.success_bonus,
        }
    );
    assert_eq!(
        config.long_grab,
        GrabConfig {
            destroy_probability: GrabConfig::LONG.destroy_probability,
            success_bonus: 4.0,
        }
    );
    assert_eq!(config.reach_grab, GrabConfig::REACH);
}

#[test]
fn misspelled_grab_key_is_a_parse_error() {
    let err = BurningRoomConfig::from_yaml_str("reach_grab:\n  destroy_prob: 0.2\n")
        .expect_err("unknown key");
    assert!(matches!(err, ConfigError::Yaml(_)));
}
