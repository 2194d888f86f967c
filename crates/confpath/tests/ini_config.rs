//! Integration tests for INI configuration access.

mod common;

use common::*;
use confpath::{
    create_config_from_str, join_path, load_value_ignoring_errors, Config, ConfigAccessor,
    ConfigError, ConfigType, RawValue, DEFAULT_ARRAY_DELIMITER,
};

const ONE_LEVEL: &str = "stringElement=value\nboolElement=true\n\
floatElement=1.23456\nintElement=123456\n\
stringElements=value1 value2 value3\nboolElements=true false true\n\
floatElements=1.23 4.56 7.89\nintElements=123 456 789\n\
timeElement=2006-01-02T15:04:05+07:00\ndurationElement=2h45m5s150ms\n\
timeElements=2006-01-02T15:04:05+07:00 2015-01-02T01:15:45Z 1999-12-31T23:59:59+00:00\n\
durationElements=1h 1h15m30s450ms 1s750ms";

fn two_level() -> String {
    format!("[first]\n{ONE_LEVEL}\n[second]\n{ONE_LEVEL}")
}

fn ini(text: &str) -> Config {
    create_config_from_str(text, "ini").unwrap()
}

#[test]
fn test_create_empty_ini() {
    let config = ini("");
    assert_eq!(config.config_type(), ConfigType::Ini);
}

#[test]
fn test_one_level_ini() {
    check_elements(&ini(ONE_LEVEL), "/");
}

#[test]
fn test_two_level_ini() {
    let config = ini(&two_level());
    check_elements(&config, "/first");
    check_elements(&config, "second");
}

#[test]
fn test_two_level_ini_load_value() {
    let config = ini(&two_level());
    load_data(&config, "/first").check();
    load_data(&config, "/second").check();
}

#[test]
fn test_ini_get_empty_strings() {
    let config = ini("emptyElement=");
    let values = config
        .get_strings("/emptyElement", DEFAULT_ARRAY_DELIMITER)
        .unwrap();
    assert!(values.is_empty());
}

#[test]
fn test_ini_custom_delimiter() {
    let config = ini("intElements=123,456,789");
    assert_eq!(config.get_ints("/intElements", ",").unwrap(), INT_VALUES);
    assert!(config
        .get_ints("/intElements", DEFAULT_ARRAY_DELIMITER)
        .unwrap_err()
        .is_incorrect_value_type());
}

#[test]
fn test_ini_grab_value() {
    let config = ini(ONE_LEVEL);

    let mut value = None;
    config
        .grab_value("/intElement", &mut |raw| {
            let RawValue::Text(text) = raw else {
                panic!("ini values must be text");
            };
            value = Some(confpath::parse_int(text)?);
            Ok(())
        })
        .unwrap();

    assert_eq!(value, Some(INT_VALUE));
}

#[test]
fn test_ini_grab_values() {
    let config = ini(ONE_LEVEL);

    let mut values = Vec::new();
    let mut created = None;
    config
        .grab_values(
            "/intElements",
            DEFAULT_ARRAY_DELIMITER,
            &mut |length| created = Some(length),
            &mut |raw| {
                values.push(raw.as_int()?);
                Ok(())
            },
        )
        .unwrap();

    assert_eq!(created, Some(3));
    assert_eq!(values, INT_VALUES);
}

#[test]
fn test_ini_grab_values_of_single_element() {
    let config = ini(ONE_LEVEL);

    let mut values = Vec::new();
    config
        .grab_values(
            "/intElement",
            DEFAULT_ARRAY_DELIMITER,
            &mut |_| {},
            &mut |raw| {
                assert!(raw.as_text().is_some());
                values.push(raw.as_int()?);
                Ok(())
            },
        )
        .unwrap();

    assert_eq!(values, vec![INT_VALUE]);
}

#[test]
fn test_incorrect_ini_config() {
    let err = create_config_from_str("{}", "ini").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_ini_get_value_empty_path() {
    check_not_found(&ini(""), "");
    check_not_found(&ini(ONE_LEVEL), "");
}

#[test]
fn test_ini_get_absent_value() {
    let two_level = two_level();
    for text in ["", ONE_LEVEL, two_level.as_str()] {
        let config = ini(text);
        for path in ["/", "/element", "/first/element", "/first/child/element"] {
            check_absent(&config, path);
        }
    }
}

#[test]
fn test_ini_get_value_of_incorrect_type() {
    let config = ini(ONE_LEVEL);
    let delim = DEFAULT_ARRAY_DELIMITER;

    assert!(config.get_bool("/stringElement").unwrap_err().is_incorrect_value_type());
    assert!(config.get_int("/stringElement").unwrap_err().is_incorrect_value_type());
    assert!(config.get_float("/stringElement").unwrap_err().is_incorrect_value_type());
    assert!(config.get_bools("/stringElement", delim).unwrap_err().is_incorrect_value_type());
    assert!(config.get_ints("/stringElement", delim).unwrap_err().is_incorrect_value_type());
    assert!(config.get_floats("/stringElement", delim).unwrap_err().is_incorrect_value_type());
    assert!(config.get_bools("/stringElements", delim).unwrap_err().is_incorrect_value_type());
    assert!(config.get_ints("/stringElements", delim).unwrap_err().is_incorrect_value_type());
    assert!(config.get_floats("/stringElements", delim).unwrap_err().is_incorrect_value_type());

    // Text integers use the integer grammar only.
    assert!(config.get_int("/floatElement").unwrap_err().is_incorrect_value_type());
    assert_float(config.get_float("/intElement").unwrap(), 123_456.0);
}

#[test]
fn test_ini_grab_absent_value() {
    let config = ini(ONE_LEVEL);

    let mut executed = false;
    let err = config
        .grab_value("/absentElement", &mut |_| {
            executed = true;
            Ok(())
        })
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!executed);
}

#[test]
fn test_ini_grab_absent_values() {
    let config = ini(ONE_LEVEL);

    let mut created = false;
    let mut grabbed = false;
    let err = config
        .grab_values(
            "/absentElement",
            DEFAULT_ARRAY_DELIMITER,
            &mut |_| created = true,
            &mut |_| {
                grabbed = true;
                Ok(())
            },
        )
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!created);
    assert!(!grabbed);
}

#[test]
fn test_ini_grab_value_pass_error() {
    let config = ini(ONE_LEVEL);
    let err = config
        .grab_value("/intElement", &mut |_| {
            Err(ConfigError::invalid_value("123456", "grab value error"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("grab value error"));
}

#[test]
fn test_ini_grab_values_pass_error() {
    let config = ini(ONE_LEVEL);

    let mut visited = 0;
    let err = config
        .grab_values("/intElements", DEFAULT_ARRAY_DELIMITER, &mut |_| {}, &mut |_| {
            visited += 1;
            Err(ConfigError::invalid_value("123", "grab values error"))
        })
        .unwrap_err();

    assert!(err.to_string().contains("grab values error"));
    assert_eq!(visited, 1);
}

#[test]
fn test_ini_get_config_part_root_from_root() {
    let config = ini(&two_level());
    assert_eq!(config.get_config_part("/").unwrap(), config);
}

#[test]
fn test_ini_get_config_part_section_from_root() {
    let mut expected = ConfigData::default();
    load_value_ignoring_errors(&ini(ONE_LEVEL), "/", &mut expected).unwrap();

    let part = ini(&two_level()).get_config_part("/first").unwrap();
    let mut value = ConfigData::default();
    load_value_ignoring_errors(&part, "/", &mut value).unwrap();

    assert_eq!(value, expected);
    value.check();
}

#[test]
fn test_ini_get_config_part_key_from_root() {
    let config = ini(&two_level());
    for element in ELEMENTS {
        let part = config.get_config_part(&join_path(["/first", element])).unwrap();
        check_element(&part, "/", element);
    }
}

#[test]
fn test_ini_get_config_part_section_from_section() {
    let config = ini(&two_level());
    let section = config.get_config_part("/first").unwrap();
    assert_eq!(config.get_config_part("/first").unwrap(), section);
    assert_ne!(config.get_config_part("/second").unwrap(), section);
}

#[test]
fn test_ini_get_config_part_key_from_section() {
    let section = ini(&two_level()).get_config_part("/first").unwrap();
    for element in ELEMENTS {
        let part = section.get_config_part(element).unwrap();
        check_element(&part, "/", element);
    }
}

#[test]
fn test_ini_get_config_part_key_from_key() {
    let config = ini(&two_level());
    for element in ELEMENTS {
        let key = config.get_config_part(&join_path(["first", element])).unwrap();
        let part = key.get_config_part("/").unwrap();
        assert_eq!(part, key);
        check_element(&part, "/", element);
    }
}

#[test]
fn test_ini_get_config_part_with_long_path() {
    let config = ini(&two_level());
    let section = config.get_config_part("/first").unwrap();
    let key = config.get_config_part("/first/stringElement").unwrap();

    let long = config.get_config_part("/first/stringElement/element");
    assert!(long.unwrap_err().is_not_found());
    let long = section.get_config_part("/stringElement/element");
    assert!(long.unwrap_err().is_not_found());
    assert!(key.get_config_part("/element").unwrap_err().is_not_found());
}

#[test]
fn test_ini_get_absent_config_part() {
    let config = ini(&two_level());
    assert!(config.get_config_part("/third").unwrap_err().is_not_found());
    assert!(config.get_config_part("/first/element").unwrap_err().is_not_found());
    assert!(config.get_config_part("/third/stringElement").unwrap_err().is_not_found());

    let section = config.get_config_part("/first").unwrap();
    assert!(section.get_config_part("element").unwrap_err().is_not_found());
}
