//! Event builder, factory and catalog integration tests.

use chrono::{DateTime, TimeZone, Utc};
use live_events::{
    Condition, EngineConfig, EngineError, Event, EventBuilder, EventCatalog, Modifier,
    PathAudit, Value,
};

fn date(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
}

fn frequency(target: &Value) -> Option<f64> {
    target.get(&"frequency".into()).and_then(Value::as_number)
}

/// Builder errors are reported at compile time.
#[test]
fn test_compile_errors() {
    assert_eq!(
        Event::builder().description("No name").compile().unwrap_err(),
        EngineError::MissingName
    );
    assert_eq!(
        Event::builder().name("Quiet").compile().unwrap_err(),
        EngineError::MissingDescription {
            event: "Quiet".to_string()
        }
    );
    assert!(matches!(
        Event::builder()
            .name("Backwards")
            .description("Ends before it starts")
            .start_date(date(11, 1))
            .end_date(date(10, 1))
            .compile(),
        Err(EngineError::InvalidDateWindow { .. })
    ));
}

/// An event without modifiers is an identity transform.
#[test]
fn test_empty_event_is_identity() {
    let event = Event::builder()
        .name("Placeholder")
        .description("Announced, no effects yet")
        .compile()
        .unwrap();

    let target = Value::record().with_field("frequency", 2400);
    assert!(event.is_noop());
    assert_eq!(event.apply(&target), target);
}

/// Factories build a fresh event for each input.
#[test]
fn test_factory_per_input() {
    let factory = EventBuilder::<String>::with_input()
        .name("Berry Week")
        .description("Double strength for the featured berry")
        .modifier_fn(|berry: &String| {
            Modifier::multiply("berryStrength", 2)
                .with_condition(Condition::equals("berry", berry.as_str()))
        })
        .compile_factory()
        .unwrap();

    let oran = Value::record()
        .with_field("berry", "ORAN")
        .with_field("berryStrength", 30);

    let oran_week = factory.create(&"ORAN".to_string());
    let pecha_week = factory.create(&"PECHA".to_string());
    assert_ne!(oran_week, pecha_week);

    assert_eq!(
        oran_week.apply(&oran).get(&"berryStrength".into()),
        Some(&Value::from(60))
    );
    assert_eq!(pecha_week.apply(&oran), oran);
}

/// Catalog applies every live event in registration order.
#[test]
fn test_catalog_calendar() {
    let halloween = Event::builder()
        .name("Halloween")
        .description("Faster helping")
        .modifier(Modifier::multiply("frequency", 0.9))
        .active_between(date(10, 21), date(10, 31))
        .compile()
        .unwrap();
    let always = Event::builder()
        .name("Baseline")
        .description("Permanent adjustment")
        .modifier(Modifier::subtract("frequency", 60))
        .compile()
        .unwrap();

    let catalog = EventCatalog::from_events([halloween, always]).unwrap();
    let target = Value::record().with_field("frequency", 2400);

    assert_eq!(frequency(&catalog.apply_active(&target, date(10, 25))), Some(2100.0));
    assert_eq!(frequency(&catalog.apply_active(&target, date(12, 25))), Some(2340.0));
}

/// JSON calendars load, validate and pass the path audit.
#[test]
fn test_json_calendar_with_audit() {
    let json = r#"[
        {
            "name": "Halloween",
            "description": "Faster helping for ghost types",
            "modifiers": [
                {
                    "targetKind": "pokemon",
                    "leftValuePath": "frequency",
                    "operation": "*",
                    "rightValue": 0.9,
                    "conditions": [
                        {"leftValuePath": "specialty", "operation": "in", "rightValue": ["berry", "skill"]}
                    ]
                }
            ],
            "startDate": "2024-10-21T00:00:00Z",
            "endDate": "2024-10-31T23:59:59Z"
        },
        {
            "name": "Skill Week",
            "description": "Skill levels up, capped at max",
            "modifiers": [
                {
                    "leftValuePath": "skillLevel",
                    "operation": "+",
                    "rightValue": {"rightValue": 2, "max": {"ref": "maxLevel"}}
                }
            ]
        }
    ]"#;

    let catalog = EventCatalog::from_json(json, &EngineConfig::strict()).unwrap();
    assert_eq!(catalog.len(), 2);

    let sample = Value::record()
        .with_field("frequency", 2400)
        .with_field("specialty", "berry")
        .with_field("skillLevel", 5)
        .with_field("maxLevel", 6);
    let audit = PathAudit::new([sample.clone()]);
    assert!(audit.check_all(&catalog).is_ok());

    let result = catalog.apply_active(&sample, date(10, 25));
    assert_eq!(frequency(&result), Some(2160.0));
    assert_eq!(result.get(&"skillLevel".into()), Some(&Value::from(6)));
}

/// Strict policy rejects operator typos; permissive loads them as no-ops.
#[test]
fn test_operator_policy() {
    let json = r#"[{
        "name": "Typo",
        "description": "Multiplication written as x",
        "modifiers": [{"leftValuePath": "frequency", "operation": "x", "rightValue": 0.9}]
    }]"#;

    assert_eq!(
        EventCatalog::from_json(json, &EngineConfig::strict()).unwrap_err(),
        EngineError::UnknownOperator {
            event: "Typo".to_string(),
            operator: "x".to_string(),
        }
    );

    let catalog = EventCatalog::from_json(json, &EngineConfig::default()).unwrap();
    let target = Value::record().with_field("frequency", 2400);
    assert_eq!(catalog.apply_active(&target, date(1, 1)), target);
}
