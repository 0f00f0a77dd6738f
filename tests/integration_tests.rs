use anyhow::Result;
use commute_planner::{
    CommuteOptions, CommutePlanner, ConfigProvider, LocalStorage, SourceKind, Storage, TomlConfig,
};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[sources.public_transport]
endpoint = "{base}/schedules"

[sources.bike_sharing]
endpoint = "{base}/availability"

[sources.ride_sharing]
endpoint = "{base}/options"

[http]
timeout_seconds = 5
"#,
        base = server.base_url()
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

#[tokio::test]
async fn test_end_to_end_all_sources_succeed() -> Result<()> {
    let server = MockServer::start();

    let transport_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/schedules")
            .query_param("location", "Central-Station")
            .query_param("destination", "Tech-Park");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "schedules": [
                    {"route": "42", "departure": "07:55", "platform": 3},
                    {"route": "42X", "departure": "08:10", "platform": 1}
                ],
                "provider": "metro"
            }));
    });
    let bike_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/availability")
            .query_param("location", "Central-Station")
            .query_param("destination", "Tech-Park");
        then.status(200)
            .json_body(json!({"availabilities": [{"dock": "CS-1", "bikes": 6}]}));
    });
    let ride_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/options")
            .query_param("location", "Central-Station")
            .query_param("destination", "Tech-Park");
        then.status(200).json_body(json!({
            "options": [{"tier": "pool", "eta_minutes": 6, "price": null}]
        }));
    });

    let planner = CommutePlanner::from_config(&config_for(&server)?)?;
    let options = planner.plan("Central-Station", "Tech-Park").await;

    transport_mock.assert();
    bike_mock.assert();
    ride_mock.assert();

    assert_eq!(
        options.public_transport,
        vec![
            json!({"route": "42", "departure": "07:55", "platform": 3}),
            json!({"route": "42X", "departure": "08:10", "platform": 1})
        ]
    );
    assert_eq!(options.bike_sharing, vec![json!({"dock": "CS-1", "bikes": 6})]);
    assert_eq!(
        options.ride_sharing,
        vec![json!({"tier": "pool", "eta_minutes": 6, "price": null})]
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_api_failures() -> Result<()> {
    let server = MockServer::start();

    let transport_mock = server.mock(|when, then| {
        when.method(GET).path("/schedules");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/availability");
        then.status(200).body("not json at all");
    });
    server.mock(|when, then| {
        when.method(GET).path("/options");
        then.status(200)
            .json_body(json!({"options": [{"tier": "black"}]}));
    });

    let planner = CommutePlanner::from_config(&config_for(&server)?)?;
    let options = planner.plan("A", "B").await;

    transport_mock.assert();
    assert!(options.public_transport.is_empty());
    assert!(options.bike_sharing.is_empty());
    assert_eq!(options.ride_sharing, vec![json!({"tier": "black"})]);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_services_yield_three_empty_lists() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[sources.public_transport]
endpoint = "http://127.0.0.1:1/schedules"

[sources.bike_sharing]
endpoint = "http://127.0.0.1:1/availability"

[sources.ride_sharing]
endpoint = "http://127.0.0.1:1/options"

[http]
timeout_seconds = 2
"#,
    )?;

    let planner = CommutePlanner::from_config(&config)?;
    let options = planner.plan("A", "B").await;
    assert_eq!(options, CommuteOptions::default());

    let value = serde_json::to_value(&options)?;
    let keys: Vec<&String> = value.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(keys.len(), 3);
    for kind in SourceKind::ALL {
        assert_eq!(value[kind.key()], json!([]));
    }

    let raw = planner.collect_raw("A", "B").await;
    for kind in SourceKind::ALL {
        assert!(raw.get(kind).is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_collect_raw_keeps_whole_bodies() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/schedules");
        then.status(200)
            .json_body(json!({"schedules": [], "disruptions": ["Line 5 closed"]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/availability");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/options");
        then.status(200).json_body(json!({"surge": 1.4}));
    });

    let planner = CommutePlanner::from_config(&config_for(&server)?)?;
    let raw = planner.collect_raw("A", "B").await;

    assert_eq!(raw.public_transport["disruptions"], json!(["Line 5 closed"]));
    assert!(raw.bike_sharing.is_empty());
    assert_eq!(raw.ride_sharing["surge"], json!(1.4));
    Ok(())
}

#[tokio::test]
async fn test_custom_field_from_toml() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stations");
        then.status(200)
            .json_body(json!({"stations": [{"id": 1}], "availabilities": [{"id": 2}]}));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[sources.bike_sharing]
endpoint = "{}"
field = "stations"
"#,
        server.url("/stations")
    ))?;
    assert_eq!(config.response_field(SourceKind::BikeSharing), "stations");

    let planner = CommutePlanner::from_config(&config)?;
    let items = planner.bike_sharing_availability("A", "B").await;
    assert_eq!(items, vec![json!({"id": 1})]);
    Ok(())
}

#[tokio::test]
async fn test_report_saved_through_local_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap_or_default().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/schedules");
        then.status(200).json_body(json!({"schedules": [{"route": "7"}]}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/availability");
        then.status(200).json_body(json!({"availabilities": []}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/options");
        then.status(200).json_body(json!({"options": []}));
    });

    let planner = CommutePlanner::from_config(&config_for(&server)?)?;
    let options = planner.plan("A", "B").await;

    let storage = LocalStorage::new(output_path.clone());
    let report = serde_json::to_string_pretty(&options)?;
    storage.write_file("commute.json", report.as_bytes()).await?;

    let full_path = std::path::Path::new(&output_path).join("commute.json");
    assert!(full_path.exists());

    let saved: CommuteOptions = serde_json::from_slice(&storage.read_file("commute.json").await?)?;
    assert_eq!(saved, options);
    assert_eq!(saved.public_transport, vec![json!({"route": "7"})]);
    Ok(())
}
