use std::sync::Once;
use std::time::Duration;

use coord_app::platform::{App, AppConfig, MemoryHistory};
use coord_core::read_param;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(coord_logging::initialize_for_tests);
}

#[tokio::test(flavor = "multi_thread")]
async fn lookup_against_http_service() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/map"))
        .and(query_param("location", "Karlův most"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": 50.0865,
            "lng": 14.4114,
            "codes": { "MGRS": "33UVR5834048199", "Maidenhead": "JO70fb" },
            "links": {
                "Mapy.cz": "https://mapy.cz/?q=50.0865,14.4114",
                "OpenStreetMap": { "display": "osm", "url": "https://osm.org/#map=17/50.0865/14.4114" },
                "geo": "geo:50.0865,14.4114"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        base_url: server.uri(),
        url_debounce_ms: 20,
        conversion_debounce_ms: 30,
        ..AppConfig::default()
    };
    let history = MemoryHistory::new(Url::parse("http://localhost/").expect("url"));
    let mut app = App::mount(&config, history).expect("mount");

    app.type_input("Karlův");
    app.type_input("Karlův most");
    assert!(app.pump_until_settled(Duration::from_secs(5)));

    assert_eq!(read_param(app.url(), "location"), "Karlův most");
    let result = app.view().result.expect("result");
    let labels: Vec<_> = result.map_links.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["Mapy.cz", "OpenStreetMap"]);
    assert_eq!(result.codes[1].value.as_deref(), Some("JO70fb"));
    assert_eq!(result.codes[2].value, None);
    assert_eq!(result.extra_links[0].label, "geo");
    assert_eq!(result.extra_links[0].href, None);

    app.unmount();
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_reports_transport_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let config = AppConfig {
        base_url: server.uri(),
        url_debounce_ms: 20,
        conversion_debounce_ms: 30,
        ..AppConfig::default()
    };
    let history = MemoryHistory::new(Url::parse("http://localhost/?location=x").expect("url"));
    let mut app = App::mount(&config, history).expect("mount");
    assert!(app.pump_until_settled(Duration::from_secs(5)));

    assert_eq!(
        app.view().error.as_deref(),
        Some("Request failed with status code 503")
    );
}

#[test]
fn invalid_base_url_fails_mount() {
    init_logging();
    let config = AppConfig {
        base_url: "not a url".to_string(),
        ..AppConfig::default()
    };
    let history = MemoryHistory::new(Url::parse("http://localhost/").expect("url"));

    let err = App::mount(&config, history).err().expect("mount error");
    assert!(matches!(err, coord_engine::EngineError::Client(_)));
}
