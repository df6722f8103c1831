use coord_core::{ConversionResponse, ConvertFailure, LinkValue, CONVERSION_FAILED};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn full_success_body_is_success() {
    let body = json!({
        "lat": 49.222181,
        "lng": 16.633866,
        "codes": { "MGRS": "33UXQ1234567890", "UTM": "33U 612345 5452345" },
        "links": {
            "Google Maps": "https://maps.google.com/?q=49.222181,16.633866",
            "Mapy.cz": { "display": "mapy.cz", "url": "https://mapy.cz/?x=16.633866&y=49.222181" }
        }
    });

    let ConversionResponse::Success(success) = ConversionResponse::classify(&body) else {
        panic!("expected success");
    };
    assert_eq!(success.lat, 49.222181);
    assert_eq!(success.lng, 16.633866);
    assert_eq!(success.codes["MGRS"], "33UXQ1234567890");
    assert_eq!(
        success.links["Mapy.cz"],
        LinkValue::Labeled {
            display: Some("mapy.cz".to_string()),
            url: "https://mapy.cz/?x=16.633866&y=49.222181".to_string(),
        }
    );
    assert_eq!(
        success.links["Google Maps"].display(),
        "https://maps.google.com/?q=49.222181,16.633866"
    );
}

#[test]
fn integer_coordinates_count_as_numeric() {
    let body = json!({ "lat": 49, "lng": 16, "codes": {}, "links": {} });
    assert!(matches!(
        ConversionResponse::classify(&body),
        ConversionResponse::Success(_)
    ));
}

#[test]
fn missing_or_mistyped_fields_are_failures() {
    let bodies = [
        json!({ "lat": "49.2", "lng": 16.6, "codes": {}, "links": {} }),
        json!({ "lat": 49.2, "codes": {}, "links": {} }),
        json!({ "lat": 49.2, "lng": 16.6, "codes": [], "links": {} }),
        json!({ "lat": 49.2, "lng": 16.6, "codes": {}, "links": null }),
        json!([49.2, 16.6]),
        json!("49.2, 16.6"),
        json!(null),
    ];
    for body in bodies {
        assert_eq!(
            ConversionResponse::classify(&body),
            ConversionResponse::Failure(ConvertFailure::Unexplained),
            "body: {body}"
        );
    }
}

#[test]
fn nested_error_message_wins() {
    let body = json!({
        "ok": false,
        "message": "top level",
        "error": { "message": "Unrecognized location format", "code": "PARSE_ERROR" }
    });
    let ConversionResponse::Failure(failure) = ConversionResponse::classify(&body) else {
        panic!("expected failure");
    };
    assert_eq!(
        failure,
        ConvertFailure::Detailed {
            message: "Unrecognized location format".to_string(),
            code: Some("PARSE_ERROR".to_string()),
        }
    );
    assert_eq!(failure.message(), "Unrecognized location format");
}

#[test]
fn top_level_message_is_second_choice() {
    let body = json!({ "error": { "code": "E1" }, "message": "Could not parse" });
    assert_eq!(
        ConversionResponse::classify(&body),
        ConversionResponse::Failure(ConvertFailure::Message("Could not parse".to_string()))
    );
}

#[test]
fn body_without_message_falls_back() {
    let body = json!({ "ok": false, "message": "" });
    let ConversionResponse::Failure(failure) = ConversionResponse::classify(&body) else {
        panic!("expected failure");
    };
    assert_eq!(failure.message(), CONVERSION_FAILED);
}

#[test]
fn malformed_links_are_skipped() {
    let body = json!({
        "lat": 1.0,
        "lng": 2.0,
        "codes": { "MGRS": "31NAA6602100000", "zone": 31 },
        "links": { "Waze": "https://waze.com/ul?ll=1,2", "Broken": { "href": "x" } }
    });
    let ConversionResponse::Success(success) = ConversionResponse::classify(&body) else {
        panic!("expected success");
    };
    assert_eq!(success.links.len(), 1);
    assert!(success.links.contains_key("Waze"));
    assert_eq!(success.codes["zone"], "31");
}

#[test]
fn link_object_without_display_shows_its_url() {
    let body = json!({
        "lat": 1,
        "lng": 2,
        "codes": {},
        "links": { "Google Maps": { "url": "https://maps.google.com/?q=1,2" } }
    });
    let ConversionResponse::Success(success) = ConversionResponse::classify(&body) else {
        panic!("expected success");
    };
    let link = &success.links["Google Maps"];
    assert_eq!(
        link,
        &LinkValue::Labeled {
            display: None,
            url: "https://maps.google.com/?q=1,2".to_string(),
        }
    );
    assert_eq!(link.display(), "https://maps.google.com/?q=1,2");
}
