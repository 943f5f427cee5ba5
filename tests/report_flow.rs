//! End-to-end tests of the submit flow against a canned local endpoint.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use fleet_report::app::App;
use fleet_report::client::{GenerateError, ReportClient};
use fleet_report::form::{CompanyField, Counter, ScoreField};
use fleet_report::model::Region;

/// Serves exactly one HTTP request with the given status line and JSON body,
/// then shuts down.  Returns the endpoint URL.
fn one_shot_endpoint(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept request");
        let mut reader = BufReader::new(stream);

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read request header");
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some(value) = trimmed
                .to_ascii_lowercase()
                .strip_prefix("content-length:")
                .map(str::trim)
                .map(str::to_owned)
            {
                content_length = value.parse().unwrap_or(0);
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).expect("read body");

        let mut stream = reader.into_inner();
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    });

    format!("http://{addr}/generate")
}

fn filled_app() -> App {
    let mut app = App::new();
    let form = app.form_mut();
    form.set_company_field(CompanyField::Name, "Acme Logistics");
    form.set_company_field(CompanyField::ReportPeriod, "Aug 18 - Aug 24");
    form.set_fleet_score(Region::Corporate, ScoreField::Score, "82");
    form.set_fleet_score(Region::Corporate, ScoreField::Change, "5");
    form.set_fleet_score(Region::GreatLakes, ScoreField::Score, "77");
    form.set_fleet_score(Region::GreatLakes, ScoreField::Change, "-3");
    form.set_counter(Counter::HosViolations, "12");
    form.set_contact(0, "safety@acme.test");
    app
}

#[test]
fn successful_generation_hands_snapshot_over_unmodified() {
    let endpoint = one_shot_endpoint(
        "HTTP/1.1 200 OK",
        r#"{"sections":[{"title":"Overall Fleet Safety Summary","markdown":"Scores **improved**."},{"title":"HOS Violations Summary","markdown":"- none"}]}"#,
    );
    let client = ReportClient::new(endpoint);

    let mut app = filled_app();
    app.submit(&client).expect("generation should succeed");

    let report = app.report().expect("report installed");
    assert_eq!(report.company_info.name, "Acme Logistics");
    assert_eq!(report.company_info.report_period, "Aug 18 - Aug 24");
    assert_eq!(report.input_data.fleet_scores.corporate.score, 82.0);
    assert_eq!(report.input_data.fleet_scores.great_lakes.change, -3.0);
    assert_eq!(report.input_data.hos_violations.total, 12.0);
    assert_eq!(report.input_data.contacts[0], "safety@acme.test");
    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.sections[0].title, "Overall Fleet Safety Summary");
    assert_eq!(report.sections[1].title, "HOS Violations Summary");
}

#[test]
fn malformed_json_leaves_the_form_unchanged_and_editable() {
    let endpoint = one_shot_endpoint("HTTP/1.1 200 OK", "this is not json");
    let client = ReportClient::new(endpoint);

    let mut app = filled_app();
    let err = app.submit(&client).expect_err("malformed body must fail");
    assert!(matches!(err, GenerateError::MalformedResponse(_)));
    assert!(!app.has_report());

    // the form is still the owner of its state and stays editable
    assert_eq!(app.form().company().name, "Acme Logistics");
    app.form_mut().set_counter(Counter::SafetyEvents, "4");
    assert_eq!(app.form().input().safety_events.total, 4.0);
}

#[test]
fn missing_sections_field_is_a_malformed_response() {
    let endpoint = one_shot_endpoint("HTTP/1.1 200 OK", r#"{"detail":"no sections here"}"#);
    let client = ReportClient::new(endpoint);

    let mut app = filled_app();
    let err = app.submit(&client).expect_err("missing field must fail");
    assert!(matches!(err, GenerateError::MalformedResponse(_)));
    assert!(!app.has_report());
}

#[test]
fn empty_sections_do_not_open_the_report_view() {
    let endpoint = one_shot_endpoint("HTTP/1.1 200 OK", r#"{"sections":[]}"#);
    let client = ReportClient::new(endpoint);

    let mut app = filled_app();
    let err = app.submit(&client).expect_err("empty sections must fail");
    assert!(matches!(err, GenerateError::EmptySections));
    assert!(!app.has_report());
}

#[test]
fn server_error_status_is_reported_with_its_code() {
    let endpoint = one_shot_endpoint(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"detail":"boom"}"#,
    );
    let client = ReportClient::new(endpoint);

    let mut app = filled_app();
    let err = app.submit(&client).expect_err("server error must fail");
    match err {
        GenerateError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(!app.has_report());
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    // bind and drop to find a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        listener.local_addr().expect("probe address").port()
    };
    let client = ReportClient::new(format!("http://127.0.0.1:{port}/generate"));

    let mut app = filled_app();
    let err = app.submit(&client).expect_err("connect must fail");
    assert!(matches!(err, GenerateError::Network(_)));
    assert!(!app.has_report());
}
