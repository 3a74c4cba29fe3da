use portscan_ui_rs::error::ValidationError;
use portscan_ui_rs::types::{summary_line, ResultRow, ScanRequest, ScanResponse};

#[test]
fn example_response_renders_two_rows() {
    let body = r#"{"results":[
        {"Port":22,"State":"open","Service":"ssh"},
        {"Port":80,"State":"closed"},
        {"Port":443,"State":"open"}
    ]}"#;

    let resp: ScanResponse = serde_json::from_str(body).expect("decode ok");
    let rows: Vec<(String, String, String)> = resp
        .open_ports()
        .map(ResultRow::from)
        .map(|r| (r.port, r.state, r.service))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("22".into(), "open".into(), "ssh".into()),
            ("443".into(), "open".into(), "Unknown".into()),
        ]
    );
    assert_eq!(resp.summary_line(), "Scanned 3 ports, found 2 open port(s).");
}

#[test]
fn filtered_and_closed_only_count_toward_total() {
    let body = r#"{"results":[{"Port":1,"State":"filtered"},{"Port":2,"State":"closed"}]}"#;
    let resp: ScanResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.open_ports().count(), 0);
    assert_eq!(resp.summary_line(), summary_line(2, 0));
}

#[test]
fn empty_input_rejected() {
    assert_eq!(ScanRequest::new("", "22"), Err(ValidationError::EmptyTarget));
    assert_eq!(ScanRequest::new(" example.com ", ""), Err(ValidationError::EmptyPorts));
}
