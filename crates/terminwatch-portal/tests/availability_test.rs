//! Full extraction path over a realistic submission response body.

use terminwatch_portal::{
    evaluate, extract_appoints_json, parse_availability, parse_landing_page, PortalError,
};

const RESPONSE_BODY: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Terminvereinbarung</title></head>
<body>
<div id="appointment-calendar"></div>
<script type="text/javascript">
    var jsonAppoints = '{"LOADBALANCER":{"appoints":{"2024-01-01":[],"2024-01-02":[{"slot":"09:00"}]}}}';
    renderCalendar(jsonAppoints);
</script>
</body>
</html>
"#;

#[test]
fn extracts_and_evaluates_embedded_payload() {
    let json = extract_appoints_json(RESPONSE_BODY).expect("extract payload");
    let map = parse_availability(json).expect("parse payload");
    let verdict = evaluate(&map);

    assert!(verdict.is_open());
    assert_eq!(verdict.date(), Some("2024-01-02"));
}

#[test]
fn landing_and_submission_stages_report_distinct_errors() {
    // A maintenance page satisfies neither stage, each with its own error
    let maintenance = "<html><body><h1>Wartungsarbeiten</h1></body></html>";

    assert!(matches!(
        parse_landing_page(maintenance),
        Err(PortalError::TokenNotFound { .. })
    ));
    assert!(matches!(
        extract_appoints_json(maintenance),
        Err(PortalError::PayloadNotFound)
    ));
}
