use super::*;

#[test]
fn defaults_match_reset_state() {
    let o = GraphicsOpts::default();
    assert!(o.bilinear);
    assert_eq!(o.edge_clamp, EdgeClamp::NONE);
    assert_eq!(o.checked_draws, cfg!(debug_assertions));
}

#[test]
fn partial_json_keeps_defaults() {
    let o = GraphicsOpts::from_json(r#"{"bilinear": false, "edge_clamp": 15}"#).unwrap();
    assert!(!o.bilinear);
    assert_eq!(o.edge_clamp, EdgeClamp::ALL);
    assert_eq!(o.checked_draws, GraphicsOpts::default().checked_draws);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = GraphicsOpts::from_json(r#"{"dither": true}"#).unwrap_err();
    assert!(err.to_string().contains("graphics options"));
}

#[test]
fn missing_file_reports_the_path() {
    let err = GraphicsOpts::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, PulpError::Other(_)));
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}

#[test]
fn serializes_back_to_json() {
    let o = GraphicsOpts::default().with_checked_draws(true);
    let s = serde_json::to_string(&o).unwrap();
    assert_eq!(GraphicsOpts::from_json(&s).unwrap(), o);
}
