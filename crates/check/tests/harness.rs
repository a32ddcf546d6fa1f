//! Composition and reporting tests.

use flatcheck::{
    check_collection_element_value, check_nested_collection_element, compose, compose_aggregate,
    run_checks, CheckError, CheckFn,
};
use flatcheck_state::State;
use serde_json::json;

fn state() -> State {
    State::from_json_value(json!({
        "version": 3,
        "modules": [{
            "path": ["root"],
            "resources": {
                "aws_security_group.web": {
                    "type": "aws_security_group",
                    "primary": {
                        "id": "sg-1",
                        "attributes": {
                            "id": "sg-1",
                            "ingress.#": "2",
                            "ingress.1403647648.from_port": "80",
                            "ingress.1403647648.protocol": "tcp",
                            "ingress.2541437006.from_port": "443",
                            "ingress.2541437006.protocol": "tcp",
                            "ingress.2541437006.cidr_blocks.#": "1",
                            "ingress.2541437006.cidr_blocks.0": "10.0.0.0/8",
                            "egress.#": "0"
                        }
                    }
                }
            }
        }]
    }))
    .unwrap()
}

fn passing() -> CheckFn {
    check_nested_collection_element(
        "aws_security_group.web",
        "ingress",
        [("from_port", "443"), ("protocol", "tcp")],
    )
}

fn passing_scalar() -> CheckFn {
    check_collection_element_value(
        "aws_security_group.web",
        "ingress.2541437006.cidr_blocks",
        "10.0.0.0/8",
    )
}

fn failing() -> CheckFn {
    check_nested_collection_element("aws_security_group.web", "ingress", [("from_port", "22")])
}

fn missing() -> CheckFn {
    check_collection_element_value("aws_security_group.db", "ingress", "80")
}

#[test]
fn compose_passes_when_all_pass() {
    let check = compose(vec![passing(), passing_scalar()]);
    assert_eq!(check(&state()), Ok(()));
}

#[test]
fn compose_stops_at_first_failure() {
    let check = compose(vec![passing(), failing(), missing()]);
    match check(&state()) {
        Err(CheckError::Step {
            index,
            total,
            source,
        }) => {
            assert_eq!(index, 2);
            assert_eq!(total, 3);
            assert!(matches!(*source, CheckError::NoMatchingElement { .. }));
        }
        other => panic!("expected Step, got {:?}", other),
    }
}

#[test]
fn compose_step_message_names_position() {
    let check = compose(vec![missing()]);
    let msg = check(&state()).unwrap_err().to_string();
    assert!(msg.starts_with("check 1/1 error: not found: aws_security_group.db"), "{msg}");
}

#[test]
fn compose_of_nothing_passes() {
    assert_eq!(compose(Vec::new())(&state()), Ok(()));
}

#[test]
fn aggregate_collects_every_failure() {
    let check = compose_aggregate(vec![failing(), passing(), missing()]);
    match check(&state()) {
        Err(CheckError::Aggregate(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], CheckError::NoMatchingElement { .. }));
            assert!(matches!(errors[1], CheckError::NotFound { .. }));
        }
        other => panic!("expected Aggregate, got {:?}", other),
    }
}

#[test]
fn aggregate_passes_when_all_pass() {
    let check = compose_aggregate(vec![passing(), passing_scalar()]);
    assert_eq!(check(&state()), Ok(()));
}

#[test]
fn aggregate_message_lists_failures() {
    let check = compose_aggregate(vec![failing(), missing()]);
    let msg = check(&state()).unwrap_err().to_string();
    assert!(msg.starts_with("2 check(s) failed:"), "{msg}");
    assert!(msg.contains("  1) no element of"), "{msg}");
    assert!(msg.contains("  2) not found: aws_security_group.db in root"), "{msg}");
}

#[test]
fn report_counts_and_renders_failures() {
    let checks: Vec<(&str, CheckFn)> = vec![
        ("ingress_443", passing()),
        ("ingress_cidr", passing_scalar()),
        ("ingress_22", failing()),
        ("db_ingress", missing()),
    ];
    let report = run_checks(&state(), &checks);

    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 2);
    assert!(report.results[0].passed);
    assert!(report.results[0].message.is_none());
    assert!(!report.results[3].passed);

    let rendered = report.to_string();
    assert!(rendered.starts_with("Checks: 2/4 passed (2 failed)"), "{rendered}");
    assert!(rendered.contains("FAIL [ingress_22]"), "{rendered}");
    assert!(rendered.contains("FAIL [db_ingress]: not found"), "{rendered}");
    assert!(!rendered.contains("ingress_443"), "{rendered}");
}

#[test]
fn empty_collection_reports_no_match() {
    let checks: Vec<(&str, CheckFn)> = vec![(
        "egress_any",
        check_nested_collection_element("aws_security_group.web", "egress", [("protocol", "-1")]),
    )];
    let report = run_checks(&state(), &checks);
    assert_eq!(report.failed, 1);
}
