use super::*;

#[test]
fn test_round_trip_through_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e2003".parse::<ErrorCode>(), Ok(ErrorCode::E2003));
    assert!("E9999".parse::<ErrorCode>().is_err());
}

#[test]
fn test_phase_classification() {
    for code in ErrorCode::ALL {
        let phases = [
            code.is_frontend_error(),
            code.is_semantic_error(),
            code.is_runtime_error(),
        ];
        assert_eq!(
            phases.iter().filter(|p| **p).count(),
            1,
            "{code} must belong to exactly one phase"
        );
    }
    assert!(ErrorCode::E6001.is_runtime_error());
    assert!(ErrorCode::E2005.is_semantic_error());
}

#[test]
fn test_display() {
    assert_eq!(ErrorCode::E2001.to_string(), "E2001");
    assert_eq!(ErrorCode::E6002.description(), "resource exhaustion");
}
