use super::ErrorCode;

#[test]
fn codes_parse_case_insensitively() {
    assert_eq!("e1003".parse::<ErrorCode>(), Ok(ErrorCode::E1003));
    assert_eq!(" E6001 ".parse::<ErrorCode>(), Ok(ErrorCode::E6001));
    assert!("E4242".parse::<ErrorCode>().is_err());
}

#[test]
fn every_code_round_trips() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        assert!(!code.description().is_empty());
    }
}

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E1004.to_string(), "E1004");
}
