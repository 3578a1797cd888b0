//! The `explain` command: describe an error code.

use spl_diagnostic::ErrorCode;

pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1003, E2001, E6001");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}
