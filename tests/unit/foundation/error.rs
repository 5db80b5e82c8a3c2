use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VisError::malformed_map("x")
            .to_string()
            .contains("malformed map:")
    );
    assert!(
        VisError::malformed_solution("x")
            .to_string()
            .contains("malformed solution:")
    );
    assert!(
        VisError::out_of_bounds("x")
            .to_string()
            .contains("solution out of bounds:")
    );
    assert!(
        VisError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VisError::render("x").to_string().contains("render error:"));
    assert!(VisError::export("x").to_string().contains("export error:"));
}

#[test]
fn load_errors_are_classified() {
    assert!(VisError::malformed_map("x").is_load_error());
    assert!(VisError::malformed_solution("x").is_load_error());
    assert!(VisError::out_of_bounds("x").is_load_error());
    assert!(!VisError::render("x").is_load_error());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VisError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));

    let io: VisError = std::io::Error::other("disk").into();
    assert!(matches!(io, VisError::Io(_)));
}
