use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PostError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PostError::asset("x").to_string().contains("asset error:"));
    assert!(PostError::render("x").to_string().contains("render error:"));
    assert!(PostError::export("x").to_string().contains("export error:"));
    assert!(
        PostError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PostError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
