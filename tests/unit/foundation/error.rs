use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LetterFxError::font_load("x")
            .to_string()
            .contains("font load error:")
    );
    assert!(
        LetterFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LetterFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LetterFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
