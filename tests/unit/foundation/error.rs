use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PreviewError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PreviewError::io("x").to_string().contains("io error:"));
    assert!(
        PreviewError::rasterize("x")
            .to_string()
            .contains("rasterize error:")
    );
    assert!(
        PreviewError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = PreviewError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
