use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ReelError::unpaired_unit("x")
            .to_string()
            .contains("unpaired unit error:")
    );
    assert!(ReelError::decode("x").to_string().contains("decode error:"));
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(ReelError::reap("x").to_string().contains("reap error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_configuration_and_wrapped_errors_end_the_run() {
    assert!(ReelError::configuration("x").is_fatal_for_run());
    assert!(ReelError::Other(anyhow::anyhow!("x")).is_fatal_for_run());
    assert!(!ReelError::unpaired_unit("x").is_fatal_for_run());
    assert!(!ReelError::decode("x").is_fatal_for_run());
    assert!(!ReelError::render("x").is_fatal_for_run());
    assert!(!ReelError::reap("x").is_fatal_for_run());
}
