use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AudiogramError::config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        AudiogramError::input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        AudiogramError::resource("x")
            .to_string()
            .contains("resource load error:")
    );
    assert!(
        AudiogramError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn out_of_range_reports_index_and_len() {
    let msg = AudiogramError::out_of_range("amplitude bin", 7, 3).to_string();
    assert!(msg.contains("amplitude bin"));
    assert!(msg.contains('7'));
    assert!(msg.contains("len 3"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AudiogramError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
