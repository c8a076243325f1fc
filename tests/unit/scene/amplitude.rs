use super::*;

#[test]
fn frame_count_follows_series_length() {
    let data = AmplitudeData::new(
        AmplitudeSeries::new(vec![vec![0.0; 4]; 12]),
        AmplitudeSeries::default(),
    )
    .unwrap();
    assert_eq!(data.frame_count(), 12);
    assert_eq!(data.spectrum.band_count(), 4);
}

#[test]
fn mismatched_parallel_series_are_rejected() {
    let err = AmplitudeData::new(
        AmplitudeSeries::new(vec![vec![0.0]; 3]),
        AmplitudeSeries::new(vec![vec![0.0]; 4]),
    )
    .unwrap_err();
    assert!(matches!(err, AudiogramError::InvalidConfiguration(_)));
}

#[test]
fn checked_accessors_report_out_of_range() {
    let s = AmplitudeSeries::new(vec![vec![1.0, 2.0]]);
    assert!(matches!(
        s.frame(1),
        Err(AudiogramError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
    let f = s.frame(0).unwrap();
    assert_eq!(bin(f, 1).unwrap(), 2.0);
    assert!(matches!(
        bin(f, 2),
        Err(AudiogramError::IndexOutOfRange { index: 2, len: 2, .. })
    ));
}

#[test]
fn parses_json_with_optional_signal() {
    let data = AmplitudeData::from_json(r#"{ "spectrum": [[1, 2], [3, 4]] }"#).unwrap();
    assert_eq!(data.frame_count(), 2);
    assert!(data.signal.is_empty());
    assert_eq!(data.spectrum.frame(1).unwrap(), &[3.0, 4.0]);
}
