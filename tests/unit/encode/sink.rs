use super::*;

#[test]
fn flatten_alpha_0_returns_bg() {
    let mut frame = FrameRgb::new(1, 1);
    frame
        .flatten_from_premul(&[0, 0, 0, 0], Rgba8::rgb(10, 20, 30))
        .unwrap();
    assert_eq!(frame.data, vec![10, 20, 30]);
}

#[test]
fn flatten_alpha_255_drops_alpha() {
    let mut frame = FrameRgb::new(1, 1);
    frame
        .flatten_from_premul(&[1, 2, 3, 255], Rgba8::rgb(10, 20, 30))
        .unwrap();
    assert_eq!(frame.data, vec![1, 2, 3]);
}

#[test]
fn flatten_half_alpha_blends() {
    let mut frame = FrameRgb::new(1, 1);
    frame
        .flatten_from_premul(&[128, 0, 0, 128], Rgba8::rgb(0, 0, 254))
        .unwrap();
    assert_eq!(frame.data, vec![128, 0, 127]);
}

#[test]
fn flatten_rejects_size_mismatch() {
    let mut frame = FrameRgb::new(2, 1);
    assert!(matches!(
        frame.flatten_from_premul(&[0; 4], Rgba8::BLACK),
        Err(AudiogramError::Encoding(_))
    ));
}

#[test]
fn memory_sink_records_frames_and_calls() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::AUDIOGRAM,
    })
    .unwrap();
    let frame = FrameRgb::new(1, 1);
    sink.encode_frame(&frame, 0).unwrap();
    sink.encode_frame(&frame, 33_333_333).unwrap();
    sink.close().unwrap();
    sink.flush().unwrap();

    assert_eq!(sink.timestamps(), vec![0, 33_333_333]);
    assert_eq!((sink.close_calls(), sink.flush_calls()), (1, 1));
    assert_eq!(sink.config().map(|c| c.width), Some(1));
}

#[test]
fn memory_sink_rejects_non_increasing_timestamps() {
    let mut sink = InMemorySink::new();
    let frame = FrameRgb::new(1, 1);
    sink.encode_frame(&frame, 10).unwrap();
    for bad in [10, 5] {
        assert!(matches!(
            sink.encode_frame(&frame, bad),
            Err(AudiogramError::Encoding(_))
        ));
    }
    assert_eq!(sink.frames().len(), 1);
}

#[test]
fn failing_sink_rejects_the_chosen_frame() {
    let mut sink = InMemorySink::failing_at(1);
    let frame = FrameRgb::new(1, 1);
    sink.encode_frame(&frame, 0).unwrap();
    assert!(sink.encode_frame(&frame, 1).is_err());
}
