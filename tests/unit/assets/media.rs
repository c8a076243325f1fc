use super::*;

#[test]
fn memory_source_serves_frames_in_order_then_errors() {
    let mut src = MemoryVideoSource::new([
        PremulImage::transparent(2, 2),
        PremulImage::from_straight_rgba8(2, 2, vec![255; 16]).unwrap(),
    ]);
    assert_eq!(src.next_frame().unwrap().data, vec![0; 16]);
    assert_eq!(src.next_frame().unwrap().data, vec![255; 16]);
    assert!(matches!(
        src.next_frame(),
        Err(AudiogramError::ResourceLoad(_))
    ));
}

#[test]
fn missing_video_file_is_a_resource_error() {
    let canvas = Canvas {
        width: 4,
        height: 4,
    };
    let err = FfmpegVideoSource::open(Path::new("/no/such/video.mp4"), canvas, Fps::AUDIOGRAM)
        .err()
        .unwrap();
    assert!(matches!(err, AudiogramError::ResourceLoad(_)));
}

#[test]
fn undecodable_video_fails_at_open() {
    let path = std::env::temp_dir().join(format!("audiogram-not-a-video-{}.mp4", std::process::id()));
    std::fs::write(&path, b"definitely not a video stream").unwrap();
    let canvas = Canvas {
        width: 4,
        height: 4,
    };

    let result = FfmpegVideoSource::open(&path, canvas, Fps::AUDIOGRAM);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(AudiogramError::ResourceLoad(_))));
}
