use super::*;
use crate::assets::media::MemoryVideoSource;
use crate::assets::resolver::MemoryResolver;
use crate::scene::amplitude::AmplitudeSeries;

fn px(synth: &FrameSynthesizer<'_>, x: u32, y: u32) -> [u8; 4] {
    let w = synth.canvas().width;
    let i = ((y * w + x) * 4) as usize;
    let d = synth.frame_premul();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn signal_frames(n: usize) -> AmplitudeData {
    AmplitudeData::new(
        AmplitudeSeries::default(),
        AmplitudeSeries::new(vec![vec![0.0; 4]; n]),
    )
    .unwrap()
}

#[test]
fn progress_percent_rounds_to_whole_points() {
    assert_eq!(progress_percent(1, 1), 100);
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(2, 3), 67);
    assert_eq!(progress_percent(3, 10), 30);
    assert_eq!(progress_percent(0, 0), 100);
}

#[test]
fn tracker_bar_grows_with_frame_index() {
    let scene = SceneDescription::from_json(
        r##"{
  "video": { "width": 20, "height": 20 },
  "tracker": { "type": "HORIZONTAL_BAR", "posX": 0, "posY": 0, "length": 20, "fill": "#ffffff" }
}"##,
    )
    .unwrap();
    let amps = signal_frames(2);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();

    synth.compose(0).unwrap();
    assert_eq!(px(&synth, 5, 5), [0, 0, 0, 0]);

    synth.compose(1).unwrap();
    assert_eq!(px(&synth, 5, 5), [255, 255, 255, 255]);
    assert_eq!(px(&synth, 15, 5), [0, 0, 0, 0]);
    assert_eq!(px(&synth, 5, 15), [0, 0, 0, 0]);
}

#[test]
fn static_layer_sits_above_background_video() {
    let scene = SceneDescription::from_json(
        r##"{
  "video": { "width": 20, "height": 20 },
  "shapes": [ { "shapeType": "BOX", "posX": 0, "posY": 0, "width": 10, "height": 20, "fill": "#0000ff" } ]
}"##,
    )
    .unwrap();
    let amps = signal_frames(1);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    let red = PremulImage::from_straight_rgba8(20, 20, [255, 0, 0, 255].repeat(400)).unwrap();
    synth.set_video_source(Some(Box::new(MemoryVideoSource::new([red]))));

    synth.compose(0).unwrap();
    assert_eq!(px(&synth, 5, 10), [0, 0, 255, 255]);
    assert_eq!(px(&synth, 15, 10), [255, 0, 0, 255]);
}

#[test]
fn exhausted_video_source_is_a_resource_error() {
    let scene = SceneDescription::from_json(r#"{ "video": { "width": 4, "height": 4 } }"#).unwrap();
    let amps = signal_frames(2);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    synth.set_video_source(Some(Box::new(MemoryVideoSource::new([PremulImage::transparent(
        4, 4,
    )]))));

    synth.compose(0).unwrap();
    assert!(matches!(synth.compose(1), Err(AudiogramError::ResourceLoad(_))));
}

#[test]
fn composing_past_the_series_is_out_of_range() {
    let scene = SceneDescription::from_json(r#"{ "video": { "width": 4, "height": 4 } }"#).unwrap();
    let amps = signal_frames(1);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    assert!(matches!(
        synth.compose(1),
        Err(AudiogramError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
}

#[test]
fn waveform_without_its_series_is_rejected_at_setup() {
    let scene = SceneDescription::from_json(
        r##"{
  "video": { "width": 20, "height": 20 },
  "waveform": { "type": "FAD", "posX": 0, "posY": 10, "width": 20, "fill1": "#ffffff" }
}"##,
    )
    .unwrap();
    let amps = signal_frames(3);
    let err = FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
        .err()
        .unwrap();
    assert!(matches!(err, AudiogramError::InvalidConfiguration(_)));
}

#[test]
fn missing_video_file_fails_setup() {
    let scene = SceneDescription::from_json(
        r#"{ "video": { "width": 4, "height": 4 }, "videoUrl": "bg.mp4" }"#,
    )
    .unwrap();
    let amps = signal_frames(1);
    let err = FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
        .err()
        .unwrap();
    assert!(matches!(err, AudiogramError::ResourceLoad(_)));
}

#[test]
fn video_running_out_mid_job_aborts_without_finalizing() {
    use crate::encode::sink::InMemorySink;

    let scene = SceneDescription::from_json(r#"{ "video": { "width": 4, "height": 4 } }"#).unwrap();
    let amps = signal_frames(3);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    synth.set_video_source(Some(Box::new(MemoryVideoSource::new([PremulImage::transparent(
        4, 4,
    )]))));

    let registry = TaskRegistry::new();
    let job = JobId::new("video");
    registry.register(job.clone()).unwrap();
    let mut sink = InMemorySink::new();
    let err = run_job(
        &job,
        synth,
        &mut sink,
        &JobHooks::registry(&registry),
        &RenderOpts::default(),
    )
    .unwrap_err();

    assert!(matches!(err, AudiogramError::ResourceLoad(_)));
    assert_eq!(sink.frames().len(), 1);
    assert_eq!((sink.close_calls(), sink.flush_calls()), (0, 0));
    assert_eq!(sink.abort_calls(), 1);
    assert_eq!(registry.status(&job), Some(JobStatus::Failed));
}

#[test]
fn reused_render_context_starts_each_frame_clean() {
    let scene = SceneDescription::from_json(
        r##"{
  "video": { "width": 20, "height": 20 },
  "tracker": { "type": "HORIZONTAL_BAR", "posX": 0, "posY": 0, "length": 20, "fill": "#ffffff" }
}"##,
    )
    .unwrap();
    let amps = signal_frames(2);
    let mut synth =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    synth.compose(1).unwrap();
    assert_eq!(px(&synth, 5, 5), [255, 255, 255, 255]);

    let mut again =
        FrameSynthesizer::prepare(&scene, &amps, &MemoryResolver::new(), &RenderOpts::default())
            .unwrap();
    again.compose(0).unwrap();
    again.compose(1).unwrap();
    assert_eq!(again.frame_premul(), synth.frame_premul());
}
