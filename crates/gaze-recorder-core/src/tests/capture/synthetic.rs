use crate::{
    CaptureSession, FrameSource, SdkStatus, StreamKind, StreamSpec, SyntheticCamera,
    synthetic::{STATUS_DEVICE_LOST, STATUS_FRAME_HELD, STATUS_INVALID_STREAM, STATUS_NOT_INITIALIZED},
};

use std::{fs, path::PathBuf};

use uuid::Uuid;

// Fast stream so pacing does not slow the tests down.
const TEST_FPS: u32 = 1000;

fn fast_streams() -> Vec<StreamSpec> {
    vec![
        StreamSpec {
            kind: StreamKind::Color,
            width: 64,
            height: 48,
            fps: TEST_FPS,
        },
        StreamSpec {
            kind: StreamKind::Depth,
            width: 64,
            height: 48,
            fps: 30,
        },
    ]
}

fn temp_capture_path() -> PathBuf {
    std::env::temp_dir().join(format!("gaze-recorder-test-{}.synth", Uuid::new_v4()))
}

/// WHAT: Pumped frames are written to the capture index
/// WHY: Recording only happens as a side effect of pumping
#[test]
#[allow(clippy::unwrap_used)]
fn given_initialized_camera_when_pumping_frames_then_index_lists_streams_and_frames() {
    // Given: A synthetic camera recording into a temp file
    let path = temp_capture_path();
    let camera = SyntheticCamera::create().unwrap();
    let mut session = CaptureSession::open(camera, &path, &fast_streams()).unwrap();

    // When: Pumping three frames and closing
    for _ in 0..3 {
        assert!(!session.acquire_frame().is_error());
        session.release_frame();
    }
    assert_eq!(session.source().frames_delivered(), 3);
    session.close();

    // Then: Header, stream lines and three frame lines were written
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "synthetic-capture 1");
    assert_eq!(lines[1], "stream color 64x48@1000");
    assert_eq!(lines[2], "stream depth 64x48@30");
    assert_eq!(lines.iter().filter(|l| l.starts_with("frame ")).count(), 3);
    assert!(lines[3].starts_with("frame 0 "));
    assert!(lines[5].starts_with("frame 2 "));

    let _ = fs::remove_file(&path);
}

/// WHAT: Acquiring before initialization fails
/// WHY: The backend must not record without a configured file
#[test]
#[allow(clippy::unwrap_used)]
fn given_unconfigured_camera_when_acquiring_then_not_initialized_error() {
    // Given: A freshly created camera
    let mut camera = SyntheticCamera::create().unwrap();

    // When: Acquiring a frame
    let status = camera.acquire_frame();

    // Then: Reports not initialized
    assert_eq!(status.code(), STATUS_NOT_INITIALIZED);
}

/// WHAT: A zero-rate stream is rejected at configuration
/// WHY: Pacing needs a positive frame rate
#[test]
#[allow(clippy::unwrap_used)]
fn given_zero_fps_stream_when_configuring_then_invalid_stream_error() {
    // Given: A stream with a zero frame rate
    let mut camera = SyntheticCamera::create().unwrap();
    let streams = [StreamSpec {
        kind: StreamKind::Depth,
        width: 640,
        height: 480,
        fps: 0,
    }];

    // When: Configuring the camera
    let status = camera.configure(&temp_capture_path(), &streams);

    // Then: Reports an invalid stream
    assert_eq!(status.code(), STATUS_INVALID_STREAM);
}

/// WHAT: Acquiring twice without releasing fails
/// WHY: Frames must be released before the next one is locked
#[test]
#[allow(clippy::unwrap_used)]
fn given_held_frame_when_acquiring_again_then_frame_held_error() {
    // Given: A capture with one frame acquired and not released
    let path = temp_capture_path();
    let camera = SyntheticCamera::create().unwrap();
    let mut session = CaptureSession::open(camera, &path, &fast_streams()).unwrap();
    assert!(!session.acquire_frame().is_error());

    // When: Acquiring again
    let status = session.acquire_frame();

    // Then: Reports the frame is still held
    assert_eq!(status.code(), STATUS_FRAME_HELD);

    session.close();
    let _ = fs::remove_file(&path);
}

/// WHAT: Forced device loss surfaces as an error after N frames
/// WHY: Lets the fail-fast path be exercised without hardware
#[test]
#[allow(clippy::unwrap_used)]
fn given_fail_after_two_when_pumping_then_third_acquisition_fails() {
    // Given: A camera that loses the device after two frames
    let path = temp_capture_path();
    let camera = SyntheticCamera::create().unwrap().fail_after(2);
    let mut session = CaptureSession::open(camera, &path, &fast_streams()).unwrap();

    // When: Pumping three frames
    let statuses: Vec<SdkStatus> = (0..3)
        .map(|_| {
            let status = session.acquire_frame();
            session.release_frame();
            status
        })
        .collect();

    // Then: Only the third acquisition failed, with device lost
    assert!(!statuses[0].is_error());
    assert!(!statuses[1].is_error());
    assert_eq!(statuses[2].code(), STATUS_DEVICE_LOST);

    session.close();
    let _ = fs::remove_file(&path);
}
