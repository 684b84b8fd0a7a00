use crate::{
    CaptureError, CaptureSession, Choreography, GuidancePosition, SdkStatus, Session,
    SessionEvent, SessionState, StreamSpec,
    tests::fake_source::{FakeProbe, FakeSource},
};

use std::{
    path::Path,
    sync::{Arc, atomic::Ordering},
    thread,
    time::{Duration, Instant},
};

const WAIT_STEP: Duration = Duration::from_millis(1);
const MAX_WAIT_STEPS: usize = 5_000;

#[allow(clippy::unwrap_used)]
fn session_with(source: FakeSource) -> Session<FakeSource> {
    let capture =
        CaptureSession::open(source, Path::new("take.fake"), &StreamSpec::defaults()).unwrap();
    Session::new(capture, Choreography::reference())
}

fn healthy_session() -> (Session<FakeSource>, Arc<FakeProbe>) {
    let (source, probe) = FakeSource::new();
    (session_with(source), probe)
}

/// WHAT: A new session waits in Preparing with the marker at its start
/// WHY: Nothing may be recorded before the user triggers
#[test]
#[allow(clippy::unwrap_used)]
fn given_new_session_when_updating_then_preparing_with_initial_marker() {
    // Given: A fresh session
    let (mut session, probe) = healthy_session();

    // When: Updating without any input
    let frame = session.update(Instant::now()).unwrap();

    // Then: Still preparing, marker at the initial position, no worker
    assert_eq!(frame.state, SessionState::Preparing);
    assert_eq!(frame.guidance, Some(GuidancePosition::new(0.01, 0.01)));
    assert_eq!(session.recording_started_at(), None);
    assert_eq!(session.live_workers(), 0);
    assert_eq!(probe.acquired.load(Ordering::SeqCst), 0);
    assert_eq!(session.output_path(), Path::new("take.fake"));
}

/// WHAT: A key-up in Preparing starts recording
/// WHY: Scenario: trigger spawns exactly one worker and stamps start time
#[test]
#[allow(clippy::unwrap_used)]
fn given_preparing_when_trigger_then_recording_with_one_worker() {
    // Given: A fresh session
    let (mut session, _probe) = healthy_session();
    let t0 = Instant::now();

    // When: A trigger arrives
    session.handle_event(SessionEvent::Trigger, t0).unwrap();

    // Then: Recording, start time set, one live worker
    assert_eq!(session.state(), SessionState::Recording);
    assert_eq!(session.recording_started_at(), Some(t0));
    assert_eq!(session.live_workers(), 1);

    session.close().unwrap();
}

/// WHAT: Extra triggers while recording neither restart nor respawn
/// WHY: At most one worker may ever be alive and start time is set once
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_more_triggers_then_single_worker_and_same_start() {
    // Given: A recording session
    let (mut session, _probe) = healthy_session();
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();

    // When: Several more triggers arrive later
    for i in 1..5 {
        session
            .handle_event(SessionEvent::Trigger, t0 + Duration::from_millis(i * 100))
            .unwrap();
        // Then: Still one worker and the original start time
        assert_eq!(session.live_workers(), 1);
        assert_eq!(session.recording_started_at(), Some(t0));
        assert_eq!(session.state(), SessionState::Recording);
    }

    session.close().unwrap();
}

/// WHAT: While recording the marker follows the choreography
/// WHY: Marker position is a pure function of elapsed time
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_updating_mid_choreography_then_marker_matches_trajectory() {
    // Given: A session that started recording at t0
    let (mut session, _probe) = healthy_session();
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();

    // When: Updating 4 seconds in
    let frame = session.update(t0 + Duration::from_secs(4)).unwrap();

    // Then: Same position the choreography gives for 4 seconds
    assert_eq!(frame.state, SessionState::Recording);
    assert_eq!(frame.guidance, Choreography::reference().position_at(4.0));

    session.close().unwrap();
}

/// WHAT: Passing the choreography's end stops recording
/// WHY: Scenario: elapsed 10.5 moves to Done with the worker joined
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_elapsed_exceeds_duration_then_done_and_worker_joined() {
    // Given: A recording session
    let (mut session, probe) = healthy_session();
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();

    // When: Updating 10.5 seconds in
    let frame = session.update(t0 + Duration::from_millis(10_500)).unwrap();

    // Then: Done, marker hidden, worker joined, backend still open
    assert_eq!(frame.state, SessionState::Done);
    assert_eq!(frame.guidance, None);
    assert_eq!(session.live_workers(), 0);
    assert!(session.last_report().is_some());
    assert_eq!(probe.releases.load(Ordering::SeqCst), 0);

    session.close().unwrap();
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}

/// WHAT: A key-up after recording quits
/// WHY: Scenario: Done plus trigger becomes Quitting
#[test]
#[allow(clippy::unwrap_used)]
fn given_done_when_trigger_then_quitting() {
    // Given: A session that finished recording
    let (mut session, _probe) = healthy_session();
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();
    session.update(t0 + Duration::from_secs(11)).unwrap();
    assert_eq!(session.state(), SessionState::Done);

    // When: A trigger arrives
    session
        .handle_event(SessionEvent::Trigger, t0 + Duration::from_secs(12))
        .unwrap();

    // Then: Quitting
    assert_eq!(session.state(), SessionState::Quitting);
    session.close().unwrap();
}

/// WHAT: A quit signal ends the session from every state
/// WHY: Scenario: window close always wins, joining any live worker
#[test]
#[allow(clippy::unwrap_used)]
fn given_any_state_when_quit_then_quitting_immediately() {
    let t0 = Instant::now();

    // Given: Sessions driven into each state
    let (preparing, _) = healthy_session();

    let (mut recording, _) = healthy_session();
    recording.handle_event(SessionEvent::Trigger, t0).unwrap();

    let (mut done, _) = healthy_session();
    done.handle_event(SessionEvent::Trigger, t0).unwrap();
    done.update(t0 + Duration::from_secs(11)).unwrap();

    let (mut quitting, _) = healthy_session();
    quitting.handle_event(SessionEvent::Quit, t0).unwrap();

    for mut session in [preparing, recording, done, quitting] {
        // When: A quit signal arrives
        session.handle_event(SessionEvent::Quit, t0).unwrap();

        // Then: Quitting with no live worker
        assert_eq!(session.state(), SessionState::Quitting);
        assert_eq!(session.live_workers(), 0);
        session.close().unwrap();
    }
}

/// WHAT: No event or time sequence moves a session backwards
/// WHY: Transitions are monotonic and Quitting is terminal
#[test]
#[allow(clippy::unwrap_used)]
fn given_event_sequence_when_driving_session_then_state_never_regresses() {
    // Given: A fresh session and a mixed event/time script
    let (mut session, _probe) = healthy_session();
    let t0 = Instant::now();
    let script: [(Option<SessionEvent>, u64); 9] = [
        (None, 0),
        (Some(SessionEvent::Trigger), 0),
        (None, 5_000),
        (Some(SessionEvent::Trigger), 6_000),
        (None, 10_500),
        (None, 20_000),
        (Some(SessionEvent::Trigger), 21_000),
        (Some(SessionEvent::Trigger), 22_000),
        (None, 23_000),
    ];

    // When: Driving it through the script
    let mut previous = session.state();
    for (event, millis) in script {
        let now = t0 + Duration::from_millis(millis);
        if let Some(event) = event {
            session.handle_event(event, now).unwrap();
        }
        session.update(now).unwrap();

        // Then: Each state is at or after the previous one
        assert!(session.state() >= previous);
        assert!(session.live_workers() <= 1);
        assert_eq!(
            session.live_workers() == 1,
            session.state() == SessionState::Recording
        );
        previous = session.state();
    }
    assert_eq!(session.state(), SessionState::Quitting);

    session.close().unwrap();
}

/// WHAT: An acquisition failure surfaces as a fatal session error
/// WHY: Scenario: worker exits, failure is flagged, session reports after join
#[test]
#[allow(clippy::unwrap_used)]
fn given_first_acquisition_fails_when_updating_then_acquisition_failed_after_join() {
    // Given: A session whose backend fails on the first acquisition
    let (source, probe) = FakeSource::new();
    let source = source.with_acquire_script(vec![SdkStatus::from_code(-301, "device lost")]);
    let mut session = session_with(source);
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();

    // When: Updating until the failure is observed
    let mut outcome = None;
    for _ in 0..MAX_WAIT_STEPS {
        match session.update(t0) {
            Ok(_) => thread::sleep(WAIT_STEP),
            Err(e) => {
                outcome = Some(e);
                break;
            }
        }
    }

    // Then: AcquisitionFailed with the backend code, worker joined, quitting
    assert!(matches!(
        outcome,
        Some(CaptureError::AcquisitionFailed { code: -301, .. })
    ));
    assert_eq!(session.live_workers(), 0);
    assert_eq!(session.state(), SessionState::Quitting);
    assert_eq!(probe.acquired.load(Ordering::SeqCst), 1);

    // The failure was already reported; closing only releases the backend.
    session.close().unwrap();
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}

/// WHAT: Quitting after the worker failed still reports the failure
/// WHY: The quit path joins the worker first and must not swallow its error
#[test]
#[allow(clippy::unwrap_used)]
fn given_failed_worker_when_quit_then_acquisition_failed_and_quitting() {
    // Given: A recording session whose backend failed on the first acquisition
    let (source, probe) = FakeSource::new();
    let source = source.with_acquire_script(vec![SdkStatus::from_code(-5, "lost")]);
    let mut session = session_with(source);
    let t0 = Instant::now();
    session.handle_event(SessionEvent::Trigger, t0).unwrap();
    for _ in 0..MAX_WAIT_STEPS {
        if probe.acquired.load(Ordering::SeqCst) > 0 {
            break;
        }
        thread::sleep(WAIT_STEP);
    }

    // When: The user quits before any update observed the failure
    let result = session.handle_event(SessionEvent::Quit, t0);

    // Then: The failure is returned, the worker is gone and the session quits
    assert!(matches!(
        result,
        Err(CaptureError::AcquisitionFailed { code: -5, .. })
    ));
    assert_eq!(session.state(), SessionState::Quitting);
    assert_eq!(session.live_workers(), 0);
    assert_eq!(probe.acquired.load(Ordering::SeqCst), 1);

    session.close().unwrap();
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}

/// WHAT: Dropping a recording session joins the worker and releases the backend
/// WHY: Teardown must happen on every exit path
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_session_when_dropped_then_backend_released() {
    // Given: A recording session
    let (mut session, probe) = healthy_session();
    session
        .handle_event(SessionEvent::Trigger, Instant::now())
        .unwrap();

    // When: Dropping it without closing
    drop(session);

    // Then: The backend was released exactly once
    assert_eq!(probe.releases.load(Ordering::SeqCst), 1);
}
