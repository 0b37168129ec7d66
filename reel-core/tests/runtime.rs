use std::time::Duration;

use reel_core::{
    Carousel, CarouselRuntime, CarouselSettings, DragFrame, RuntimeError,
    TransitionStyle,
};
use tokio::time::sleep;

fn spawn(
    settings: CarouselSettings,
) -> (reel_core::CarouselHandle, tokio::task::JoinHandle<Carousel>) {
    let carousel = Carousel::new(5, settings).expect("valid settings");
    CarouselRuntime::spawn(carousel)
}

#[tokio::test(start_paused = true)]
async fn fallback_settles_when_the_renderer_stays_silent() {
    let (handle, _task) = spawn(CarouselSettings::infinite());
    handle.measured(600.0).await.unwrap();
    handle.prev().await.unwrap();

    let moving = handle.status().await.unwrap();
    assert!(moving.transitioning);
    assert_eq!(moving.index, 4);
    assert!(moving.pending_fallback.is_some());

    sleep(Duration::from_millis(301)).await;

    let settled = handle.status().await.unwrap();
    assert!(!settled.transitioning);
    assert_eq!(settled.index, 9);
    assert_eq!(settled.logical_index, 4);
    assert_eq!(settled.pending_fallback, None);

    let frame = handle.frame();
    assert_eq!(frame.index, 9);
    assert_eq!(frame.transition, TransitionStyle::None);
}

#[tokio::test(start_paused = true)]
async fn renderer_acknowledgement_disarms_the_timer() {
    let (handle, _task) = spawn(CarouselSettings::infinite());
    handle.next().await.unwrap();
    handle.transition_end().await.unwrap();

    let status = handle.status().await.unwrap();
    assert!(!status.transitioning);
    assert_eq!(status.pending_fallback, None);
    assert_eq!(status.index, 6);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.status().await.unwrap(), status);
}

#[tokio::test(start_paused = true)]
async fn stale_timer_does_not_end_a_newer_move() {
    let settings =
        CarouselSettings::infinite().with_guard_during_transition(false);
    let (handle, _task) = spawn(settings);

    handle.next().await.unwrap();
    sleep(Duration::from_millis(200)).await;
    handle.next().await.unwrap();

    // Past the first move's deadline, short of the second's.
    sleep(Duration::from_millis(150)).await;
    let status = handle.status().await.unwrap();
    assert!(status.transitioning);
    assert_eq!(status.index, 7);

    sleep(Duration::from_millis(200)).await;
    let status = handle.status().await.unwrap();
    assert!(!status.transitioning);
    assert_eq!(status.index, 7);
}

#[tokio::test(start_paused = true)]
async fn live_offsets_flow_only_while_held() {
    let (handle, _task) = spawn(CarouselSettings::infinite());
    let live = handle.live_offsets();
    handle.measured(600.0).await.unwrap();

    handle.drag(DragFrame::held(-50.0)).await.unwrap();
    let status = handle.status().await.unwrap();
    assert!(status.dragging);
    assert_eq!(status.frame.transition, TransitionStyle::None);
    assert_eq!(*live.borrow(), Some(-3050.0));

    handle
        .drag(DragFrame::release(-50.0, 0.0, -1.0))
        .await
        .unwrap();
    let status = handle.status().await.unwrap();
    assert!(!status.dragging);
    assert!(status.transitioning);
    assert_eq!(status.index, 5);
    assert_eq!(*live.borrow(), None);
}

#[tokio::test(start_paused = true)]
async fn committed_frames_skip_ignored_commands() {
    let (handle, _task) = spawn(CarouselSettings::default());
    let mut frames = handle.frames();
    frames.borrow_and_update();

    // Finite carousel at the first slide: nothing to go back to.
    handle.prev().await.unwrap();
    handle.status().await.unwrap();
    assert!(!frames.has_changed().unwrap());

    handle.next().await.unwrap();
    handle.status().await.unwrap();
    assert!(frames.has_changed().unwrap());
    assert_eq!(frames.borrow_and_update().index, 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_the_pending_timer() {
    let (handle, task) = spawn(CarouselSettings::infinite());
    handle.next().await.unwrap();
    handle.status().await.unwrap();

    handle.shutdown();
    let carousel = task.await.unwrap();
    assert!(carousel.is_transitioning());
    assert_eq!(carousel.current_index(), 6);

    assert!(handle.is_closed());
    assert!(matches!(handle.next().await, Err(RuntimeError::Closed)));
}

#[tokio::test]
async fn dropping_every_handle_stops_the_runtime() {
    let (handle, task) = spawn(CarouselSettings::default());
    let other = handle.clone();
    drop(handle);
    other.next().await.unwrap();
    drop(other);

    let carousel = task.await.unwrap();
    assert_eq!(carousel.current_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn join_returns_the_carousel_after_shutdown() {
    let (handle, task) = spawn(CarouselSettings::infinite());
    handle.next().await.unwrap();
    handle.status().await.unwrap();
    handle.shutdown();

    let carousel = CarouselRuntime::join(task).await.unwrap();
    assert_eq!(carousel.current_index(), 6);
}

#[tokio::test(start_paused = true)]
async fn aborted_runtime_surfaces_a_join_error() {
    let (_handle, task) = spawn(CarouselSettings::infinite());
    task.abort();

    let err = CarouselRuntime::join(task).await.unwrap_err();
    match err {
        RuntimeError::Join(join) => assert!(join.is_cancelled()),
        other => panic!("expected a join error, got {other:?}"),
    }
}
