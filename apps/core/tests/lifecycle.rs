mod common;

use common::{mount, refresh, FrameQueue, PageHost, Registry};
use interview_backdrop::render::DrawOp;
use interview_backdrop::surface::LogicalSize;
use interview_backdrop::DriverState;

#[test]
fn resize_decouples_backing_store_from_display_size() {
    let registry = Registry::new();
    let queue = FrameQueue::default();
    let handle = mount(&registry, &queue, PageHost::new(800.0, 600.0)).ok();
    let Some(handle) = handle else {
        panic!("mount failed");
    };

    let backdrop = handle.backdrop();
    let layout = backdrop.layout();
    assert_eq!(layout.logical, LogicalSize::new(800.0, 600.0));
    assert_eq!((layout.backing.width, layout.backing.height), (1600, 1200));
    assert_eq!(layout.scale, 2.0);
    assert_eq!(backdrop.host().radar.layout(), Some(layout));
    assert_eq!(backdrop.host().mesh.layout(), Some(layout));
}

#[test]
fn running_backdrop_draws_once_per_refresh() {
    let registry = Registry::new();
    let queue = FrameQueue::default();
    let Ok(handle) = mount(&registry, &queue, PageHost::new(640.0, 480.0)) else {
        panic!("mount failed");
    };
    handle.start();

    for n in 1..=5 {
        assert_eq!(refresh(&queue, &handle, f64::from(n) * 16.0), 1);
    }
    // One draw from mounting plus one per refresh.
    assert_eq!(handle.backdrop().host().radar.clear_count(), 6);
    assert!(handle.backdrop().radar().sweep > 0.0);
}

#[test]
fn no_callback_runs_after_destroy() {
    let registry = Registry::new();
    let queue = FrameQueue::default();
    let Ok(handle) = mount(&registry, &queue, PageHost::new(640.0, 480.0)) else {
        panic!("mount failed");
    };
    handle.start();
    refresh(&queue, &handle, 16.0);
    handle.destroy();

    let draws = handle.backdrop().host().radar.clear_count();
    for n in 2..10 {
        assert_eq!(refresh(&queue, &handle, f64::from(n) * 16.0), 0);
    }
    assert_eq!(handle.backdrop().host().radar.clear_count(), draws);
    assert!(handle.backdrop().host().detached);
    assert!(registry.is_empty());
}

#[test]
fn reduced_motion_start_draws_once_without_scheduling() {
    let registry = Registry::new();
    let queue = FrameQueue::default();
    let mut host = PageHost::new(640.0, 480.0);
    host.reduced_motion = true;
    let Ok(handle) = mount(&registry, &queue, host) else {
        panic!("mount failed");
    };

    handle.start();
    assert_eq!(handle.state(), DriverState::Static);
    assert!(queue.0.borrow().is_empty());
    assert_eq!(handle.backdrop().host().radar.clear_count(), 2);
    assert_eq!(
        handle
            .backdrop()
            .host()
            .radar
            .count(|op| matches!(op, DrawOp::ClipSector(_))),
        1
    );
}

#[test]
fn init_twice_shares_one_instance() {
    let registry = Registry::new();
    let queue = FrameQueue::default();
    let first = mount(&registry, &queue, PageHost::new(10.0, 10.0));
    let second = mount(&registry, &queue, PageHost::new(10.0, 10.0));
    match (first, second) {
        (Ok(a), Ok(b)) => assert!(a.ptr_eq(&b)),
        _ => panic!("mount failed"),
    }
    assert_eq!(registry.len(), 1);
}
