use super::*;

fn fps(n: u32) -> Fps {
    Fps::new(n, 1).unwrap()
}

#[test]
fn ticks_follow_frame_rate_from_start_time() {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap();
    let mut s = FixedTickScheduler::new(range, fps(4), 10.0).unwrap();
    let ticks: Vec<_> = std::iter::from_fn(|| s.next_frame()).collect();
    assert_eq!(ticks.len(), 3);
    assert_eq!(ticks[0].index, FrameIndex(0));
    assert_eq!(ticks[0].time_secs, 10.0);
    assert_eq!(ticks[1].time_secs, 10.25);
    assert_eq!(ticks[2].time_secs, 10.5);
    assert!(s.next_frame().is_none());
    assert_eq!(s.remaining(), 0);
}

#[test]
fn offset_range_keeps_indices_but_times_from_start() {
    let range = FrameRange::new(FrameIndex(5), FrameIndex(7)).unwrap();
    let mut s = FixedTickScheduler::new(range, fps(2), 0.0).unwrap();
    let a = s.next_frame().unwrap();
    let b = s.next_frame().unwrap();
    assert_eq!((a.index, a.time_secs), (FrameIndex(5), 0.0));
    assert_eq!((b.index, b.time_secs), (FrameIndex(6), 0.5));
    assert!(s.next_frame().is_none());
}

#[test]
fn empty_range_yields_nothing() {
    let range = FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap();
    let mut s = FixedTickScheduler::new(range, fps(30), 0.0).unwrap();
    assert!(s.next_frame().is_none());
}

#[test]
fn duration_rounds_down_but_keeps_one_frame() {
    let s = FixedTickScheduler::for_duration(1.0, fps(30), 0.0).unwrap();
    assert_eq!(s.range().len_frames(), 30);
    let s = FixedTickScheduler::for_duration(0.001, fps(30), 0.0).unwrap();
    assert_eq!(s.remaining(), 1);
    assert!(FixedTickScheduler::for_duration(0.0, fps(30), 0.0).is_err());
    assert!(FixedTickScheduler::for_duration(f64::NAN, fps(30), 0.0).is_err());
}

#[test]
fn duration_ticks_start_at_offset() {
    let mut s = FixedTickScheduler::for_duration(1.0, fps(2), 3.0).unwrap();
    let first = s.next_frame().unwrap();
    let second = s.next_frame().unwrap();
    assert_eq!((first.index, first.time_secs), (FrameIndex(0), 3.0));
    assert_eq!((second.index, second.time_secs), (FrameIndex(1), 3.5));
    assert!(s.next_frame().is_none());
    assert!(FixedTickScheduler::for_duration(1.0, fps(2), f64::NAN).is_err());
}

#[test]
fn non_finite_start_is_rejected() {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(1)).unwrap();
    assert!(FixedTickScheduler::new(range, fps(30), f64::INFINITY).is_err());
}
