use super::*;

fn frame(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig {
        width: w,
        height: h,
        fps: Fps::new(30, 1).unwrap(),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shoreline-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2, [1, 2, 3, 255])).unwrap();
    sink.push_frame(FrameIndex(3), &frame(2, 2, [4, 5, 6, 255])).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &frame(2, 2, [0; 4])).is_err());
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg(2, 2)));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 3]);
}

#[test]
fn in_memory_sink_begin_resets() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(1, 1)).unwrap();
    sink.push_frame(FrameIndex(5), &frame(1, 1, [0; 4])).unwrap();
    sink.begin(cfg(1, 1)).unwrap();
    assert!(sink.frames().is_empty());
    sink.push_frame(FrameIndex(0), &frame(1, 1, [0; 4])).unwrap();
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = scratch_dir("png-seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(3, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame(3, 2, [128, 0, 0, 128])).unwrap();
    sink.push_frame(FrameIndex(1), &frame(3, 2, [0, 0, 255, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert_eq!(sink.frame_path(FrameIndex(1)), dir.join("frame_000001.png"));
    let img = image::open(dir.join("frame_000000.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 128]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_rejects_out_of_order_and_empty_sizes() {
    let dir = scratch_dir("png-order");
    let mut sink = PngSequenceSink::with_prefix(&dir, "f");
    assert!(sink.begin(cfg(0, 2)).is_err());
    sink.begin(cfg(1, 1)).unwrap();
    sink.push_frame(FrameIndex(2), &frame(1, 1, [0, 0, 0, 255])).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame(1, 1, [0, 0, 0, 255])).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
