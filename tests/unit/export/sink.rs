use super::*;

fn solid(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: [10u8, 20, 30, 255].repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pawpost-sink-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn dir_sink_writes_decodable_pngs() {
    let dir = scratch_dir("write");
    let mut sink = DirSink::new(&dir);
    sink.begin(1).unwrap();
    sink.push("Bello-slide-1.png", &solid(3, 2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), &[dir.join("Bello-slide-1.png")]);
    let img = image::open(dir.join("Bello-slide-1.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dir_sink_refuses_nested_names() {
    let dir = scratch_dir("nested");
    let mut sink = DirSink::new(&dir);
    sink.begin(1).unwrap();
    assert!(sink.push("../x.png", &solid(1, 1)).is_err());
    assert!(sink.written().is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn memory_sink_records_order() {
    let mut sink = InMemorySink::new();
    sink.begin(2).unwrap();
    sink.push("a.png", &solid(1, 1)).unwrap();
    sink.push("b.png", &solid(1, 1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.expected, Some(2));
    assert_eq!(sink.names(), vec!["a.png", "b.png"]);
    assert!(sink.finished);
}
