use super::*;

#[test]
fn decodes_producer_dialect_with_bare_nan_and_float_counts() {
    let raw = br#"{
	"width": 2,
	"height": 2,
	"iterations": 2.000000,
	"nums": [
		[0.000000, NaN, 128.000000, 192.500000],
		[NaN, NaN, 1, 255]
	]
}"#;
    let fs = FrameSeries::from_slice(raw).unwrap();
    assert_eq!(fs.dimensions(), Dimensions::new(2, 2).unwrap());
    assert_eq!(fs.iterations(), 2);
    assert_eq!(fs.sample(FrameIndex(0), 0), Some(0.0));
    assert!(fs.sample(FrameIndex(0), 1).unwrap().is_nan());
    assert_eq!(fs.sample(FrameIndex(0), 3), Some(192.5));
    assert_eq!(fs.frame(FrameIndex(1)).unwrap().len(), 4);
    assert!(fs.frame(FrameIndex(2)).is_none());
}

#[test]
fn null_and_string_nan_are_bounded_cells() {
    let raw = br#"{"width": 1, "height": 3, "iterations": 1, "nums": [[null, "nan", 7]]}"#;
    let fs = FrameSeries::from_slice(raw).unwrap();
    let f = fs.frame(FrameIndex(0)).unwrap();
    assert!(f[0].is_nan());
    assert!(f[1].is_nan());
    assert_eq!(f[2], 7.0);
}

#[test]
fn missing_iterations_is_a_decode_error() {
    let raw = br#"{"width": 2, "height": 2, "nums": [[0, 64, 128, 192]]}"#;
    let err = FrameSeries::from_slice(raw).unwrap_err();
    assert!(matches!(err, ReelError::Decode(_)));
    assert!(err.to_string().contains("iterations"));
}

#[test]
fn shape_mismatches_are_decode_errors() {
    let cases: [&[u8]; 5] = [
        br#"{"width": 2, "height": 2, "iterations": 2, "nums": [[0, 64, 128, 192]]}"#,
        br#"{"width": 2, "height": 2, "iterations": 1, "nums": [[0, 64, 128]]}"#,
        br#"{"width": 0, "height": 2, "iterations": 1, "nums": [[]]}"#,
        br#"{"width": 1, "height": 1, "iterations": 0, "nums": []}"#,
        br#"{"width": 1.5, "height": 1, "iterations": 1, "nums": [[1]]}"#,
    ];
    for raw in cases {
        let err = FrameSeries::from_slice(raw).unwrap_err();
        assert!(matches!(err, ReelError::Decode(_)), "{err}");
    }
}

#[test]
fn non_numeric_samples_are_rejected() {
    let cases: [&[u8]; 3] = [
        br#"{"width": 1, "height": 1, "iterations": 1, "nums": [[true]]}"#,
        br#"{"width": 1, "height": 1, "iterations": 1, "nums": [["red"]]}"#,
        br#"{"width": 1, "height": 1, "iterations": 1, "nums": [[Infinity]]}"#,
    ];
    for raw in cases {
        assert!(matches!(
            FrameSeries::from_slice(raw),
            Err(ReelError::Decode(_))
        ));
    }
}

#[test]
fn from_path_names_the_file() {
    let dir = std::path::PathBuf::from("target").join("unit_decode_from_path");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mandelbrot_nums_bad_0.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = FrameSeries::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("mandelbrot_nums_bad_0.json"));

    let missing = FrameSeries::from_path(dir.join("absent.json")).unwrap_err();
    assert!(matches!(missing, ReelError::Decode(_)));
}

#[test]
fn split_and_write_json_round_trip() {
    let dims = Dimensions::new(1, 2).unwrap();
    let frames = vec![vec![1.0, f32::NAN], vec![2.0, 3.0], vec![4.0, 5.0]];
    let fs = FrameSeries::new(dims, frames).unwrap();

    let (head, tail) = fs.split_at(2).unwrap();
    assert_eq!(head.iterations(), 2);
    assert_eq!(tail.iterations(), 1);

    let mut buf = Vec::new();
    head.write_json(&mut buf).unwrap();
    let back = FrameSeries::from_slice(&buf).unwrap();
    assert_eq!(back.iterations(), 2);
    assert!(back.sample(FrameIndex(0), 1).unwrap().is_nan());
    assert_eq!(back.sample(FrameIndex(1), 1), Some(3.0));
}

#[test]
fn split_rejects_degenerate_points() {
    let dims = Dimensions::new(1, 1).unwrap();
    let fs = FrameSeries::new(dims, vec![vec![1.0], vec![2.0]]).unwrap();
    assert!(fs.clone().split_at(0).is_err());
    assert!(fs.split_at(2).is_err());
}

#[test]
fn decodes_through_a_small_read_buffer() {
    let raw = br#"{"width": 2, "height": 1, "iterations": 2.000000, "nums": [[NaN, 3], [-NaN, 255]]}"#;
    let fs = FrameSeries::from_reader(std::io::BufReader::with_capacity(3, &raw[..])).unwrap();
    assert_eq!(fs.iterations(), 2);
    assert!(fs.sample(FrameIndex(0), 0).unwrap().is_nan());
    assert_eq!(fs.sample(FrameIndex(0), 1), Some(3.0));
    assert!(fs.sample(FrameIndex(1), 0).unwrap().is_nan());
    assert_eq!(fs.sample(FrameIndex(1), 1), Some(255.0));
}
