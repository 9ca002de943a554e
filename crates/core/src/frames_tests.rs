// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use std::path::PathBuf;

#[test]
fn finds_placeholder_prefix_and_padding() {
    let pattern = FramePattern::find("/projects/renders/sh010.%05d.exr").unwrap();
    assert_eq!(pattern.prefix(), "/projects/renders/sh010.");
    assert_eq!(pattern.padding(), 5);
    assert_eq!(pattern.format(1001), "/projects/renders/sh010.01001.exr");
}

#[yare::parameterized(
    single_file      = { "/projects/sh010/scene.mb" },
    unpadded_token   = { "/projects/sh010.%d.exr" },
    hash_notation    = { "/projects/sh010.####.exr" },
)]
fn single_files_have_no_placeholder(path: &str) {
    assert!(FramePattern::find(path).is_none());
}

#[test]
fn parse_reports_missing_placeholder() {
    let err = FramePattern::parse("renders/sh010.exr").unwrap_err();
    assert_eq!(err, FrameError::NoPlaceholder("renders/sh010.exr".to_string()));
}

#[test]
fn format_widens_frames_beyond_padding() {
    let pattern = FramePattern::find("out.%03d.exr").unwrap();
    assert_eq!(pattern.format(7), "out.007.exr");
    assert_eq!(pattern.format(12345), "out.12345.exr");
}

#[yare::parameterized(
    padded      = { "/out/sh010.01001.exr", 1001 },
    unpadded    = { "/out/sh010.7.exr", 7 },
    dotted_name = { "/out/sh010.v002.00012.exr", 12 },
)]
fn frame_numbers_from_filenames(path: &str, expected: i64) {
    assert_eq!(frame_from_filename(&PathBuf::from(path)).unwrap(), expected);
}

#[yare::parameterized(
    no_extension = { "/out/sh010" },
    no_frame     = { "/out/sh010.exr" },
    word_frame   = { "/out/sh010.beauty.exr" },
)]
fn frame_numbers_missing(path: &str) {
    assert!(matches!(
        frame_from_filename(&PathBuf::from(path)),
        Err(FrameError::NoFrameNumber(_))
    ));
}

#[test]
fn range_length_counts_step() {
    assert_eq!(FrameRange::new(1001, 1010).len(), 10);
    assert_eq!(FrameRange::new(1, 10).with_step(2).len(), 5);
    assert_eq!(FrameRange::new(5, 5).len(), 1);
}

#[test]
fn inverted_range_is_invalid() {
    let range = FrameRange::new(1010, 1001);
    assert!(range.validate().is_err());
    assert!(range.is_empty());
    assert!(range.chunks(10).is_empty());
}

#[test]
fn zero_step_is_invalid() {
    assert!(FrameRange::new(1, 10).with_step(0).validate().is_err());
}

#[test]
fn display_uses_start_end_step() {
    assert_eq!(FrameRange::new(1001, 1010).to_string(), "1001-1010x1");
}

#[test]
fn whole_range_chunk_is_single_task() {
    let range = FrameRange::new(1001, 1010);
    assert_eq!(range.chunks(range.len()), vec![range]);
}

#[test]
fn chunks_stay_on_step_grid() {
    let chunks = FrameRange::new(1, 10).with_step(2).chunks(2);
    assert_eq!(
        chunks,
        vec![
            FrameRange::new(1, 3).with_step(2),
            FrameRange::new(5, 7).with_step(2),
            FrameRange::new(9, 9).with_step(2),
        ]
    );
}

#[test]
fn widest_range_length_saturates() {
    assert_eq!(FrameRange::new(i64::MIN, i64::MAX).len(), u64::MAX);
    assert_eq!(FrameRange::new(i64::MIN, i64::MAX).with_step(2).len(), 1 << 63);
}

#[test]
fn chunks_end_at_the_top_of_the_frame_space() {
    let range = FrameRange::new(i64::MAX - 10, i64::MAX).with_step(3);
    assert_eq!(range.len(), 4);
    assert_eq!(
        range.chunks(2),
        vec![
            FrameRange::new(i64::MAX - 10, i64::MAX - 7).with_step(3),
            FrameRange::new(i64::MAX - 4, i64::MAX - 1).with_step(3),
        ]
    );
}

#[test]
fn oversized_chunks_do_not_overflow() {
    let range = FrameRange::new(i64::MAX - 2, i64::MAX).with_step(2);
    assert_eq!(range.chunks(u64::MAX), vec![range]);
}

proptest! {
    #[test]
    fn chunks_cover_every_frame_once(start in -50i64..50, len in 1i64..200, step in 1i64..5, chunk in 1u64..20) {
        let range = FrameRange::new(start, start + len - 1).with_step(step);
        let frames: Vec<i64> = range
            .chunks(chunk)
            .iter()
            .flat_map(|c| (c.start..=c.end).step_by(c.step as usize))
            .collect();
        let expected: Vec<i64> = (range.start..=range.end).step_by(step as usize).collect();
        prop_assert_eq!(frames, expected);
    }
}
