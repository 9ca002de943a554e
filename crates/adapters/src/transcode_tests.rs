// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn request(output: PathBuf) -> TranscodeRequest {
    TranscodeRequest {
        input: "/projects/renders/sh010_light_v001_render.%05d.exr".to_string(),
        output,
        start_number: 1001,
        fps: 24,
    }
}

#[test]
fn ffmpeg_arguments() {
    let args = FfmpegTranscoder::args(&request(PathBuf::from("/tmp/sh010_light_v001_render.mp4")));
    assert_eq!(
        args,
        vec![
            "-y",
            "-start_number",
            "1001",
            "-i",
            "/projects/renders/sh010_light_v001_render.%05d.exr",
            "-c:v",
            "libx264",
            "-vf",
            "fps=24",
            "/tmp/sh010_light_v001_render.mp4",
        ]
    );
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let transcoder = FfmpegTranscoder::new("/nonexistent/bin/ffmpeg-sgf");
    let err = transcoder.transcode(&request(dir.path().join("out.mp4"))).await.unwrap_err();
    assert!(matches!(err, TranscodeError::Spawn { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let transcoder = FfmpegTranscoder::new("false");
    let err = transcoder.transcode(&request(dir.path().join("out.mp4"))).await.unwrap_err();
    match err {
        TranscodeError::Failed { code, .. } => assert_eq!(code, Some(1)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fake_writes_movie_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.mp4");
    let transcoder = FakeTranscoder::new();

    transcoder.transcode(&request(output.clone())).await.unwrap();

    assert!(std::fs::metadata(&output).unwrap().len() > 0);
    assert_eq!(transcoder.requests().len(), 1);
}
