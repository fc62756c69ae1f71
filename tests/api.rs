//! API endpoint integration tests
//!
//! Exercises the full router with fake pipeline adapters via `oneshot`.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{
    FailingSynthesizer, FailingTranscriber, FixedTranscriber, RecordingGenerator,
    RecordingSynthesizer,
};
use tower::ServiceExt;
use voicepipe::api::{ApiState, audio, health};
use voicepipe::pipeline::Pipeline;

const BOUNDARY: &str = "voicepipe-test-boundary";

/// Build a test router around a pipeline of fakes
fn build_router(pipeline: Pipeline) -> axum::Router {
    let state = Arc::new(ApiState { pipeline });
    axum::Router::new()
        .nest("/audio", audio::router(state))
        .merge(health::router())
}

/// A minimal clip with a valid wav container signature
fn wav_clip() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&[0x24, 0x08, 0x00, 0x00]);
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(&[0u8; 2048]);
    data
}

/// Build a multipart upload request for `/audio/process`
fn multipart_request(field_name: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"clip.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/audio/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (stt, _) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("hi");
    let (tts, _) = RecordingSynthesizer::new(b"mp3");
    let app = build_router(Pipeline::new(Box::new(stt), Box::new(generator), Box::new(tts)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn process_returns_base64_reply_audio() {
    let (stt, _) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("Hi there, hello! How can I help?");
    let (tts, seen_by_tts) = RecordingSynthesizer::new(&[0xFF, 0xF3, 0x94, 0x58]);
    let app = build_router(Pipeline::new(Box::new(stt), Box::new(generator), Box::new(tts)));

    let response = app
        .oneshot(multipart_request("audio", &wav_clip()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["audio"], "//OUWA==");
    assert_eq!(json["mimeType"], "audio/mp3");
    assert_eq!(
        *seen_by_tts.lock().unwrap(),
        vec!["Hi there, hello! How can I help?".to_string()]
    );
}

#[tokio::test]
async fn oversize_upload_rejected_before_any_provider_call() {
    let (stt, stt_calls) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("hi");
    let (tts, _) = RecordingSynthesizer::new(b"mp3");
    let app = build_router(Pipeline::new(Box::new(stt), Box::new(generator), Box::new(tts)));

    let mut clip = vec![0u8; audio::MAX_UPLOAD_BYTES + 1];
    clip[0..4].copy_from_slice(b"RIFF");
    clip[8..12].copy_from_slice(b"WAVE");

    let response = app.oneshot(multipart_request("audio", &clip)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(stt_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unsupported_type_rejected_before_any_provider_call() {
    let (stt, stt_calls) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("hi");
    let (tts, _) = RecordingSynthesizer::new(b"mp3");
    let app = build_router(Pipeline::new(Box::new(stt), Box::new(generator), Box::new(tts)));

    let response = app
        .oneshot(multipart_request("audio", b"%PDF-1.4 not audio at all"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(stt_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_audio_field_is_rejected() {
    let (stt, _) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("hi");
    let (tts, _) = RecordingSynthesizer::new(b"mp3");
    let app = build_router(Pipeline::new(Box::new(stt), Box::new(generator), Box::new(tts)));

    let response = app
        .oneshot(multipart_request("attachment", &wav_clip()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn synthesis_failure_returns_400_envelope() {
    let (stt, _) = FixedTranscriber::new("hello");
    let (generator, _) = RecordingGenerator::new("hi");
    let app = build_router(Pipeline::new(
        Box::new(stt),
        Box::new(generator),
        Box::new(FailingSynthesizer),
    ));

    let response = app
        .oneshot(multipart_request("audio", &wav_clip()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Failed to process audio");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Text-to-Speech API error")
    );
}

#[tokio::test]
async fn transcription_failure_returns_400_envelope() {
    let (generator, seen_by_generator) = RecordingGenerator::new("hi");
    let (tts, _) = RecordingSynthesizer::new(b"mp3");
    let app = build_router(Pipeline::new(
        Box::new(FailingTranscriber),
        Box::new(generator),
        Box::new(tts),
    ));

    let response = app
        .oneshot(multipart_request("audio", &wav_clip()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Failed to process audio");
    assert!(seen_by_generator.lock().unwrap().is_empty());
}
