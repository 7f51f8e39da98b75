//! End-to-end conversion tests with the real Ogg Vorbis encoder
//!
//! Runs the full decode → resample → encode → assemble pipeline on
//! generated WAV fixtures and checks the published artifact.

mod helpers;

use helpers::audio_generator::sine_wav_bytes;
use helpers::fakes::RecordingPort;
use transogg::audio::decoder;
use transogg::pipeline::Converter;
use transogg::ui::{ConvertRequest, SelectedFile};

/// Ogg page capture pattern
const OGG_MAGIC: &[u8] = b"OggS";

fn request_for(name: &str, data: Vec<u8>) -> ConvertRequest {
    ConvertRequest {
        file: Some(SelectedFile {
            name: name.to_string(),
            data,
        }),
        ..ConvertRequest::default()
    }
}

#[tokio::test]
async fn mono_wav_with_default_settings_produces_ogg() {
    let wav = sine_wav_bytes(1, 44100, 2000, 440.0, 0.5);
    let port = RecordingPort::new(request_for("tone.wav", wav));
    let mut converter = Converter::new(port);

    converter.run().await.unwrap();

    let port = converter.into_ui();
    assert_eq!(port.last_status_text().unwrap(), "Done");

    assert_eq!(port.published.len(), 1);
    let artifact = &port.published[0];
    assert_eq!(artifact.file_name, "tone.ogg");
    assert_eq!(artifact.mime_type, "audio/ogg");
    assert!(!artifact.bytes.is_empty());
    assert_eq!(&artifact.bytes[..4], OGG_MAGIC);
}

#[tokio::test]
async fn stereo_wav_downmixed_and_resampled() {
    let wav = sine_wav_bytes(2, 48000, 1000, 330.0, 0.4);
    let mut request = request_for("stereo.wav", wav);
    request.mono = true;
    request.target_rate = Some(22050);

    let port = RecordingPort::new(request);
    let mut converter = Converter::new(port);

    converter.run().await.unwrap();

    let port = converter.into_ui();
    assert_eq!(port.last_status_text().unwrap(), "Done");
    assert!(port
        .status_texts()
        .contains(&"Resampling to 22050 Hz, mono...".to_string()));

    let artifact = &port.published[0];
    assert_eq!(&artifact.bytes[..4], OGG_MAGIC);
}

#[tokio::test]
async fn produced_ogg_decodes_back_with_expected_format() {
    let wav = sine_wav_bytes(2, 44100, 2000, 440.0, 0.5);
    let mut request = request_for("roundtrip.wav", wav);
    request.mono = true;

    let port = RecordingPort::new(request);
    let mut converter = Converter::new(port);
    converter.run().await.unwrap();

    let artifact = converter.into_ui().published.remove(0);

    // Stage the artifact on disk the way the CLI adapter publishes it
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    let decoded = decoder::decode(bytes, Some("ogg")).unwrap();
    assert_eq!(decoded.channel_count(), 1);
    assert_eq!(decoded.sample_rate(), 44100);

    // Vorbis may pad the tail slightly; duration stays close to 2 s
    let duration = decoded.duration_seconds();
    assert!(
        (duration - 2.0).abs() < 0.1,
        "Expected ~2 s of audio, got {:.3} s",
        duration
    );
}

#[tokio::test]
async fn higher_quality_yields_larger_output() {
    let wav = sine_wav_bytes(1, 44100, 1000, 440.0, 0.5);

    let mut low = request_for("low.wav", wav.clone());
    low.quality = Some(-1.0);
    let mut conv_low = Converter::new(RecordingPort::new(low));
    conv_low.run().await.unwrap();
    let low_len = conv_low.into_ui().published[0].bytes.len();

    let mut high = request_for("high.wav", wav);
    high.quality = Some(9.0);
    let mut conv_high = Converter::new(RecordingPort::new(high));
    conv_high.run().await.unwrap();
    let high_len = conv_high.into_ui().published[0].bytes.len();

    assert!(
        high_len > low_len,
        "Quality 9 ({} bytes) should out-size quality -1 ({} bytes)",
        high_len,
        low_len
    );
}
