use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

/// Target rate for uploaded audio. The service's speech model expects
/// 16kHz mono.
const TARGET_RATE: u32 = 16_000;

/// Open the default microphone and start appending mono f32 samples to
/// the shared buffer. Dropping the returned `Stream` stops the capture.
/// Returns the effective sample rate of the buffered audio.
pub fn start_capture(
    buffer: Arc<Mutex<Vec<f32>>>,
) -> Result<(cpal::Stream, u32), Box<dyn std::error::Error>> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or("No microphone found. Please check permissions.")?;

    log::info!("Input device: {:?}", device.description());

    let supported: Vec<_> = device.supported_input_configs()?.collect();
    let exact = supported.iter().find(|c| {
        c.channels() == 1
            && c.min_sample_rate() <= TARGET_RATE
            && c.max_sample_rate() >= TARGET_RATE
            && c.sample_format() == cpal::SampleFormat::F32
    });

    let (config, effective_rate, decimation) = match exact {
        Some(cfg) => (cfg.with_sample_rate(TARGET_RATE).config(), TARGET_RATE, 1usize),
        None => {
            let default_config = device.default_input_config()?;
            let native_rate = default_config.sample_rate();
            let factor = (native_rate / TARGET_RATE).max(1) as usize;
            let rate = native_rate / factor as u32;
            log::info!("Capturing at {native_rate}Hz, decimating {factor}x to {rate}Hz");
            (default_config.config(), rate, factor)
        }
    };

    let channels = config.channels as usize;

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            let mut buf = buffer.lock().unwrap();
            for (i, frame) in data.chunks(channels).enumerate() {
                if i % decimation == 0 {
                    buf.push(frame.iter().sum::<f32>() / channels as f32);
                }
            }
        },
        |err| log::error!("Input stream error: {err}"),
        None,
    )?;

    stream.play()?;
    Ok((stream, effective_rate))
}

/// Encode captured samples as a WAV blob (mono 16-bit PCM) ready for
/// multipart upload.
pub fn samples_to_wav(
    samples: &[f32],
    sample_rate: u32,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_blob_roundtrips_through_hound() {
        let samples: Vec<f32> = (0..1600)
            .map(|i| (i as f32 / 1600.0 * std::f32::consts::TAU).sin() * 0.5)
            .collect();
        let bytes = samples_to_wav(&samples, TARGET_RATE).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, TARGET_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 1600);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let bytes = samples_to_wav(&[2.0, -2.0], 16_000).unwrap();
        let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![i16::MAX, -i16::MAX]);
    }
}
