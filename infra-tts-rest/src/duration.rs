use std::io::Cursor;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use video_domain::DomainError;

/// Duration of an MP3 buffer in milliseconds. Uses the frame count from the
/// stream header when present, otherwise sums packet durations.
pub fn mp3_duration_ms(bytes: &[u8]) -> Result<u64, DomainError> {
    if bytes.is_empty() {
        return Err(DomainError::synthesis("speech service returned empty audio"));
    }

    let source = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| DomainError::synthesis(format!("audio is not decodable: {err}")))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DomainError::synthesis("audio has no playable track"))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let time_base = params
        .time_base
        .or_else(|| params.sample_rate.map(|rate| TimeBase::new(1, rate)))
        .ok_or_else(|| DomainError::synthesis("audio has no sample rate"))?;

    let frames = match params.n_frames {
        Some(frames) if frames > 0 => frames,
        _ => {
            let mut total = 0u64;
            while let Ok(packet) = format.next_packet() {
                if packet.track_id() == track_id {
                    total += packet.dur;
                }
            }
            total
        }
    };

    if frames == 0 {
        return Err(DomainError::synthesis("audio contains no frames"));
    }

    let time = time_base.calc_time(frames);
    Ok(time.seconds * 1_000 + (time.frac * 1_000.0).round() as u64)
}
