// SPDX-License-Identifier: MPL-2.0
//! Video probing: container metadata plus a poster frame.

use crate::error::{MediaError, Result};
use crate::media::ImageData;
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with the log level turned down.
///
/// Safe to call multiple times; initialization happens once. The log level
/// is dropped to ERROR to suppress container warnings during probing.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(MediaError::from_message(&e.to_string()).into());
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// A probed video: stream properties and the decoded poster frame.
#[derive(Debug, Clone)]
pub struct VideoData {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub duration_secs: f64,
    pub fps: f64,
    pub poster: ImageData,
}

/// Opens a video file, reads its stream properties and decodes the first
/// frame as the poster.
pub fn probe(path: &Path) -> Result<VideoData> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| MediaError::from_message(&format!("Failed to open video file: {e}")))?;

    let (stream_index, parameters, duration_secs, fps) = {
        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(MediaError::NoVideoStream)?;

        let duration_secs = if stream.duration() > 0 {
            let time_base = stream.time_base();
            stream.duration() as f64 * f64::from(time_base.numerator())
                / f64::from(time_base.denominator())
        } else if ictx.duration() > 0 {
            // Fallback to container duration
            ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
        } else {
            0.0
        };

        let frame_rate = stream.avg_frame_rate();
        let fps = if frame_rate.denominator() != 0 {
            f64::from(frame_rate.numerator()) / f64::from(frame_rate.denominator())
        } else {
            0.0
        };

        (stream.index(), stream.parameters(), duration_secs, fps)
    };

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(parameters)
        .map_err(|e| MediaError::from_message(&format!("Failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| MediaError::from_message(&format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(MediaError::CorruptedFile.into());
    }

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| MediaError::from_message(&format!("Failed to create scaler: {e}")))?;

    let poster = decode_next_frame(&mut ictx, &mut decoder, &mut scaler, stream_index)?
        .ok_or_else(|| MediaError::DecodeFailed("could not decode first frame".into()))?;

    Ok(VideoData {
        path: path.to_path_buf(),
        width,
        height,
        duration_secs,
        fps,
        poster: frame_to_image(&poster),
    })
}

/// Decodes the next frame of `stream_index` through the given scaler.
/// Returns `Ok(None)` when the stream runs out of packets.
pub(crate) fn decode_next_frame(
    ictx: &mut ffmpeg_next::format::context::Input,
    decoder: &mut ffmpeg_next::decoder::Video,
    scaler: &mut ffmpeg_next::software::scaling::Context,
    stream_index: usize,
) -> Result<Option<ffmpeg_next::frame::Video>> {
    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        decoder
            .send_packet(&packet)
            .map_err(|e| MediaError::from_message(&format!("Failed to send packet: {e}")))?;

        let mut decoded = ffmpeg_next::frame::Video::empty();
        if decoder.receive_frame(&mut decoded).is_ok() {
            let mut scaled = ffmpeg_next::frame::Video::empty();
            scaler
                .run(&decoded, &mut scaled)
                .map_err(|e| MediaError::from_message(&format!("Failed to scale frame: {e}")))?;
            return Ok(Some(scaled));
        }
    }
    Ok(None)
}

/// Copies a scaled RGBA frame into display data, honoring the row stride.
pub(crate) fn frame_to_image(frame: &ffmpeg_next::frame::Video) -> ImageData {
    let width = frame.width();
    let height = frame.height();
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let row_start = y as usize * stride;
        let row_end = row_start + (width * 4) as usize;
        rgba_bytes.extend_from_slice(&data[row_start..row_end]);
    }

    ImageData::from_rgba(width, height, rgba_bytes)
}
