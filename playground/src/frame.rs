//! Decoding of backend-rendered frames.
//!
//! Frame-mode backends send a PNG as base64, either bare or wrapped in a
//! `data:image/png;base64,` URL. Output is always tightly packed RGBA.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use engine::surface::SurfaceSize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameImage {
    pub size: SurfaceSize,
    pub rgba: Vec<u8>,
}

#[derive(Debug)]
pub enum FrameError {
    Base64(base64::DecodeError),
    Png(png::DecodingError),
    UnsupportedFormat,
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Base64(e) => write!(f, "frame is not valid base64: {e}"),
            FrameError::Png(e) => write!(f, "frame is not a decodable PNG: {e}"),
            FrameError::UnsupportedFormat => write!(f, "frame uses an unsupported pixel format"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Base64(e) => Some(e),
            FrameError::Png(e) => Some(e),
            FrameError::UnsupportedFormat => None,
        }
    }
}

impl From<base64::DecodeError> for FrameError {
    fn from(e: base64::DecodeError) -> Self {
        FrameError::Base64(e)
    }
}

impl From<png::DecodingError> for FrameError {
    fn from(e: png::DecodingError) -> Self {
        FrameError::Png(e)
    }
}

/// Strips an optional data-URL wrapper down to the base64 payload.
pub fn strip_data_url(frame: &str) -> &str {
    if let Some(rest) = frame.strip_prefix("data:") {
        match rest.split_once(',') {
            Some((_, payload)) => payload,
            None => rest,
        }
    } else {
        frame
    }
}

pub fn decode_frame(frame: &str) -> Result<FrameImage, FrameError> {
    let bytes = BASE64.decode(strip_data_url(frame).trim())?;
    decode_png(&bytes)
}

fn decode_png(bytes: &[u8]) -> Result<FrameImage, FrameError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Expand palettes and drop 16-bit depth so rows come out as 8-bit
    // grayscale, grayscale-alpha, RGB, or RGBA.
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    // Four samples per pixel plus per-row slack covers every post-transform
    // layout without relying on the exact packed size.
    let mut buf = vec![0u8; (width as usize * 4 + 8) * height as usize];
    let out = reader.next_frame(&mut buf)?;

    let size = SurfaceSize::new(out.width, out.height);
    let mut rgba = vec![0u8; size.rgba_len()];
    let line = out.line_size;
    for y in 0..out.height as usize {
        let row = &buf[y * line..(y + 1) * line];
        let dst = &mut rgba[y * out.width as usize * 4..(y + 1) * out.width as usize * 4];
        expand_row(row, dst, out.color_type)?;
    }
    Ok(FrameImage { size, rgba })
}

fn expand_row(row: &[u8], dst: &mut [u8], color: png::ColorType) -> Result<(), FrameError> {
    let pixels = dst.len() / 4;
    match color {
        png::ColorType::Grayscale => {
            for (i, px) in dst.chunks_exact_mut(4).enumerate().take(pixels) {
                let g = row[i];
                px.copy_from_slice(&[g, g, g, 255]);
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for (i, px) in dst.chunks_exact_mut(4).enumerate().take(pixels) {
                let g = row[i * 2];
                px.copy_from_slice(&[g, g, g, row[i * 2 + 1]]);
            }
        }
        png::ColorType::Rgb => {
            for (i, px) in dst.chunks_exact_mut(4).enumerate().take(pixels) {
                px.copy_from_slice(&[row[i * 3], row[i * 3 + 1], row[i * 3 + 2], 255]);
            }
        }
        png::ColorType::Rgba => {
            dst.copy_from_slice(&row[..dst.len()]);
        }
        png::ColorType::Indexed => return Err(FrameError::UnsupportedFormat),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> String {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().expect("png header");
            writer.write_image_data(data).expect("png data");
        }
        BASE64.encode(&bytes)
    }

    #[test]
    fn strips_data_url_prefixes() {
        assert_eq!(strip_data_url("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url("QUJD"), "QUJD");
    }

    #[test]
    fn decodes_rgba_png() {
        let data = [255, 0, 0, 255, 0, 255, 0, 128];
        let encoded = encode_png(2, 1, png::ColorType::Rgba, &data);
        let image = decode_frame(&encoded).expect("decode");
        assert_eq!(image.size, SurfaceSize::new(2, 1));
        assert_eq!(image.rgba, data);
    }

    #[test]
    fn expands_rgb_png_to_opaque_rgba() {
        let encoded = encode_png(2, 2, png::ColorType::Rgb, &[
            10, 20, 30, 40, 50, 60, //
            70, 80, 90, 100, 110, 120,
        ]);
        let image = decode_frame(&encoded).expect("decode");
        assert_eq!(&image.rgba[0..4], &[10, 20, 30, 255]);
        assert_eq!(&image.rgba[12..16], &[100, 110, 120, 255]);
    }

    #[test]
    fn expands_grayscale_png() {
        let encoded = encode_png(1, 2, png::ColorType::Grayscale, &[0, 200]);
        let image = decode_frame(&encoded).expect("decode");
        assert_eq!(image.rgba, vec![0, 0, 0, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn decodes_through_a_data_url() {
        let encoded = encode_png(1, 1, png::ColorType::Rgba, &[1, 2, 3, 4]);
        let url = format!("data:image/png;base64,{encoded}");
        let image = decode_frame(&url).expect("decode");
        assert_eq!(image.rgba, vec![1, 2, 3, 4]);
    }

    #[test]
    fn garbage_base64_is_an_error() {
        assert!(matches!(
            decode_frame("!!not base64!!"),
            Err(FrameError::Base64(_))
        ));
    }

    #[test]
    fn valid_base64_invalid_png_is_an_error() {
        let encoded = BASE64.encode(b"this is not a png");
        assert!(matches!(decode_frame(&encoded), Err(FrameError::Png(_))));
    }
}
