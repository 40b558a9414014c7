use enough::Stop;
use rgb::RGB8;

use crate::error::PtmError;
use crate::format::{PlaneLayout, PtmFormat};
use crate::header::{self, Header};
use crate::{lrgb, rgb_poly};

/// Builder for writing uncompressed PTM files from raw stored bytes.
///
/// Coefficient bytes are written as given; `scale` and `bias` only go into
/// the header, and a decoder turns each byte back into `(raw - bias) * scale`.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    format: PtmFormat,
    layout: PlaneLayout,
    version: String,
    scale: [f64; 6],
    bias: [f64; 6],
}

impl EncodeRequest {
    fn new(format: PtmFormat, layout: PlaneLayout) -> Self {
        Self {
            format,
            layout,
            version: "PTM_1.2".into(),
            scale: [1.0; 6],
            bias: [0.0; 6],
        }
    }

    /// LRGB output.
    pub fn lrgb(layout: PlaneLayout) -> Self {
        Self::new(PtmFormat::Lrgb, layout)
    }

    /// Per-channel RGB output.
    pub fn rgb(layout: PlaneLayout) -> Self {
        Self::new(PtmFormat::Rgb, layout)
    }

    pub fn with_scale(mut self, scale: [f64; 6]) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bias(mut self, bias: [f64; 6]) -> Self {
        self.bias = bias;
        self
    }

    /// Version line, e.g. `PTM_1.1`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Encode an LRGB image. Both slices are row-major, top row first.
    pub fn encode_lrgb(
        &self,
        coefficients: &[[u8; 6]],
        colors: &[RGB8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PtmError> {
        self.expect_format(PtmFormat::Lrgb)?;
        let mut out = self.header_bytes(width, height)?;
        out.extend(lrgb::encode(
            coefficients,
            colors,
            width,
            height,
            self.layout,
            &stop,
        )?);
        Ok(out)
    }

    /// Encode an RGB image; each pixel holds the R, G and B coefficient bytes.
    pub fn encode_rgb(
        &self,
        coefficients: &[[[u8; 6]; 3]],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PtmError> {
        self.expect_format(PtmFormat::Rgb)?;
        let mut out = self.header_bytes(width, height)?;
        out.extend(rgb_poly::encode(
            coefficients,
            width,
            height,
            self.layout,
            &stop,
        )?);
        Ok(out)
    }

    fn expect_format(&self, wanted: PtmFormat) -> Result<(), PtmError> {
        if self.format != wanted {
            return Err(PtmError::InvalidParameter(format!(
                "request is for {}, not {}",
                self.format.name(),
                wanted.name()
            )));
        }
        Ok(())
    }

    fn header_bytes(&self, width: u32, height: u32) -> Result<Vec<u8>, PtmError> {
        if width == 0 || height == 0 {
            return Err(PtmError::InvalidParameter(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if self.version.contains(['\n', '\r']) {
            return Err(PtmError::InvalidParameter(
                "version must be a single line".into(),
            ));
        }
        if self.scale.iter().chain(&self.bias).any(|v| !v.is_finite()) {
            return Err(PtmError::InvalidParameter(
                "scale and bias must be finite".into(),
            ));
        }
        let header = Header {
            version: self.version.clone(),
            format: self.format,
            width,
            height,
            scale: self.scale,
            bias: self.bias,
        };
        let mut out = Vec::new();
        header::write_header(&header, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn rejects_wrong_entrypoint() {
        let req = EncodeRequest::rgb(PlaneLayout::Planar);
        let err = req
            .encode_lrgb(&[[0; 6]], &[RGB8::new(0, 0, 0)], 1, 1, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PtmError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_short_input() {
        let req = EncodeRequest::lrgb(PlaneLayout::Interleaved);
        let err = req
            .encode_lrgb(&[[0; 6]; 3], &[RGB8::new(0, 0, 0); 4], 2, 2, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PtmError::BufferTooSmall { needed: 4, actual: 3 }));
    }

    #[test]
    fn rejects_non_finite_scale() {
        let req = EncodeRequest::lrgb(PlaneLayout::Interleaved).with_scale([f64::NAN; 6]);
        let err = req
            .encode_lrgb(&[[0; 6]], &[RGB8::new(0, 0, 0)], 1, 1, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, PtmError::InvalidParameter(_)));
    }

    #[test]
    fn interleaved_lrgb_bytes() {
        let out = EncodeRequest::lrgb(PlaneLayout::Interleaved)
            .encode_lrgb(&[[1, 2, 3, 4, 5, 6]], &[RGB8::new(7, 8, 9)], 1, 1, Unstoppable)
            .unwrap();
        assert!(out.starts_with(b"PTM_1.2\nPTM_FORMAT_LRGB\n1\n1\n1 1 1 1 1 1\n0 0 0 0 0 0\n"));
        assert_eq!(&out[out.len() - 9..], &[7, 8, 9, 1, 2, 3, 4, 5, 6]);
    }
}
