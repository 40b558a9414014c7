use enough::Stop;
use imgref::ImgRef;
use rgb::RGB8;

use crate::error::PtmError;
use crate::field::{CoefficientField, NormalField};
use crate::format::{LayoutStrategy, PlaneLayout, PtmFormat};
use crate::header::{self, Header};
use crate::limits::Limits;
use crate::normals::estimate_normals;
use crate::{lrgb, rgb_poly};

/// Bytes of output per decoded pixel: six f64 coefficients, RGB8, a 3×f64 normal.
const DECODED_BYTES_PER_PIXEL: usize = 6 * 8 + 3 + 3 * 8;

/// Upper bound on bytes inspected by [`detect_layout`].
const DETECT_SAMPLE_BYTES: usize = 1 << 20;

/// A fully decoded PTM. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPtm {
    header: Header,
    layout: Option<PlaneLayout>,
    coefficients: CoefficientField,
    base_color: Vec<RGB8>,
    normals: NormalField,
}

impl DecodedPtm {
    /// Assemble a decoded image from already-computed planes, deriving normals.
    ///
    /// The header must describe a non-empty `PTM_1.x` LRGB or RGB image whose
    /// dimensions match the field and the base color.
    pub fn from_parts(
        header: Header,
        coefficients: CoefficientField,
        base_color: Vec<RGB8>,
    ) -> Result<Self, PtmError> {
        if !header::is_supported_version(&header.version) {
            return Err(PtmError::InvalidParameter(format!(
                "unsupported version {:?}",
                header.version
            )));
        }
        if !matches!(header.format, PtmFormat::Lrgb | PtmFormat::Rgb) {
            return Err(PtmError::InvalidParameter(format!(
                "{} images cannot be assembled",
                header.format.name()
            )));
        }
        if header.width == 0 || header.height == 0 {
            return Err(PtmError::InvalidParameter(format!(
                "dimensions must be non-zero, got {}x{}",
                header.width, header.height
            )));
        }
        if coefficients.width() != header.width || coefficients.height() != header.height {
            return Err(PtmError::InvalidParameter(format!(
                "coefficient field is {}x{}, header says {}x{}",
                coefficients.width(),
                coefficients.height(),
                header.width,
                header.height
            )));
        }
        if base_color.len() != coefficients.len() {
            return Err(PtmError::BufferTooSmall {
                needed: coefficients.len(),
                actual: base_color.len(),
            });
        }
        let normals = estimate_normals(&coefficients);
        Ok(Self {
            header,
            layout: None,
            coefficients,
            base_color,
            normals,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Layout the pixel data was read with; `None` for images not decoded from bytes.
    pub fn layout(&self) -> Option<PlaneLayout> {
        self.layout
    }

    pub fn coefficients(&self) -> &CoefficientField {
        &self.coefficients
    }

    pub fn base_color(&self) -> &[RGB8] {
        &self.base_color
    }

    /// Base color as a 2D view.
    pub fn base_color_img(&self) -> ImgRef<'_, RGB8> {
        ImgRef::new(
            self.base_color.as_slice(),
            self.header.width as usize,
            self.header.height as usize,
        )
    }

    pub fn normals(&self) -> &NormalField {
        &self.normals
    }
}

/// Builder for decoding a PTM byte buffer.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    layout: LayoutStrategy,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            layout: LayoutStrategy::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
        self.layout = layout;
        self
    }

    /// Decode the buffer. Either the whole image decodes or an error is returned.
    pub fn decode(self, stop: impl Stop) -> Result<DecodedPtm, PtmError> {
        decode_with(self.data, self.limits, self.layout, &stop)
    }
}

/// Parse only the header.
pub fn probe(data: &[u8]) -> Result<Header, PtmError> {
    header::parse_header(data).map(|(h, _)| h)
}

fn decode_with(
    data: &[u8],
    limits: Option<&Limits>,
    strategy: LayoutStrategy,
    stop: &dyn Stop,
) -> Result<DecodedPtm, PtmError> {
    let (header, data_offset) = header::parse_header(data)?;
    let (width, height) = (header.width, header.height);

    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let bpp = match header.format {
        PtmFormat::Lrgb | PtmFormat::Rgb => header.format.bytes_per_pixel(),
        _ => None,
    }
    .ok_or(PtmError::NotImplemented(header.format))?;

    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    let needed = pixel_count
        .checked_mul(bpp)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        let out_bytes = pixel_count
            .checked_mul(DECODED_BYTES_PER_PIXEL)
            .ok_or(PtmError::DimensionsTooLarge { width, height })?;
        limits.check_memory(out_bytes)?;
    }

    let available = data.len() - data_offset;
    if available < needed {
        return Err(PtmError::Truncated {
            stage: "pixel data",
            offset: data_offset,
            needed,
            actual: available,
        });
    }
    let pixels = &data[data_offset..data_offset + needed];

    let layout = match strategy {
        LayoutStrategy::Fixed(layout) => layout,
        LayoutStrategy::Detect => detect_layout(pixels, bpp),
    };
    log::debug!(
        "decoding {} {width}x{height}, {layout:?} layout, pixel data at byte {data_offset}",
        header.format.name()
    );
    log::trace!("first pixel bytes: {:02x?}", &pixels[..bpp]);

    stop.check()?;

    let (coefficients, base_color) = match header.format {
        PtmFormat::Lrgb => lrgb::decode(pixels, &header, layout, stop)?,
        PtmFormat::Rgb => rgb_poly::decode(pixels, &header, layout, stop)?,
        other => return Err(PtmError::NotImplemented(other)),
    };
    let normals = estimate_normals(&coefficients);

    Ok(DecodedPtm {
        header,
        layout: Some(layout),
        coefficients,
        base_color,
        normals,
    })
}

/// Guess the on-disk layout of a pixel region.
///
/// Interleaved data repeats the same coefficient every `bytes_per_pixel`
/// bytes, so neighbouring pixels line up at that stride. Planar data puts
/// neighbouring pixels of one plane next to each other. Whichever stride has
/// the smaller mean absolute byte difference wins; ties go to interleaved.
pub fn detect_layout(pixels: &[u8], bytes_per_pixel: usize) -> PlaneLayout {
    let sample = &pixels[..pixels.len().min(DETECT_SAMPLE_BYTES)];
    if bytes_per_pixel <= 1 || sample.len() <= bytes_per_pixel {
        return PlaneLayout::Interleaved;
    }

    let mean_diff = |stride: usize| {
        let n = sample.len() - stride;
        let sum: u64 = sample
            .iter()
            .zip(&sample[stride..])
            .map(|(&a, &b)| u64::from(a.abs_diff(b)))
            .sum();
        sum as f64 / n as f64
    };
    let adjacent = mean_diff(1);
    let strided = mean_diff(bytes_per_pixel);
    log::debug!("layout detection: stride 1 = {adjacent:.3}, stride {bytes_per_pixel} = {strided:.3}");

    if strided <= adjacent {
        PlaneLayout::Interleaved
    } else {
        PlaneLayout::Planar
    }
}

/// Stored scanline index holding output row `y`.
pub(crate) fn stored_row(layout: PlaneLayout, height: usize, y: usize) -> usize {
    match layout {
        PlaneLayout::Interleaved => y,
        PlaneLayout::Planar => height - 1 - y,
    }
}

/// Zeroed output planes, for the per-format decoders to fill.
pub(crate) fn empty_output(header: &Header) -> (CoefficientField, Vec<RGB8>) {
    let len = header.width as usize * header.height as usize;
    (
        CoefficientField::zeroed(header.width, header.height),
        vec![RGB8::new(0, 0, 0); len],
    )
}
