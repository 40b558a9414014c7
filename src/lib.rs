//! # zenptm
//!
//! Polynomial Texture Map (PTM) decoder and relighting evaluator.
//!
//! A PTM stores, per pixel, six coefficients of a biquadratic luminance model
//! `L(lu, lv) = a0·lu² + a1·lv² + a2·lu·lv + a3·lu + a4·lv + a5` in the
//! light direction `(lu, lv)`, plus a base color. Evaluating it under a new
//! light direction relights the captured surface.
//!
//! ## Supported Formats
//!
//! - **PTM_FORMAT_LRGB**: one luminance polynomial and an RGB base color per pixel
//! - **PTM_FORMAT_RGB**: one polynomial per channel, averaged into a single
//!   luminance polynomial on decode
//!
//! Both are read in either the interleaved (per pixel, top-down) or planar
//! (per coefficient, bottom-up) arrangement. Producers disagree on which one
//! PTM_1.2 means, so the layout is detected from the data unless fixed with
//! [`LayoutStrategy::Fixed`].
//!
//! ## Non-Goals
//!
//! - JPEG and JPEG-LS compressed PTMs (rejected with [`PtmError::NotImplemented`])
//! - Display, input handling, GPU upload
//!
//! ## Usage
//!
//! ```no_run
//! use zenptm::{DecodeRequest, LightDirection, RelightParams, ViewMode};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your .ptm bytes
//!
//! let ptm = DecodeRequest::new(data).decode(Unstoppable)?;
//! println!("{}x{} {:?}", ptm.width(), ptm.height(), ptm.header().format);
//!
//! let params = RelightParams::new(LightDirection::new(0.4, -0.3))
//!     .with_view_mode(ViewMode::Default)
//!     .with_specular_gain(0.3);
//! let image = zenptm::evaluate(&ptm, &params);
//! let ppm = zenptm::ppm::encode_ppm(image.as_ref(), Unstoppable)?;
//! # Ok::<(), zenptm::PtmError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod field;
mod format;
mod header;
mod limits;
mod lrgb;
mod rgb_poly;

pub mod fixture;
pub mod normals;
pub mod pack;
pub mod ppm;
pub mod relight;

// Re-exports
pub use decode::{DecodeRequest, DecodedPtm, detect_layout, probe};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PtmError;
pub use field::{CoefficientField, NormalField};
pub use format::{LayoutStrategy, PlaneLayout, PtmFormat};
pub use header::Header;
pub use limits::Limits;
pub use pack::{CoefficientRange, PackedCoefficients, RangePolicy};
pub use relight::{LightDirection, RelightParams, ViewMode, evaluate};

/// Decode a PTM with default settings (layout detection, no limits).
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodedPtm, PtmError> {
    DecodeRequest::new(data).decode(stop)
}
