//! Encode/decode/relight over synthetic images in both layouts and formats.

use enough::Unstoppable;
use rgb::RGB8;
use zenptm::relight::{evaluate_packed, luminance};
use zenptm::*;

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Smooth ramps: neighbouring pixels differ by a few levels, coefficients by a lot.
fn smooth_lrgb(w: usize, h: usize) -> (Vec<[u8; 6]>, Vec<RGB8>) {
    let mut coefs = Vec::with_capacity(w * h);
    let mut colors = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            coefs.push(core::array::from_fn(|c| (x * 4 + y * 3 + c * 25) as u8));
            let g = (100 + x + y) as u8;
            colors.push(RGB8::new(g, g, g));
        }
    }
    (coefs, colors)
}

fn noisy_lrgb(w: usize, h: usize, seed: u32) -> (Vec<[u8; 6]>, Vec<RGB8>) {
    let bytes = noise(w * h * 9, seed);
    let coefs = bytes[..w * h * 6]
        .chunks_exact(6)
        .map(|c| c.try_into().unwrap())
        .collect();
    let colors = bytes[w * h * 6..]
        .chunks_exact(3)
        .map(|c| RGB8::new(c[0], c[1], c[2]))
        .collect();
    (coefs, colors)
}

const SCALE: [f64; 6] = [0.004, 0.004, 0.004, 0.006, 0.006, 0.004];
const BIAS: [f64; 6] = [128.0, 128.0, 128.0, 128.0, 128.0, 0.0];

// ── LRGB ─────────────────────────────────────────────────────────────

#[test]
fn lrgb_layouts_decode_identically() {
    let (w, h) = (7, 5);
    let (coefs, colors) = noisy_lrgb(w, h, 0xDEAD_BEEF);

    let mut decoded = Vec::new();
    for layout in [PlaneLayout::Interleaved, PlaneLayout::Planar] {
        let data = EncodeRequest::lrgb(layout)
            .with_scale(SCALE)
            .with_bias(BIAS)
            .encode_lrgb(&coefs, &colors, w as u32, h as u32, Unstoppable)
            .unwrap();
        let ptm = DecodeRequest::new(&data)
            .with_layout(LayoutStrategy::Fixed(layout))
            .decode(Unstoppable)
            .unwrap();
        assert_eq!(ptm.layout(), Some(layout));
        decoded.push(ptm);
    }

    let (a, b) = (&decoded[0], &decoded[1]);
    assert_eq!(a.coefficients(), b.coefficients());
    assert_eq!(a.base_color(), b.base_color());
    assert_eq!(a.base_color(), &colors[..]);
    for y in 0..h {
        for x in 0..w {
            let raw = coefs[y * w + x];
            let got = a.coefficients().at(x as u32, y as u32);
            for c in 0..6 {
                assert_eq!(got[c], (f64::from(raw[c]) - BIAS[c]) * SCALE[c]);
            }
        }
    }
}

#[test]
fn planar_lrgb_is_stored_bottom_up() {
    let (w, h) = (3, 4);
    let (coefs, colors) = smooth_lrgb(w, h);
    let data = EncodeRequest::lrgb(PlaneLayout::Planar)
        .encode_lrgb(&coefs, &colors, w as u32, h as u32, Unstoppable)
        .unwrap();
    let pixels = &data[data.len() - w * h * 9..];
    // First stored byte of plane a0 is the bottom-left pixel.
    assert_eq!(pixels[0], coefs[(h - 1) * w][0]);
    // First stored color is the bottom-left pixel's red.
    assert_eq!(pixels[6 * w * h], colors[(h - 1) * w].r);
}

#[test]
fn layout_detection_on_smooth_images() {
    let (w, h) = (16, 16);
    let (coefs, colors) = smooth_lrgb(w, h);
    for layout in [PlaneLayout::Interleaved, PlaneLayout::Planar] {
        let data = EncodeRequest::lrgb(layout)
            .encode_lrgb(&coefs, &colors, w as u32, h as u32, Unstoppable)
            .unwrap();
        let ptm = decode(&data, Unstoppable).unwrap();
        assert_eq!(ptm.layout(), Some(layout));
        assert_eq!(ptm.base_color(), &colors[..]);
    }
}

#[test]
fn decoded_normals_are_unit() {
    let (w, h) = (12, 9);
    let (coefs, colors) = noisy_lrgb(w, h, 0x1357_9BDF);
    let data = EncodeRequest::lrgb(PlaneLayout::Interleaved)
        .with_scale(SCALE)
        .with_bias(BIAS)
        .encode_lrgb(&coefs, &colors, w as u32, h as u32, Unstoppable)
        .unwrap();
    let ptm = decode(&data, Unstoppable).unwrap();
    for &[x, y, z] in ptm.normals().as_slice() {
        assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
    }
}

// ── RGB ──────────────────────────────────────────────────────────────

#[test]
fn rgb_layouts_average_channels() {
    let (w, h) = (4, 3);
    let bytes = noise(w * h * 18, 0xCAFE_F00D);
    let coefs: Vec<[[u8; 6]; 3]> = bytes
        .chunks_exact(18)
        .map(|px| core::array::from_fn(|ch| px[ch * 6..ch * 6 + 6].try_into().unwrap()))
        .collect();
    let scale = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    let bias = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    let mut decoded = Vec::new();
    for layout in [PlaneLayout::Interleaved, PlaneLayout::Planar] {
        let data = EncodeRequest::rgb(layout)
            .with_scale(scale)
            .with_bias(bias)
            .encode_rgb(&coefs, w as u32, h as u32, Unstoppable)
            .unwrap();
        decoded.push(
            DecodeRequest::new(&data)
                .with_layout(LayoutStrategy::Fixed(layout))
                .decode(Unstoppable)
                .unwrap(),
        );
    }
    assert_eq!(decoded[0].coefficients(), decoded[1].coefficients());
    assert_eq!(decoded[0].base_color(), decoded[1].base_color());

    let ptm = &decoded[0];
    for (i, px) in coefs.iter().enumerate() {
        let got = ptm.coefficients().coefficients(i);
        for c in 0..6 {
            let mean = (f64::from(px[0][c]) + f64::from(px[1][c]) + f64::from(px[2][c])) / 3.0;
            assert_eq!(got[c], mean);
        }
        assert_eq!(ptm.base_color()[i], RGB8::new(px[0][5], px[1][5], px[2][5]));
    }
}

#[test]
fn rgb_layout_detection_on_smooth_images() {
    let (w, h) = (16, 16);
    let coefs: Vec<[[u8; 6]; 3]> = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            core::array::from_fn(|ch| core::array::from_fn(|c| (x * 4 + y * 3 + ch * 10 + c * 25) as u8))
        })
        .collect();
    for layout in [PlaneLayout::Interleaved, PlaneLayout::Planar] {
        let data = EncodeRequest::rgb(layout)
            .encode_rgb(&coefs, w as u32, h as u32, Unstoppable)
            .unwrap();
        let ptm = decode(&data, Unstoppable).unwrap();
        assert_eq!(ptm.layout(), Some(layout));
        for (i, px) in coefs.iter().enumerate() {
            assert_eq!(ptm.base_color()[i], RGB8::new(px[0][5], px[1][5], px[2][5]));
        }
    }
}

// ── Relighting ───────────────────────────────────────────────────────

fn noisy_ptm() -> DecodedPtm {
    let (w, h) = (10, 6);
    let (coefs, colors) = noisy_lrgb(w, h, 0x2468_ACE0);
    let data = EncodeRequest::lrgb(PlaneLayout::Interleaved)
        .with_scale(SCALE)
        .with_bias(BIAS)
        .encode_lrgb(&coefs, &colors, w as u32, h as u32, Unstoppable)
        .unwrap();
    DecodeRequest::new(&data)
        .with_layout(LayoutStrategy::Fixed(PlaneLayout::Interleaved))
        .decode(Unstoppable)
        .unwrap()
}

#[test]
fn overhead_light_returns_constant_term() {
    let ptm = noisy_ptm();
    let field = ptm.coefficients();
    for i in 0..field.len() {
        let a = field.coefficients(i);
        assert_eq!(luminance(&a, LightDirection::OVERHEAD), a[5]);
    }
}

#[test]
fn overhead_render_is_base_color() {
    let ptm = noisy_ptm();
    let img = evaluate(&ptm, &RelightParams::default());
    assert_eq!(img.width(), ptm.width() as usize);
    assert_eq!(img.height(), ptm.height() as usize);
    assert_eq!(img.buf().as_slice(), ptm.base_color());
}

#[test]
fn packed_transport_matches_overhead_render() {
    let ptm = noisy_ptm();
    let packed = PackedCoefficients::pack(ptm.coefficients(), RangePolicy::Computed);
    let img = evaluate_packed(&packed, ptm.base_color(), ptm.normals(), &RelightParams::default())
        .unwrap();
    assert_eq!(img.buf().as_slice(), ptm.base_color());
}

#[test]
fn packed_transport_stays_close_under_oblique_light() {
    let ptm = noisy_ptm();
    let packed = PackedCoefficients::pack(ptm.coefficients(), RangePolicy::Computed);
    let params = RelightParams::new(LightDirection::new(0.3, 0.2))
        .with_view_mode(ViewMode::SpecularOnly)
        .with_specular_gain(1.0);
    let direct = evaluate(&ptm, &params);
    let via_packed = evaluate_packed(&packed, ptm.base_color(), ptm.normals(), &params).unwrap();
    for (a, b) in direct.as_ref().pixels().zip(via_packed.as_ref().pixels()) {
        assert!(a.r.abs_diff(b.r) <= 2, "{a:?} vs {b:?}");
    }
}

#[test]
fn normals_view_of_dome() {
    let ptm = fixture::dome(16, 16).unwrap();
    let img = evaluate(&ptm, &RelightParams::default().with_view_mode(ViewMode::Normals));
    // flat background maps to (128, 128, 255)
    assert_eq!(img.buf()[0], RGB8::new(128, 128, 255));
    // right side of the dome leans +u
    let right = img.buf()[8 * 16 + 13];
    let left = img.buf()[8 * 16 + 2];
    assert!(right.r > 200 && left.r < 60, "{right:?} {left:?}");
}

#[test]
fn oblique_light_darkens_the_far_side() {
    let ptm = fixture::dome(32, 32).unwrap();
    let params = RelightParams::new(LightDirection::new(0.8, 0.0));
    let img = evaluate(&ptm, &params);
    let row = &img.buf()[16 * 32..17 * 32];
    let lit = row[26].r;
    let shadowed = row[5].r;
    assert!(lit > shadowed, "lit {lit} shadowed {shadowed}");
}

#[test]
fn packing_rejects_mismatched_normals() {
    let ptm = noisy_ptm();
    let other = fixture::dome(4, 4).unwrap();
    let packed = PackedCoefficients::pack(ptm.coefficients(), RangePolicy::Computed);
    assert!(matches!(
        evaluate_packed(&packed, ptm.base_color(), other.normals(), &RelightParams::default()),
        Err(PtmError::InvalidParameter(_))
    ));
}

#[test]
fn relit_image_exports_as_ppm() {
    let ptm = fixture::dome(8, 6).unwrap();
    let img = evaluate(&ptm, &RelightParams::new(LightDirection::new(-0.5, 0.5)));
    let ppm = ppm::encode_ppm(img.as_ref(), Unstoppable).unwrap();
    let header = b"P6\n8 6\n255\n";
    assert!(ppm.starts_with(header));
    assert_eq!(ppm.len(), header.len() + 8 * 6 * 3);
}
