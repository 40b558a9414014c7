#![no_main]
use libfuzzer_sys::fuzz_target;
use zenptm::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Limits::default()
    };
    let Ok(ptm) = DecodeRequest::new(data).with_limits(&limits).decode(enough::Unstoppable) else {
        return;
    };

    // Light and gains from the trailing bytes
    let tail = |i: usize| data[data.len() - 1 - i % data.len()];
    let light = LightDirection::new(
        f64::from(tail(0)) / 64.0 - 2.0,
        f64::from(tail(1)) / 64.0 - 2.0,
    );
    for view_mode in [ViewMode::Default, ViewMode::SpecularOnly, ViewMode::Normals] {
        let params = RelightParams::new(light)
            .with_view_mode(view_mode)
            .with_specular_gain(f64::from(tail(2)) / 32.0)
            .with_diffuse_gain(f64::from(tail(3)) / 32.0);
        let img = evaluate(&ptm, &params);
        assert_eq!(img.width(), ptm.width() as usize);

        let packed = PackedCoefficients::pack(ptm.coefficients(), RangePolicy::Computed);
        let via_packed =
            relight::evaluate_packed(&packed, ptm.base_color(), ptm.normals(), &params)
                .expect("dimensions come from the same image");
        assert_eq!(via_packed.height(), img.height());
    }

    for &[x, y, z] in ptm.normals().as_slice() {
        assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-6);
    }
});
