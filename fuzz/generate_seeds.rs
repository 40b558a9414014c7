#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_relight"] {
        fs::create_dir_all(dir).unwrap();

        // LRGB 2x2, interleaved pixels
        let mut lrgb = b"PTM_1.2\nPTM_FORMAT_LRGB\n2\n2\n0.01 0.01 0.01 0.01 0.01 0.004\n128 128 128 128 128 0\n".to_vec();
        for i in 0..4u8 {
            lrgb.extend_from_slice(&[10 * i, 20, 30, 100, 140, 128, 150, 90, 200]);
        }
        fs::write(format!("{dir}/lrgb_2x2.ptm"), &lrgb).unwrap();

        // RGB 1x2
        let mut rgb = b"PTM_1.2\nPTM_FORMAT_RGB\n1\n2\n1 1 1 1 1 1\n0 0 0 0 0 0\n".to_vec();
        rgb.extend((0..36u8).map(|b| b.wrapping_mul(7)));
        fs::write(format!("{dir}/rgb_1x2.ptm"), &rgb).unwrap();

        // CRLF header
        let mut crlf = b"PTM_1.2\r\nPTM_FORMAT_LRGB\r\n1\r\n1\r\n1 1 1 1 1 1\r\n0 0 0 0 0 0\r\n".to_vec();
        crlf.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        fs::write(format!("{dir}/crlf_1x1.ptm"), &crlf).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/just_version.bin"), b"PTM_1.2\n").unwrap();
        fs::write(format!("{dir}/jpeg.bin"), b"PTM_1.2\nPTM_FORMAT_JPEG_RGB\n1\n1\n1 1 1 1 1 1\n0 0 0 0 0 0\n").unwrap();
        fs::write(format!("{dir}/five_scales.bin"), b"PTM_1.2\nPTM_FORMAT_LRGB\n1\n1\n1 1 1 1 1\n0 0 0 0 0 0\n").unwrap();
    }

    println!("Generated seed corpora under fuzz/corpus/");
}
