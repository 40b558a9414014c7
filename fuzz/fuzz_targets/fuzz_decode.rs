#![no_main]
use libfuzzer_sys::fuzz_target;
use zenptm::{DecodeRequest, LayoutStrategy, PlaneLayout};

fuzz_target!(|data: &[u8]| {
    // Header probe, auto-detected and forced layouts: must never panic
    let _ = zenptm::probe(data);
    let _ = zenptm::decode(data, enough::Unstoppable);
    for layout in [PlaneLayout::Interleaved, PlaneLayout::Planar] {
        let _ = DecodeRequest::new(data)
            .with_layout(LayoutStrategy::Fixed(layout))
            .decode(enough::Unstoppable);
    }
});
