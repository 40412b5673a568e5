//! Byte-exact output checks for small fixed images

mod common;

use common::{
    create_gradient_image, create_pattern_image, create_uniform_image, dump, hex, parse_jpeg,
};
use expect_test::expect;
use jpeg_baseline::{Encoder, Subsampling};

fn scan_hex(pixels: &[u8], width: usize, height: usize, quality: i32, mode: Subsampling) -> String {
    let jpeg = Encoder::new()
        .quality(quality)
        .subsampling(mode)
        .encode_rgb(pixels, width, height)
        .unwrap();
    hex(&parse_jpeg(&jpeg).scan)
}

#[test]
fn test_segment_dump_420() {
    common::init_logging();
    let pixels = create_pattern_image(16, 16);
    let jpeg = Encoder::new()
        .quality(75)
        .subsampling(Subsampling::S420)
        .encode_rgb(&pixels, 16, 16)
        .unwrap();

    expect![[r#"
        SOI
        APP0 len=16 JFIF 1.1
        DQT len=132
          table 0: 8 6 6 7 6 5 8 7 7 7 9 9 8 10 12 20 13 12 11 11 12 25 18 19 15 20 29 26 31 30 29 26 28 28 32 36 46 39 32 34 44 35 28 28 40 55 41 44 48 49 52 52 52 31 39 57 61 56 50 60 46 51 52 50
          table 1: 9 9 9 12 11 12 24 13 13 24 50 33 28 33 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50 50
        SOF0 len=17 precision=8 16x16 1:22:0 2:11:1 3:11:1
        DHT len=31 class=0 id=0 symbols=12
        DHT len=181 class=1 id=0 symbols=162
        DHT len=31 class=0 id=1 symbols=12
        DHT len=181 class=1 id=1 symbols=162
        SOS len=12 1:00 2:11 3:11 ss=0 se=63 a=0
        scan bytes=112
        EOI
    "#]]
    .assert_eq(&dump(&jpeg));
}

#[test]
fn test_uniform_gray_scan() {
    // Every block quantizes to zero: Y "00 1010", Cb "00 00", Cr "00 00" per MCU
    let pixels = create_uniform_image(16, 16, 128, 128, 128);
    assert_eq!(
        scan_hex(&pixels, 16, 16, 50, Subsampling::S444),
        "2800a002800a00"
    );
}

#[test]
fn test_black_single_mcu_420() {
    let pixels = create_uniform_image(8, 8, 0, 0, 0);
    assert_eq!(
        scan_hex(&pixels, 8, 8, 75, Subsampling::S420),
        "f9fe8a28a00f"
    );
}

#[test]
fn test_pattern_scan_420() {
    let pixels = create_pattern_image(16, 16);
    assert_eq!(
        scan_hex(&pixels, 16, 16, 75, Subsampling::S420),
        concat!(
            "e07c37e10dfb7f775e85a0f8392de0371326d8a25deed8ce00ab7a4e9ba5f86a",
            "149f5bba86c90a96512b619c0ebb47527e952f88fe28e93a0e89776de17b0975",
            "5914089e67fdd46cadc1da7ae47d2bcac35196654a35e5072527656eadf4bec5",
            "e459a636ad0962309072504ddfa69e67",
        )
    );
}

#[test]
fn test_pattern_scan_422_with_padding() {
    // 13x11 pads to 16x16; the scan contains a stuffed 0xFF
    let pixels = create_pattern_image(13, 11);
    let scan = scan_hex(&pixels, 13, 11, 90, Subsampling::S422);
    assert_eq!(
        scan,
        concat!(
            "f967e09fece7f69f27fd1f3f857d4bf0fbf65ef374607ecbe9dabf39c561ff00",
            "d637cfb9f6bc07c51ec692f7ba1a1f00b41b06f2336c87a57d81f0d3c39a69d0",
            "866d53b57abc091588a49d5d743f17e0ec4d554d5a47",
        )
    );
    assert!(scan.contains("ff00"));
}

#[test]
fn test_pattern_scan_444_low_quality() {
    let pixels = create_pattern_image(9, 9);
    assert_eq!(
        scan_hex(&pixels, 9, 9, 30, Subsampling::S444),
        "cdb3b1ce38ac1cb9829d52dfd83da9729bfb51f65daa6070d32ed6a6c7"
    );
}

#[test]
fn test_gradient_scan_420() {
    let pixels = create_gradient_image(32, 32);
    assert_eq!(
        scan_hex(&pixels, 32, 32, 75, Subsampling::S420),
        concat!(
            "f1ab3d27a7cb5af67a4f4f96b4acf49e9f2d6bd9e93d3e5a29d40cab35db5336",
            "cf49e9f2d6b59e93d3e5ad3b3d27a7cb5af67a4f4f96ba69d43ed32acd76d4c3",
            "b3d27a7cb5af67a4f4f96b4ecf49e9f2d6b59e93d3e5af369d43f17cab35db53",
            "36cf49e9f2d6bd9e93d3e5ad2b3d27a7cb5af67a4f4f96ba69d43ed32acd76d4",
        )
    );
}
