//! 校验仓库自带的默认素材可以被加载并参与合成。

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rover_card::card::{CardAssets, CardConfig, CardRenderer};

fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/texture2d")
}

#[test]
fn default_assets_load_at_card_size() {
    let config = CardConfig::default();

    let assets = CardAssets::load_from_dir(asset_dir(), config.canvas).expect("shipped assets load");

    assert_eq!(assets.mask().dimensions(), (560, 1000));
    assert_eq!(assets.foreground().dimensions(), (560, 1000));
}

#[test]
fn default_assets_produce_transparent_corners() {
    let config = CardConfig::default();
    let assets = CardAssets::load_from_dir(asset_dir(), config.canvas).expect("shipped assets load");
    let renderer = CardRenderer::new(Arc::new(assets), config);

    let upload = RgbaImage::from_pixel(400, 700, Rgba([30, 90, 200, 255]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(upload)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("encode upload");

    let png = renderer.render(cursor.get_ref()).expect("render");
    let card = image::load_from_memory(&png).expect("decode card").to_rgba8();

    assert_eq!(card.dimensions(), (560, 1000));
    // 左侧 10px 偏移区与圆角外侧保持透明。
    assert_eq!(card.get_pixel(0, 500)[3], 0);
    assert_eq!(card.get_pixel(11, 1)[3], 0);
    // 卡片中心由主体填充。
    let center = card.get_pixel(280, 500);
    assert_eq!(center[3], 255);
    for (channel, expected) in [30u8, 90, 200].into_iter().enumerate() {
        assert!(center[channel].abs_diff(expected) <= 2);
    }
}
