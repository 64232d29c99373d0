//! 端到端 HTTP 测试：绑定 127.0.0.1 随机端口，用 reqwest 发起 multipart 请求。

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use reqwest::multipart::{Form, Part};
use rover_card::card::{CanvasSize, CardAssets, CardConfig, CardRenderer};
use rover_card::server::{self, AppState};
use tokio::net::TcpListener;

const FRAME: Rgba<u8> = Rgba([240, 210, 120, 255]);

fn test_renderer() -> CardRenderer {
    renderer_with(CardConfig::default())
}

fn renderer_with(config: CardConfig) -> CardRenderer {
    let canvas = CanvasSize::card();
    let mask = RgbaImage::from_fn(canvas.width, canvas.height, |x, y| {
        let inside = (16..534).contains(&x) && (16..984).contains(&y);
        Rgba([0, 0, 0, if inside { 255 } else { 0 }])
    });
    let foreground = RgbaImage::from_fn(canvas.width, canvas.height, |x, y| {
        let border = x < 16 || x >= 534 || y < 16 || y >= 984;
        if border { FRAME } else { Rgba([0, 0, 0, 0]) }
    });
    let assets = CardAssets::from_images(mask, foreground, canvas).expect("assets init failed");
    CardRenderer::new(Arc::new(assets), config)
}

async fn spawn_app() -> String {
    spawn_app_with(test_renderer(), 8 * 1024 * 1024).await
}

async fn spawn_app_with(renderer: CardRenderer, max_upload_bytes: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server failed");
    let addr = listener.local_addr().expect("read local addr failed");
    let app = server::router(AppState::new(renderer), max_upload_bytes);

    tokio::spawn(async move {
        let _ = server::serve(listener, app).await;
    });

    format!("http://{}", addr)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 255) as u8, (y % 255) as u8, 128, 255])
    });
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    cursor.into_inner()
}

fn image_form(bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("upload.png")
        .mime_str(mime)
        .expect("valid mime");
    Form::new().part("image", part)
}

async fn post_card(base: &str, form: Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/rover-card/", base))
        .multipart(form)
        .send()
        .await
        .expect("request failed")
}

async fn detail_of(response: reqwest::Response) -> String {
    let body = response.text().await.expect("read body");
    let json: serde_json::Value = serde_json::from_str(&body).expect("error body is json");
    json["detail"].as_str().expect("detail field").to_string()
}

fn header_of<'a>(response: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn index_serves_upload_form() {
    let base = spawn_app().await;

    let response = reqwest::get(format!("{}/", base)).await.expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    assert!(header_of(&response, "content-type").unwrap_or_default().starts_with("text/html"));
    let body = response.text().await.expect("read body");
    assert!(body.contains("/rover-card/"));
    assert!(body.contains("name=\"image\""));
}

#[tokio::test]
async fn landscape_upload_returns_card_png() {
    let base = spawn_app().await;

    let response = post_card(&base, image_form(png_bytes(1000, 500), "image/png")).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(header_of(&response, "content-type"), Some("image/png"));
    assert_eq!(
        header_of(&response, "content-disposition"),
        Some("inline; filename=processed_card.png")
    );

    let bytes = response.bytes().await.expect("read body");
    let card = image::load_from_memory(&bytes).expect("response is an image");
    assert_eq!(card.color(), image::ColorType::Rgba8);
    let card = card.to_rgba8();
    assert_eq!(card.dimensions(), (560, 1000));
    assert_eq!(card.get_pixel(280, 500)[3], 255);
    assert_eq!(card.get_pixel(280, 200)[3], 0);
    assert_eq!(*card.get_pixel(20, 500), FRAME);
}

#[tokio::test]
async fn portrait_upload_is_card_sized() {
    let base = spawn_app().await;

    let response = post_card(&base, image_form(png_bytes(200, 800), "image/png")).await;

    assert_eq!(response.status().as_u16(), 200);
    let bytes = response.bytes().await.expect("read body");
    let card = image::load_from_memory(&bytes).expect("response is an image");
    assert_eq!((card.width(), card.height()), (560, 1000));
}

#[tokio::test]
async fn non_image_content_type_is_rejected_with_400() {
    let base = spawn_app().await;

    let response = post_card(&base, image_form(png_bytes(10, 10), "text/plain")).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail_of(response).await, "请上传有效的图片文件");
}

#[tokio::test]
async fn missing_image_field_is_rejected_with_400() {
    let base = spawn_app().await;

    let response = post_card(&base, Form::new().text("comment", "no file here")).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn empty_png_claim_fails_with_500() {
    let base = spawn_app().await;

    let response = post_card(&base, image_form(Vec::new(), "image/png")).await;

    assert_eq!(response.status().as_u16(), 500);
    let detail = detail_of(response).await;
    assert!(detail.starts_with("图片处理失败: "));
    assert!(detail.contains("解码错误"));
}

#[tokio::test]
async fn corrupt_png_claim_fails_with_500() {
    let base = spawn_app().await;
    let mut corrupt = png_bytes(50, 50);
    corrupt.truncate(40);

    let response = post_card(&base, image_form(corrupt, "image/png")).await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(detail_of(response).await.contains("解码错误"));
}

#[tokio::test]
async fn same_upload_yields_identical_bytes() {
    let base = spawn_app().await;
    let upload = png_bytes(333, 777);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let response = post_card(&base, image_form(upload.clone(), "image/png")).await;
        assert_eq!(response.status().as_u16(), 200);
        outputs.push(response.bytes().await.expect("read body"));
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[tokio::test]
async fn body_over_upload_limit_is_rejected_with_413() {
    let base = spawn_app_with(test_renderer(), 1024).await;

    let response = post_card(&base, image_form(vec![0xAB; 8 * 1024], "image/png")).await;

    assert_eq!(response.status().as_u16(), 413);
    assert!(detail_of(response).await.starts_with("上传内容过大"));
}

#[tokio::test]
async fn decoded_pixel_limit_fails_with_500() {
    let config = CardConfig {
        max_decoded_pixels: 100,
        ..CardConfig::default()
    };
    let base = spawn_app_with(renderer_with(config), 8 * 1024 * 1024).await;

    let response = post_card(&base, image_form(png_bytes(20, 20), "image/png")).await;

    assert_eq!(response.status().as_u16(), 500);
    let detail = detail_of(response).await;
    assert!(detail.starts_with("图片处理失败: "));
    assert!(detail.contains("资源限制"));
}
