//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use bevy::log::debug;
use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use tauri::http::Response as HttpResponse;

use crate::config::{RENDER_WIDTH, RENDER_HEIGHT, compression::JPEG_QUALITY};
use super::shared_state::{SharedFrameBuffer, SharedIslandStatus, SharedPerfStats};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame (~50-100KB)
/// - `frame.raw`: Raw RGBA frame (~1.8MB)
/// - `stats`: Performance statistics as JSON
/// - `status`: Island rotation status as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
    status: &SharedIslandStatus,
) -> Response {
    let resource = uri_path.trim_start_matches('/');

    debug!("[Protocol] Resolved resource: {}", resource);

    let result = match resource {
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),
        "frame.raw" => handle_raw_frame(buffer),
        "stats" => handle_stats(perf_stats),
        "status" => handle_status(status),
        _ => Ok(text_response(404, "Not Found")),
    };

    result.unwrap_or_else(|message| text_response(500, &message))
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> Result<Response, String> {
    let guard = buffer.0.lock().map_err(|e| e.to_string())?;

    let Some(rgba_data) = &*guard else {
        return Ok(text_response(503, "Frame not ready"));
    };

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba_data.clone())
            .ok_or("Frame size does not match render target")?;
    drop(guard);

    // Convert RGBA to RGB for JPEG (no alpha channel)
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY)
        .write_image(
            rgb_img.as_raw(),
            RENDER_WIDTH,
            RENDER_HEIGHT,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| e.to_string())?;

    frame_response("image/jpeg", jpeg_data)
}

/// Handle raw RGBA frame request
fn handle_raw_frame(buffer: &SharedFrameBuffer) -> Result<Response, String> {
    let guard = buffer.0.lock().map_err(|e| e.to_string())?;

    match &*guard {
        Some(rgba_data) => frame_response("application/octet-stream", rgba_data.clone()),
        None => Ok(text_response(503, "Frame not ready")),
    }
}

/// Handle performance stats request
fn handle_stats(perf_stats: &SharedPerfStats) -> Result<Response, String> {
    let guard = perf_stats.0.lock().map_err(|e| e.to_string())?;
    let json = serde_json::to_vec(&*guard).map_err(|e| e.to_string())?;
    json_response(json)
}

/// Handle island status request
fn handle_status(status: &SharedIslandStatus) -> Result<Response, String> {
    let guard = status.0.lock().map_err(|e| e.to_string())?;
    let json = serde_json::to_vec(&*guard).map_err(|e| e.to_string())?;
    json_response(json)
}

fn frame_response(content_type: &str, body: Vec<u8>) -> Result<Response, String> {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .map_err(|e| e.to_string())
}

fn json_response(body: Vec<u8>) -> Result<Response, String> {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body)
        .map_err(|e| e.to_string())
}

fn text_response(status: u16, message: &str) -> Response {
    let mut response = HttpResponse::new(message.as_bytes().to_vec());
    *response.status_mut() = tauri::http::StatusCode::from_u16(status)
        .unwrap_or(tauri::http::StatusCode::INTERNAL_SERVER_ERROR);
    response.headers_mut().insert(
        tauri::http::header::CONTENT_TYPE,
        tauri::http::HeaderValue::from_static("text/plain"),
    );
    response
}
