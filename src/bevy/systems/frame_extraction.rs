//! Frame extraction system
//!
//! Takes the latest frame copied off the GPU, strips row padding, and
//! publishes it to the page through the shared frame buffer.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};
use std::time::Instant;

use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::{performance::*, RENDER_HEIGHT, RENDER_WIDTH};

impl FrameTimings {
    /// Record a frame time, keeping the last [`FRAME_TIMING_SAMPLES`]
    pub fn record(&mut self, millis: f64) {
        self.frame_times.push(millis);
        if self.frame_times.len() > FRAME_TIMING_SAMPLES {
            self.frame_times.remove(0);
        }
    }

    /// (average, min, max) in milliseconds, `None` before the first sample
    pub fn summary(&self) -> Option<(f64, f64, f64)> {
        if self.frame_times.is_empty() {
            return None;
        }
        let avg = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        let min = self.frame_times.iter().cloned().fold(f64::MAX, f64::min);
        let max = self.frame_times.iter().cloned().fold(0.0f64, f64::max);
        Some((avg, min, max))
    }
}

/// Extract and process frame data from the render pipeline
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(b) = buffer else { return };

    // Wait for the island to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("[Bevy] Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    let now = Instant::now();
    if now.duration_since(frame_limiter.last_frame_time) < frame_limiter.min_frame_interval {
        // Too early for the next frame
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    let frame_start = Instant::now();

    // Keep only the most recent frame
    let mut image_data = Vec::new();
    while let Ok(data) = receiver.try_recv() {
        image_data = data;
    }
    let receive_time = frame_start.elapsed().as_secs_f64() * 1000.0;

    let process_start = Instant::now();
    let Some(rgba) = remove_row_padding(&image_data, RENDER_WIDTH, RENDER_HEIGHT) else {
        return;
    };
    let process_time = process_start.elapsed().as_secs_f64() * 1000.0;
    let data_size = rgba.len();

    let Ok(mut guard) = b.0 .0.lock() else {
        return;
    };
    *guard = Some(rgba);
    drop(guard);
    count.0 += 1;

    let total_time = frame_start.elapsed().as_secs_f64() * 1000.0;
    timings.record(total_time);
    let Some((avg_time, min_time, max_time)) = timings.summary() else {
        return;
    };

    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = perf_res.0 .0.lock() {
            stats.gpu_transfer_ms = receive_time;
            stats.data_processing_ms = process_time;
            stats.frame_encoding_ms = total_time;
            stats.frame_count = count.0;
            stats.data_size_kb = data_size as f64 / 1024.0;
            stats.bevy_fps = if avg_time > 0.0 { 1000.0 / avg_time } else { 0.0 };
        }
    }

    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        info!(
            "[Bevy] Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Total: {:.2}ms | Avg: {:.2}ms (Min: {:.2}ms, Max: {:.2}ms) | Size: {:.1}KB",
            count.0,
            receive_time,
            process_time,
            total_time,
            avg_time,
            min_time,
            max_time,
            data_size as f64 / 1024.0
        );
        timings.last_print_time = current_time;
    }
}

/// Remove GPU buffer row padding alignment, returning pure RGBA data
fn remove_row_padding(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    if data.is_empty() {
        return None;
    }

    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);

    let rgba_data = if row_bytes == aligned_row_bytes {
        data.to_vec()
    } else {
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes.min(row.len())])
            .cloned()
            .collect()
    };

    Some(rgba_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_copy_yields_nothing() {
        assert_eq!(remove_row_padding(&[], 4, 4), None);
    }

    #[test]
    fn padded_rows_are_trimmed() {
        // 3 px wide rows are 12 bytes, padded up to the copy alignment
        let aligned = RenderDevice::align_copy_bytes_per_row(12);
        assert!(aligned > 12);
        let mut data = Vec::new();
        for row in 0..2u8 {
            data.extend(std::iter::repeat(row + 1).take(12));
            data.extend(std::iter::repeat(0xFF).take(aligned - 12));
        }

        let rgba = remove_row_padding(&data, 3, 2).unwrap();
        assert_eq!(rgba.len(), 24);
        assert!(rgba[..12].iter().all(|&b| b == 1));
        assert!(rgba[12..].iter().all(|&b| b == 2));
    }

    #[test]
    fn timings_keep_a_bounded_window() {
        let mut timings = FrameTimings::default();
        assert_eq!(timings.summary(), None);

        for i in 0..(FRAME_TIMING_SAMPLES + 5) {
            timings.record(i as f64);
        }
        assert_eq!(timings.frame_times.len(), FRAME_TIMING_SAMPLES);

        let (avg, min, max) = timings.summary().unwrap();
        assert_eq!(min, 5.0);
        assert_eq!(max, (FRAME_TIMING_SAMPLES + 4) as f64);
        assert!(avg > min && avg < max);
    }
}
