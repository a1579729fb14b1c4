use std::hint::black_box;
use std::time::Instant;

use glam::DVec2;
use wrapworld_common::WorldConfig;
use wrapworld_render::{Camera, VisibleRegion};

fn bench_compute(zoom: f64, iterations: usize) {
    let config = WorldConfig::default();
    let mut camera = Camera::new(1200.0, 800.0);
    camera.set_zoom(zoom);
    camera.update(1.0);

    let start = Instant::now();
    for i in 0..iterations {
        camera.snap_to(DVec2::new(i as f64 * 37.0, i as f64 * 11.0));
        let view = camera.wrapped(&config);
        let _ = black_box(VisibleRegion::compute(black_box(&view), &config));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  compute (zoom={zoom}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_grid_lines(zoom: f64, iterations: usize) {
    let config = WorldConfig::default();
    let mut camera = Camera::new(1200.0, 800.0);
    camera.snap_to(DVec2::splat(config.world_size() / 2.0));
    camera.set_zoom(zoom);
    camera.update(1.0);
    let Some(region) = VisibleRegion::compute(&camera, &config) else {
        return;
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(region.grid_lines());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  grid lines (zoom={zoom}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("visible region");
    bench_compute(1.0, 100_000);
    bench_compute(0.1, 100_000);
    println!("grid");
    bench_grid_lines(1.0, 10_000);
    bench_grid_lines(0.1, 1_000);
}
