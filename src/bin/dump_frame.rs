/// Headless frame dump
///
/// Casts one frame from the configured start pose and prints every column as JSON,
/// for comparing cast strategies without opening a window

use gridcaster::config::{Config, CONFIG_PATH};
use gridcaster::projection::project;
use gridcaster::RaySample;
use log::{info, warn};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct FrameDump {
    strategy: &'static str,
    columns: u32,
    focal_length: f32,
    cell_size: f32,
    player_x: f32,
    player_y: f32,
    heading: f32,
    hits: usize,
    samples: Vec<ColumnDump>,
}

#[derive(Serialize)]
struct ColumnDump {
    column: u32,
    angle_offset: f32,
    distance: Option<f32>,
    hit_x: Option<f32>,
    hit_y: Option<f32>,
    height: Option<f32>,
    brightness: Option<f32>,
}

fn main() -> gridcaster::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or(CONFIG_PATH);

    let (config, source) = Config::load_or_default(path);
    config.logging.init();
    source.log();

    let grid = config.load_grid()?;
    let player = config.spawn_player(&grid);
    let view = config.build_view();

    let mut samples: Vec<RaySample> = Vec::new();
    view.cast_frame(&grid, &player.pose, &mut samples);
    info!("Cast {} columns with {}", samples.len(), view.caster_name());

    let max_distance = config.max_scan_distance();
    let columns = samples
        .iter()
        .map(|sample| {
            let distance = if config.caster.fisheye_correction {
                sample.perpendicular_distance()
            } else {
                sample.distance()
            };
            let slice = distance.and_then(|d| {
                project(d, view.camera.focal_length, grid.cell_size, max_distance)
                    .map_err(|e| warn!("Column {}: {}", sample.column, e))
                    .ok()
            });

            ColumnDump {
                column: sample.column,
                angle_offset: sample.angle_offset,
                distance: sample.distance(),
                hit_x: sample.hit_point().map(|p| p.x),
                hit_y: sample.hit_point().map(|p| p.y),
                height: slice.map(|s| s.height),
                brightness: slice.map(|s| s.brightness),
            }
        })
        .collect();

    let dump = FrameDump {
        strategy: view.caster_name(),
        columns: view.columns(),
        focal_length: view.camera.focal_length,
        cell_size: grid.cell_size,
        player_x: player.pose.position.x,
        player_y: player.pose.position.y,
        heading: player.pose.heading,
        hits: samples.iter().filter(|s| s.hit.is_some()).count(),
        samples: columns,
    };

    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
