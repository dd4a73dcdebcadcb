mod common;

use approx::assert_abs_diff_eq;
use common::{room, CELL, MAX_DISTANCE};
use gridcaster::{project, Action, Camera, CastStrategy, Config, InputEvent, Player, View};
use std::f32::consts::TAU;

const STRATEGIES: [CastStrategy; 3] = [
    CastStrategy::Exact,
    CastStrategy::FixedStep,
    CastStrategy::TwoStage,
];

fn center_view(strategy: CastStrategy) -> View {
    let mut config = Config::default();
    config.caster.strategy = strategy;
    View::new(
        Camera::new(0.3 * TAU, 1200),
        config.caster.build(MAX_DISTANCE),
    )
}

#[test]
fn test_center_of_room_sees_east_wall() {
    let grid = room();
    let player = Player::new(grid.center(), 0.0);

    for strategy in STRATEGIES {
        let view = center_view(strategy);
        let sample = view.cast(&grid, &player.pose, 600);
        assert_eq!(sample.angle_offset, 0.0);

        // Inner face of the east wall ring is 4 cells away
        let distance = sample.distance().unwrap();
        assert!(
            (distance - 4.0 * CELL).abs() <= MAX_DISTANCE / 200.0,
            "{:?}: {}",
            strategy,
            distance
        );

        let slice = project(distance, view.camera.focal_length, CELL, MAX_DISTANCE).unwrap();
        assert_abs_diff_eq!(
            slice.height * distance,
            CELL * view.camera.focal_length,
            epsilon = 0.05
        );
        assert!(slice.brightness >= 0.1 && slice.brightness <= 1.0);
    }
}

#[test]
fn test_walking_forward_closes_distance() {
    let grid = room();

    for strategy in STRATEGIES {
        let view = center_view(strategy);
        let mut player = Player::new(grid.center(), 0.0);
        let before = view.cast(&grid, &player.pose, 600).distance().unwrap();

        player.handle(InputEvent::press(Action::MoveForward));
        for _ in 0..60 {
            player.tick();
        }
        player.handle(InputEvent::release(Action::MoveForward));
        assert!(!player.tick());

        let after = view.cast(&grid, &player.pose, 600).distance().unwrap();
        assert_abs_diff_eq!(player.pose.position.x, 360.0, epsilon = 1e-3);
        assert!(after < before, "{:?}: {} !< {}", strategy, after, before);
        assert!((after - 3.0 * CELL).abs() <= MAX_DISTANCE / 200.0, "{:?}: {}", strategy, after);
    }
}

#[test]
fn test_frame_from_default_config() {
    let config = Config::default();
    let grid = config.load_grid().unwrap();
    let player = config.spawn_player(&grid);
    let view = config.build_view();

    let mut samples = Vec::new();
    view.cast_frame(&grid, &player.pose, &mut samples);

    assert_eq!(samples.len() as u32, config.view_width());
    assert!(samples.iter().all(|s| s.hit.is_some()));
    assert_eq!(view.caster_name(), "two_stage");
}

#[test]
fn test_parallel_frame_matches_sequential_for_every_strategy() {
    let grid = room();
    let player = Player::new(grid.center(), 1.1);

    for strategy in STRATEGIES {
        let view = center_view(strategy);
        let mut sequential = Vec::new();
        let mut parallel = Vec::new();
        view.cast_frame(&grid, &player.pose, &mut sequential);
        view.cast_frame_parallel(&grid, &player.pose, &mut parallel);
        assert_eq!(sequential, parallel, "{:?}", strategy);
    }
}
