use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wireworld::{CellState, Config, Grid, GridPos, ScreenRect, Viewport, VisibleCell};

fn sorted(mut cells: Vec<VisibleCell>) -> Vec<VisibleCell> {
    cells.sort_by_key(|cell| cell.position);
    cells
}

fn block(min: i64, max: i64) -> Grid {
    Grid::from_cells(
        (min..=max).flat_map(|x| (min..=max).map(move |y| ((x, y), CellState::Conductor))),
    )
    .unwrap()
}

#[test]
fn screen_world_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut viewport = Viewport::new(&Config::default());
    for _ in 0..50 {
        viewport.pan_by(DVec2::new(rng.gen_range(-300.0..300.0), rng.gen_range(-300.0..300.0)));
        viewport.zoom_by(rng.gen_range(-3..=3));
        for _ in 0..20 {
            let screen = DVec2::new(rng.gen_range(-50.0..1050.0), rng.gen_range(-50.0..850.0));
            let back = viewport.world_to_screen(viewport.screen_to_world(screen));
            assert!((back - screen).length() < 1e-6, "{} != {}", back, screen);
        }
    }
}

#[test]
fn pan_speed_scales_with_zoom() {
    let mut viewport = Viewport::new(&Config::default());
    viewport.zoom_by(2);
    let zoom = viewport.zoom();
    assert!((zoom - 1.5625).abs() < 1e-12);
    viewport.pan_by(DVec2::new(10.0, -4.0));
    assert!((viewport.pan() - DVec2::new(10.0, -4.0) * zoom).length() < 1e-12);
    assert!(viewport.is_dirty());
}

#[test]
fn zoom_at_keeps_anchor_fixed() {
    let mut viewport = Viewport::new(&Config::default());
    viewport.pan_by(DVec2::new(-123.0, 77.0));
    let anchor = DVec2::new(400.0, 300.0);
    let world = viewport.screen_to_world(anchor);
    assert!(viewport.zoom_at(3, anchor));
    assert!((viewport.screen_to_world(anchor) - world).length() < 1e-9);
    assert!(viewport.zoom_at(-5, anchor));
    assert!((viewport.screen_to_world(anchor) - world).length() < 1e-9);
}

#[test]
fn mouse_maps_to_grid_with_pan_and_zoom() {
    let mut viewport = Viewport::new(&Config::default());
    assert_eq!(viewport.mouse_grid_position(), None);

    viewport.set_mouse_position(Some(DVec2::new(45.0, 5.0)));
    assert_eq!(viewport.mouse_grid_position(), Some((2, 0)));
    assert_eq!(viewport.mouse_position_snapped(), Some(DVec2::new(40.0, 0.0)));

    viewport.pan_by(DVec2::new(-50.0, -50.0));
    assert_eq!(viewport.mouse_grid_position(), Some((-1, -3)));

    viewport.zoom_by(-100);
    // world = screen * 0.25 + pan = (11.25 - 50, 1.25 - 50)
    assert_eq!(viewport.mouse_grid_position(), Some((-2, -3)));
    assert_eq!(
        viewport.highlight_rect(),
        Some(ScreenRect::new(-40.0 + 50.0, -60.0 + 50.0, 20.0, 20.0))
    );

    viewport.set_mouse_position(None);
    assert_eq!(viewport.mouse_grid_position(), None);
    assert_eq!(viewport.highlight_rect(), None);
}

#[test]
fn refresh_recaches_only_when_needed() {
    let config = Config::with_window_size(200, 200).unwrap();
    let mut viewport = Viewport::new(&config);
    let mut grid = block(0, 2);

    assert_eq!(viewport.refresh(&mut grid), 9);
    assert!(!viewport.is_dirty());
    assert_eq!(viewport.refresh(&mut grid), 0);

    grid.place((5, 5), CellState::ElectronHead).unwrap();
    assert_eq!(viewport.refresh(&mut grid), 1);
    assert_eq!(
        grid.get((5, 5)).unwrap().screen_rect(),
        Some(ScreenRect::new(100.0, 100.0, 20.0, 20.0))
    );

    viewport.pan_by(DVec2::new(30.0, 10.0));
    assert_eq!(viewport.refresh(&mut grid), 10);
    assert_eq!(
        grid.get((5, 5)).unwrap().screen_rect(),
        Some(ScreenRect::new(70.0, 90.0, 20.0, 20.0))
    );
}

#[test]
fn zoom_does_not_move_cached_rects() {
    let mut viewport = Viewport::new(&Config::default());
    let mut grid = block(-1, 1);
    viewport.refresh(&mut grid);
    let before = grid.get((1, 1)).unwrap().screen_rect();
    assert!(viewport.zoom_by(-1));
    viewport.refresh(&mut grid);
    assert_eq!(grid.get((1, 1)).unwrap().screen_rect(), before);
}

#[test]
fn visibility_follows_surface() {
    let config = Config::with_window_size(100, 100).unwrap();
    let mut viewport = Viewport::new(&config);
    let mut grid = block(-10, 10);
    viewport.refresh(&mut grid);

    // 100 / 20 cells per side at unit zoom, starting at the origin.
    let visible = viewport.visible_cells(&grid);
    assert_eq!(visible.len(), 25);
    assert!(visible
        .iter()
        .all(|cell| (0..5).contains(&cell.position.0) && (0..5).contains(&cell.position.1)));

    // A half-cell offset exposes one more partial row and column.
    viewport.pan_by(DVec2::new(-10.0, -10.0));
    viewport.refresh(&mut grid);
    assert_eq!(viewport.visible_cells(&grid).len(), 36);

    viewport.zoom_by(100);
    viewport.refresh(&mut grid);
    let positions: Vec<GridPos> = sorted(viewport.visible_cells(&grid))
        .into_iter()
        .map(|cell| cell.position)
        .collect();
    // The 400x400 surface now reaches past the block's right and bottom edges.
    assert_eq!(positions.len(), 12 * 12);
    assert_eq!(positions.first(), Some(&(-1, -1)));
}

#[test]
fn indexed_and_linear_visibility_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grid = Grid::new();
    while grid.len() < 2000 {
        let pos = (rng.gen_range(-300..300), rng.gen_range(-300..300));
        let _ = grid.place(pos, CellState::Conductor);
    }
    let mut viewport = Viewport::new(&Config::default());
    for _ in 0..25 {
        viewport.pan_by(DVec2::new(
            rng.gen_range(-2000.0..2000.0),
            rng.gen_range(-2000.0..2000.0),
        ));
        viewport.zoom_by(rng.gen_range(-4..=4));
        viewport.refresh(&mut grid);
        assert_eq!(
            sorted(viewport.visible_cells(&grid)),
            sorted(viewport.visible_cells_linear(&grid))
        );
    }
}
