use approx::assert_relative_eq;
use common::{ShapeDescriptor, ShapeError, Transform};
use place::{
    AxisObstacles, BiasOscillator, ColliderDesc, ColliderId, GridConfig, Partition, Place,
    PlaceError, QueryMode, Steer, TileDesc, TileLayerDesc, TraceRect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn small_grid() -> Place {
    Place::new(GridConfig::new(100.0, 100.0)).unwrap()
}

fn square(size: f32) -> ShapeDescriptor {
    ShapeDescriptor::Rect {
        left: 0.0,
        top: 0.0,
        right: size,
        bottom: size,
    }
}

fn point(place: &mut Place, x: f32, y: f32) -> ColliderId {
    place
        .insert(ColliderDesc::new(ShapeDescriptor::Point).at(x, y))
        .unwrap()
}

fn wall_layer(place: &mut Place, x: f32, y: f32) -> ColliderId {
    let layer = place
        .add_tile_layer(TileLayerDesc {
            cgroup: Some("walls".to_owned()),
            tiles: vec![TileDesc {
                transform: Transform::at(x, y),
                shape: square(10.0),
            }],
        })
        .unwrap();
    place.enable_tilemap_collisions(layer, None).unwrap();
    place.tile_layer(layer).unwrap().tiles()[0]
}

fn sorted_cells(cells: &[place::CellKey]) -> Vec<(i32, i32)> {
    let mut cells: Vec<_> = cells.iter().map(|key| (key.x, key.y)).collect();
    cells.sort();
    cells
}

#[test]
fn test_insert_hashes_into_exactly_its_cells() {
    let mut place = small_grid();
    let id = place
        .insert(ColliderDesc::new(square(10.0)).at(130.0, 170.0))
        .unwrap();
    let expected = place.index().cells_for(130.0, 170.0);
    assert_eq!(expected.len(), 4);
    assert_eq!(
        sorted_cells(&place.index().cells_containing(Partition::Entities, id)),
        sorted_cells(&expected)
    );
    assert!(place
        .index()
        .cells_containing(Partition::Tiles, id)
        .is_empty());
    assert_eq!(place.get(id).unwrap().cells(), expected.as_slice());
}

#[test]
fn test_refresh_is_stale_until_called() {
    let mut place = small_grid();
    let id = point(&mut place, 0.0, 0.0);
    assert_eq!(place.refresh(id), Ok(false));

    place.set_position(id, 300.0, 300.0).unwrap();
    assert!(place.get(id).unwrap().is_stale());
    assert!(place
        .trace_point(300.0, 300.0, None, QueryMode::Single)
        .is_empty());

    assert_eq!(place.refresh_moved(), 1);
    assert!(!place.get(id).unwrap().is_stale());
    assert_eq!(
        place
            .trace_point(300.0, 300.0, None, QueryMode::Single)
            .as_slice(),
        &[id]
    );
    assert_eq!(place.refresh_moved(), 0);
}

#[test]
fn test_isolated_probe_is_free() {
    let mut place = small_grid();
    let block = place
        .insert(ColliderDesc::new(square(10.0)).at(0.0, 0.0))
        .unwrap();
    let mover = point(&mut place, 500.0, 500.0);
    assert_eq!(place.occupied(mover, None, None), None);
    assert!(place.free(mover, None, None));
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), None), Some(block));
}

#[test]
fn test_probe_leaves_target_untouched() {
    let mut place = small_grid();
    let mover = point(&mut place, 500.0, 500.0);
    let cells_before = place.get(mover).unwrap().cells().to_vec();
    let probe = place.probe(mover, Some((5.0, 5.0))).unwrap();
    assert_eq!(probe.id(), Some(mover));
    assert_eq!(
        sorted_cells(probe.cells()),
        sorted_cells(&place.index().cells_for(5.0, 5.0))
    );
    drop(probe);
    assert_eq!(place.position(mover), Some((500.0, 500.0)));
    assert_eq!(place.get(mover).unwrap().cells(), cells_before.as_slice());
    assert!(!place.get(mover).unwrap().is_stale());
}

#[test]
fn test_probe_at_current_position_reuses_hashed_cells() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    place.set_position(mover, 300.0, 300.0).unwrap();
    let hashed = place.get(mover).unwrap().cells().to_vec();

    let probe = place.probe(mover, Some((300.0, 300.0))).unwrap();
    assert_eq!(probe.cells().as_slice(), hashed.as_slice());
    drop(probe);

    let probe = place.probe(mover, Some((301.0, 300.0))).unwrap();
    assert_eq!(
        probe.cells().as_slice(),
        place.index().cells_for(301.0, 300.0).as_slice()
    );
}

#[test]
fn test_occupied_falls_back_to_tiles() {
    let mut place = small_grid();
    let tile = wall_layer(&mut place, 0.0, 0.0);
    let mover = point(&mut place, 200.0, 200.0);
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), None), Some(tile));

    let copy = point(&mut place, 5.0, 5.0);
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), None), Some(copy));
    assert_eq!(
        place.occupied_multiple(mover, Some((5.0, 5.0)), None),
        vec![copy, tile]
    );
    assert_eq!(place.copies(mover, Some((5.0, 5.0)), None), Some(copy));
    assert_eq!(place.tiles(mover, Some((5.0, 5.0)), None), Some(tile));
    assert_eq!(
        place.tiles_multiple(mover, Some((5.0, 5.0)), None),
        vec![tile]
    );
}

#[test]
fn test_group_filter() {
    let mut place = small_grid();
    let tile = wall_layer(&mut place, 0.0, 0.0);
    let mover = point(&mut place, 200.0, 200.0);
    point(&mut place, 5.0, 5.0);
    assert_eq!(
        place.occupied(mover, Some((5.0, 5.0)), Some("walls")),
        Some(tile)
    );
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), Some("enemies")), None);
    assert_eq!(
        place.copies_multiple(mover, Some((5.0, 5.0)), Some("walls")),
        Vec::<ColliderId>::new()
    );
    // An empty group name filters nothing.
    assert_eq!(
        place.occupied_multiple(mover, Some((5.0, 5.0)), Some("")).len(),
        2
    );
}

#[test]
fn test_meet_filters_by_template() {
    let mut place = small_grid();
    let coin = place
        .insert(ColliderDesc::new(square(10.0)).template("coin"))
        .unwrap();
    let spike = place
        .insert(ColliderDesc::new(square(10.0)).template("spike"))
        .unwrap();
    let mover = point(&mut place, 300.0, 300.0);
    assert_eq!(place.meet(mover, Some((5.0, 5.0)), "coin"), Some(coin));
    assert_eq!(
        place.meet_multiple(mover, Some((5.0, 5.0)), "spike"),
        vec![spike]
    );
    assert_eq!(place.meet(mover, Some((5.0, 5.0)), "ghost"), None);
    assert_eq!(place.meet(mover, None, "coin"), None);
}

#[test]
fn test_remove_forgets_the_collider() {
    let mut place = small_grid();
    let block = place.insert(ColliderDesc::new(square(10.0))).unwrap();
    let mover = point(&mut place, 300.0, 300.0);
    place.remove(block).unwrap();
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), None), None);
    assert_eq!(place.copies_in_order(), &[mover]);
    assert_eq!(
        place.remove(block),
        Err(PlaceError::UnknownCollider { id: block.index() })
    );
    assert_eq!(place.occupied(block, None, None), None);
}

#[test]
fn test_rejects_invalid_shapes() {
    let mut place = small_grid();
    let result = place.insert(ColliderDesc::new(ShapeDescriptor::Circle { radius: -1.0 }));
    assert!(matches!(
        result,
        Err(PlaceError::InvalidShape(ShapeError::NegativeRadius { .. }))
    ));
    assert!(place.is_empty());
}

#[test]
fn test_scale_change_invalidates_shape() {
    let mut place = small_grid();
    let block = place.insert(ColliderDesc::new(square(10.0))).unwrap();
    assert!(place
        .trace_point(15.0, 15.0, None, QueryMode::Single)
        .is_empty());
    place.set_scale(block, 2.0, 2.0).unwrap();
    assert_eq!(
        place
            .trace_point(15.0, 15.0, None, QueryMode::Single)
            .as_slice(),
        &[block]
    );
}

#[test]
fn test_move_along_stops_before_obstacle() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    let obstacle = point(&mut place, 50.0, 0.0);
    assert_eq!(
        place.move_along(mover, 0.0, 100.0, None, 1.0),
        Ok(Some(obstacle))
    );
    assert_eq!(place.position(mover), Some((49.0, 0.0)));
}

#[test]
fn test_move_along_negative_distance_reverses() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    assert_eq!(place.move_along(mover, 0.0, -10.0, None, 3.0), Ok(None));
    let (x, y) = place.position(mover).unwrap();
    assert_relative_eq!(x, -10.0, epsilon = 1e-4);
    assert_relative_eq!(y, 0.0, epsilon = 1e-4);

    assert_eq!(place.move_along(mover, 90.0, 0.0, None, 1.0), Ok(None));
    assert_eq!(place.position(mover), Some((x, y)));
}

#[test]
fn test_move_by_axes() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    assert_eq!(place.move_by_axes(mover, 0.0, 0.0, None, 1.0), Ok(None));

    let wall = place
        .insert(
            ColliderDesc::new(ShapeDescriptor::Rect {
                left: 0.0,
                top: 0.0,
                right: 10.0,
                bottom: 100.0,
            })
            .at(20.0, -50.0),
        )
        .unwrap();
    assert_eq!(
        place.move_by_axes(mover, 25.5, 7.5, None, 1.0),
        Ok(Some(AxisObstacles {
            x: Some(wall),
            y: None
        }))
    );
    assert_eq!(place.position(mover), Some((19.0, 7.5)));

    assert_eq!(place.move_by_axes(mover, -2.5, -1.25, None, 0.0), Ok(None));
    assert_eq!(place.position(mover), Some((16.5, 6.25)));
}

#[test]
fn test_movement_over_huge_distances_terminates() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    assert_eq!(place.move_along(mover, 0.0, 1.0e8, None, 1.0e6), Ok(None));
    assert_eq!(place.position(mover), Some((1.0e8, 0.0)));

    assert_eq!(
        place.move_by_axes(mover, -1.0e8, 3.0e7, None, 1.0e6),
        Ok(None)
    );
    assert_eq!(place.position(mover), Some((0.0, 3.0e7)));
}

#[test]
fn test_movement_of_unknown_collider_fails() {
    let mut place = small_grid();
    let mover = point(&mut place, 0.0, 0.0);
    place.remove(mover).unwrap();
    assert!(matches!(
        place.move_along(mover, 0.0, 10.0, None, 1.0),
        Err(PlaceError::UnknownCollider { .. })
    ));
    assert!(matches!(
        place.move_by_axes(mover, 1.0, 1.0, None, 1.0),
        Err(PlaceError::UnknownCollider { .. })
    ));
}

#[test]
fn test_go_steers_around_obstacles() {
    let mut place = small_grid();
    let bias = BiasOscillator::new();
    let mover = point(&mut place, 0.0, 0.0);
    assert_eq!(
        place.go(mover, 100.0, 0.0, 10.0, None, &bias),
        Ok(Steer::Moved { direction: 0.0 })
    );
    assert_eq!(place.position(mover), Some((10.0, 0.0)));

    place
        .insert(ColliderDesc::new(square(10.0)).at(20.0, -5.0))
        .unwrap();
    assert_eq!(
        place.go(mover, 100.0, 0.0, 10.0, None, &bias),
        Ok(Steer::Moved { direction: -30.0 })
    );

    place.set_position(mover, 95.0, 0.0).unwrap();
    assert_eq!(
        place.go(mover, 100.0, 0.0, 10.0, None, &bias),
        Ok(Steer::Arrived)
    );
    assert_eq!(place.position(mover), Some((100.0, 0.0)));
}

#[test]
fn test_trace_line_sorts_by_distance() {
    let mut place = small_grid();
    let far = point(&mut place, 300.0, 0.0);
    let near = point(&mut place, 100.0, 0.0);
    let middle = point(&mut place, 200.0, 0.0);
    point(&mut place, 200.0, 50.0);
    assert_eq!(
        place
            .trace_line(0.0, 0.0, 400.0, 0.0, None, QueryMode::Multiple)
            .as_slice(),
        &[near, middle, far]
    );
    assert_eq!(
        place
            .trace_line(0.0, 0.0, 400.0, 0.0, None, QueryMode::Single)
            .as_slice(),
        &[far]
    );
}

#[test]
fn test_short_traces_use_the_grid() {
    let mut place = small_grid();
    let tile = wall_layer(&mut place, 0.0, 0.0);
    let ball = place
        .insert(ColliderDesc::new(ShapeDescriptor::Circle { radius: 5.0 }).at(40.0, 40.0))
        .unwrap();
    assert_eq!(
        place
            .trace_circle(38.0, 38.0, 3.0, None, QueryMode::Multiple)
            .as_slice(),
        &[ball]
    );
    assert_eq!(
        place
            .trace_rect(
                TraceRect::from_corners(12.0, 12.0, 2.0, 2.0),
                Some("walls"),
                QueryMode::Multiple
            )
            .as_slice(),
        &[tile]
    );
    assert!(place
        .trace_polyline(&[(0.0, 0.0)], None, QueryMode::Multiple)
        .is_empty());
}

#[test]
fn test_oversized_trace_rect_matches_brute_force() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(42);
    let mut place = small_grid();
    for _ in 0..300 {
        let shape = if rng.gen_bool(0.5) {
            square(rng.gen_range(1.0..40.0))
        } else {
            ShapeDescriptor::Circle {
                radius: rng.gen_range(1.0..20.0),
            }
        };
        let mut desc = ColliderDesc::new(shape).at(
            rng.gen_range(-200.0..1000.0),
            rng.gen_range(-200.0..1000.0),
        );
        if rng.gen_bool(0.3) {
            desc = desc.group("walls");
        }
        place.insert(desc).unwrap();
    }
    let tiles = (0..50)
        .map(|_| TileDesc {
            transform: Transform::at(rng.gen_range(0.0..800.0), rng.gen_range(0.0..800.0)),
            shape: square(32.0),
        })
        .collect();
    let layer = place
        .add_tile_layer(TileLayerDesc {
            cgroup: Some("walls".to_owned()),
            tiles,
        })
        .unwrap();
    place.enable_tilemap_collisions(layer, None).unwrap();

    let rect = TraceRect::new(100.0, 150.0, 400.0, 300.0);
    let probe = ShapeDescriptor::Rect {
        left: 0.0,
        top: 0.0,
        right: rect.width,
        bottom: rect.height,
    }
    .resolve(&Transform::at(rect.x, rect.y));

    for cgroup in [None, Some("walls")] {
        let expected: Vec<ColliderId> = place
            .copies_in_order()
            .iter()
            .chain(place.tile_layer(layer).unwrap().tiles())
            .copied()
            .filter(|id| {
                let collider = place.get(*id).unwrap();
                cgroup.map_or(true, |group| collider.cgroup() == Some(group))
                    && collisions::shape_shape(&probe, &collider.shape())
            })
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(
            place
                .trace_rect(rect, cgroup, QueryMode::Multiple)
                .into_vec(),
            expected
        );
        assert_eq!(
            place
                .trace_rect(rect, cgroup, QueryMode::Single)
                .first()
                .copied(),
            expected.first().copied()
        );
    }
}

#[test]
fn test_nearest_and_furthest() {
    let mut place = small_grid();
    assert_eq!(place.nearest(0.0, 0.0, "enemy"), None);
    assert_eq!(place.furthest(0.0, 0.0, "enemy"), None);

    let first = place
        .insert(ColliderDesc::new(ShapeDescriptor::Point).at(10.0, 0.0).template("enemy"))
        .unwrap();
    place
        .insert(ColliderDesc::new(ShapeDescriptor::Point).at(-10.0, 0.0).template("enemy"))
        .unwrap();
    let last = place
        .insert(ColliderDesc::new(ShapeDescriptor::Point).at(30.0, 0.0).template("enemy"))
        .unwrap();
    place
        .insert(ColliderDesc::new(ShapeDescriptor::Point).at(1.0, 0.0).template("coin"))
        .unwrap();

    assert_eq!(place.nearest(0.0, 0.0, "enemy"), Some(first));
    assert_eq!(place.nearest_with_distance(0.0, 0.0, "enemy"), Some((first, 10.0)));
    assert_eq!(place.furthest_with_distance(0.0, 0.0, "enemy"), Some((last, 30.0)));
}

#[test]
fn test_tilemap_collisions_enable_once() {
    let mut place = small_grid();
    let layer = place
        .add_tile_layer(TileLayerDesc {
            cgroup: Some("decor".to_owned()),
            tiles: vec![TileDesc {
                transform: Transform::at(0.0, 0.0),
                shape: square(10.0),
            }],
        })
        .unwrap();
    assert!(place.tile_layer(layer).unwrap().tiles().is_empty());
    let mover = point(&mut place, 300.0, 300.0);
    assert_eq!(place.occupied(mover, Some((5.0, 5.0)), None), None);

    place.enable_tilemap_collisions(layer, Some("solid")).unwrap();
    let tile = place.tile_layer(layer).unwrap().tiles()[0];
    assert_eq!(place.get(tile).unwrap().cgroup(), Some("solid"));
    assert_eq!(place.tile_layer(layer).unwrap().cgroup(), Some("solid"));
    assert_eq!(
        place.occupied(mover, Some((5.0, 5.0)), Some("solid")),
        Some(tile)
    );
    assert_eq!(
        place.enable_tilemap_collisions(layer, None),
        Err(PlaceError::TilemapCollisionsAlreadyEnabled {
            layer: layer.index()
        })
    );
}

#[test]
fn test_grid_config_from_ron() {
    let config = GridConfig::from_ron("(grid_x: 64.0, grid_y: 32.0)").unwrap();
    assert_eq!(config, GridConfig::new(64.0, 32.0));
    assert_eq!(
        GridConfig::from_ron("(grid_x: 0.0)"),
        Err(PlaceError::InvalidGridConfig {
            grid_x: 0.0,
            grid_y: 1024.0
        })
    );
    assert!(matches!(
        GridConfig::from_ron("(grid_x: "),
        Err(PlaceError::Config(_))
    ));
    assert!(Place::new(GridConfig::new(-1.0, 10.0)).is_err());
    assert_eq!(Place::default().grid_x(), 1024.0);
}

#[test]
fn test_collider_desc_from_ron() {
    let desc: ColliderDesc = ron::from_str(
        "(transform: (x: 5.0, y: 6.0), shape: Circle(radius: 3.0), cgroup: Some(\"walls\"))",
    )
    .unwrap();
    assert_eq!(desc.transform, Transform::at(5.0, 6.0));
    assert_eq!(desc.shape, ShapeDescriptor::Circle { radius: 3.0 });
    assert_eq!(desc.cgroup.as_deref(), Some("walls"));
    assert_eq!(desc.template, None);
}
