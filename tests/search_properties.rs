use gridwalk::algorithms::Algorithm;
use gridwalk::engine::SearchEngine;
use gridwalk::settings::{Adjacency, Settings};
use gridwalk::terrain::TerrainThresholds;
use pathfinding::prelude::bfs;
use proptest::prelude::*;

const CELL: f32 = 10.0;

/// All-plain terrain so path costs depend only on the route shape.
fn plain_settings(cols: usize, rows: usize, adjacency: Adjacency) -> Settings {
    Settings {
        cols,
        rows,
        wall_probability: 0.0,
        adjacency,
        dynamic_obstacles: false,
        terrain_thresholds: TerrainThresholds {
            plain: 1.0,
            forest: 1.0,
            water: 1.0,
        },
        ..Settings::default()
    }
}

/// Engine over a hand-laid maze: open plain grid plus clicked walls, with
/// cells sized so `(col, row)` maps to a 10px square.
fn engine_with_walls(
    cols: usize,
    rows: usize,
    adjacency: Adjacency,
    algorithm: Algorithm,
    walls: &[(usize, usize)],
) -> SearchEngine {
    let area = (cols as f32 * CELL, rows as f32 * CELL);
    let mut engine = SearchEngine::with_area(
        plain_settings(cols, rows, adjacency),
        area,
        algorithm,
        Some(1),
    )
    .unwrap();
    for &(col, row) in walls {
        engine.handle_click(col as f32 * CELL + CELL / 2.0, row as f32 * CELL + CELL / 2.0);
    }
    engine
}

fn budget(engine: &SearchEngine) -> usize {
    engine.settings().cols * engine.settings().rows * 4
}

/// Start-to-goal reachability over the static maze, checked independently
/// of the engine's own search.
fn flood_fill_reachable(engine: &SearchEngine) -> bool {
    let grid = engine.grid();
    let goal = grid.goal_index();
    bfs(
        &grid.start_index(),
        |&index| {
            grid.neighbors(index)
                .iter()
                .filter(|&&n| !grid.is_wall(n))
                .copied()
                .collect::<Vec<_>>()
        },
        |&index| index == goal,
    )
    .is_some()
}

#[test]
fn every_algorithm_squeezes_through_a_wall_gap() {
    // wall column at col 2 with its only opening at row 0
    let walls = [(2, 1), (2, 2), (2, 3), (2, 4)];
    for &algorithm in &Algorithm::ALL {
        let mut engine = engine_with_walls(5, 5, Adjacency::Four, algorithm, &walls);
        let max = budget(&engine);
        engine.run(max);

        assert!(engine.is_finished(), "{} did not finish", algorithm);
        assert!(!engine.no_solution(), "{} found no route", algorithm);

        let path = engine.final_path();
        let gap = engine.grid().index_of(2, 0);
        assert!(
            path.contains(&gap),
            "{} must route through the gap at (2, 0)",
            algorithm
        );
        assert_eq!(path.first(), Some(&engine.grid().start_index()));
        assert_eq!(path.last(), Some(&engine.grid().goal_index()));
    }
}

#[test]
fn every_algorithm_reports_no_solution_on_a_severed_maze() {
    let walls = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
    for &algorithm in &Algorithm::ALL {
        let mut engine = engine_with_walls(5, 5, Adjacency::Four, algorithm, &walls);
        let max = budget(&engine);
        engine.run(max);

        assert!(engine.is_finished(), "{} did not finish", algorithm);
        assert!(engine.no_solution(), "{} claims a route exists", algorithm);
        assert!(engine.final_path().is_empty());
    }
}

#[test]
fn routes_step_between_adjacent_cells_only() {
    for &algorithm in &Algorithm::ALL {
        let mut engine =
            SearchEngine::new(plain_settings(8, 6, Adjacency::Eight), algorithm, Some(4)).unwrap();
        engine.run(budget(&engine));
        assert!(!engine.no_solution());

        let grid = engine.grid();
        for pair in engine.final_path().windows(2) {
            let a = grid.pos(pair[0]);
            let b = grid.pos(pair[1]);
            assert_eq!(
                a.chebyshev(&b),
                1,
                "{} produced a non-adjacent hop {:?} -> {:?}",
                algorithm,
                a,
                b
            );
        }
    }
}

#[test]
fn dfs_finishes_within_one_visit_per_cell_on_open_grids() {
    let mut engine =
        SearchEngine::new(plain_settings(6, 6, Adjacency::Eight), Algorithm::Dfs, Some(9)).unwrap();
    engine.run(36);
    assert!(engine.is_finished());
    assert!(engine.nodes_visited() <= 36);
}

#[test]
fn weighted_searches_agree_on_uniform_terrain() {
    // all-plain cells cost 1 apiece, so the cheapest route is also the
    // shortest one and both optimal algorithms must land on its cost
    for (adjacency, expected) in [(Adjacency::Eight, 6.0), (Adjacency::Four, 10.0)] {
        for algorithm in [Algorithm::UniformCost, Algorithm::AStar] {
            let mut engine =
                SearchEngine::new(plain_settings(7, 5, adjacency), algorithm, Some(2)).unwrap();
            engine.run(budget(&engine));
            assert!(!engine.no_solution());
            assert!(
                (engine.total_path_cost() - expected).abs() < 1e-9,
                "{} on {:?} grid cost {} instead of {}",
                algorithm,
                adjacency,
                engine.total_path_cost(),
                expected
            );
        }
    }
}

#[test]
fn identical_seeds_replay_identical_searches() {
    let settings = Settings {
        cols: 10,
        rows: 10,
        wall_probability: 0.2,
        num_dynamic_obstacles: 8,
        ..Settings::default()
    };
    let mut a = SearchEngine::new(settings.clone(), Algorithm::AStar, Some(77)).unwrap();
    let mut b = SearchEngine::new(settings, Algorithm::AStar, Some(77)).unwrap();

    a.run(400);
    b.run(400);

    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.steps(), b.steps());
    assert_eq!(a.nodes_visited(), b.nodes_visited());
    assert_eq!(a.final_path(), b.final_path());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bfs_agrees_with_flood_fill_reachability(
        seed in any::<u64>(),
        cols in 3usize..=9,
        rows in 3usize..=9,
    ) {
        let mut settings = plain_settings(cols, rows, Adjacency::Eight);
        settings.wall_probability = 0.35;
        let mut engine = SearchEngine::new(settings, Algorithm::Bfs, Some(seed)).unwrap();

        let reachable = flood_fill_reachable(&engine);
        engine.run(cols * rows * 4);

        prop_assert!(engine.is_finished());
        prop_assert_eq!(engine.no_solution(), !reachable);
    }

    #[test]
    fn searches_never_visit_more_cells_than_exist(
        seed in any::<u64>(),
        wall_probability in 0.0f64..0.6,
    ) {
        let mut settings = plain_settings(8, 8, Adjacency::Eight);
        settings.wall_probability = wall_probability;
        let mut engine = SearchEngine::new(settings, Algorithm::GreedyBestFirst, Some(seed)).unwrap();
        engine.run(8 * 8 * 4);

        prop_assert!(engine.is_finished());
        prop_assert!(engine.nodes_visited() <= 64);
        prop_assert!(engine.visited_percentage() <= 100.0);
    }
}
