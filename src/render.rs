use rustc_hash::FxHashSet;

use crate::algorithms::CellStatus;
use crate::engine::SearchEngine;
use crate::grid::Grid;
use crate::terrain::TerrainKind;

/// One ASCII frame of the search: legend, column header, then the maze with
/// search bookkeeping overlaid. Start, goal, and the current cell always win
/// over other glyphs; the route beats walls so a path stays visible when an
/// obstacle crosses it.
pub fn render_frame(engine: &SearchEngine) -> String {
    let grid = engine.grid();
    let route: FxHashSet<usize> = if engine.is_finished() && !engine.no_solution() {
        engine.final_path().iter().copied().collect()
    } else {
        engine.current_path().into_iter().collect()
    };
    let current = engine
        .search_state()
        .current
        .filter(|&index| index != grid.goal_index());

    let mut out = String::new();
    out.push_str(
        "Legend: S=start G=goal @=current +=route o=frontier x=visited #=wall \
         .=plain f=forest w=water m=mountain\n",
    );

    out.push_str("   ");
    for col in 0..grid.cols() {
        out.push_str(&format!("{:2}", col % 10));
    }
    out.push('\n');

    for row in 0..grid.rows() {
        out.push_str(&format!("{:2} ", row % 100));
        for col in 0..grid.cols() {
            let index = grid.index_of(col, row);
            out.push(glyph(engine, grid, &route, current, index));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn glyph(
    engine: &SearchEngine,
    grid: &Grid,
    route: &FxHashSet<usize>,
    current: Option<usize>,
    index: usize,
) -> char {
    if index == grid.start_index() {
        return 'S';
    }
    if index == grid.goal_index() {
        return 'G';
    }
    if current == Some(index) {
        return '@';
    }
    if route.contains(&index) {
        return '+';
    }
    if grid.is_wall(index) {
        return '#';
    }
    match engine.search_state().status(index) {
        CellStatus::Frontier => 'o',
        CellStatus::Visited => 'x',
        CellStatus::Unseen => match grid.cell(index).terrain {
            TerrainKind::Plain => '.',
            TerrainKind::Forest => 'f',
            TerrainKind::Water => 'w',
            TerrainKind::Mountain => 'm',
        },
    }
}
