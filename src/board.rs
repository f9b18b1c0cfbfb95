use crate::grid::Pos;

/// Cell size the sketch board uses when none is given, in pixels.
pub const DEFAULT_CELL_SIZE: f32 = 20.0;

/// What a board cell is currently marked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Empty,
    Start,
    Goal,
    Wall,
}

/// Which of the two endpoint slots are taken, threaded through click
/// handling instead of living in globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementState {
    pub start_placed: bool,
    pub goal_placed: bool,
}

/// The freehand sketch surface: a blank board where clicks lay out a maze
/// before any search exists.
///
/// The first click on an empty cell places the start, the second the goal,
/// and every later one a wall. Clicking a marked cell clears it and frees
/// whichever endpoint slot it held.
pub struct SketchBoard {
    cols: usize,
    rows: usize,
    cell_size: f32,
    marks: Vec<Mark>,
    placement: PlacementState,
}

impl SketchBoard {
    /// Board over a pixel area at a fixed cell size; fractional trailing
    /// space is not part of the board.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cols = (width / cell_size).floor() as usize;
        let rows = (height / cell_size).floor() as usize;
        SketchBoard {
            cols,
            rows,
            cell_size,
            marks: vec![Mark::Empty; cols * rows],
            placement: PlacementState::default(),
        }
    }

    /// Apply one click and return the cell's new mark, or `None` for a
    /// click outside the board.
    pub fn handle_click(&mut self, px: f32, py: f32) -> Option<Mark> {
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px / self.cell_size) as usize;
        let row = (py / self.cell_size) as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let index = row * self.cols + col;
        let mark = match self.marks[index] {
            Mark::Empty => {
                if !self.placement.start_placed {
                    self.placement.start_placed = true;
                    Mark::Start
                } else if !self.placement.goal_placed {
                    self.placement.goal_placed = true;
                    Mark::Goal
                } else {
                    Mark::Wall
                }
            }
            Mark::Start => {
                self.placement.start_placed = false;
                Mark::Empty
            }
            Mark::Goal => {
                self.placement.goal_placed = false;
                Mark::Empty
            }
            Mark::Wall => Mark::Empty,
        };
        self.marks[index] = mark;
        Some(mark)
    }

    pub fn mark(&self, col: usize, row: usize) -> Mark {
        self.marks[row * self.cols + col]
    }

    pub fn placement(&self) -> PlacementState {
        self.placement
    }

    /// Both endpoints placed, so a search could be laid over the board.
    pub fn is_ready(&self) -> bool {
        self.placement.start_placed && self.placement.goal_placed
    }

    pub fn start(&self) -> Option<Pos> {
        self.find(Mark::Start)
    }

    pub fn goal(&self) -> Option<Pos> {
        self.find(Mark::Goal)
    }

    pub fn walls(&self) -> Vec<Pos> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, &mark)| mark == Mark::Wall)
            .map(|(index, _)| Pos::new(index % self.cols, index / self.cols))
            .collect()
    }

    pub fn clear(&mut self) {
        self.marks.fill(Mark::Empty);
        self.placement = PlacementState::default();
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn find(&self, wanted: Mark) -> Option<Pos> {
        self.marks
            .iter()
            .position(|&mark| mark == wanted)
            .map(|index| Pos::new(index % self.cols, index / self.cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SketchBoard {
        SketchBoard::new(400.0, 400.0, DEFAULT_CELL_SIZE)
    }

    #[test]
    fn sizes_from_pixels_and_cell_size() {
        let board = board();
        assert_eq!(board.cols(), 20);
        assert_eq!(board.rows(), 20);
        let trimmed = SketchBoard::new(390.0, 250.0, DEFAULT_CELL_SIZE);
        assert_eq!(trimmed.cols(), 19);
        assert_eq!(trimmed.rows(), 12);
    }

    #[test]
    fn clicks_place_start_then_goal_then_walls() {
        let mut board = board();
        assert_eq!(board.handle_click(10.0, 10.0), Some(Mark::Start));
        assert_eq!(board.handle_click(50.0, 10.0), Some(Mark::Goal));
        assert_eq!(board.handle_click(90.0, 10.0), Some(Mark::Wall));
        assert_eq!(board.handle_click(130.0, 10.0), Some(Mark::Wall));
        assert!(board.is_ready());
        assert_eq!(board.start(), Some(Pos::new(0, 0)));
        assert_eq!(board.goal(), Some(Pos::new(2, 0)));
        assert_eq!(board.walls().len(), 2);
    }

    #[test]
    fn clearing_an_endpoint_frees_its_slot() {
        let mut board = board();
        board.handle_click(10.0, 10.0); // start
        board.handle_click(50.0, 10.0); // goal
        board.handle_click(90.0, 10.0); // wall

        // remove the start; the slot opens up again
        assert_eq!(board.handle_click(10.0, 10.0), Some(Mark::Empty));
        assert!(!board.placement().start_placed);
        assert!(!board.is_ready());

        // the next empty-cell click becomes the new start
        assert_eq!(board.handle_click(130.0, 10.0), Some(Mark::Start));
        assert!(board.is_ready());

        // removing a wall never touches the endpoint slots
        assert_eq!(board.handle_click(90.0, 10.0), Some(Mark::Empty));
        assert!(board.is_ready());
    }

    #[test]
    fn out_of_bounds_clicks_do_nothing() {
        let mut board = board();
        assert_eq!(board.handle_click(-5.0, 10.0), None);
        assert_eq!(board.handle_click(10.0, 500.0), None);
        assert_eq!(board.walls().len(), 0);
        assert!(!board.placement().start_placed);
    }

    #[test]
    fn clear_resets_marks_and_placement() {
        let mut board = board();
        board.handle_click(10.0, 10.0);
        board.handle_click(50.0, 10.0);
        board.handle_click(90.0, 10.0);
        board.clear();
        assert!(!board.is_ready());
        assert_eq!(board.start(), None);
        assert_eq!(board.goal(), None);
        assert!(board.walls().is_empty());
    }
}
