use crate::grid::{Bounds, Cell};

/// Everything a renderer needs to draw one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub bounds: Bounds,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: usize,
    pub tick: u64,
}

/// Draws frames handed to it by the game loop
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Plain text board: `H` head, `o` body, `*` food, `.` free
#[derive(Debug, Default)]
pub struct TextRenderer {
    last: String,
    echo: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that also prints every frame to stdout
    pub fn printing() -> Self {
        TextRenderer {
            last: String::new(),
            echo: true,
        }
    }

    /// Last drawn frame
    pub fn output(&self) -> &str {
        &self.last
    }

    pub fn render_to_string(frame: &Frame) -> String {
        let bounds = frame.bounds;
        let mut board = vec!['.'; bounds.cell_count()];

        if let Some(food) = frame.food.filter(|f| bounds.contains(*f)) {
            board[bounds.get_id(food) as usize] = '*';
        }
        for (i, cell) in frame.snake.iter().enumerate() {
            if bounds.contains(*cell) {
                board[bounds.get_id(*cell) as usize] = if i == 0 { 'H' } else { 'o' };
            }
        }

        let mut result = format!("Tick: {}  Score: {}\n", frame.tick, frame.score);
        for row in board.chunks(bounds.cols as usize) {
            result.extend(row.iter());
            result.push('\n');
        }
        result
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.last = Self::render_to_string(frame);
        if self.echo {
            println!("{}", self.last);
        }
    }
}
