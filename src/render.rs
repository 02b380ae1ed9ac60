use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use maze_game::{Pos, Snapshot, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Enemy,
    Exit,
    Wall,
    Path,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Path,
    color: Color::Reset,
};

/// Redraws only the cells that changed since the previous frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    size: usize,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            size: 0,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, stdout: &mut Stdout, snapshot: &Snapshot, hud: &str) -> io::Result<()> {
        let size = snapshot.grid.size();
        if size != self.size {
            self.size = size;
            self.last = vec![BLANK; size * size];
            self.needs_full = true;
        }

        let needed_h = (size + 2) as u16;
        let needed_w = (size * CELL_W) as u16;
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(0, self.origin_y - 1))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            let hud_x = term_w.saturating_sub(UnicodeWidthStr::width(hud) as u16) / 2;
            stdout.queue(MoveTo(hud_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Print(hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud.to_string();
        }

        for row in 0..size {
            for col in 0..size {
                let cell = cell_for(snapshot, Pos::new(row, col));
                let idx = row * size + col;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, row, col, cell)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()
    }

    fn draw_cell(&self, stdout: &mut Stdout, row: usize, col: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Enemy => "👹",
            Glyph::Exit => "🚪",
            Glyph::Wall => "██",
            Glyph::Path => "  ",
        };
        let x = self.origin_x + (col * CELL_W) as u16;
        let y = self.origin_y + row as u16;
        stdout.queue(MoveTo(x, y))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            stdout.queue(Print(' '))?;
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn cell_for(snapshot: &Snapshot, pos: Pos) -> Cell {
    if pos == snapshot.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == snapshot.enemy {
        return Cell {
            glyph: Glyph::Enemy,
            color: Color::Red,
        };
    }
    if pos == snapshot.exit {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Green,
        };
    }
    match snapshot.grid.cell_at(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Exit => Cell {
            glyph: Glyph::Exit,
            color: Color::Green,
        },
        Tile::Path => BLANK,
    }
}
