use std::io::{self, stdout};

use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use twenty48::{Action, Grid, Session, GRID_SIZE};

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

const GRID_WIDGET_WIDTH: u16 = CELL_WIDTH * GRID_SIZE as u16;

fn main() -> io::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut session = Session::new();

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|frame| ui(&session, frame))?;
        should_quit = handle_events(&mut session)?;
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn handle_events(session: &mut Session) -> io::Result<bool> {
    if event::poll(std::time::Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind != event::KeyEventKind::Press {
                return Ok(false);
            }
            let action = match key.code {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Left => Some(Action::Move(twenty48::Direction::Left)),
                KeyCode::Right => Some(Action::Move(twenty48::Direction::Right)),
                KeyCode::Up => Some(Action::Move(twenty48::Direction::Up)),
                KeyCode::Down => Some(Action::Move(twenty48::Direction::Down)),
                KeyCode::Char('z') => Some(Action::Undo),
                KeyCode::Char('r') => Some(Action::RandomMove),
                KeyCode::Char('a') => Some(Action::AutoMove),
                KeyCode::Esc => Some(Action::Reset),
                _ => None,
            };
            if let Some(action) = action {
                session.handle_action(action);
            }
        }
    }
    Ok(false)
}

struct GridWidget {
    grid: Grid,
}

impl Widget for GridWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(GRID_WIDGET_WIDTH),
                Constraint::Min(0),
            ])
            .split(area)[1];
        for (i, row) in self.grid.cells().iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let x = area.x + j as u16 * CELL_WIDTH;
                let y = area.y + i as u16 * CELL_HEIGHT;
                let block = Block::new()
                    .border_type(BorderType::Rounded)
                    .borders(Borders::all());
                block.render(
                    Rect {
                        x,
                        y,
                        width: CELL_WIDTH,
                        height: CELL_HEIGHT,
                    },
                    buf,
                );
                if value != 0 {
                    buf.set_string(x + 2, y + 1, format!("{:>4}", value), Style::new());
                }
            }
        }
    }
}

fn ui(session: &Session, frame: &mut Frame) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(CELL_HEIGHT * GRID_SIZE as u16),
            Constraint::Length(2),
            Constraint::Min(0),
        ],
    )
    .split(frame.size());
    frame.render_widget(
        GridWidget {
            grid: *session.grid(),
        },
        main_layout[0],
    );

    let status = if session.won() {
        format!("Score {:>6}   You win! Esc starts a new game", session.score())
    } else if session.lost() {
        format!("Score {:>6}   Game over. Esc starts a new game", session.score())
    } else {
        format!("Score {:>6}", session.score())
    };
    let help = "←↑↓→ slide   z undo   r random   a auto   Esc reset   q quit";
    frame.render_widget(
        Paragraph::new(vec![Line::from(status), Line::from(help)]),
        main_layout[1],
    );
}
