use crate::wordle::{Game, GameStatus, LetterState, MAX_GUESSES, WORD_LENGTH};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::collections::BTreeMap;
use std::io;

const KEYBOARD: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

type Cell = (char, LetterState);

pub fn run_game<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> io::Result<()> {
    let mut message = String::from("Type a five-letter word and press Enter");
    loop {
        terminal.draw(|f| draw(f, game, &message))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char(c) => game.push_letter(c),
                KeyCode::Backspace => game.pop_letter(),
                KeyCode::Enter => message = submit_message(game),
                _ => {}
            }
        }
    }
}

fn submit_message(game: &mut Game) -> String {
    if let Err(err) = game.submit() {
        return err.to_string();
    }
    match (game.status(), game.answer()) {
        (GameStatus::Won, _) => format!("Solved in {}! Esc to quit", game.guesses.len()),
        (GameStatus::Lost, Some(answer)) => format!("The word was {answer}. Esc to quit"),
        _ => format!("{} guesses left", MAX_GUESSES - game.guesses.len()),
    }
}

/// All six rows: submitted guesses, then the row being typed, then blanks.
fn board_rows(game: &Game) -> Vec<[Cell; WORD_LENGTH]> {
    let mut rows: Vec<[Cell; WORD_LENGTH]> = game
        .guesses
        .iter()
        .map(|g| {
            let letters = g.word.letters();
            std::array::from_fn(|i| (letters[i], g.states[i]))
        })
        .collect();

    if rows.len() < MAX_GUESSES {
        let typed: Vec<char> = game.input.chars().collect();
        rows.push(std::array::from_fn(|i| {
            (typed.get(i).copied().unwrap_or(' '), LetterState::None)
        }));
    }
    rows.resize(MAX_GUESSES, [(' ', LetterState::None); WORD_LENGTH]);
    rows
}

fn state_style(state: LetterState) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match state {
        LetterState::Correct => base.fg(Color::Black).bg(Color::Green),
        LetterState::Misplaced => base.fg(Color::Black).bg(Color::Yellow),
        LetterState::Wrong => base.fg(Color::White).bg(Color::DarkGray),
        LetterState::None => base.fg(Color::White),
    }
}

fn draw(f: &mut Frame, game: &Game, message: &str) {
    let board_height = (MAX_GUESSES * 3) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(board_height),
            Constraint::Length(1),
            Constraint::Length(KEYBOARD.len() as u16),
            Constraint::Min(0),
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new("Wordle")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let board_width = (WORD_LENGTH * 5) as u16;
    let board_area = centered(chunks[1], board_width);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); MAX_GUESSES])
        .split(board_area);
    for (row, area) in board_rows(game).iter().zip(row_areas.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(5); WORD_LENGTH])
            .split(*area);
        for ((letter, state), cell) in row.iter().zip(cells.iter()) {
            let letter_box = Paragraph::new(letter.to_string())
                .alignment(Alignment::Center)
                .style(state_style(*state))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(letter_box, *cell);
        }
    }

    f.render_widget(
        Paragraph::new(message).alignment(Alignment::Center),
        chunks[2],
    );

    let hints = game.letter_hints();
    let keyboard: Vec<Line> = KEYBOARD.iter().map(|row| keyboard_line(row, &hints)).collect();
    f.render_widget(
        Paragraph::new(keyboard).alignment(Alignment::Center),
        chunks[3],
    );
}

fn keyboard_line(row: &str, hints: &BTreeMap<char, LetterState>) -> Line<'static> {
    let spans: Vec<Span> = row
        .chars()
        .map(|c| {
            let state = hints.get(&c).copied().unwrap_or_default();
            Span::styled(format!(" {c} "), state_style(state))
        })
        .collect();
    Line::from(spans)
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
