use crate::backend::TaskBackend;
use crate::task::{Task, TaskDraft, TaskUpdate};
use crate::task_board::TaskBoard;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};
use std::io;

const HELP: &str = "a add  e edit  space toggle  d delete  r refresh  ↑↓ move  q quit";

pub fn run_app<T: Backend, B: TaskBackend>(
    terminal: &mut Terminal<T>,
    board: &mut TaskBoard<B>,
    source: &str,
) -> io::Result<()> {
    board.refresh();
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(3),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ])
                .split(f.area());

            let header = Paragraph::new(Line::from(vec![
                Span::styled("Task Manager", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "  {}/{} done  ({})",
                    board.completed_count(),
                    board.tasks.len(),
                    source
                )),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, chunks[0]);

            let items: Vec<ListItem> = board.tasks.iter().map(task_line).collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title("Current Tasks")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
            let mut state = ListState::default();
            if !board.tasks.is_empty() {
                state.select(Some(board.selected));
            }
            f.render_stateful_widget(list, chunks[1], &mut state);

            f.render_widget(
                Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
                chunks[2],
            );
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('a') => {
                    if let Some(draft) = prompt_draft() {
                        board.add_task(draft);
                    }
                    terminal.clear()?;
                }
                KeyCode::Char('e') => {
                    if let Some(id) = board.selected_task().map(|t| t.id) {
                        if let Some(update) = prompt_update() {
                            board.update_task(id, update);
                        }
                        terminal.clear()?;
                    }
                }
                KeyCode::Char(' ') | KeyCode::Enter => board.toggle_selected(),
                KeyCode::Char('d') | KeyCode::Delete => board.delete_selected(),
                KeyCode::Char('r') => board.refresh(),
                KeyCode::Up => board.select_previous(),
                KeyCode::Down => board.select_next(),
                _ => {}
            }
        }
    }
}

fn task_line(task: &Task) -> ListItem<'_> {
    let (mark, name_style) = if task.completed {
        (
            "[x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default().fg(Color::White))
    };
    let mut spans = vec![Span::raw(mark), Span::styled(task.name.as_str(), name_style)];
    if let Some(deadline) = &task.deadline {
        spans.push(Span::styled(
            format!(" (Due: {deadline})"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(description) = &task.description {
        spans.push(Span::styled(
            format!("  {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn prompt_draft() -> Option<TaskDraft> {
    let name = prompt("Task name")?;
    let description = prompt("Description (optional)")?;
    let deadline = prompt("Deadline (optional)")?;
    Some(TaskDraft::from_input(&name, &description, &deadline))
}

/// Blank answers leave the field unchanged.
fn prompt_update() -> Option<TaskUpdate> {
    let keep_blank = |s: String| (!s.is_empty()).then_some(s);
    Some(TaskUpdate {
        name: keep_blank(prompt("New name (blank keeps)")?),
        description: keep_blank(prompt("New description (blank keeps)")?),
        deadline: keep_blank(prompt("New deadline (blank keeps)")?),
        completed: None,
    })
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input);
    enable_raw_mode().ok();
    read.ok().map(|_| input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(task: &Task) -> String {
        format!("{:?}", task_line(task))
    }

    #[test]
    fn test_task_line_shows_state_and_deadline() {
        let mut task = Task {
            id: 1,
            name: "Wash the dishes".into(),
            description: None,
            deadline: Some("8:00".into()),
            completed: false,
            created_at: None,
        };
        let open = line_text(&task);
        assert!(open.contains("[ ] "));
        assert!(open.contains("(Due: 8:00)"));

        task.completed = true;
        assert!(line_text(&task).contains("[x] "));
    }

    #[test]
    fn test_help_lists_every_binding() {
        for key in ["a add", "e edit", "space toggle", "d delete", "r refresh", "q quit"] {
            assert!(HELP.contains(key), "missing {key}");
        }
    }
}
