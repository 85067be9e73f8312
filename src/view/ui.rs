//! Rendering for the character list screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{Character, StatusCategory};
use crate::view::rows::{CharacterRow, AVATAR_WIDTH};
use crate::view::state::{Content, ViewState};

pub const TITLE: &str = "Personajes Futurama";
pub const LOADING_MESSAGE: &str = "Cargando personajes...";
pub const EMPTY_MESSAGE: &str = "No hay personajes para mostrar.";
const FOOTER: &str = "↑/↓ Navegar | q Salir";

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn danger() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn medium() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn avatar() -> Style {
        Style::default().fg(Color::Cyan)
    }

    /// Background only, so row colors survive the highlight
    pub fn selected() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status(category: StatusCategory) -> Style {
        match category {
            StatusCategory::Success => Self::success(),
            StatusCategory::Danger => Self::danger(),
            StatusCategory::Medium => Self::medium(),
        }
    }
}

/// Draw the whole screen for the given state
pub fn draw(f: &mut Frame, state: &ViewState, list_state: &mut ListState) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_title_bar(f, chunks[0]);

    match state.content() {
        Content::Blank => {}
        Content::Error(message) => draw_error_row(f, chunks[1], message),
        Content::Empty => draw_empty_row(f, chunks[1]),
        Content::List(characters) => draw_character_list(f, chunks[1], characters, list_state),
    }

    let footer = Paragraph::new(FOOTER).style(Styles::medium());
    f.render_widget(footer, chunks[2]);

    if state.is_loading() {
        draw_loading_overlay(f, size);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border()));
    f.render_widget(title, area);
}

fn single_row_area(area: Rect) -> Rect {
    Rect {
        height: area.height.min(3),
        ..area
    }
}

fn draw_error_row(f: &mut Frame, area: Rect, message: &str) {
    let row = Paragraph::new(message).style(Styles::danger()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::danger()),
    );
    f.render_widget(row, single_row_area(area));
}

fn draw_empty_row(f: &mut Frame, area: Rect) {
    let row = Paragraph::new(EMPTY_MESSAGE)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border()));
    f.render_widget(row, single_row_area(area));
}

fn draw_character_list(f: &mut Frame, area: Rect, characters: &[Character], list_state: &mut ListState) {
    let items: Vec<ListItem> = characters
        .iter()
        .map(|character| character_item(&CharacterRow::from_character(character)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border())
                .title(format!("{} personajes", characters.len())),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, list_state);
}

fn character_item(row: &CharacterRow) -> ListItem<'static> {
    let indent = " ".repeat(AVATAR_WIDTH);
    let lines = vec![
        Line::from(vec![
            Span::styled(row.avatar.cell(), Styles::avatar()),
            Span::styled(row.heading.clone(), Styles::heading()),
        ]),
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::raw("Género: "),
            Span::styled(row.gender.clone(), Styles::medium()),
        ]),
        Line::from(vec![
            Span::raw(indent),
            Span::raw("Estado: "),
            Span::styled(
                row.status.clone(),
                Styles::status(row.status_category).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    ListItem::new(lines)
}

fn draw_loading_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 30, area);
    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(LOADING_MESSAGE)
        .alignment(Alignment::Center)
        .style(Styles::title())
        .block(Block::default().borders(Borders::ALL).border_style(Styles::title()));
    f.render_widget(popup, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::state::FETCH_ERROR_MESSAGE;
    use ratatui::{backend::TestBackend, buffer::Cell, Terminal};

    fn render(state: &ViewState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut list_state = ListState::default();
        if !state.characters().is_empty() {
            list_state.select(Some(0));
        }
        terminal
            .draw(|f| draw(f, state, &mut list_state))
            .unwrap();
        terminal
    }

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect()
            })
            .collect()
    }

    fn contains(terminal: &Terminal<TestBackend>, text: &str) -> bool {
        screen_lines(terminal).iter().any(|line| line.contains(text))
    }

    /// Cell where `text` starts on screen
    fn cell_at<'a>(terminal: &'a Terminal<TestBackend>, text: &str) -> &'a Cell {
        let lines = screen_lines(terminal);
        for (y, line) in lines.iter().enumerate() {
            if let Some(byte) = line.find(text) {
                let x = line[..byte].chars().count();
                return terminal.backend().buffer().get(x as u16, y as u16);
            }
        }
        panic!("'{}' not found on screen:\n{}", text, lines.join("\n"));
    }

    fn character(id: i64, name: &str, gender: &str, status: &str, image: Option<&str>) -> Character {
        let mut value = serde_json::json!({
            "id": id,
            "name": name,
            "gender": gender,
            "status": status,
        });
        if let Some(image) = image {
            value["image"] = serde_json::json!(image);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_loading_overlay() {
        let terminal = render(&ViewState::Loading);
        assert!(contains(&terminal, TITLE));
        assert!(contains(&terminal, LOADING_MESSAGE));
        assert!(!contains(&terminal, EMPTY_MESSAGE));
    }

    #[test]
    fn test_error_row() {
        let terminal = render(&ViewState::Failed(FETCH_ERROR_MESSAGE.to_string()));
        assert!(contains(&terminal, FETCH_ERROR_MESSAGE));
        assert!(!contains(&terminal, LOADING_MESSAGE));
        assert!(!contains(&terminal, EMPTY_MESSAGE));
        assert_eq!(cell_at(&terminal, "Error al cargar").fg, Color::Red);
    }

    #[test]
    fn test_empty_row() {
        let terminal = render(&ViewState::Loaded(Vec::new()));
        assert!(contains(&terminal, EMPTY_MESSAGE));
        assert!(!contains(&terminal, "0 personajes"));
        assert!(!contains(&terminal, "Género:"));
    }

    #[test]
    fn test_leela_row() {
        let leela = character(1, "Turanga Leela", "FEMALE", "Alive", Some("http://x/leela.png"));
        let terminal = render(&ViewState::Loaded(vec![leela]));

        assert!(contains(&terminal, "[img]"));
        assert!(contains(&terminal, "Turanga Leela"));
        assert!(contains(&terminal, "Género: FEMALE"));
        assert!(contains(&terminal, "Estado: Alive"));
        assert!(!contains(&terminal, EMPTY_MESSAGE));

        let status = cell_at(&terminal, "Alive");
        assert_eq!(status.fg, Color::Green);
        assert!(status.modifier.contains(Modifier::BOLD));

        assert_eq!(cell_at(&terminal, "FEMALE").fg, Color::Gray);
        assert!(cell_at(&terminal, "Turanga").modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_rows_follow_api_order_with_initials() {
        let characters = vec![
            character(1, "Philip Fry", "MALE", "ALIVE", None),
            character(2, "Bender", "MALE", "DEAD", Some("not-a-url")),
        ];
        let terminal = render(&ViewState::Loaded(characters));
        let lines = screen_lines(&terminal);

        let fry_row = lines.iter().position(|l| l.contains("(PF)  Philip Fry")).unwrap();
        let bender_row = lines.iter().position(|l| l.contains("(B)   Bender")).unwrap();
        assert!(fry_row < bender_row);
        assert!(contains(&terminal, "2 personajes"));
        assert_eq!(cell_at(&terminal, "DEAD").fg, Color::Red);
    }

    #[test]
    fn test_numeric_status_renders_neutral() {
        let hypnotoad: Character = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "Hypnotoad",
            "gender": "OTHER",
            "status": 42
        }))
        .unwrap();
        let terminal = render(&ViewState::Loaded(vec![hypnotoad]));

        assert!(contains(&terminal, "Estado: 42"));
        assert_eq!(cell_at(&terminal, "42").fg, Color::Gray);
    }

    #[test]
    fn test_status_styles() {
        assert_eq!(Styles::status(StatusCategory::Success).fg, Some(Color::Green));
        assert_eq!(Styles::status(StatusCategory::Danger).fg, Some(Color::Red));
        assert_eq!(Styles::status(StatusCategory::Medium).fg, Some(Color::Gray));
    }
}
