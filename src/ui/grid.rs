// ============================================================================
// Grid - Rendu de la vue
// ============================================================================
// Dessine la View produite par ui::view :
// - Loading / Error : texte centré, plein écran (repli sur plusieurs lignes)
// - Cards : header, grille responsive de cartes, footer
//
// CONCEPTS RATATUI :
// 1. Layout : découpage header / contenu / footer, puis lignes et colonnes
// 2. Block + Paragraph : une carte = un bloc bordé avec 6 lignes de texte
// 3. Style : couleur selon la Tone de la variation
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::card::{StockCard, Tone};
use crate::ui::view::{view, View, EMPTY_TEXT, GRID_TITLE, LOADING_TEXT};

/// Hauteur d'une carte : 6 lignes de texte + 2 bordures
pub const CARD_HEIGHT: u16 = 8;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.size();

    match view(app.state(), app.locale()) {
        View::Loading => render_centered(frame, area, LOADING_TEXT, Style::default()),
        View::Error(text) => render_centered(frame, area, &text, Style::default().fg(Color::Red)),
        View::Cards(cards) => render_cards(frame, app, area, &cards),
    }
}

// ============================================================================
// Grille responsive
// ============================================================================
// Points de rupture en cellules de terminal : 1 colonne sur un terminal
// étroit, jusqu'à 4 sur un terminal large.
// ============================================================================

/// Nombre de colonnes pour une largeur donnée
pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..=59 => 1,
        60..=89 => 2,
        90..=119 => 3,
        _ => 4,
    }
}

/// Zone disponible pour la grille dans un écran de taille `area`
fn grid_area(area: Rect) -> Rect {
    create_layout(area)[1]
}

/// Dernière rangée atteignable par le défilement
///
/// Appelée par la boucle principale avant chaque rendu pour borner
/// App::scroll_row().
pub fn max_scroll_row(area: Rect, card_count: usize) -> usize {
    let grid = grid_area(area);
    let columns = columns_for_width(grid.width);
    let total_rows = card_count.div_ceil(columns);
    let visible_rows = visible_rows(grid);
    total_rows.saturating_sub(visible_rows)
}

/// Nombre de rangées de cartes sur un écran (pas de PgUp / PgDn)
pub fn page_rows(area: Rect) -> usize {
    visible_rows(grid_area(area))
}

fn visible_rows(grid: Rect) -> usize {
    usize::from(grid.height / CARD_HEIGHT).max(1)
}

/// Header, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area)
        .to_vec()
}

/// Texte centré au milieu de l'écran, replié s'il dépasse la largeur
fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let height = wrapped_line_count(text, area.width).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let text_area = Rect::new(area.x, top, area.width, height);

    let paragraph = Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, text_area);
}

/// Nombre de lignes occupées par `text` replié mot à mot sur `width`
///
/// Même découpage glouton que Wrap : coupure aux espaces, un mot plus
/// long que la largeur est coupé en morceaux.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines: usize = 1;
    let mut current = 0;

    for word in text.split_whitespace() {
        let mut len = word.chars().count();

        let needed = if current == 0 { len } else { current + 1 + len };
        if needed <= width {
            current = needed;
            continue;
        }

        if current > 0 {
            lines += 1;
        }
        while len > width {
            len -= width;
            lines += 1;
        }
        current = len;
    }

    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect, cards: &[StockCard]) {
    let chunks = create_layout(area);

    render_header(frame, chunks[0]);

    if cards.is_empty() {
        render_centered(frame, chunks[1], EMPTY_TEXT, Style::default().fg(Color::Gray));
    } else {
        render_grid(frame, app, chunks[1], cards);
    }

    render_footer(frame, chunks[2], cards.len());
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = Paragraph::new(Line::from(Span::styled(
        GRID_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

/// Dessine les rangées visibles, à partir de la rangée de défilement
fn render_grid(frame: &mut Frame, app: &App, area: Rect, cards: &[StockCard]) {
    let columns = columns_for_width(area.width);
    let visible = visible_rows(area);
    let first_row = app.scroll_row().min(max_scroll_row(frame.size(), cards.len()));

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible])
        .split(area);

    let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (row_area, row_cards) in row_areas
        .iter()
        .zip(cards.chunks(columns).skip(first_row))
    {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);

        for (cell, card) in cells.iter().zip(row_cards) {
            render_card(frame, *cell, card);
        }
    }
}

/// Couleur associée à une Tone
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::Gray,
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &StockCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = vec![
        Line::from(Span::styled(
            card.ticker.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.company_name.as_str(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(card.sector.as_str(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(card.price.as_str(), Style::default().fg(Color::Green))),
        Line::from(Span::styled(
            card.change.as_str(),
            Style::default().fg(tone_color(card.change_tone)),
        )),
        Line::from(Span::styled(
            format!("Updated: {}", card.updated),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, count: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = Line::from(vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit  "),
        Span::styled("[↑↓ / j k]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Scroll  "),
        Span::styled(format!("{} stocks", count), Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(shortcuts)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
