//! NFT Indexer TUI - actor-based ERC-721 viewer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async API retrieval

mod app;
mod constants;
mod ipfs;
mod messages;
mod models;
mod network;
mod storage;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::{AppActor, AppState};
use messages::ui_events::{key_to_ui_event, InputMode, Phase};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use network::NetworkActor;
use storage::Storage;
use ui::{card_lines, short_address, spinner_frame};

const GRID_COLUMNS: usize = 4;
const CARD_HEIGHT: u16 = 5;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "nft-indexer.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Persisted config and recent fetches
    let storage = Storage::new();

    // Spawn network actor
    let network_actor = NetworkActor::new(storage.config.clone(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(storage), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick = 0usize;

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.phase,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, tick: usize) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, main_chunks[0]);

    match state.phase {
        Phase::Idle => draw_idle_form(f, state, main_chunks[1]),
        Phase::Loading => draw_loading(f, tick, main_chunks[1]),
        Phase::Loaded => draw_card_grid(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "NFT Indexer",
        Style::default().fg(Color::Cyan).bold(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);

    // Wallet badge in the top-right corner
    if state.wallet_connected {
        let badge = format!(" {} ", short_address(&state.address));
        let width = (badge.chars().count() as u16).min(area.width);
        let badge_area = Rect {
            x: area.right().saturating_sub(width),
            y: area.y,
            width,
            height: area.height.min(1),
        };
        let widget =
            Paragraph::new(badge).style(Style::default().fg(Color::White).bg(Color::DarkGray));
        f.render_widget(widget, badge_area);
    }
}

fn draw_idle_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Address input
            Constraint::Min(0),    // Actions
        ])
        .split(area);

    let prompt =
        Paragraph::new("Plug in an address and this terminal will return all of its NFTs!")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
    f.render_widget(prompt, chunks[0]);

    let editing = state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input = Paragraph::new(state.address.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Get all the ERC-721 tokens of this address "),
    );
    f.render_widget(input, chunks[1]);

    // Cursor
    if editing {
        let max_x = chunks[1].x + chunks[1].width.saturating_sub(2);
        let cursor_x = (chunks[1].x + state.cursor_position as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[1].y + 1));
    }

    let actions = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  f ", Style::default().fg(Color::Blue).bold()),
            Span::raw(" Fetch NFTs"),
        ]),
        Line::raw("      OR"),
        Line::from(vec![
            Span::styled("  c ", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" Connect Wallet"),
        ]),
    ]);
    f.render_widget(actions, chunks[2]);
}

fn draw_loading(f: &mut Frame, tick: usize, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Gray).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            spinner_frame(tick),
            Style::default().fg(Color::Cyan).bold(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_card_grid(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let heading = format!("Here are your NFTs ({}):", state.cards.len());
    f.render_widget(
        Paragraph::new(heading)
            .alignment(Alignment::Center)
            .style(Style::default().bold()),
        chunks[0],
    );

    if state.cards.is_empty() {
        let empty = Paragraph::new("Nothing to show.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let grid = chunks[1];
    let rows: Vec<_> = state.cards.chunks(GRID_COLUMNS).collect();
    let first_row = (state.grid_scroll as usize).min(rows.len().saturating_sub(1));

    for (i, row) in rows.iter().skip(first_row).enumerate() {
        let y = grid.y + (i as u16) * CARD_HEIGHT;
        if y + CARD_HEIGHT > grid.bottom() {
            break;
        }
        let row_area = Rect {
            x: grid.x,
            y,
            width: grid.width,
            height: CARD_HEIGHT,
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(row_area);

        for (card, cell) in row.iter().zip(columns.iter()) {
            let content = Paragraph::new(card_lines(card, state.local_gateway.as_deref()))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Blue)),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(content, *cell);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:fetch | arrows:move "
    } else {
        match state.phase {
            Phase::Idle => " e:edit address | f:fetch | c:connect wallet | ↑/↓:recent | ?:help | q:quit ",
            Phase::Loading => " fetching tokens... | q:quit ",
            Phase::Loaded if state.wallet_connected => " d:disconnect | ↑/↓:scroll | ?:help | q:quit ",
            Phase::Loaded => " n:new fetch | ↑/↓:scroll | ?:help | q:quit ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 NFT INDEXER TUI - Keyboard Shortcuts

 ADDRESS
   e / Enter          Edit the address field
   ESC                Stop editing
   Up / Down          Cycle recent addresses

 FETCHING
   f / Enter          Fetch NFTs for the address
   c                  Connect wallet (adopt its first account)

 RESULTS
   Up / Down          Scroll the card grid
   n                  New fetch (clears results)
   d                  Disconnect wallet (clears results)

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

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
