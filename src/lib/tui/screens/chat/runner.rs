//! Chat runner - main event loop coordinator

use super::input::{CommandResult, InputAction, handle_input};
use super::messaging::{ResponseEvent, apply_event, handle_command, submit_message};
use super::state::ChatState;
use super::ui::ChatUI;
use crate::application::transport::ChatTransport;
use crate::config::AppConfig;
use crate::tui::terminal::{Tui, init_terminal, restore_terminal};
use crossterm::event;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Run the TUI chat interface
pub async fn run_chat<T>(transport: Arc<T>, config: &AppConfig) -> Result<(), Box<dyn Error>>
where
    T: ChatTransport + ?Sized + 'static,
{
    let mut terminal = init_terminal()?;
    let mut state = ChatState::new(config);

    let result = run_chat_loop(&mut terminal, &mut state, transport, &config.base_url).await;

    restore_terminal()?;
    result
}

/// Internal chat loop
async fn run_chat_loop<T>(
    terminal: &mut Tui,
    state: &mut ChatState,
    transport: Arc<T>,
    base_url: &str,
) -> Result<(), Box<dyn Error>>
where
    T: ChatTransport + ?Sized + 'static,
{
    let (response_tx, mut response_rx) = mpsc::channel::<ResponseEvent>(16);
    let mut max_scroll = 0u16;

    loop {
        terminal.draw(|frame| {
            max_scroll = ChatUI::render(frame, &*state, base_url);
        })?;

        // Replies are applied in arrival order
        while let Ok(event) = response_rx.try_recv() {
            apply_event(state, event);
        }

        let timeout = if state.is_loading() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            let event = event::read()?;
            match handle_input(state, event) {
                InputAction::Exit => return Ok(()),

                InputAction::Submit => {
                    let input = state.take_input();
                    submit_message(state, Arc::clone(&transport), &input, response_tx.clone());
                }

                InputAction::Command(cmd) => {
                    debug!(command = %cmd, "Handling chat command");
                    if handle_command(state, &cmd, &transport, &response_tx) == CommandResult::Exit
                    {
                        return Ok(());
                    }
                }

                InputAction::ScrollUp => state.scroll_up(max_scroll),
                InputAction::ScrollDown => state.scroll_down(max_scroll),
                InputAction::ScrollTop => state.scroll_offset = 0,
                InputAction::ScrollBottom => state.scroll_to_bottom(),
                InputAction::None => {}
            }
        } else {
            state.tick_loading();
        }
    }
}
