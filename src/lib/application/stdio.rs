use super::conversation::{Conversation, ConversationEvent};
use super::exchange;
use super::transport::ChatTransport;
use crate::config::AppConfig;
use crate::domain::{ChatTurn, ClientRecord, ResultSet};
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

enum LoopControl {
    Continue,
    Exit,
}

pub async fn run<T>(transport: &T, config: &AppConfig) -> Result<(), StdioError>
where
    T: ChatTransport + ?Sized,
{
    let mut stdout = io::stdout();
    run_with(transport, config, BufReader::new(io::stdin()), &mut stdout).await
}

/// Drive the REPL over any line source and sink
pub async fn run_with<T, R, W>(
    transport: &T,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> Result<(), StdioError>
where
    T: ChatTransport + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut conversation = Conversation::new(&config.assistant_label, &config.greeting);
    let mut events = conversation.subscribe();

    print_banner(out, config).await?;
    print_help(out).await?;
    for turn in conversation.turns() {
        print_turn(out, turn).await?;
    }

    loop {
        write_raw(out, "\n> ").await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                write_line(out, "\nStandard input closed. Leaving chat.").await?;
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if matches!(input.chars().next(), Some('/') | Some(':')) {
            let control = handle_command(input, &mut conversation, transport, config, out).await?;
            drain_events(&mut events, &conversation, config, out).await?;
            if let LoopControl::Exit = control {
                break;
            }
        } else {
            info!("Processing STDIO chat request");
            exchange::round_trip(&mut conversation, transport, input, config.response_shape)
                .await;
            drain_events(&mut events, &conversation, config, out).await?;
        }
    }

    out.flush().await?;
    Ok(())
}

async fn handle_command<T, W>(
    input: &str,
    conversation: &mut Conversation,
    transport: &T,
    config: &AppConfig,
    out: &mut W,
) -> Result<LoopControl, StdioError>
where
    T: ChatTransport + ?Sized,
    W: AsyncWrite + Unpin,
{
    let command = input.trim_start_matches(|c| c == '/' || c == ':');
    let name = command
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    debug!(command = %name, "Processing STDIO command");

    match name.as_str() {
        "" => Ok(LoopControl::Continue),
        "help" | "?" => {
            print_help(out).await?;
            Ok(LoopControl::Continue)
        }
        "exit" | "quit" | "q" => {
            write_line(out, "Goodbye.").await?;
            Ok(LoopControl::Exit)
        }
        "clear" | "reset" => {
            conversation.clear();
            write_line(out, "Conversation cleared.").await?;
            Ok(LoopControl::Continue)
        }
        "all" | "clients" => {
            match transport.list_clients().await {
                Ok(records) => conversation.set_result_set(records),
                Err(err) => {
                    error!(%err, "Listing clients failed");
                    conversation.apply_failure(&err);
                }
            }
            Ok(LoopControl::Continue)
        }
        "ping" => {
            match transport.ping().await {
                Ok(()) => write_line(out, "Advisor service is up.").await?,
                Err(err) => write_line(out, &err.user_message()).await?,
            }
            Ok(LoopControl::Continue)
        }
        "config" => {
            match config.to_raw_toml() {
                Ok(raw) => write_line(out, raw.trim_end()).await?,
                Err(err) => write_line(out, &format!("Could not render config: {err}")).await?,
            }
            Ok(LoopControl::Continue)
        }
        other => {
            write_line(
                out,
                &format!("Unknown command '{other}'. Type /help for available commands."),
            )
            .await?;
            Ok(LoopControl::Continue)
        }
    }
}

async fn drain_events<W>(
    events: &mut broadcast::Receiver<ConversationEvent>,
    conversation: &Conversation,
    config: &AppConfig,
    out: &mut W,
) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    let mut table_changed = false;
    while let Ok(event) = events.try_recv() {
        match event {
            ConversationEvent::TurnAppended(turn) if !turn.is_user() => {
                print_turn(out, &turn).await?;
            }
            ConversationEvent::ResultSetReplaced { .. } => table_changed = true,
            _ => {}
        }
    }
    if table_changed {
        if let Some(records) = conversation.result_set() {
            write_line(out, "").await?;
            write_line(out, &format_table(records, config.show_company)).await?;
        }
    }
    out.flush().await?;
    Ok(())
}

/// Render records as a plain-text table with padded columns
pub fn format_table(records: &ResultSet, show_company: bool) -> String {
    if records.is_empty() {
        return "(no rows)".to_string();
    }

    let headers = ClientRecord::headers(show_company);
    let rows: Vec<Vec<&str>> = records.iter().map(|r| r.cells(show_company)).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render(&headers));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        out.push(render(row));
    }
    out.join("\n")
}

async fn print_turn<W>(out: &mut W, turn: &ChatTurn) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    write_line(out, &format!("{}: {}", turn.speaker(), turn.text())).await
}

async fn print_banner<W>(out: &mut W, config: &AppConfig) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    write_line(out, "Client Service Advisor chat").await?;
    write_line(
        out,
        &format!(
            "Backend: {} ({} replies)",
            config.base_url,
            config.response_shape.as_str()
        ),
    )
    .await
}

async fn print_help<W>(out: &mut W) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    write_line(out, "Commands:").await?;
    write_line(out, "  /help    Show this help").await?;
    write_line(out, "  /clear   Clear the conversation").await?;
    write_line(out, "  /all     Load every client into the table").await?;
    write_line(out, "  /ping    Check the advisor service").await?;
    write_line(out, "  /config  Show the active configuration").await?;
    write_line(out, "  /exit    Leave the chat").await
}

async fn write_raw<W>(out: &mut W, text: &str) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

async fn write_line<W>(out: &mut W, text: &str) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    Ok(())
}
