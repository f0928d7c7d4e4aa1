//! `chatbot list`: print one page of conversations.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use chatbot_core::chat::title::truncate_chars;
use chatbot_types::chat::{Conversation, PageRequest};

use crate::state::AppState;

const TITLE_DISPLAY_CHARS: usize = 40;

pub async fn list_conversations(state: &AppState, page: i64, limit: i64, json: bool) -> Result<()> {
    let result = state
        .chat_service
        .list_conversations(PageRequest::new(page, limit))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.list.is_empty() {
        println!();
        println!(
            "  {} No conversations on page {} ({} total).",
            style("i").blue().bold(),
            result.pagination.page,
            result.pagination.total
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", render_table(&result.list));
    println!(
        "  {} page {} · {} per page · {} total",
        style("i").blue().bold(),
        result.pagination.page,
        result.pagination.limit,
        result.pagination.total
    );
    println!();

    Ok(())
}

fn render_table(conversations: &[Conversation]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for conversation in conversations {
        table.add_row(vec![
            Cell::new(conversation.id).fg(Color::Cyan),
            Cell::new(truncate_chars(&conversation.title, TITLE_DISPLAY_CHARS)),
            Cell::new(conversation.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(conversation.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    table
}
