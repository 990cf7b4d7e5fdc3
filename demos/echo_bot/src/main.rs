//! Echo Bot Example
//!
//! A small webhook bot showing how handlers are registered and matched.
//!
//! # Dispatch
//!
//! Every envelope is classified into one event category, then handlers are
//! tried in registration order. The first one whose category and matcher both
//! accept the envelope builds the response; later handlers never see it.
//! The catch-all echo handler is therefore registered last.
//!
//! # Usage
//!
//! ```bash
//! HOOKSMITH_WEBHOOK__VALIDATION_TOKEN=secret cargo run --package echo-bot
//! cargo run --package echo-bot -- --config hooksmith.toml --profile production
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hooksmith::prelude::*;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "echo-bot", about = "A Hooksmith echo bot")]
struct Args {
    /// Configuration file. Searched for in the usual places when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile (development, production, ...).
    #[arg(short, long)]
    profile: Option<String>,
}

// ============================================================================
// Response Builders
// ============================================================================

/// Welcome message with a button menu, sent on the "Get Started" postback.
fn welcome() -> Reply {
    Reply::new().buttons(
        "Welcome! What can I do for you?",
        [
            Button::postback("Show menu", "MENU"),
            Button::web_url("Visit site", "https://example.com"),
        ],
    )
}

fn menu() -> Reply {
    Reply::new()
        .text("Pick a drink")
        .quick_reply(QuickReply::text("Coffee", "ORDER_COFFEE"))
        .quick_reply(QuickReply::text("Tea", "ORDER_TEA"))
}

/// Confirms an order picked from the menu.
fn confirm_order(envelope: &Envelope) -> Option<OutgoingResponse> {
    let drink = match envelope.quick_reply_payload() {
        "ORDER_COFFEE" => "coffee",
        "ORDER_TEA" => "tea",
        _ => return None,
    };
    Reply::new()
        .text(format!("One {drink} coming up!"))
        .reply_to(envelope)
}

fn echo(envelope: &Envelope) -> Option<OutgoingResponse> {
    let text = envelope.message_text();
    if text.is_empty() {
        return None;
    }
    Reply::new().text(text).reply_to(envelope)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = HooksmithRuntime::builder();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &args.profile {
        builder = builder.profile(profile);
    }
    let mut runtime = builder.build()?;

    runtime
        .register(
            on_message_text("hello")
                .ignore_case()
                .name("greeting")
                .reply(Reply::new().text("Hi there! Say 'menu' to order.")),
        )
        .register(
            on_message_pattern(r"^ye+s$")?
                .name("enthusiasm")
                .reply(Reply::new().text("That's the spirit!")),
        )
        .register(on_postback("GET_STARTED").name("welcome").reply(welcome()))
        .register(
            on_postback_pattern(r"^MENU(_\w+)?$")?
                .name("menu_button")
                .reply(menu()),
        )
        .register(on_message_text("menu").ignore_case().name("menu").reply(menu()))
        .register(
            on_quick_reply_pattern(r"^ORDER_(COFFEE|TEA)$")?
                .name("order")
                .reply(confirm_order),
        )
        .register(
            on_category(EventCategory::Location)
                .name("location")
                .reply(|envelope: &Envelope| {
                    let coordinates = envelope.location()?;
                    Reply::new()
                        .text(format!(
                            "You are at {:.4}, {:.4}",
                            coordinates.lat, coordinates.long
                        ))
                        .reply_to(envelope)
                }),
        )
        .register(on_message().name("echo").reply(echo))
        .register(on_any().name("fallback").reply(NoResponse));

    info!(handlers = runtime.handler_count(), "Echo bot ready");

    runtime.run().await?;

    Ok(())
}
