use std::sync::Arc;

use serenity::all::{
    ButtonStyle, ChannelId, Context, CreateActionRow, CreateAttachment, CreateButton,
    CreateInteractionResponse, CreateMessage, EventHandler, Http, Interaction, Message, Ready,
};
use serenity::async_trait;
use tracing::{error, info};

use crate::service::{BoxError, OutputSink, PairingService, TRY_AGAIN_NOTICE};

pub const ANOTHER_TIGER_ID: &str = "another_tiger";
const START_COMMAND: &str = "!tiger";
const BUTTON_LABEL: &str = "Which tiger am I today?";

fn follow_up_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(ANOTHER_TIGER_ID)
        .label(BUTTON_LABEL)
        .style(ButtonStyle::Primary)])
}

/// `OutputSink` backed by a Discord channel.
pub struct DiscordSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl OutputSink for DiscordSink {
    async fn send_text(&self, text: &str, offer_another: bool) -> Result<(), BoxError> {
        let mut builder = CreateMessage::new().content(text);
        if offer_another {
            builder = builder.components(vec![follow_up_row()]);
        }
        self.channel_id.send_message(&self.http, builder).await?;
        Ok(())
    }

    async fn send_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), BoxError> {
        let builder = CreateMessage::new()
            .content(caption)
            .add_file(CreateAttachment::bytes(bytes, filename));
        self.channel_id.send_message(&self.http, builder).await?;
        Ok(())
    }
}

pub struct Handler {
    service: Arc<PairingService>,
}

impl Handler {
    pub fn new(service: Arc<PairingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.content.trim() != START_COMMAND {
            return;
        }

        let sink = DiscordSink::new(ctx.http.clone(), msg.channel_id);
        if let Err(e) = self.service.on_start(&sink).await {
            error!("Failed to handle {}: {}", START_COMMAND, e);
            let _ = sink.send_text(TRY_AGAIN_NOTICE, false).await;
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        if component.data.custom_id != ANOTHER_TIGER_ID {
            return;
        }

        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            error!("Failed to acknowledge button press: {}", e);
        }

        let sink = DiscordSink::new(ctx.http.clone(), component.channel_id);
        if let Err(e) = self.service.on_request(&sink).await {
            error!("Failed to serve a tiger: {}", e);
            let _ = sink.send_text(TRY_AGAIN_NOTICE, false).await;
        }
    }
}
