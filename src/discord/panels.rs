// Turns core Panels into serenity embeds and sends them.

use crate::core::panels::Panel;
use poise::serenity_prelude::{self as serenity, CreateEmbed};

pub fn to_embed(panel: &Panel) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(panel.title.clone())
        .color(panel.tone.color());

    if let Some(description) = &panel.description {
        embed = embed.description(description.clone());
    }
    if let Some(url) = &panel.thumbnail {
        embed = embed.thumbnail(url.clone());
    }
    if let Some(url) = &panel.image {
        embed = embed.image(url.clone());
    }

    embed.fields(
        panel
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
    )
}

pub async fn send_panel(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    panel: &Panel,
) -> serenity::Result<serenity::Message> {
    channel_id
        .send_message(http, serenity::CreateMessage::new().embed(to_embed(panel)))
        .await
}
