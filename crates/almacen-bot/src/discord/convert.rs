//! View model to Discord builders.

use almacen_application::view::{Button, ButtonStyle, PriceForm, View};
use serenity::all::{
    ButtonStyle as DiscordButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, CreateInputText, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, CreateModal, InputTextStyle, ReactionType,
    Timestamp,
};

pub fn embed(view: &View) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&view.title)
        .description(&view.description)
        .colour(Colour::new(view.colour.0))
        .timestamp(Timestamp::now());
    if let Some(footer) = &view.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

fn button_style(style: ButtonStyle) -> DiscordButtonStyle {
    match style {
        ButtonStyle::Primary => DiscordButtonStyle::Primary,
        ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
        ButtonStyle::Success => DiscordButtonStyle::Success,
        ButtonStyle::Danger => DiscordButtonStyle::Danger,
    }
}

fn button(button: &Button) -> CreateButton {
    CreateButton::new(&button.custom_id)
        .label(&button.label)
        .emoji(ReactionType::Unicode(button.emoji.clone()))
        .style(button_style(button.style))
}

pub fn components(view: &View) -> Vec<CreateActionRow> {
    view.button_rows()
        .map(|row| CreateActionRow::Buttons(row.iter().map(button).collect()))
        .collect()
}

/// Response body that replaces or posts the view.
pub fn response_message(view: &View) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .embed(embed(view))
        .components(components(view))
}

pub fn ephemeral_message(text: &str) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true)
}

pub fn ephemeral_followup(text: &str) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(text)
        .ephemeral(true)
}

pub fn channel_message(view: &View) -> CreateMessage {
    CreateMessage::new()
        .embed(embed(view))
        .components(components(view))
}

pub fn modal(form: &PriceForm) -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Short, &form.label, &form.input_id)
        .placeholder(&form.placeholder)
        .min_length(form.min_length)
        .max_length(form.max_length)
        .required(true);
    CreateModal::new(&form.custom_id, &form.title)
        .components(vec![CreateActionRow::InputText(input)])
}
