use almacen_core::navigation::Action;

/// Buttons a single row can hold.
pub const MAX_BUTTONS_PER_ROW: usize = 5;

/// Embed accent colour as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour(pub u32);

impl Colour {
    pub const BLUE: Colour = Colour(0x4169e1);
    pub const GREEN: Colour = Colour(0x28a745);
    pub const RED: Colour = Colour(0xdc3545);
    pub const YELLOW: Colour = Colour(0xffc107);
    pub const CYAN: Colour = Colour(0x17a2b8);
    pub const DARK_RED: Colour = Colour(0x8b0000);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// A button carrying an action identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub emoji: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(
        action: &Action,
        label: impl Into<String>,
        emoji: impl Into<String>,
        style: ButtonStyle,
    ) -> Self {
        Self {
            custom_id: action.custom_id(),
            label: label.into(),
            emoji: emoji.into(),
            style,
        }
    }
}

/// An embed with an optional grid of buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: String,
    pub description: String,
    pub colour: Colour,
    pub footer: Option<String>,
    pub buttons: Vec<Button>,
}

impl View {
    pub fn new(title: impl Into<String>, colour: Colour) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            colour,
            footer: None,
            buttons: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.buttons.extend(buttons);
        self
    }

    /// Buttons laid out in rows of at most [`MAX_BUTTONS_PER_ROW`].
    pub fn button_rows(&self) -> impl Iterator<Item = &[Button]> {
        self.buttons.chunks(MAX_BUTTONS_PER_ROW)
    }

    /// Whether any button carries `custom_id`.
    pub fn has_button(&self, custom_id: &str) -> bool {
        self.buttons.iter().any(|b| b.custom_id == custom_id)
    }
}

/// One-shot form asking for a new unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceForm {
    pub custom_id: String,
    pub title: String,
    pub input_id: String,
    pub label: String,
    pub placeholder: String,
    pub min_length: u16,
    pub max_length: u16,
}

/// How an interaction is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Replace the menu message in place.
    Update(View),
    /// Post a new message.
    Send(View),
    /// Open a form.
    Form(PriceForm),
    /// Text visible only to the acting user.
    Ephemeral(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_rows_are_chunked() {
        let view = View::new("t", Colour::BLUE).buttons(
            (0..7).map(|i| Button::new(&Action::Home, i.to_string(), "🏠", ButtonStyle::Primary)),
        );
        let rows: Vec<usize> = view.button_rows().map(|row| row.len()).collect();
        assert_eq!(rows, vec![5, 2]);
    }
}
