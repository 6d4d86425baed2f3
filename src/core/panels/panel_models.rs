// Panels are the platform-agnostic version of a styled message.
//
// Core logic builds a `Panel` and the Discord layer turns it into an embed,
// the same way log events are formatted at the edge instead of in the core.

/// Colour scheme shared by every message the bot sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
}

impl Tone {
    /// RGB colour as a packed `0xRRGGBB` integer.
    pub fn color(self) -> u32 {
        match self {
            Tone::Success => 0x50c878,
            Tone::Info => 0x5078c8,
            Tone::Warning => 0xc80815,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub tone: Tone,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub fields: Vec<PanelField>,
}

impl Panel {
    pub fn new(tone: Tone, title: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            description: None,
            thumbnail: None,
            image: None,
            fields: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(PanelField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Look up a field value by name (first match).
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// The generic "something went wrong" panel mirrored to channels on failures.
pub fn error_panel(description: &str) -> Panel {
    Panel::new(Tone::Warning, "Error").description(description)
}
