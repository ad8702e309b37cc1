use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Box<str>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub embed_type: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmbedFooter {
    pub text: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<Box<str>>,
}

/// Shared shape of the image, thumbnail and video objects.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EmbedMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EmbedProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmbedAuthor {
    pub name: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<Box<str>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: Box<str>,
    pub value: Box<str>,
    #[serde(default)]
    pub inline: bool,
}

impl Embed {
    pub fn new() -> Embed {
        Embed::default()
    }

    pub fn title(mut self, title: impl Into<Box<str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<Box<str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<Box<str>>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn footer(mut self, text: impl Into<Box<str>>, icon_url: Option<Box<str>>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
            proxy_icon_url: None,
        });
        self
    }

    pub fn image(mut self, url: impl Into<Box<str>>) -> Self {
        self.image = Some(EmbedMedia {
            url: Some(url.into()),
            ..Default::default()
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<Box<str>>) -> Self {
        self.thumbnail = Some(EmbedMedia {
            url: Some(url.into()),
            ..Default::default()
        });
        self
    }

    pub fn author(mut self, name: impl Into<Box<str>>, url: Option<Box<str>>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            url,
            icon_url: None,
            proxy_icon_url: None,
        });
        self
    }

    pub fn field(
        mut self,
        name: impl Into<Box<str>>,
        value: impl Into<Box<str>>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// True when the embed would serialize to `{}`.
    pub fn is_empty(&self) -> bool {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.is_empty(),
            _ => true,
        }
    }
}
