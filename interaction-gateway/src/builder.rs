use model::channel::message::{AllowedMentions, Embed};
use model::interaction::{
    Component, InteractionCallbackData, InteractionResponse, InteractionResponseType,
    EPHEMERAL_FLAG,
};
use model::ValidationError;

pub const MAX_CONTENT_LENGTH: usize = 2000;
pub const MAX_EMBEDS: usize = 10;
pub const MAX_ACTION_ROWS: usize = 5;

/// Assembles and validates response bodies. The same builder is used for initial
/// responses ([`ResponseBuilder::build`]), follow-ups ([`ResponseBuilder::build_message`])
/// and edits ([`ResponseBuilder::build_edit`]). The response type is ignored for the
/// latter two.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    r#type: InteractionResponseType,
    content: Option<Box<str>>,
    embed: Option<Embed>,
    embeds: Option<Vec<Embed>>,
    allowed_mentions: Option<AllowedMentions>,
    ephemeral: bool,
    tts: Option<bool>,
    components: Option<Vec<Component>>,
}

impl ResponseBuilder {
    pub fn new(r#type: InteractionResponseType) -> ResponseBuilder {
        ResponseBuilder {
            r#type,
            content: None,
            embed: None,
            embeds: None,
            allowed_mentions: None,
            ephemeral: false,
            tts: None,
            components: None,
        }
    }

    pub fn message() -> ResponseBuilder {
        ResponseBuilder::new(InteractionResponseType::ChannelMessageWithSource)
    }

    pub fn update_message() -> ResponseBuilder {
        ResponseBuilder::new(InteractionResponseType::UpdateMessage)
    }

    pub fn deferred(ephemeral: bool) -> ResponseBuilder {
        ResponseBuilder::new(InteractionResponseType::DeferredChannelMessageWithSource)
            .ephemeral(ephemeral)
    }

    pub fn deferred_update() -> ResponseBuilder {
        ResponseBuilder::new(InteractionResponseType::DeferredMessageUpdate)
    }

    pub fn content(mut self, content: impl Into<Box<str>>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    pub fn allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Top level components must be action rows; see [`model::interaction::ActionRow::new`].
    pub fn components<I, C>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Component>,
    {
        self.components = Some(components.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<InteractionResponse, ValidationError> {
        let r#type = self.r#type;
        let data = self.build_data()?;

        if !r#type.is_deferred() && !has_body(&data) {
            return Err(ValidationError::EmptyData);
        }

        Ok(InteractionResponse { r#type, data })
    }

    pub fn build_message(self) -> Result<InteractionCallbackData, ValidationError> {
        let data = self.build_data()?;

        if !has_body(&data) {
            return Err(ValidationError::EmptyData);
        }

        Ok(data)
    }

    /// Like [`ResponseBuilder::build_message`], but an explicitly set component list counts
    /// as a body even when empty, so an edit can strip the components of a message.
    pub fn build_edit(self) -> Result<InteractionCallbackData, ValidationError> {
        let data = self.build_data()?;

        if !has_body(&data) && data.components.is_none() {
            return Err(ValidationError::EmptyData);
        }

        Ok(data)
    }

    fn build_data(self) -> Result<InteractionCallbackData, ValidationError> {
        let embeds = match (self.embed, self.embeds) {
            (Some(_), Some(_)) => return Err(ValidationError::EmbedAndEmbeds),
            (Some(embed), None) => Some(vec![embed]),
            (None, embeds) => embeds,
        };

        if let Some(embeds) = &embeds {
            if embeds.len() > MAX_EMBEDS {
                return Err(ValidationError::TooManyEmbeds {
                    max: MAX_EMBEDS,
                    got: embeds.len(),
                });
            }

            if embeds.iter().any(Embed::is_empty) {
                return Err(ValidationError::EmptyEmbed);
            }
        }

        if let Some(content) = &self.content {
            let length = content.chars().count();
            if length > MAX_CONTENT_LENGTH {
                return Err(ValidationError::ContentTooLong {
                    max: MAX_CONTENT_LENGTH,
                    got: length,
                });
            }
        }

        if let Some(allowed_mentions) = &self.allowed_mentions {
            allowed_mentions.validate()?;
        }

        if let Some(components) = &self.components {
            validate_rows(components)?;
        }

        Ok(InteractionCallbackData {
            tts: self.tts,
            content: self.content,
            embeds,
            allowed_mentions: self.allowed_mentions,
            flags: if self.ephemeral {
                Some(EPHEMERAL_FLAG)
            } else {
                None
            },
            components: self.components,
        })
    }
}

fn validate_rows(components: &[Component]) -> Result<(), ValidationError> {
    if components.len() > MAX_ACTION_ROWS {
        return Err(ValidationError::TooManyActionRows {
            max: MAX_ACTION_ROWS,
            got: components.len(),
        });
    }

    for component in components {
        match component {
            Component::ActionRow(row) => row.validate()?,
            _ => return Err(ValidationError::NotAnActionRow),
        }
    }

    Ok(())
}

fn has_body(data: &InteractionCallbackData) -> bool {
    let has_content = data.content.as_deref().map_or(false, |c| !c.is_empty());
    let has_embeds = data.embeds.as_ref().map_or(false, |e| !e.is_empty());
    let has_components = data.components.as_ref().map_or(false, |c| !c.is_empty());

    has_content || has_embeds || has_components
}
