use async_trait::async_trait;
use interaction_gateway::commands::sync_commands;
use interaction_gateway::http::Server;
use interaction_gateway::{
    Config, Error, Handler, HandlerArgs, InteractionContext, ListenerDescriptor, Registry,
    ResponseBuilder,
};
use model::channel::message::{AllowedMentions, Embed};
use model::interaction::{
    ActionRow, ApplicationCommandOption, ApplicationCommandOptionType, Button, ButtonStyle,
    CommandDefinition, SelectMenu, SelectOption,
};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_envvar()?;
    configure_observability(&config);

    let registry = build_registry()?;
    info!(listeners = registry.len(), "registered listeners");

    let server = Server::new(config, registry)?;

    if server.config.sync_commands {
        sync_commands(
            server.gateway.rest(),
            server.config.application_id,
            server.gateway.registry(),
            &server.config.guild_ids,
        )
        .await?;
    }

    server.start().await
}

fn configure_observability(config: &Config) {
    let registry = tracing_subscriber::registry().with(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_registry() -> Result<Registry, Error> {
    let mut registry = Registry::new();

    let echo = CommandDefinition::slash("echo", "Repeats your message")?.with_option(
        ApplicationCommandOption::new(
            ApplicationCommandOptionType::String,
            "text",
            "What to repeat",
        )?
        .required(true),
    )?;

    registry.register_command(echo, Echo)?;
    registry.register_command(CommandDefinition::user("Inspect")?, Inspect)?;
    registry.register_command(CommandDefinition::slash("menu", "Shows some components")?, Menu)?;
    registry.register(ListenerDescriptor::button("menu:confirm"), Confirm)?;
    registry.register(ListenerDescriptor::select_menu("menu:colour"), Colour)?;

    Ok(registry)
}

struct Echo;

#[async_trait]
impl Handler for Echo {
    async fn handle(&self, ctx: &InteractionContext, args: HandlerArgs) -> Result<(), Error> {
        let text = match &args {
            HandlerArgs::SlashCommand(args) => args.get_str("text").unwrap_or_default(),
            _ => return Err(Error::handler("echo expects slash command arguments")),
        };

        ctx.create_response(
            ResponseBuilder::message()
                .content(text)
                .allowed_mentions(AllowedMentions::none()),
        )
    }
}

struct Inspect;

#[async_trait]
impl Handler for Inspect {
    async fn handle(&self, ctx: &InteractionContext, args: HandlerArgs) -> Result<(), Error> {
        let target = match args {
            HandlerArgs::UserCommand(target) => target,
            _ => return Err(Error::handler("inspect expects a user target")),
        };

        let mut embed = Embed::new()
            .title(target.user.username.clone())
            .field("ID", target.user.id.to_string(), true)
            .field("Bot", target.user.bot.to_string(), true);

        if let Some(joined_at) = target.member.as_ref().and_then(|m| m.joined_at) {
            embed = embed.field("Joined", joined_at.to_rfc2822(), false);
        }

        ctx.create_response(ResponseBuilder::message().embed(embed).ephemeral(true))
    }
}

struct Menu;

#[async_trait]
impl Handler for Menu {
    async fn handle(&self, ctx: &InteractionContext, _: HandlerArgs) -> Result<(), Error> {
        let buttons = ActionRow::new(vec![
            Button::new(ButtonStyle::Success, "menu:confirm", "Confirm")?.into(),
            Button::link("https://discord.com/developers/docs", "Docs")?.into(),
        ])?;

        let colours = SelectMenu::new(
            "menu:colour",
            vec![
                SelectOption::new("Red", "red")?,
                SelectOption::new("Green", "green")?,
                SelectOption::new("Blue", "blue")?,
            ],
        )?
        .with_placeholder("Pick a colour")?;

        ctx.create_response(
            ResponseBuilder::message()
                .content("Pick something")
                .components(vec![buttons, ActionRow::new(vec![colours.into()])?]),
        )
    }
}

struct Confirm;

#[async_trait]
impl Handler for Confirm {
    async fn handle(&self, ctx: &InteractionContext, _: HandlerArgs) -> Result<(), Error> {
        ctx.defer(true)
    }

    async fn after_response(&self, ctx: &InteractionContext) -> Result<(), Error> {
        ctx.followup(ResponseBuilder::message().content("Confirmed!").ephemeral(true))
            .await?;

        Ok(())
    }
}

struct Colour;

#[async_trait]
impl Handler for Colour {
    async fn handle(&self, ctx: &InteractionContext, args: HandlerArgs) -> Result<(), Error> {
        let picked = match &args {
            HandlerArgs::SelectMenu(values) => values.join(", "),
            _ => String::new(),
        };

        ctx.create_response(
            ResponseBuilder::update_message().content(format!("You picked {}", picked)),
        )
    }
}
