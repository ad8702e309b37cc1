use crate::registry::Registry;
use crate::rest::{RestTransport, Route};
use crate::Error;
use model::interaction::CommandDefinition;
use model::Snowflake;
use std::collections::BTreeMap;
use tracing::info;

/// Bulk overwrites the registered command definitions. Global definitions are submitted
/// once; every guild in `guild_ids` or named by a definition receives exactly the
/// definitions scoped to it, so guilds without any get their commands cleared.
pub async fn sync_commands(
    rest: &dyn RestTransport,
    application_id: Snowflake,
    registry: &Registry,
    guild_ids: &[Snowflake],
) -> Result<(), Error> {
    let mut global: Vec<&CommandDefinition> = Vec::new();
    let mut guilds: BTreeMap<Snowflake, Vec<&CommandDefinition>> =
        guild_ids.iter().map(|id| (*id, Vec::new())).collect();

    for definition in registry.command_definitions() {
        match definition.guild_id {
            Some(guild_id) => guilds.entry(guild_id).or_default().push(definition),
            None => global.push(definition),
        }
    }

    global.sort_by(|a, b| a.name.cmp(&b.name));
    rest.execute(
        Route::OverwriteGlobalCommands { application_id },
        Some(serde_json::to_value(&global)?),
    )
    .await?;
    info!(count = global.len(), "synced global commands");

    for (guild_id, mut definitions) in guilds {
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        rest.execute(
            Route::OverwriteGuildCommands {
                application_id,
                guild_id,
            },
            Some(serde_json::to_value(&definitions)?),
        )
        .await?;
        info!(%guild_id, count = definitions.len(), "synced guild commands");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InteractionContext;
    use crate::handler::{Handler, HandlerArgs};
    use crate::testing::MockTransport;
    use async_trait::async_trait;
    use serde_json::json;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle(&self, _: &InteractionContext, _: HandlerArgs) -> Result<(), Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sync() {
        let mut registry = Registry::new();
        registry
            .register_command(CommandDefinition::slash("ping", "Pong!").unwrap(), Noop)
            .unwrap();
        registry
            .register_command(
                CommandDefinition::message("Quote").unwrap().in_guild(Snowflake(7)),
                Noop,
            )
            .unwrap();

        let rest = MockTransport::default();
        sync_commands(&rest, Snowflake(1), &registry, &[Snowflake(3)])
            .await
            .unwrap();

        let calls = rest.calls();
        assert_eq!(calls.len(), 3);

        assert_eq!(
            calls[0],
            (
                Route::OverwriteGlobalCommands {
                    application_id: Snowflake(1)
                },
                Some(json!([{ "name": "ping", "type": 1, "description": "Pong!" }]))
            )
        );

        // configured guild with no definitions is cleared
        assert_eq!(
            calls[1],
            (
                Route::OverwriteGuildCommands {
                    application_id: Snowflake(1),
                    guild_id: Snowflake(3)
                },
                Some(json!([]))
            )
        );

        assert_eq!(
            calls[2],
            (
                Route::OverwriteGuildCommands {
                    application_id: Snowflake(1),
                    guild_id: Snowflake(7)
                },
                Some(json!([{ "name": "Quote", "type": 3 }]))
            )
        );
    }
}
