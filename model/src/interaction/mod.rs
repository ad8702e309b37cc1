mod application_command;
pub use application_command::CommandDefinition;

mod application_command_type;
pub use application_command_type::ApplicationCommandType;

mod application_command_option;
pub use application_command_option::{ApplicationCommandOption, ApplicationCommandOptionType};

mod application_command_option_choice;
pub use application_command_option_choice::ApplicationCommandOptionChoice;

mod interaction;
pub use interaction::{
    ComponentInteractionKind, Interaction, InteractionPayload, InteractionType,
    MessageComponentInteractionData,
};

mod application_command_interaction_data;
pub use application_command_interaction_data::{
    ApplicationCommandInteractionData, ChatInputCommandData, MessageCommandData, ResolvedUser,
    UserCommandData,
};

mod application_command_interaction_data_resolved;
pub use application_command_interaction_data_resolved::ApplicationCommandInteractionDataResolved;

mod application_command_interaction_data_option;
pub use application_command_interaction_data_option::{
    ApplicationCommandInteractionDataOption, OptionValue,
};

mod interaction_response;
pub use interaction_response::{
    InteractionCallbackData, InteractionResponse, InteractionResponseType, EPHEMERAL_FLAG,
};

mod component;
pub use component::{Component, ComponentType};

mod action_row;
pub use action_row::{ActionRow, MAX_ROW_BUTTONS};

mod button;
pub use button::{Button, ButtonStyle};

mod select_menu;
pub use select_menu::{SelectMenu, SelectOption, MAX_SELECT_OPTIONS};
