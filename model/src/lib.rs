mod snowflake;
pub use snowflake::Snowflake;

mod validation;
pub use validation::ValidationError;

pub mod channel;
pub mod guild;
pub mod interaction;
pub mod user;

mod util;
