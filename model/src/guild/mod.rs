mod member;
pub use member::Member;

mod emoji;
pub use emoji::Emoji;
