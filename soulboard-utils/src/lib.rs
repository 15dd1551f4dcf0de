/// Embed colours and footer helpers shared across commands.
pub mod embed;
/// Display-name escaping and other text helpers.
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Button-driven embed pagination.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
