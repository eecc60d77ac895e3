mod user;
pub use user::User;

mod claims;
pub use claims::{Claims, UserData};

pub mod snippets;
pub use snippets::{Language, NewSnippet, Snippet, Style};
