/// Primitive SonarQube API data types and NewType-patterns.
mod enums;
mod paging;
mod server_url;
mod strings;

pub use enums::*;
pub use paging::*;
pub use server_url::*;
pub use strings::*;
