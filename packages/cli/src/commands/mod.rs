pub mod add;
pub mod apply;
pub mod check;
pub mod embed;
pub mod init;
pub mod render;

pub use add::{add, AddArgs};
pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use embed::{embed, EmbedArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
