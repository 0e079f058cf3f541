//! CLI command implementations.

mod check;
mod render;
mod show;
mod toc;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;
pub(crate) use show::ShowArgs;
pub(crate) use toc::TocArgs;
