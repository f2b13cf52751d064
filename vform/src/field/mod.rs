//! Field binding: connects one input control to the form-state container.
//!
//! A [`FieldBinding`] registers its control's focus handle with the form
//! context, seeds its value on mount, decides whether a change or blur
//! validates, and cleans up after itself on unmount.

mod binding;
mod event;
mod kind;
mod render;

pub use binding::{FieldBinding, FieldHandler};
pub use event::{FieldEvent, FieldEventKind};
pub use kind::{Capability, Controls, FieldKind};
pub use render::{DisplayMessage, FieldRenderProps, RenderMemo};
