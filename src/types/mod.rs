pub mod definition;
pub mod item;

pub use definition::FormDefinition;
pub use item::{ChoiceItem, ContainerItem, ControlType, FieldItem, FormItem};
