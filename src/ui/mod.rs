pub mod events;
pub mod navigation;
pub mod notifier;
pub mod panel;
pub mod region;
pub mod select;
pub mod table;
pub mod terminal;
