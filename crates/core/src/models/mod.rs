pub mod calendar;
pub mod journal;
pub mod settings;
pub mod summary;
pub mod trade;
pub mod view;
