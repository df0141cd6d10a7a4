pub mod event_reader;

pub use event_reader::EventReader;
