pub mod events;

pub use events::{Dispatch, ProcessEventUseCase};
