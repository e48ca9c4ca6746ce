pub mod history;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod step;
pub mod timers;
pub mod tools;

pub use history::History;
pub use input::{InputEvent, PointerButton, RawPointer, TouchPoint};
pub use session::{DrawingSession, SourceImage};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use step::{NOTICE_MESSAGE, SelectionStep};
pub use timers::TimedPopup;
pub use tools::{InputOutcome, ToolController};
