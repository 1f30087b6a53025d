//! Synthesizes ordered, timed keyboard and mouse input.
//!
//! Encoding turns abstract scan codes into `InjectionStep`s, each an ordered
//! batch that is handed to an `InputSink` in a single call. The `Sequencer`
//! submits steps and sleeps between them; the `InjectionWorker` runs
//! sequences on a thread of their own so hotkey delivery is never blocked by
//! injection delays.
//!
//! Every record is tagged with `eventtag::extra_info()` so hooks further down
//! the input chain can tell injected events apart.
#![warn(unsafe_op_in_unsafe_fn)]

mod encoder;
mod error;
mod record;
mod sequencer;
mod sink;
#[cfg(windows)]
mod sys;
mod worker;

pub use encoder::{
    Direction, InjectionStep, KeyEvent, MouseButton, encode_chord, encode_click, encode_tap,
};
pub use error::{Error, Result};
pub use record::{HardwareInput, InputRecord, KeyFlags, KeyboardInput, MouseFlags, MouseInput};
#[cfg(any(test, feature = "test-utils"))]
pub use sequencer::MemoryClipboard;
pub use sequencer::{Clipboard, DEFAULT_STEP_DELAY, RunReport, Sequencer};
#[cfg(any(test, feature = "test-utils"))]
pub use sink::{RecordedBatch, RecordingSink};
pub use sink::{InputSink, MarshalledSink, UiJob, UiThread};
#[cfg(windows)]
pub use sys::SendInputSink;
pub use worker::{InjectionWorker, Job};
