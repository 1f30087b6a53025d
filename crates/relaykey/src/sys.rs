//! Win32 `SendInput` sink.

use std::mem::size_of;

use tracing::{trace, warn};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HARDWAREINPUT, INPUT, INPUT_0, INPUT_HARDWARE, INPUT_KEYBOARD, INPUT_MOUSE, KEYBD_EVENT_FLAGS,
    KEYBDINPUT, MOUSE_EVENT_FLAGS, MOUSEINPUT, SendInput, VIRTUAL_KEY,
};

use crate::{record::InputRecord, sink::InputSink};

/// Injects batches into the system input stream with one `SendInput` call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SendInputSink;

/// Lower a record into the `INPUT` union layout.
fn lower(record: &InputRecord) -> INPUT {
    match record {
        InputRecord::Keyboard(k) => INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(k.vk),
                    wScan: k.scan,
                    dwFlags: KEYBD_EVENT_FLAGS(k.flags.bits()),
                    time: k.time,
                    dwExtraInfo: k.extra_info,
                },
            },
        },
        InputRecord::Mouse(m) => INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: m.dx,
                    dy: m.dy,
                    mouseData: m.mouse_data,
                    dwFlags: MOUSE_EVENT_FLAGS(m.flags.bits()),
                    time: m.time,
                    dwExtraInfo: m.extra_info,
                },
            },
        },
        InputRecord::Hardware(h) => INPUT {
            r#type: INPUT_HARDWARE,
            Anonymous: INPUT_0 {
                hi: HARDWAREINPUT {
                    uMsg: h.msg,
                    wParamL: h.wparam_l,
                    wParamH: h.wparam_h,
                },
            },
        },
    }
}

impl InputSink for SendInputSink {
    fn send(&self, batch: &[InputRecord]) -> u32 {
        let inputs: Vec<INPUT> = batch.iter().map(lower).collect();
        // SAFETY: `inputs` is a valid slice of fully initialised INPUT
        // structs and cbsize is the size of one element.
        let accepted = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };
        if (accepted as usize) < inputs.len() {
            warn!(
                submitted = inputs.len(),
                accepted, "send_input_blocked_or_partial"
            );
        } else {
            trace!(events = inputs.len(), "send_input");
        }
        accepted
    }
}
