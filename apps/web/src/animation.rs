use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom::{log_error, window, DomError};

/// Converts a configured delay to the `i32` milliseconds `setTimeout` takes.
pub fn timeout_millis(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

/// Runs `callback` two animation frames from now, after the browser has
/// applied the styles set in the current frame.
pub fn wait_for_next_frame(callback: impl FnOnce() + 'static) -> Result<(), DomError> {
    let window = window()?;
    let second_window = window.clone();

    let first = Closure::once_into_js(move || {
        let second = Closure::once_into_js(callback);
        if let Err(error) = second_window.request_animation_frame(second.unchecked_ref()) {
            log_error("Failed to schedule frame", &DomError::from(error));
        }
    });

    window.request_animation_frame(first.unchecked_ref())?;
    Ok(())
}

/// Runs `callback` once after `delay_ms` milliseconds.
pub fn after_delay(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<(), DomError> {
    let timeout = Closure::once_into_js(callback);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        timeout.unchecked_ref(),
        timeout_millis(delay_ms),
    )?;
    Ok(())
}
