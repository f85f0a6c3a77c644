use scatter_core::scroll_driver;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Latest scroll reading, overwritten by listeners and taken once per frame.
pub type PendingReading = Rc<Cell<Option<f32>>>;

#[inline]
pub fn read_scroll(window: &web::Window) -> Option<f32> {
    let y = window.scroll_y().ok()?;
    let h = window.inner_height().ok()?.as_f64()?;
    scroll_driver(y as f32, h as f32)
}

/// Publish a reading on every scroll or resize; the frame loop decides when to consume it.
pub fn install_scroll_listener(pending: PendingReading) {
    let Some(window) = web::window() else {
        log::warn!("[dom] no window; scroll driver stays at its last value");
        return;
    };
    pending.set(read_scroll(&window));
    for event in ["scroll", "resize"] {
        let pending = pending.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = web::window() {
                if let Some(v) = read_scroll(&w) {
                    pending.set(Some(v));
                }
            }
        }) as Box<dyn FnMut()>);
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("[dom] {event} listener not installed: {:?}", e);
        }
        closure.forget();
    }
}
