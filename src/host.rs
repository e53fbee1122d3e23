//! Browser wiring: window sizing, input listeners and the frame loop
//!
//! All callbacks share one `Rc<RefCell<Garden>>`. The browser never runs
//! two of them at once, so a click or resize always lands between frames.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::error::RenderError;
use crate::Garden;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Fill the window with the canvas `canvas_id` and animate it forever
#[wasm_bindgen]
pub fn run(canvas_id: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| RenderError::Dom("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| RenderError::Dom("window has no document".into()))?;

    // The garden is drawn over a dark page
    if let Some(body) = document.body() {
        body.style().set_property("background-color", "black")?;
    }

    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| RenderError::Dom(format!("no element with id '{}'", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()?;

    let (width, height) = window_size(&window)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let garden = Rc::new(RefCell::new(Garden::new(canvas)?));

    listen_for_resize(&window, garden.clone())?;
    listen_for_clicks(&window, garden.clone())?;
    start_frame_loop(&window, garden)?;

    info!(width, height, canvas_id, "garden started");
    Ok(())
}

fn window_size(window: &Window) -> Result<(u32, u32), RenderError> {
    let read = |value: Result<JsValue, JsValue>, what: &str| -> Result<u32, RenderError> {
        value
            .map_err(|e| RenderError::Dom(format!("window {}: {:?}", what, e)))?
            .as_f64()
            .map(|v| v.max(0.0) as u32)
            .ok_or_else(|| RenderError::Dom(format!("window {} is not a number", what)))
    };
    Ok((read(window.inner_width(), "width")?, read(window.inner_height(), "height")?))
}

fn listen_for_resize(window: &Window, garden: Rc<RefCell<Garden>>) -> Result<(), JsValue> {
    let win = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || match window_size(&win) {
        Ok((width, height)) => garden.borrow_mut().resize(width, height),
        Err(err) => error!(%err, "could not read window size"),
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Listener lives as long as the page
    on_resize.forget();
    Ok(())
}

fn listen_for_clicks(window: &Window, garden: Rc<RefCell<Garden>>) -> Result<(), JsValue> {
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        garden
            .borrow_mut()
            .plant(event.client_x() as f64, event.client_y() as f64);
    });
    window.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Self-rescheduling animation loop. A failed frame is logged and ends the
/// loop; there is no partial-frame recovery.
fn start_frame_loop(window: &Window, garden: Rc<RefCell<Garden>>) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let win = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if let Err(err) = garden.borrow_mut().frame(timestamp) {
            error!(%err, "frame failed, stopping animation");
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(err) = request_frame(&win, callback) {
                error!(?err, "requestAnimationFrame rejected");
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        request_frame(window, callback)?;
    }
    Ok(())
}
