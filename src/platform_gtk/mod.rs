//! GTK4 embedding: one `DrawingArea` driven by a [`ScopeEngine`].
//!
//! The adapter wires the frame clock, resize, pointer, scroll and key
//! controllers to the engine. Everything runs on the GTK main thread; the
//! only cross-thread hand-off is the [`FrameChannel`] drained each tick.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::ScopeEngine;
use crate::channel::FrameChannel;
use crate::core::SurfaceSize;
use crate::interaction::{ScopeKey, Tooltip};
use crate::render::CairoRenderer;

pub type SharedScopeEngine = Rc<RefCell<ScopeEngine<CairoRenderer>>>;

pub struct GtkScopeAdapter {
    drawing_area: gtk::DrawingArea,
    engine: SharedScopeEngine,
}

impl GtkScopeAdapter {
    /// Builds the drawing area and, when `channel` is given, subscribes the
    /// engine to it and drains it on every frame-clock tick.
    #[must_use]
    pub fn new(mut engine: ScopeEngine<CairoRenderer>, channel: Option<FrameChannel>) -> Self {
        if let Some(channel) = channel.as_ref() {
            engine.attach_channel(channel);
        }
        let engine = Rc::new(RefCell::new(engine));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);
        drawing_area.set_has_tooltip(true);

        attach_draw(&drawing_area, &engine);
        attach_frame_clock(&drawing_area, &engine, channel);
        attach_pointer(&drawing_area, &engine);
        attach_keyboard(&drawing_area, &engine);

        {
            let engine = Rc::clone(&engine);
            drawing_area.connect_unrealize(move |_| {
                if let Ok(scope) = engine.try_borrow() {
                    scope.persist_viewports();
                }
            });
        }

        Self {
            drawing_area,
            engine,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> SharedScopeEngine {
        Rc::clone(&self.engine)
    }
}

fn surface_of(width: i32, height: i32) -> Option<SurfaceSize> {
    let surface = SurfaceSize::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    surface.is_valid().then_some(surface)
}

fn tooltip_text(tooltip: &Tooltip) -> String {
    tooltip
        .entries
        .iter()
        .map(|entry| format!("{}: {:.1}", entry.index, entry.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn attach_draw(drawing_area: &gtk::DrawingArea, engine: &SharedScopeEngine) {
    drawing_area.set_draw_func({
        let engine = Rc::clone(engine);
        move |_area, context, width, height| {
            let Some(surface) = surface_of(width, height) else {
                return;
            };
            let Ok(mut scope) = engine.try_borrow_mut() else {
                return;
            };
            if scope.layout().surface != surface {
                if let Err(err) = scope.resize(surface) {
                    warn!(error = %err, "scope resize failed");
                }
            }
            if let Err(err) = scope.render_on_cairo_context(context) {
                warn!(error = %err, "scope draw failed");
            }
        }
    });

    let engine = Rc::clone(engine);
    drawing_area.connect_resize(move |area, width, height| {
        let Some(surface) = surface_of(width, height) else {
            return;
        };
        if let Ok(mut scope) = engine.try_borrow_mut() {
            if let Err(err) = scope.resize(surface) {
                warn!(error = %err, "scope resize failed");
            }
        }
        area.queue_draw();
    });
}

fn attach_frame_clock(
    drawing_area: &gtk::DrawingArea,
    engine: &SharedScopeEngine,
    channel: Option<FrameChannel>,
) {
    let engine = Rc::clone(engine);
    drawing_area.add_tick_callback(move |area, _clock| {
        if let Some(channel) = channel.as_ref() {
            channel.drain();
        }
        if let Ok(mut scope) = engine.try_borrow_mut() {
            scope.ingest_pending_frame();
            if scope.needs_redraw() {
                area.queue_draw();
            }
        }
        gtk::glib::ControlFlow::Continue
    });
}

fn attach_pointer(drawing_area: &gtk::DrawingArea, engine: &SharedScopeEngine) {
    let pointer_x = Rc::new(Cell::new(0.0));
    let pointer_y = Rc::new(Cell::new(0.0));

    let motion = gtk::EventControllerMotion::new();
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        let pointer_x = Rc::clone(&pointer_x);
        let pointer_y = Rc::clone(&pointer_y);
        motion.connect_motion(move |_, x, y| {
            pointer_x.set(x);
            pointer_y.set(y);
            let Ok(mut scope) = engine.try_borrow_mut() else {
                return;
            };
            if let Err(err) = scope.pointer_move(x, y) {
                warn!(error = %err, "pointer move rejected");
            }
            let text = scope.tooltip().map(tooltip_text);
            drawing_area.set_tooltip_text(text.as_deref());
        });
    }
    {
        let engine = Rc::clone(engine);
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            if let Ok(mut scope) = engine.try_borrow_mut() {
                scope.pointer_leave();
            }
            drawing_area.set_tooltip_text(None);
        });
    }
    drawing_area.add_controller(motion);

    let drag = gtk::GestureDrag::new();
    {
        let engine = Rc::clone(engine);
        drag.connect_drag_begin(move |_, start_x, start_y| {
            if let Ok(mut scope) = engine.try_borrow_mut() {
                scope.pointer_down(start_x, start_y);
            }
        });
    }
    {
        let engine = Rc::clone(engine);
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            if let Ok(mut scope) = engine.try_borrow_mut() {
                if let Err(err) = scope.pointer_move(start_x + offset_x, start_y + offset_y) {
                    warn!(error = %err, "drag update rejected");
                }
            }
        });
    }
    {
        let engine = Rc::clone(engine);
        drag.connect_drag_end(move |_, _, _| {
            if let Ok(mut scope) = engine.try_borrow_mut() {
                scope.pointer_up();
            }
        });
    }
    drawing_area.add_controller(drag);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let engine = Rc::clone(engine);
        let pointer_x = Rc::clone(&pointer_x);
        let pointer_y = Rc::clone(&pointer_y);
        scroll.connect_scroll(move |_, _dx, dy| {
            if let Ok(mut scope) = engine.try_borrow_mut() {
                if let Err(err) = scope.wheel(dy, pointer_x.get(), pointer_y.get()) {
                    warn!(error = %err, "wheel zoom rejected");
                }
            }
            gtk::glib::Propagation::Stop
        });
    }
    drawing_area.add_controller(scroll);

    // Clicks are dispatched on release, after the drag gesture has seen the
    // press; the engine drops gestures whose press panned. The first press
    // of a double click also arrives as a single click; in analysis mode the
    // exit that follows discards the selection it made.
    let click = gtk::GestureClick::new();
    {
        let engine = Rc::clone(engine);
        click.connect_released(move |_, n_press, x, y| {
            let Ok(mut scope) = engine.try_borrow_mut() else {
                return;
            };
            let n_press = u32::try_from(n_press).unwrap_or(0);
            if let Err(err) = scope.click_released(n_press, x, y) {
                warn!(error = %err, n_press, "click rejected");
            }
        });
    }
    drawing_area.add_controller(click);
}

fn attach_keyboard(drawing_area: &gtk::DrawingArea, engine: &SharedScopeEngine) {
    let keys = gtk::EventControllerKey::new();
    let engine = Rc::clone(engine);
    keys.connect_key_pressed(move |_, keyval, _keycode, _state| {
        let key = if keyval == gtk::gdk::Key::Escape {
            ScopeKey::Escape
        } else {
            ScopeKey::Other
        };
        let handled = match engine.try_borrow_mut() {
            Ok(mut scope) => scope.key(key).unwrap_or_else(|err| {
                warn!(error = %err, "key handling failed");
                false
            }),
            Err(_) => false,
        };
        if handled {
            gtk::glib::Propagation::Stop
        } else {
            gtk::glib::Propagation::Proceed
        }
    });
    drawing_area.add_controller(keys);
}
