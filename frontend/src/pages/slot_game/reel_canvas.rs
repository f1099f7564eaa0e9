use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use shared::shared_slot_game::{ReelStop, Symbol};

// Strip geometry: five cells of 200px on a 1000px looping strip; the
// canvas shows a 400px window with the pay-line through its center.
const STRIP_HEIGHT: f64 = 1_000.0;
const CELL_HEIGHT: f64 = 200.0;
const SPIN_SPEED: f64 = 1.2;

#[derive(Clone, PartialEq)]
enum ReelPhase {
    Spinning,
    Stopped,
}

#[derive(Properties, PartialEq)]
pub struct ReelCanvasProps {
    pub symbols: Vec<Symbol>,
    /// Stop descriptor of the current spin; `None` before the first spin.
    pub stop: Option<ReelStop>,
    /// Bumped by the page for every started spin.
    pub spin_id: u32,
}

fn symbol_color(name: &str) -> &'static str {
    match name {
        "threeBar" => "#f97316",
        "twoBar" => "#06b6d4",
        "oneBar" => "#8b5cf6",
        "seven" => "#ec4899",
        "cherry" => "#ef4444",
        _ => "#64748b",
    }
}

fn symbol_label(name: &str) -> &'static str {
    match name {
        "threeBar" => "3-BAR",
        "twoBar" => "2-BAR",
        "oneBar" => "BAR",
        "seven" => "7",
        "cherry" => "CHERRY",
        _ => "?",
    }
}

fn draw_reel(canvas_ref: &NodeRef, symbols: &[Symbol], offset: f64, spinning: bool) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    let context = match canvas.get_context("2d") {
        Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
            Ok(context) => context,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_y = height / 2.0;

    context.clear_rect(0.0, 0.0, width, height);
    context.set_fill_style_str("#1a1c2e");
    context.fill_rect(0.0, 0.0, width, height);

    context.set_font("bold 18px sans-serif");
    context.set_text_align("center");
    context.set_text_baseline("middle");

    for symbol in symbols {
        // Wrap the strip position into the window around the pay-line.
        let mut rel = (symbol.display_offset - offset).rem_euclid(STRIP_HEIGHT);
        if rel > STRIP_HEIGHT / 2.0 {
            rel -= STRIP_HEIGHT;
        }
        let y = center_y + rel;
        if y < -CELL_HEIGHT || y > height + CELL_HEIGHT {
            continue;
        }

        context.set_fill_style_str(symbol_color(&symbol.name));
        context.fill_rect(
            8.0,
            y - CELL_HEIGHT / 2.0 + 10.0,
            width - 16.0,
            CELL_HEIGHT - 20.0,
        );
        context.set_fill_style_str("#ffffff");
        let _ = context.fill_text(symbol_label(&symbol.name), width / 2.0, y);
    }

    if spinning {
        // Motion veil while the strip scrolls.
        context.set_fill_style_str("rgba(255, 255, 255, 0.25)");
        context.fill_rect(0.0, 0.0, width, height);
    }

    // Pay-line marker
    context.set_stroke_style_str("#facc15");
    context.set_line_width(3.0);
    context.begin_path();
    context.move_to(0.0, center_y);
    context.line_to(width, center_y);
    context.stroke();
}

/// One reel strip. Enters the spinning phase when `spin_id` changes,
/// schedules its own stop timer from the plan, and settles on the target
/// offset. The phase is purely presentational: the landed symbols were
/// fixed when the spin started.
#[function_component(ReelCanvas)]
pub fn reel_canvas(props: &ReelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let phase = use_state(|| ReelPhase::Stopped);

    // Spin entry: start moving, then stop on schedule.
    {
        let phase = phase.clone();
        use_effect_with((props.spin_id, props.stop.clone()), move |(spin_id, stop)| {
            if *spin_id > 0 {
                if let Some(stop) = stop {
                    phase.set(ReelPhase::Spinning);

                    let phase = phase.clone();
                    Timeout::new(stop.stop_at_ms, move || {
                        phase.set(ReelPhase::Stopped);
                    })
                    .forget();
                }
            }
            || ()
        });
    }

    // Rendering: a static frame when stopped, an animation-frame loop
    // while spinning.
    {
        let canvas_ref = canvas_ref.clone();
        let symbols = props.symbols.clone();
        let rest_offset = props
            .stop
            .as_ref()
            .map(|s| s.target_offset)
            .or_else(|| symbols.first().map(|s| s.display_offset))
            .unwrap_or(0.0);

        use_effect_with((*phase).clone(), move |phase| {
            match phase {
                ReelPhase::Stopped => {
                    draw_reel(&canvas_ref, &symbols, rest_offset, false);
                    Box::new(|| ()) as Box<dyn FnOnce()>
                }
                ReelPhase::Spinning => {
                    let running = Rc::new(Cell::new(true));

                    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                        Rc::new(RefCell::new(None));
                    let g = f.clone();

                    let running_inner = running.clone();
                    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                        if !running_inner.get() {
                            return;
                        }

                        let offset = (js_sys::Date::now() * SPIN_SPEED) % STRIP_HEIGHT;
                        draw_reel(&canvas_ref, &symbols, offset, true);

                        if let Some(window) = web_sys::window() {
                            let _ = window.request_animation_frame(
                                f.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                            );
                        }
                    }) as Box<dyn FnMut()>));

                    if let Some(window) = web_sys::window() {
                        let _ = window.request_animation_frame(
                            g.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                        );
                    }

                    Box::new(move || running.set(false)) as Box<dyn FnOnce()>
                }
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width="150"
            height="400"
            class="rounded-xl border-2 border-gray-300 dark:border-gray-600 shadow-inner"
        />
    }
}
