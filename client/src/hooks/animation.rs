use std::{cell::RefCell, rc::Rc};

use gloo_render::{request_animation_frame, AnimationFrame};
use player::visualizer::FrameSlot;
use yew::{hook, use_effect_with, use_mut_ref};

type Slot = Rc<RefCell<FrameSlot<AnimationFrame>>>;

/// Runs the frame made by `init` once per display refresh, from mount until the
/// component unmounts.
#[hook]
pub fn use_animation_loop<F, I>(init: I)
where
    I: FnOnce() -> Option<F> + 'static,
    F: FnMut(f64) + 'static,
{
    let slot: Slot = use_mut_ref(FrameSlot::default);

    use_effect_with((), move |()| {
        if slot.borrow().can_start() {
            match init() {
                Some(frame) => {
                    log::debug!("Starting the render loop");
                    schedule(slot.clone(), Rc::new(RefCell::new(frame)));
                }
                None => log::error!("Could not start the render loop"),
            }
        }

        move || {
            if slot.borrow_mut().stop() {
                log::debug!("Render loop cancelled");
            }
        }
    });
}

fn schedule<F>(slot: Slot, frame: Rc<RefCell<F>>)
where
    F: FnMut(f64) + 'static,
{
    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        (*frame.borrow_mut())(timestamp);
        schedule(next, frame);
    });
    if !slot.borrow_mut().schedule(handle) {
        log::debug!("Render loop stopped, not scheduling another frame");
    }
}
