use std::{cell::RefCell, rc::Rc};

use derivative::Derivative;
use yew::{hook, use_mut_ref};

/// A cell that always holds the value from the most recent render.
///
/// Long-lived callbacks, like the render loop, read through it instead of
/// capturing a snapshot when they were created. Two handles are equal when they
/// point to the same cell, so passing one as a prop never causes a re-render.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), PartialEq(bound = ""))]
pub struct Latest<T>(#[derivative(PartialEq(compare_with = "Rc::ptr_eq"))] Rc<RefCell<T>>);

impl<T: Copy> Latest<T> {
    pub fn get(&self) -> T {
        *self.0.borrow()
    }
}

#[hook]
pub fn use_latest<T>(value: T) -> Latest<T>
where
    T: Clone + 'static,
{
    let cell = {
        let value = value.clone();
        use_mut_ref(move || value)
    };
    *cell.borrow_mut() = value;
    Latest(cell)
}
