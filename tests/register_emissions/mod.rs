use std::{cell::RefCell, rc::Rc};

use rxlite::ObserverHandlers;

/// Everything the handlers built by [`register_emissions_handlers`] saw.
#[derive(Debug)]
pub struct Emissions<T, E> {
    pub nexts: Vec<T>,
    pub errors: Vec<E>,
    pub completes: usize,
}

/// Returns a factory for recording handler sets, plus the shared record they
/// all write into.
pub fn register_emissions_handlers<T: 'static, E: 'static>() -> (
    impl Fn() -> ObserverHandlers<T, E>,
    Rc<RefCell<Emissions<T, E>>>,
) {
    let emissions: Rc<RefCell<Emissions<T, E>>> = Rc::new(RefCell::new(Emissions {
        nexts: Vec::new(),
        errors: Vec::new(),
        completes: 0,
    }));
    let emissions_c = Rc::clone(&emissions);

    let make_handlers = move || {
        let (nexts, errors, completes) = (
            Rc::clone(&emissions_c),
            Rc::clone(&emissions_c),
            Rc::clone(&emissions_c),
        );
        ObserverHandlers::with(
            // Track next() calls.
            move |v| nexts.borrow_mut().nexts.push(v),
            // Track error() calls.
            move |e| errors.borrow_mut().errors.push(e),
            // Track complete() calls.
            move || completes.borrow_mut().completes += 1,
        )
    };
    (make_handlers, emissions)
}
