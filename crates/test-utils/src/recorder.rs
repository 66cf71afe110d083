//! Tasks that record their invocations, for asserting on scheduler
//! behaviour (call order, call count, received inputs).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rundag::dag::TaskFn;

/// Records every task invocation, in call order.
///
/// Entry tasks record as `"name()"`, dependent tasks as `"name(input)"`,
/// failing tasks as `"name!"`.
#[derive(Clone, Default)]
pub struct InvocationRecorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl InvocationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task that records its invocation and returns `value`.
    pub fn task<T>(&self, name: &str, value: T) -> TaskFn<T>
    where
        T: Clone + fmt::Debug + 'static,
    {
        let events = Rc::clone(&self.events);
        let name = name.to_string();
        Box::new(move |input| {
            events.borrow_mut().push(match input {
                Some(input) => format!("{name}({input:?})"),
                None => format!("{name}()"),
            });
            Ok(value.clone())
        })
    }

    /// A task that records its invocation and fails with `message`.
    pub fn failing_task<T: 'static>(&self, name: &str, message: &str) -> TaskFn<T> {
        let events = Rc::clone(&self.events);
        let name = name.to_string();
        let message = message.to_string();
        Box::new(move |_input| {
            events.borrow_mut().push(format!("{name}!"));
            Err(message.clone().into())
        })
    }

    /// Snapshot of the recorded invocations.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}
