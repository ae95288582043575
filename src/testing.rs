//! Fault injection for tests.
//!
//! Hooks are thread-local: entry points run on the caller's thread, so a
//! hook installed by one test never fires inside another.

use crate::types::{CallFrame, StackMatch};
use std::cell::RefCell;
use std::rc::Rc;

type StackMatchHook = Rc<dyn Fn(&StackMatch, &CallFrame)>;

thread_local! {
    static STACK_MATCH_HOOK: RefCell<Option<StackMatchHook>> = const { RefCell::new(None) };
}

/// Installs a callback invoked before each stack match is evaluated against
/// a frame. A panicking hook simulates a fault inside the matcher.
pub fn set_stack_match_hook(hook: impl Fn(&StackMatch, &CallFrame) + 'static) {
    STACK_MATCH_HOOK.with(|slot| *slot.borrow_mut() = Some(Rc::new(hook)));
}

/// Removes the hook installed on this thread.
pub fn clear_stack_match_hook() {
    STACK_MATCH_HOOK.with(|slot| *slot.borrow_mut() = None);
}

pub(crate) fn run_stack_match_hook(stack_match: &StackMatch, frame: &CallFrame) {
    // clone out first so a panicking hook does not leave the cell borrowed
    let hook = STACK_MATCH_HOOK.with(|slot| slot.borrow().clone());
    if let Some(hook) = hook {
        hook(stack_match, frame);
    }
}
