//! Change notification targets.
//!
//! Every callback point accepts either an object implementing [`Action`] or a
//! plain function pointer. When both are offered the object wins.

use alloc::boxed::Box;

/// Receiver of a notification value.
pub trait Action<T> {
    fn execute(&mut self, value: T);
}

impl<T, F> Action<T> for F
where
    F: FnMut(T),
{
    fn execute(&mut self, value: T) {
        self(value)
    }
}

pub enum Notifier<T> {
    None,
    Action(Box<dyn Action<T>>),
    Function(fn(T)),
}

impl<T> Notifier<T> {
    pub fn action(action: impl Action<T> + 'static) -> Self {
        Notifier::Action(Box::new(action))
    }

    pub const fn function(function: fn(T)) -> Self {
        Notifier::Function(function)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Notifier::None)
    }

    /// Installs an object target, replacing whatever was registered.
    pub fn set_action(&mut self, action: impl Action<T> + 'static) {
        *self = Notifier::action(action);
    }

    /// Installs a function target unless an object target is active.
    ///
    /// Returns `false` when the function was not installed.
    pub fn set_function(&mut self, function: fn(T)) -> bool {
        match self {
            Notifier::Action(_) => false,
            _ => {
                *self = Notifier::Function(function);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Notifier::None;
    }

    /// Delivers `value` to the active target, if any.
    pub fn notify(&mut self, value: T) {
        match self {
            Notifier::None => {}
            Notifier::Action(action) => action.execute(value),
            Notifier::Function(function) => function(value),
        }
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Notifier::None
    }
}

impl<T> From<fn(T)> for Notifier<T> {
    fn from(function: fn(T)) -> Self {
        Notifier::Function(function)
    }
}

impl<T> core::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notifier::None => f.write_str("Notifier::None"),
            Notifier::Action(_) => f.write_str("Notifier::Action(..)"),
            Notifier::Function(_) => f.write_str("Notifier::Function(..)"),
        }
    }
}
