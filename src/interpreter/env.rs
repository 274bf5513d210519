//! Scope stack: a stack of frames mapping names to values.
//!
//! The bottom frame is the global frame, shared across an entire batch run or
//! an entire REPL session. Lookup searches top-down and stops at the first
//! hit; `set` updates in place at the frame of first hit, or binds fresh in
//! the topmost frame if the name is new. Calling a user function stashes the
//! caller's non-global frames and pushes one fresh frame, so a function body
//! only ever sees globals plus its own locals.

use std::collections::HashMap;

use super::value::Value;

type Frame = HashMap<String, Value>;

pub struct Env {
    frames: Vec<Frame>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            frames: vec![Frame::new()],
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).cloned())
    }

    /// `set x to e`: overwrite the first frame (searching top-down) where
    /// `x` already exists, else bind fresh in the topmost frame.
    pub fn set(&mut self, name: &str, value: Value) {
        for frame in self.frames.iter_mut().rev() {
            if frame.contains_key(name) {
                frame.insert(name.to_string(), value);
                return;
            }
        }
        self.frames
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.to_string(), value);
    }

    /// Binds `name` in the topmost frame unconditionally, used for function
    /// parameters and `for each` loop variables.
    pub fn define_local(&mut self, name: &str, value: Value) {
        self.frames
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.to_string(), value);
    }

    pub fn globals(&self) -> &Frame {
        self.frames.first().expect("global frame always exists")
    }

    pub fn globals_mut(&mut self) -> &mut Frame {
        self.frames.first_mut().expect("global frame always exists")
    }

    /// Stashes every frame above the global one and pushes a fresh frame,
    /// returning the stashed frames so the caller can restore them with
    /// [`Env::restore`] once the call returns (on every path, including
    /// error unwind).
    pub fn enter_call(&mut self) -> Vec<Frame> {
        let stashed = self.frames.split_off(1);
        self.frames.push(Frame::new());
        stashed
    }

    pub fn restore(&mut self, stashed: Vec<Frame>) {
        self.frames.truncate(1);
        self.frames.extend(stashed);
    }
}

impl Default for Env {
    fn default() -> Self {
        Env::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_binds_fresh_name_in_topmost_frame() {
        let mut env = Env::new();
        env.set("x", Value::Int(1));
        assert!(matches!(env.get("x"), Some(Value::Int(1))));
    }

    #[test]
    fn set_overwrites_existing_name_in_lower_frame() {
        let mut env = Env::new();
        env.set("x", Value::Int(1));
        let stashed = env.enter_call();
        env.set("x", Value::Int(2));
        env.restore(stashed);
        assert!(matches!(env.get("x"), Some(Value::Int(2))));
    }

    #[test]
    fn call_frame_locals_do_not_leak_to_globals() {
        let mut env = Env::new();
        let stashed = env.enter_call();
        env.define_local("local_only", Value::Int(5));
        env.restore(stashed);
        assert!(env.get("local_only").is_none());
    }

    #[test]
    fn call_sees_globals_defined_before_call() {
        let mut env = Env::new();
        env.set("g", Value::Int(7));
        let stashed = env.enter_call();
        assert!(matches!(env.get("g"), Some(Value::Int(7))));
        env.restore(stashed);
    }
}
